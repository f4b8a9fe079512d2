use crate::config::{load_build_config, BuildConfig};
use crate::generator::{
    title_from_class, uri_from_class, OverrideRegistry, SkipReason, SkippedEntity, SpecAssembler,
};
use crate::logging::{init_logging, LogConfig};
use crate::schema::{load_schema_file, qualified_name, SchemaFile, SchemaMetadata};
use crate::spec::{load_spec_document, merge_build_output, write_spec_document};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

/// Command-line interface for the xPDO OpenAPI generator
///
/// Without a subcommand, `build` runs with the configured defaults.
#[derive(Parser)]
#[command(name = "xpdo-openapi-gen")]
#[command(about = "Generate OpenAPI schemas and paths from xPDO schema files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log progress at info level (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Regenerate `components.schemas` and `paths` in the OpenAPI document
    Build(BuildArgs),
    /// List every entity with its derived title, URI and generation outcome
    ///
    /// Reads the schema files only; the OpenAPI document is not touched.
    Inspect(SourceArgs),
}

/// Where schemas and configuration come from
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Build configuration file (default: xpdo-openapi.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Schema file to process; repeat for several. Replaces the configured list.
    #[arg(long = "schema", value_name = "FILE")]
    pub schemas: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Target OpenAPI document (overrides config and XPDO_OAS_SPEC)
    #[arg(short, long, value_name = "FILE")]
    pub spec: Option<PathBuf>,

    /// Load and validate everything but write nothing
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Result of a build run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub spec: PathBuf,
    /// Number of component schemas written (entity and collection schemas)
    pub schemas: usize,
    pub paths: usize,
    pub skipped: Vec<SkippedEntity>,
    /// False for dry runs
    pub written: bool,
}

/// Outcome of one entity in an `inspect` listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityStatus {
    Generated { overridden: bool, paths: Vec<String> },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectRow {
    pub qualified_name: String,
    pub title: String,
    pub uri: String,
    pub status: EntityStatus,
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if the configuration or a schema file cannot be loaded,
/// if the target document is missing or invalid, or if writing it fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    init_logging(&log_config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command.unwrap_or_else(|| Commands::Build(BuildArgs::default())) {
        Commands::Build(args) => {
            let config = resolve_config(&args.source, args.spec.clone())?;
            let summary = run_build(&config, args.dry_run, &mut out)?;
            print_summary(&summary, &mut out)?;
        }
        Commands::Inspect(args) => {
            let config = resolve_config(&args, None)?;
            let rows = run_inspect(&config)?;
            print_inspect(&rows, &mut out)?;
        }
    }
    Ok(())
}

/// Merge the config file, environment and command line into one config.
pub fn resolve_config(source: &SourceArgs, spec: Option<PathBuf>) -> anyhow::Result<BuildConfig> {
    let mut config = load_build_config(source.config.as_deref())?.with_env_overrides();
    if !source.schemas.is_empty() {
        config.schemas = source.schemas.clone();
    }
    if let Some(spec) = spec {
        config.spec = spec;
    }
    Ok(config)
}

fn load_schema_files(config: &BuildConfig) -> anyhow::Result<Vec<SchemaFile>> {
    config
        .schemas
        .iter()
        .map(|path| {
            tracing::debug!(path = %path.display(), "loading schema file");
            load_schema_file(path)
        })
        .collect()
}

/// Run the full pipeline: parse schemas, generate, merge into the target
/// document and write it back.
///
/// Skip diagnostics are written to `out` as entities are rejected, before
/// the target document is loaded. When the document cannot be loaded the
/// run fails with [`BuildError::UnreadableSpecDocument`](crate::error::BuildError)
/// and nothing is written.
pub fn run_build(config: &BuildConfig, dry_run: bool, out: &mut dyn Write) -> anyhow::Result<BuildSummary> {
    let files = load_schema_files(config)?;
    let rules = config.package_rules();
    let metadata = SchemaMetadata::from_files(&files, &rules);
    tracing::info!(files = files.len(), classes = metadata.len(), "schemas loaded");

    let overrides = OverrideRegistry::with_defaults();
    let output = SpecAssembler::new(&metadata, &overrides)
        .with_ignored(config.ignore.iter().cloned())
        .with_package_rules(rules)
        .assemble(&files);

    for skipped in &output.skipped {
        writeln!(out, "{skipped}").context("Failed to write diagnostics")?;
    }

    let mut document = load_spec_document(&config.spec)?;
    let summary = BuildSummary {
        spec: config.spec.clone(),
        schemas: output.schemas.len(),
        paths: output.paths.len(),
        skipped: output.skipped,
        written: !dry_run,
    };
    merge_build_output(&mut document, output.schemas, output.paths);

    if dry_run {
        tracing::info!(path = %config.spec.display(), "dry run, document not written");
    } else {
        write_spec_document(&config.spec, &document)?;
    }
    Ok(summary)
}

/// Describe what a build would do with every entity, without touching the
/// target document.
pub fn run_inspect(config: &BuildConfig) -> anyhow::Result<Vec<InspectRow>> {
    let files = load_schema_files(config)?;
    let rules = config.package_rules();
    let metadata = SchemaMetadata::from_files(&files, &rules);
    let overrides = OverrideRegistry::with_defaults();
    let assembler = SpecAssembler::new(&metadata, &overrides)
        .with_ignored(config.ignore.iter().cloned())
        .with_package_rules(rules.clone());

    let mut rows = Vec::new();
    for file in &files {
        let package = rules.resolve(&file.package);
        for entity in &file.entities {
            let class = entity.class_name.as_str();
            let output = assembler.process_entity(entity, &package);
            let status = match output.skipped.first() {
                Some(skipped) => EntityStatus::Skipped(skipped.reason),
                None => EntityStatus::Generated {
                    overridden: overrides.contains(class),
                    paths: output.paths.keys().cloned().collect(),
                },
            };
            rows.push(InspectRow {
                qualified_name: qualified_name(&package, class),
                title: title_from_class(class),
                uri: uri_from_class(class, &package),
                status,
            });
        }
    }
    Ok(rows)
}

fn print_summary(summary: &BuildSummary, out: &mut dyn Write) -> io::Result<()> {
    let verb = if summary.written { "Wrote" } else { "Dry run: would write" };
    writeln!(
        out,
        "{verb} {} schemas and {} paths to {} ({} entities skipped)",
        summary.schemas,
        summary.paths,
        summary.spec.display(),
        summary.skipped.len()
    )
}

fn print_inspect(rows: &[InspectRow], out: &mut dyn Write) -> io::Result<()> {
    for row in rows {
        match &row.status {
            EntityStatus::Generated { overridden, paths } => {
                let kind = if *overridden { "override" } else { "default" };
                writeln!(out, "{}\t{}\t{}\t{kind}", row.qualified_name, row.title, row.uri)?;
                for path in paths {
                    writeln!(out, "\t{path}")?;
                }
            }
            EntityStatus::Skipped(reason) => {
                writeln!(
                    out,
                    "{}\t{}\t{}\tskipped: {}",
                    row.qualified_name,
                    row.title,
                    row.uri,
                    reason.as_str()
                )?;
            }
        }
    }
    Ok(())
}
