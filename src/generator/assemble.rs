use super::naming::{title_from_class, uri_from_class};
use super::overrides::OverrideRegistry;
use super::paths::{PathMap, PathRequest};
use super::schema::{build_collection_schema, build_entity_schema, collection_name};
use crate::schema::{qualified_name, EntityDefinition, MetadataSource, PackageRules, SchemaFile};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Entities on the historical ignore list: content-carrying base types that
/// are not exposed as generic CRUD resources.
pub const DEFAULT_IGNORED: [&str; 3] = ["modElement", "modScript", "modSession"];

/// Why an entity was left out of the generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// On the ignore list
    Ignored,
    /// Abstract class without a table
    NoTable,
    /// The metadata source does not know the class
    NoFieldMeta,
    /// Metadata resolved to zero properties
    NoProperties,
}

impl SkipReason {
    /// Short label used in listings
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Ignored => "ignored",
            SkipReason::NoTable => "no table",
            SkipReason::NoFieldMeta => "no field meta",
            SkipReason::NoProperties => "no properties",
        }
    }
}

/// Diagnostic record for an entity that was not exposed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntity {
    pub class_name: String,
    /// Resolved package namespace (empty for the base package)
    pub package: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = &self.class_name;
        match self.reason {
            SkipReason::Ignored => {
                write!(f, "Skipping model definition for {class} as it is on the ignore list")
            }
            SkipReason::NoTable => write!(f, "Skipping model definition for {class} as it has no table"),
            SkipReason::NoFieldMeta => write!(
                f,
                "Couldn't find field meta for {class} (package {}), skipping",
                self.package
            ),
            SkipReason::NoProperties => {
                write!(f, "Skipping model definition for {class} as it has no properties")
            }
        }
    }
}

/// Schemas and paths produced for one entity, one file or a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutput {
    /// Component schemas keyed by class name (and `{class}Collection`)
    pub schemas: Map<String, Value>,
    pub paths: PathMap,
    pub skipped: Vec<SkippedEntity>,
}

impl BuildOutput {
    /// Fold `other` into `self`. On key collisions the entry from `other`
    /// wins; skip records are concatenated.
    pub fn merge(&mut self, other: BuildOutput) {
        self.schemas.extend(other.schemas);
        self.paths.extend(other.paths);
        self.skipped.extend(other.skipped);
    }

    fn skip(entity: &EntityDefinition, package: &str, reason: SkipReason) -> Self {
        BuildOutput {
            skipped: vec![SkippedEntity {
                class_name: entity.class_name.clone(),
                package: package.to_string(),
                reason,
            }],
            ..Default::default()
        }
    }
}

/// Drives the schema and path generators over parsed schema files
pub struct SpecAssembler<'a> {
    metadata: &'a dyn MetadataSource,
    overrides: &'a OverrideRegistry,
    ignored: HashSet<String>,
    packages: PackageRules,
}

impl<'a> SpecAssembler<'a> {
    /// Assembler with the default ignore list and package rules.
    pub fn new(metadata: &'a dyn MetadataSource, overrides: &'a OverrideRegistry) -> Self {
        SpecAssembler {
            metadata,
            overrides,
            ignored: DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect(),
            packages: PackageRules::default(),
        }
    }

    /// Replace the ignore list.
    pub fn with_ignored<I, S>(mut self, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored = ignored.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_package_rules(mut self, packages: PackageRules) -> Self {
        self.packages = packages;
        self
    }

    pub fn is_ignored(&self, class_name: &str) -> bool {
        self.ignored.contains(class_name)
    }

    /// Process every file in order and merge the results.
    pub fn assemble(&self, files: &[SchemaFile]) -> BuildOutput {
        let mut output = BuildOutput::default();
        for file in files {
            output.merge(self.process_file(file));
        }
        output
    }

    /// Process the entities of one schema file.
    pub fn process_file(&self, file: &SchemaFile) -> BuildOutput {
        let package = self.packages.resolve(&file.package);
        tracing::info!(
            package = %file.package,
            namespace = %package,
            entities = file.entities.len(),
            "processing schema file"
        );
        let mut output = BuildOutput::default();
        for entity in &file.entities {
            output.merge(self.process_entity(entity, &package));
        }
        output
    }

    /// Schemas and paths for a single entity, or a skip record.
    pub fn process_entity(&self, entity: &EntityDefinition, package: &str) -> BuildOutput {
        let class = entity.class_name.as_str();

        if self.is_ignored(class) {
            return BuildOutput::skip(entity, package, SkipReason::Ignored);
        }
        if !entity.has_table() {
            return BuildOutput::skip(entity, package, SkipReason::NoTable);
        }

        let qualified = qualified_name(package, class);
        let fields = match self.metadata.field_meta(&qualified) {
            Some(fields) if !fields.is_empty() => fields,
            _ => return BuildOutput::skip(entity, package, SkipReason::NoFieldMeta),
        };
        let Some(entity_schema) = build_entity_schema(class, &fields) else {
            return BuildOutput::skip(entity, package, SkipReason::NoProperties);
        };
        let indices = self.metadata.index_meta(&qualified);

        let uri = uri_from_class(class, package);
        let title = title_from_class(class);
        let req = PathRequest {
            uri: &uri,
            class_name: class,
            qualified_name: &qualified,
            fields: &fields,
            indices: &indices,
            title: &title,
        };

        let mut output = BuildOutput::default();
        output.schemas.insert(class.to_string(), entity_schema.to_value());
        output
            .schemas
            .insert(collection_name(class), build_collection_schema(class));
        output.paths = self.overrides.paths_for(&req);

        tracing::debug!(
            class,
            qualified = %qualified,
            uri = %uri,
            properties = entity_schema.properties.len(),
            paths = output.paths.len(),
            overridden = self.overrides.contains(class),
            "generated entity"
        );
        output
    }
}
