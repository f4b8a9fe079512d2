use crate::error::BuildError;
use anyhow::Context;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Indentation used when writing the document
const INDENT: &[u8] = b"    ";

/// Load the existing target document.
///
/// Fails when the file cannot be read, is not valid JSON, decodes to an
/// empty value (`null`, `{}`, `[]`, `""`, `false`, `0`) or is not an
/// object. Such a document cannot be merged into safely.
pub fn load_spec_document(path: &Path) -> Result<Value, BuildError> {
    let content = std::fs::read_to_string(path).map_err(|e| BuildError::unreadable_spec(path, e.to_string()))?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| BuildError::unreadable_spec(path, e.to_string()))?;

    if is_empty_value(&value) {
        return Err(BuildError::unreadable_spec(path, "document is empty"));
    }
    if !value.is_object() {
        return Err(BuildError::unreadable_spec(path, "document is not a JSON object"));
    }
    Ok(value)
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Replace `components.schemas` and `paths` in `document`.
///
/// `components` is created when missing; its other members keep their
/// values and order. Every other top-level key is left as it was.
pub fn merge_build_output(document: &mut Value, schemas: Map<String, Value>, paths: Map<String, Value>) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    let components = root
        .entry("components")
        .or_insert_with(|| Value::Object(Map::new()));
    if !components.is_object() {
        tracing::warn!("replacing non-object `components` member");
        *components = Value::Object(Map::new());
    }
    if let Some(components) = components.as_object_mut() {
        components.insert("schemas".to_string(), Value::Object(schemas));
    }

    root.insert("paths".to_string(), Value::Object(paths));
}

/// Serialise a document the way it is persisted: four-space indentation and
/// a trailing newline.
pub fn render_spec_document(document: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    document.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the document next to `path` and rename it into place.
pub fn write_spec_document(path: &Path, document: &Value) -> anyhow::Result<()> {
    let rendered = render_spec_document(document).context("Failed to serialise OpenAPI document")?;
    let tmp = temp_sibling(path);
    {
        let mut file =
            std::fs::File::create(&tmp).with_context(|| format!("Failed to create {}", tmp.display()))?;
        file.write_all(rendered.as_bytes())
            .and_then(|()| file.sync_all())
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        if let Err(cleanup) = std::fs::remove_file(&tmp) {
            tracing::debug!(path = %tmp.display(), error = %cleanup, "failed to remove temporary file");
        }
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }
    tracing::info!(path = %path.display(), "wrote OpenAPI document");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "openapi.json".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
