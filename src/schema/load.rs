use super::types::{EntityDefinition, FieldMeta, IndexMeta, SchemaFile};
use crate::error::BuildError;
use anyhow::Context;
use quick_xml::events::attributes::Attributes;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// Read and parse an xPDO schema file from disk.
pub fn load_schema_file(path: &Path) -> anyhow::Result<SchemaFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
    parse_schema(&content).map_err(|err| match err {
        BuildError::SchemaParse { message, .. } => BuildError::SchemaParse {
            path: Some(path.to_path_buf()),
            message,
        }
        .into(),
        other => other.into(),
    })
}

/// Parse xPDO schema XML.
///
/// Only the parts the generator needs are read: the root `package`
/// attribute, `object` elements (`class`, `extends`, `table`) and their
/// nested `field` (`key`, `phptype`, `default`) and `index` (`alias`,
/// falling back to `name`) elements. Everything else is ignored.
pub fn parse_schema(xml: &str) -> Result<SchemaFile, BuildError> {
    let mut reader = Reader::from_str(xml);
    let mut file = SchemaFile::default();
    let mut current: Option<EntityDefinition> = None;
    let mut saw_root = false;

    loop {
        let event = reader.read_event().map_err(|e| BuildError::SchemaParse {
            path: None,
            message: format!("XML parse error at byte {}: {}", reader.buffer_position(), e),
        })?;

        match event {
            Event::Start(e) => {
                if !saw_root {
                    saw_root = true;
                    file.package = attribute(&e, "package")?.unwrap_or_default();
                    continue;
                }
                match e.name().as_ref() {
                    b"object" => current = Some(entity_from(&e)?),
                    b"field" | b"index" => push_child(&mut current, &e)?,
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if !saw_root {
                    saw_root = true;
                    file.package = attribute(&e, "package")?.unwrap_or_default();
                    continue;
                }
                match e.name().as_ref() {
                    // self-closing object: no fields of its own
                    b"object" => file.entities.push(entity_from(&e)?),
                    b"field" | b"index" => push_child(&mut current, &e)?,
                    _ => {}
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"object" {
                    if let Some(entity) = current.take() {
                        file.entities.push(entity);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(BuildError::SchemaParse {
            path: None,
            message: "document has no root element".to_string(),
        });
    }
    Ok(file)
}

fn entity_from(e: &BytesStart<'_>) -> Result<EntityDefinition, BuildError> {
    let mut entity = EntityDefinition::default();
    for (key, value) in read_attributes(e.attributes())? {
        match key.as_str() {
            "class" => entity.class_name = value,
            "extends" if !value.is_empty() => entity.extends = Some(value),
            "table" => entity.table = value,
            _ => {}
        }
    }
    Ok(entity)
}

fn push_child(current: &mut Option<EntityDefinition>, e: &BytesStart<'_>) -> Result<(), BuildError> {
    let Some(entity) = current.as_mut() else {
        return Ok(());
    };
    let attrs = read_attributes(e.attributes())?;
    let get = |name: &str| {
        attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    };

    match e.name().as_ref() {
        b"field" => {
            if let Some(key) = get("key") {
                entity.fields.push(FieldMeta::new(
                    key,
                    get("phptype").unwrap_or_default(),
                    get("default").unwrap_or_default(),
                ));
            }
        }
        b"index" => {
            if let Some(alias) = get("alias").or_else(|| get("name")) {
                entity.indices.push(IndexMeta::new(alias));
            }
        }
        _ => {}
    }
    Ok(())
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, BuildError> {
    Ok(read_attributes(e.attributes())?
        .into_iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v))
}

fn read_attributes(attributes: Attributes<'_>) -> Result<Vec<(String, String)>, BuildError> {
    let mut out = Vec::new();
    for attr in attributes {
        let attr = attr.map_err(|e| BuildError::SchemaParse {
            path: None,
            message: format!("XML attribute error: {}", e),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| BuildError::SchemaParse {
                path: None,
                message: format!("invalid value for attribute `{}`: {}", key, e),
            })?
            .into_owned();
        out.push((key, value));
    }
    Ok(out)
}
