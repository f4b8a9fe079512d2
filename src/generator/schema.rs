use super::naming::title_from_class;
use super::types::{coerce_default, map_type};
use crate::schema::FieldMeta;
use serde_json::{json, Map, Value};

/// Prefix of component schema references
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Suffix appended to an entity's schema name for its collection wrapper
pub const COLLECTION_SUFFIX: &str = "Collection";

/// `#/components/schemas/{name}`
pub fn schema_ref(name: &str) -> String {
    format!("{SCHEMA_REF_PREFIX}{name}")
}

/// Component key of an entity's collection wrapper, e.g. `modContextCollection`.
pub fn collection_name(class_name: &str) -> String {
    format!("{class_name}{COLLECTION_SUFFIX}")
}

/// OpenAPI object schema for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    pub title: String,
    /// Property name → property schema, in field metadata order
    pub properties: Map<String, Value>,
}

impl EntitySchema {
    pub fn to_value(&self) -> Value {
        json!({
            "title": self.title,
            "type": "object",
            "properties": self.properties,
        })
    }
}

/// Build the object schema for an entity from its field metadata.
///
/// Returns `None` when no properties result; such an entity gets no schema,
/// no collection schema and no paths.
pub fn build_entity_schema(class_name: &str, fields: &[FieldMeta]) -> Option<EntitySchema> {
    let mut properties = Map::new();
    for field in fields {
        let mut property = map_type(&field.php_type);
        if !field.default.is_empty() {
            property.default = Some(coerce_default(property.ty, &field.default));
        }
        properties.insert(field.key.clone(), property.to_value());
    }

    if properties.is_empty() {
        return None;
    }

    Some(EntitySchema {
        title: title_from_class(class_name),
        properties,
    })
}

/// Collection wrapper schema; references the entity schema by name.
pub fn build_collection_schema(class_name: &str) -> Value {
    json!({
        "title": format!("Collection of {class_name} objects."),
        "type": "object",
        "properties": {
            "total": {
                "type": "integer",
                "description": "The total number of results for the request, including applied filters if any."
            },
            "data": {
                "type": "array",
                "items": {
                    "$ref": schema_ref(class_name)
                }
            }
        }
    })
}
