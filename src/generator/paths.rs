use super::schema::{collection_name, schema_ref};
use super::types::map_type;
use crate::schema::{FieldMeta, IndexMeta};
use serde_json::{json, Map, Value};

/// Path key → path item object
pub type PathMap = Map<String, Value>;

const FORM_CONTENT: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT: &str = "application/json";

/// Everything the path generators know about one entity
#[derive(Debug, Clone, Copy)]
pub struct PathRequest<'a> {
    /// Collection URI, e.g. `/context-setting`
    pub uri: &'a str,
    pub class_name: &'a str,
    /// `{package}.{class}` used for metadata lookups
    pub qualified_name: &'a str,
    pub fields: &'a [FieldMeta],
    pub indices: &'a [IndexMeta],
    /// Tag applied to every operation
    pub title: &'a str,
}

impl PathRequest<'_> {
    /// Item URI: `{uri}/{id}`
    pub fn item_uri(&self) -> String {
        format!("{}/{{id}}", self.uri)
    }
}

/// Generate the default CRUD path set for an entity.
///
/// - `{uri}`: `get` (list, paginated, filterable by secondary indices) and
///   `post` (create)
/// - `{uri}/{id}`: `get`, `put` and `delete` on the integer primary key
pub fn build_default_paths(req: &PathRequest<'_>) -> PathMap {
    let class = req.class_name;
    let title = req.title;

    let mut list = get_collection_operation(class, title);
    if let Some(params) = list.get_mut("parameters").and_then(Value::as_array_mut) {
        params.extend(index_filter_parameters(req.fields, req.indices));
    }

    let mut paths = PathMap::new();
    paths.insert(
        req.uri.to_string(),
        json!({
            "get": list,
            "post": post_operation(class, title),
        }),
    );
    paths.insert(
        req.item_uri(),
        json!({
            "get": get_operation(class, title),
            "put": put_operation(class, title),
            "delete": delete_operation(class, title),
        }),
    );
    paths
}

/// One optional query parameter per secondary index that names a field.
///
/// Keeps the order the metadata source reports indices in. `PRIMARY` is
/// covered by the `/{id}` path and never becomes a filter.
pub fn index_filter_parameters(fields: &[FieldMeta], indices: &[IndexMeta]) -> Vec<Value> {
    indices
        .iter()
        .filter(|index| !index.is_primary())
        .filter_map(|index| {
            let field = fields.iter().find(|f| f.key == index.alias)?;
            Some(json!({
                "name": index.alias,
                "in": "query",
                "description": format!("Filter on {}", index.alias),
                "required": false,
                "schema": map_type(&field.php_type).to_value(),
            }))
        })
        .collect()
}

/// Rename a path key, keeping its item and the order of every other entry.
///
/// Returns `false` and leaves the map untouched when `from` is absent.
pub fn rename_path(paths: &mut PathMap, from: &str, to: &str) -> bool {
    if !paths.contains_key(from) {
        return false;
    }
    let renamed = std::mem::take(paths)
        .into_iter()
        .map(|(key, item)| if key == from { (to.to_string(), item) } else { (key, item) })
        .collect();
    *paths = renamed;
    true
}

fn json_response(description: String, schema_name: &str) -> Value {
    json!({
        "200": {
            "description": description,
            "content": {
                JSON_CONTENT: {
                    "schema": { "$ref": schema_ref(schema_name) }
                }
            }
        }
    })
}

fn form_body(description: String, class: &str) -> Value {
    json!({
        "description": description,
        "required": true,
        "content": {
            FORM_CONTENT: {
                "schema": { "$ref": schema_ref(class) }
            }
        }
    })
}

fn id_parameter(description: String) -> Value {
    json!({
        "name": "id",
        "in": "path",
        "description": description,
        "required": true,
        "schema": { "type": "integer" }
    })
}

fn get_collection_operation(class: &str, title: &str) -> Value {
    json!({
        "description": format!("Returns a collection of {class} objects."),
        "tags": [title],
        "parameters": [
            { "$ref": "#/components/parameters/LimitParam" },
            { "$ref": "#/components/parameters/OffsetParam" }
        ],
        "responses": json_response(format!("Collection of {class} objects."), &collection_name(class)),
    })
}

fn post_operation(class: &str, title: &str) -> Value {
    json!({
        "description": format!("Creates a new {class} object."),
        "tags": [title],
        "requestBody": form_body(
            format!(
                "To create a new {class} object, send a POST request with the following fields. \
                 Any omitted fields will be set their default. The ID field is automatically set \
                 to the next increment in the database."
            ),
            class,
        ),
        "responses": json_response(format!("New {class} object successfully created."), class),
    })
}

fn get_operation(class: &str, title: &str) -> Value {
    json!({
        "description": format!("Retrieves a single {class} object."),
        "tags": [title],
        "parameters": [
            id_parameter(format!("The ID (primary key) of the {class} object to retrieve."))
        ],
        "responses": json_response(format!("The requested {class} object."), class),
    })
}

fn put_operation(class: &str, title: &str) -> Value {
    json!({
        "description": format!("Updates a {class} object."),
        "tags": [title],
        "parameters": [
            id_parameter(format!("The ID (primary key) of the {class} object to update."))
        ],
        "requestBody": form_body(
            format!("To update a {class} object, send a PUT request with all object fields."),
            class,
        ),
        "responses": json_response(format!("{class} object updated."), class),
    })
}

fn delete_operation(class: &str, title: &str) -> Value {
    json!({
        "description": format!("Deletes a {class} object."),
        "tags": [title],
        "parameters": [
            id_parameter(format!("The ID (primary key) of the {class} object that needs to be removed."))
        ],
        "responses": json_response(format!("{class} object removed."), class),
    })
}
