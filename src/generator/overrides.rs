//! Entity-specific path rewrites layered on the default generator.
//!
//! Some entities are only meaningful underneath a parent resource. Their
//! generically derived paths (`/context-setting/{id}`) are rewritten into
//! the nested routes the API actually serves
//! (`/context/{contextKey}/setting/{settingKey}`), gain the parent key as a
//! path parameter and are grouped under the parent's tag.
//!
//! The registry is a plain map from class name to a [`PathOverride`]. A class
//! without an entry uses [`build_default_paths`].

use super::paths::{build_default_paths, rename_path, PathMap, PathRequest};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Produces the complete path set for one entity, replacing the default.
pub trait PathOverride: Send + Sync {
    fn paths(&self, req: &PathRequest<'_>) -> PathMap;
}

impl<F> PathOverride for F
where
    F: Fn(&PathRequest<'_>) -> PathMap + Send + Sync,
{
    fn paths(&self, req: &PathRequest<'_>) -> PathMap {
        self(req)
    }
}

/// How item-level operations receive the nested parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ItemParameters {
    /// Replace the generic `id` parameter entirely
    Replace(Vec<Value>),
    /// Keep `id` and add these after it
    Append(Vec<Value>),
}

const COLLECTION_METHODS: [&str; 2] = ["get", "post"];
const ITEM_METHODS: [&str; 3] = ["get", "put", "delete"];

/// Declarative rewrite of the default path set into a nested resource
#[derive(Debug, Clone, PartialEq)]
pub struct NestedResource {
    /// New key for the collection path; `None` keeps `{uri}`
    pub collection_path: Option<String>,
    /// New key for the item path; `None` keeps `{uri}/{id}`
    pub item_path: Option<String>,
    /// Appended to the collection `get` and `post` operations
    pub collection_parameters: Vec<Value>,
    pub item_parameters: ItemParameters,
    /// Replaces the per-entity tag on all five operations
    pub tag: String,
}

impl NestedResource {
    /// Rewrite an existing path set. Keys the rewrite expects but cannot
    /// find are left as they are.
    pub fn apply_to(&self, req: &PathRequest<'_>, mut paths: PathMap) -> PathMap {
        let collection_key = rename_or_keep(&mut paths, req, req.uri, self.collection_path.as_deref());
        let item_key = rename_or_keep(&mut paths, req, &req.item_uri(), self.item_path.as_deref());

        if let Some(item) = paths.get_mut(&collection_key) {
            for method in COLLECTION_METHODS {
                if let Some(op) = item.get_mut(method) {
                    append_parameters(op, &self.collection_parameters);
                    op["tags"] = json!([self.tag]);
                }
            }
        }

        if let Some(item) = paths.get_mut(&item_key) {
            for method in ITEM_METHODS {
                if let Some(op) = item.get_mut(method) {
                    match &self.item_parameters {
                        ItemParameters::Replace(params) => op["parameters"] = Value::Array(params.clone()),
                        ItemParameters::Append(params) => append_parameters(op, params),
                    }
                    op["tags"] = json!([self.tag]);
                }
            }
        }

        paths
    }
}

impl PathOverride for NestedResource {
    fn paths(&self, req: &PathRequest<'_>) -> PathMap {
        self.apply_to(req, build_default_paths(req))
    }
}

/// Rename `from` to `to` when a target is given. Returns the key the path
/// item lives under afterwards; a missing source key is logged and the
/// rename skipped.
fn rename_or_keep(paths: &mut PathMap, req: &PathRequest<'_>, from: &str, to: Option<&str>) -> String {
    let Some(to) = to else {
        return from.to_string();
    };
    if rename_path(paths, from, to) {
        to.to_string()
    } else {
        tracing::warn!(
            class = req.class_name,
            path = from,
            target = to,
            "override expected a default path that was not generated; rename skipped"
        );
        from.to_string()
    }
}

fn append_parameters(op: &mut Value, params: &[Value]) {
    if params.is_empty() {
        return;
    }
    match op.get_mut("parameters").and_then(Value::as_array_mut) {
        Some(existing) => existing.extend(params.iter().cloned()),
        None => op["parameters"] = Value::Array(params.to_vec()),
    }
}

/// Required path parameter object
pub fn path_parameter(name: &str, description: &str, ty: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "description": description,
        "required": true,
        "schema": { "type": ty }
    })
}

/// Class name → override
#[derive(Default)]
pub struct OverrideRegistry {
    overrides: HashMap<String, Box<dyn PathOverride>>,
}

impl std::fmt::Debug for OverrideRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.overrides.keys().collect();
        names.sort();
        f.debug_struct("OverrideRegistry").field("overrides", &names).finish()
    }
}

impl OverrideRegistry {
    /// A registry with no overrides; every entity uses the default paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with the core nested resources (contexts and dashboard
    /// widget placements) registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("modContext", context_override());
        registry.register("modContextSetting", context_setting_override());
        registry.register("modContextResource", context_resource_override());
        registry.register("modDashboardWidgetPlacement", dashboard_widget_placement_override());
        registry
    }

    /// Register an override, replacing any existing one for the class.
    pub fn register(&mut self, class_name: impl Into<String>, path_override: impl PathOverride + 'static) {
        self.overrides.insert(class_name.into(), Box::new(path_override));
    }

    pub fn get(&self, class_name: &str) -> Option<&dyn PathOverride> {
        self.overrides.get(class_name).map(|o| o.as_ref())
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.overrides.contains_key(class_name)
    }

    /// Paths for an entity: its override when registered, otherwise the
    /// default generator.
    pub fn paths_for(&self, req: &PathRequest<'_>) -> PathMap {
        match self.get(req.class_name) {
            Some(path_override) => path_override.paths(req),
            None => build_default_paths(req),
        }
    }
}

const CONTEXTS_TAG: &str = "Contexts";
const DASHBOARD_TAG: &str = "Dashboard";

fn context_key_parameter(description: &str) -> Value {
    path_parameter("contextKey", description, "integer")
}

/// `/context/{id}` → `/context/{contextKey}`
pub fn context_override() -> NestedResource {
    NestedResource {
        collection_path: None,
        item_path: Some("/context/{contextKey}".to_string()),
        collection_parameters: Vec::new(),
        item_parameters: ItemParameters::Replace(vec![context_key_parameter("The key of the context.")]),
        tag: CONTEXTS_TAG.to_string(),
    }
}

/// `/context-setting` → `/context/{contextKey}/setting/{settingKey}`
pub fn context_setting_override() -> NestedResource {
    let context_key = context_key_parameter("The key of the associated context.");
    NestedResource {
        collection_path: Some("/context/{contextKey}/setting".to_string()),
        item_path: Some("/context/{contextKey}/setting/{settingKey}".to_string()),
        collection_parameters: vec![context_key.clone()],
        item_parameters: ItemParameters::Replace(vec![
            context_key,
            path_parameter("settingKey", "The key of the context setting.", "integer"),
        ]),
        tag: CONTEXTS_TAG.to_string(),
    }
}

/// `/context-resource` → `/context/{contextKey}/resource/{resourceId}`
pub fn context_resource_override() -> NestedResource {
    let context_key = context_key_parameter("The key of the associated context.");
    NestedResource {
        collection_path: Some("/context/{contextKey}/resource".to_string()),
        item_path: Some("/context/{contextKey}/resource/{resourceId}".to_string()),
        collection_parameters: vec![context_key.clone()],
        item_parameters: ItemParameters::Replace(vec![
            context_key,
            path_parameter(
                "resourceId",
                "The ID of the resource assigned to the context.",
                "integer",
            ),
        ]),
        tag: CONTEXTS_TAG.to_string(),
    }
}

/// `/dashboard-widget-placement` → `/dashboard/{dashboardId}/widget/{id}`
pub fn dashboard_widget_placement_override() -> NestedResource {
    let dashboard = path_parameter(
        "dashboardId",
        "The ID of the dashboard that a widget is placed on.",
        "integer",
    );
    NestedResource {
        collection_path: Some("/dashboard/{dashboardId}/widget".to_string()),
        item_path: Some("/dashboard/{dashboardId}/widget/{id}".to_string()),
        collection_parameters: vec![dashboard.clone()],
        item_parameters: ItemParameters::Append(vec![dashboard]),
        tag: DASHBOARD_TAG.to_string(),
    }
}
