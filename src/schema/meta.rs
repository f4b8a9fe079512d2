//! Field and index metadata lookup by qualified class name.
//!
//! The generator never reads `field`/`index` elements directly. It asks a
//! [`MetadataSource`], which for real runs is [`SchemaMetadata`] (built from
//! the full set of loaded schema files, with inheritance resolved) and for
//! tests is usually an [`InMemoryMetadata`] fixture.

use super::types::{qualified_name, EntityDefinition, FieldMeta, IndexMeta, PackageRules, SchemaFile};
use std::collections::{HashMap, HashSet};

/// Source of per-class field and index metadata
pub trait MetadataSource {
    /// All fields of a class including inherited ones, or `None` when the
    /// class is unknown.
    fn field_meta(&self, qualified_class: &str) -> Option<Vec<FieldMeta>>;

    /// All indices of a class including inherited ones. Unknown classes
    /// have none.
    fn index_meta(&self, qualified_class: &str) -> Vec<IndexMeta>;
}

/// Fixture-backed metadata keyed by qualified class name
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadata {
    classes: HashMap<String, (Vec<FieldMeta>, Vec<IndexMeta>)>,
}

impl InMemoryMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a class.
    pub fn insert(
        &mut self,
        qualified_class: impl Into<String>,
        fields: Vec<FieldMeta>,
        indices: Vec<IndexMeta>,
    ) -> &mut Self {
        self.classes.insert(qualified_class.into(), (fields, indices));
        self
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_class(
        mut self,
        qualified_class: impl Into<String>,
        fields: Vec<FieldMeta>,
        indices: Vec<IndexMeta>,
    ) -> Self {
        self.insert(qualified_class, fields, indices);
        self
    }
}

impl MetadataSource for InMemoryMetadata {
    fn field_meta(&self, qualified_class: &str) -> Option<Vec<FieldMeta>> {
        self.classes.get(qualified_class).map(|(f, _)| f.clone())
    }

    fn index_meta(&self, qualified_class: &str) -> Vec<IndexMeta> {
        self.classes
            .get(qualified_class)
            .map(|(_, i)| i.clone())
            .unwrap_or_default()
    }
}

/// Base class every table-backed xPDO object with an auto-increment key extends
const SIMPLE_OBJECT: &str = "xPDOSimpleObject";
/// Root of the xPDO hierarchy; adds no columns
const BASE_OBJECT: &str = "xPDOObject";

#[derive(Debug, Clone)]
struct ClassEntry {
    package: String,
    entity: EntityDefinition,
}

/// Metadata resolved from a set of parsed schema files
///
/// Fields and indices are inherited along `extends`: ancestors first, then
/// the class's own elements. A field (by key) or index (by alias) redeclared
/// by a descendant replaces the inherited one in place.
#[derive(Debug, Clone, Default)]
pub struct SchemaMetadata {
    by_qualified: HashMap<String, ClassEntry>,
    by_class: HashMap<String, Vec<String>>,
}

impl SchemaMetadata {
    pub fn from_files(files: &[SchemaFile], rules: &PackageRules) -> Self {
        let mut meta = SchemaMetadata::default();
        for file in files {
            let package = rules.resolve(&file.package);
            for entity in &file.entities {
                let qualified = qualified_name(&package, &entity.class_name);
                meta.by_class
                    .entry(entity.class_name.clone())
                    .or_default()
                    .push(qualified.clone());
                meta.by_qualified.insert(
                    qualified,
                    ClassEntry {
                        package: package.clone(),
                        entity: entity.clone(),
                    },
                );
            }
        }
        meta
    }

    /// Number of classes known to this source.
    pub fn len(&self) -> usize {
        self.by_qualified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_qualified.is_empty()
    }

    /// Find the parent of a class: same package first, then any package.
    fn resolve_parent(&self, package: &str, parent: &str) -> Option<&ClassEntry> {
        let local = qualified_name(package, parent);
        if let Some(entry) = self.by_qualified.get(&local) {
            return Some(entry);
        }
        if let Some(entry) = self.by_qualified.get(parent) {
            return Some(entry);
        }
        self.by_class
            .get(parent)
            .and_then(|names| names.first())
            .and_then(|name| self.by_qualified.get(name))
    }

    /// Root-first chain of entities for a class, plus the name of the
    /// built-in base the chain ends on, if any.
    fn lineage(&self, qualified_class: &str) -> Option<(Vec<&EntityDefinition>, Option<&str>)> {
        let mut entry = self.by_qualified.get(qualified_class)?;
        let mut chain = vec![&entry.entity];
        let mut seen = HashSet::from([qualified_name(&entry.package, &entry.entity.class_name)]);
        let mut builtin = None;

        while let Some(parent) = entry.entity.extends.as_deref() {
            if parent == SIMPLE_OBJECT || parent == BASE_OBJECT {
                builtin = Some(parent);
                break;
            }
            let Some(next) = self.resolve_parent(&entry.package, parent) else {
                tracing::debug!(class = %qualified_class, parent, "parent class not found in loaded schemas");
                break;
            };
            if !seen.insert(qualified_name(&next.package, &next.entity.class_name)) {
                tracing::warn!(class = %qualified_class, parent, "inheritance cycle detected");
                break;
            }
            chain.push(&next.entity);
            entry = next;
        }

        chain.reverse();
        Some((chain, builtin))
    }
}

impl MetadataSource for SchemaMetadata {
    fn field_meta(&self, qualified_class: &str) -> Option<Vec<FieldMeta>> {
        let (chain, builtin) = self.lineage(qualified_class)?;
        let mut fields: Vec<FieldMeta> = Vec::new();
        if builtin == Some(SIMPLE_OBJECT) {
            fields.push(FieldMeta::new("id", "integer", ""));
        }
        for entity in chain {
            for field in &entity.fields {
                match fields.iter_mut().find(|f| f.key == field.key) {
                    Some(existing) => *existing = field.clone(),
                    None => fields.push(field.clone()),
                }
            }
        }
        Some(fields)
    }

    fn index_meta(&self, qualified_class: &str) -> Vec<IndexMeta> {
        let Some((chain, builtin)) = self.lineage(qualified_class) else {
            return Vec::new();
        };
        let mut indices = Vec::new();
        if builtin == Some(SIMPLE_OBJECT) {
            indices.push(IndexMeta::new(super::types::PRIMARY_INDEX));
        }
        for entity in chain {
            for index in &entity.indices {
                match indices.iter_mut().find(|i| i.alias == index.alias) {
                    Some(existing) => *existing = index.clone(),
                    None => indices.push(index.clone()),
                }
            }
        }
        indices
    }
}
