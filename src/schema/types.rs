/// One parsed XML schema file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaFile {
    /// Raw `package` attribute of the root `model` element (e.g. `modx.registry.db`)
    pub package: String,
    /// `object` elements in document order
    pub entities: Vec<EntityDefinition>,
}

/// One schema-declared class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityDefinition {
    /// Class name, e.g. `modTemplateVar`
    pub class_name: String,
    /// Parent class from the `extends` attribute
    pub extends: Option<String>,
    /// Table name; empty for abstract classes
    pub table: String,
    /// Inline `field` elements (own fields only, no inheritance)
    pub fields: Vec<FieldMeta>,
    /// Inline `index` elements (own indices only)
    pub indices: Vec<IndexMeta>,
}

impl EntityDefinition {
    /// Abstract classes have no table and describe no columns of their own.
    pub fn has_table(&self) -> bool {
        !self.table.is_empty()
    }
}

/// Metadata for one entity property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Property name
    pub key: String,
    /// xPDO `phptype` (integer, boolean, string, ...)
    pub php_type: String,
    /// Default value as written in the schema; empty means no default
    pub default: String,
}

impl FieldMeta {
    pub fn new(key: impl Into<String>, php_type: impl Into<String>, default: impl Into<String>) -> Self {
        FieldMeta {
            key: key.into(),
            php_type: php_type.into(),
            default: default.into(),
        }
    }
}

/// Metadata for one index of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMeta {
    /// Index alias; `PRIMARY` for the primary key
    pub alias: String,
}

impl IndexMeta {
    pub fn new(alias: impl Into<String>) -> Self {
        IndexMeta {
            alias: alias.into(),
        }
    }

    pub fn is_primary(&self) -> bool {
        self.alias == PRIMARY_INDEX
    }
}

/// Alias xPDO reports for primary key indices
pub const PRIMARY_INDEX: &str = "PRIMARY";

/// How raw `package` attributes map onto namespaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRules {
    /// Package value that denotes the base namespace (`modx`)
    pub default_package: String,
    /// Prefix stripped from every other package (`modx.`)
    pub prefix: String,
}

impl Default for PackageRules {
    fn default() -> Self {
        PackageRules {
            default_package: "modx".to_string(),
            prefix: "modx.".to_string(),
        }
    }
}

impl PackageRules {
    /// Resolve a raw package attribute into the namespace used for URIs and
    /// qualified names. The base package resolves to an empty string.
    pub fn resolve(&self, raw: &str) -> String {
        if raw == self.default_package {
            return String::new();
        }
        raw.strip_prefix(self.prefix.as_str()).unwrap_or(raw).to_string()
    }
}

/// `{package}.{class}`, or the bare class for the base namespace
pub fn qualified_name(package: &str, class_name: &str) -> String {
    if package.is_empty() {
        class_name.to_string()
    } else {
        format!("{package}.{class_name}")
    }
}
