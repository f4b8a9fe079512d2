#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for schema loading and metadata resolution

use super::*;

const CORE_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model package="modx" baseClass="xPDOObject" platform="mysql" defaultEngine="InnoDB" version="1.1">
    <object class="modAccess" extends="xPDOSimpleObject">
        <field key="target" dbtype="varchar" precision="100" phptype="string" null="false" default="" index="index" />
        <field key="principal_class" dbtype="varchar" precision="100" phptype="string" null="false" default="modPrincipal" index="index" />
        <field key="authority" dbtype="int" precision="10" attributes="unsigned" phptype="integer" null="false" default="9999" index="index" />
        <index alias="target" name="target" primary="false" unique="false" type="BTREE">
            <column key="target" length="" collation="A" null="false" />
        </index>
    </object>
    <object class="modAccessCategory" extends="modAccess" table="access_category">
        <field key="context_key" dbtype="varchar" precision="100" phptype="string" null="false" default="" index="index" />
        <index alias="context_key" name="context_key" primary="false" unique="false" type="BTREE">
            <column key="context_key" length="" collation="A" null="false" />
        </index>
    </object>
    <object class="modContext" extends="modAccessibleObject" table="context">
        <field key="key" dbtype="varchar" precision="100" phptype="string" null="false" index="pk" />
        <field key="rank" dbtype="int" precision="11" phptype="integer" null="false" default="0" />
    </object>
    <object class="modAccessibleObject" extends="xPDOObject" />
    <object class="modElement" extends="modAccessibleSimpleObject" table="site_element" />
</model>
"#;

const REGISTRY_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model package="modx.registry.db" baseClass="xPDOObject" platform="mysql">
    <object class="modDbRegisterQueue" extends="xPDOSimpleObject" table="register_queues">
        <field key="name" dbtype="varchar" precision="255" phptype="string" null="false" index="unique" />
        <index alias="name" name="name" primary="false" unique="true" type="BTREE" />
    </object>
    <object class="modRegistryAccess" extends="modAccess" table="registry_access" />
</model>
"#;

#[test]
fn test_parse_schema_reads_package_and_objects() {
    let file = parse_schema(CORE_SCHEMA).unwrap();
    assert_eq!(file.package, "modx");
    let classes: Vec<_> = file.entities.iter().map(|e| e.class_name.as_str()).collect();
    assert_eq!(
        classes,
        vec![
            "modAccess",
            "modAccessCategory",
            "modContext",
            "modAccessibleObject",
            "modElement"
        ]
    );
}

#[test]
fn test_parse_schema_reads_fields_and_indices() {
    let file = parse_schema(CORE_SCHEMA).unwrap();
    let access = &file.entities[0];
    assert_eq!(access.extends.as_deref(), Some("xPDOSimpleObject"));
    assert!(!access.has_table());
    assert_eq!(access.fields.len(), 3);
    assert_eq!(access.fields[2], FieldMeta::new("authority", "integer", "9999"));
    assert_eq!(access.indices, vec![IndexMeta::new("target")]);

    let context = &file.entities[2];
    assert_eq!(context.table, "context");
    // missing default attribute means no default
    assert_eq!(context.fields[0].default, "");
}

#[test]
fn test_parse_schema_self_closing_object() {
    let file = parse_schema(CORE_SCHEMA).unwrap();
    let element = &file.entities[4];
    assert_eq!(element.class_name, "modElement");
    assert_eq!(element.table, "site_element");
    assert!(element.fields.is_empty());
}

#[test]
fn test_parse_schema_rejects_broken_xml() {
    let err = parse_schema("<model package=\"modx\"><object class=\"a\"></model>").unwrap_err();
    assert!(matches!(err, crate::error::BuildError::SchemaParse { .. }));
}

#[test]
fn test_parse_schema_rejects_empty_document() {
    assert!(parse_schema("").is_err());
}

#[test]
fn test_package_rules_resolve() {
    let rules = PackageRules::default();
    assert_eq!(rules.resolve("modx"), "");
    assert_eq!(rules.resolve("modx.registry.db"), "registry.db");
    assert_eq!(rules.resolve("thirdparty"), "thirdparty");
}

#[test]
fn test_qualified_name() {
    assert_eq!(qualified_name("", "modContext"), "modContext");
    assert_eq!(qualified_name("sources", "modMediaSource"), "sources.modMediaSource");
}

fn metadata() -> SchemaMetadata {
    let files = vec![
        parse_schema(CORE_SCHEMA).unwrap(),
        parse_schema(REGISTRY_SCHEMA).unwrap(),
    ];
    SchemaMetadata::from_files(&files, &PackageRules::default())
}

#[test]
fn test_schema_metadata_inherits_fields_root_first() {
    let meta = metadata();
    let fields = meta.field_meta("modAccessCategory").unwrap();
    let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["id", "target", "principal_class", "authority", "context_key"]
    );
    assert_eq!(fields[0].php_type, "integer");
}

#[test]
fn test_schema_metadata_inherits_indices() {
    let meta = metadata();
    let aliases: Vec<_> = meta
        .index_meta("modAccessCategory")
        .into_iter()
        .map(|i| i.alias)
        .collect();
    assert_eq!(aliases, vec!["PRIMARY", "target", "context_key"]);
}

#[test]
fn test_schema_metadata_plain_object_has_no_id() {
    let meta = metadata();
    let fields = meta.field_meta("modContext").unwrap();
    assert!(fields.iter().all(|f| f.key != "id"));
    assert!(meta.index_meta("modContext").is_empty());
}

#[test]
fn test_schema_metadata_qualified_lookup_across_packages() {
    let meta = metadata();
    let queue = meta.field_meta("registry.db.modDbRegisterQueue").unwrap();
    assert_eq!(queue.len(), 2);
    assert!(meta.field_meta("modDbRegisterQueue").is_none());

    // parent lives in the base package
    let access = meta.field_meta("registry.db.modRegistryAccess").unwrap();
    assert!(access.iter().any(|f| f.key == "principal_class"));
}

#[test]
fn test_schema_metadata_unknown_class() {
    let meta = metadata();
    assert!(meta.field_meta("modNope").is_none());
    assert!(meta.index_meta("modNope").is_empty());
}

#[test]
fn test_schema_metadata_cycle_terminates() {
    let xml = r#"<model package="modx">
        <object class="a" extends="b" table="a"><field key="x" phptype="string" /></object>
        <object class="b" extends="a" table="b"><field key="y" phptype="string" /></object>
    </model>"#;
    let meta = SchemaMetadata::from_files(&[parse_schema(xml).unwrap()], &PackageRules::default());
    let keys: Vec<_> = meta
        .field_meta("a")
        .unwrap()
        .into_iter()
        .map(|f| f.key)
        .collect();
    assert_eq!(keys, vec!["y", "x"]);
}

#[test]
fn test_child_field_overrides_inherited_in_place() {
    let xml = r#"<model package="modx">
        <object class="base" extends="xPDOSimpleObject"><field key="name" phptype="string" default="a" /></object>
        <object class="child" extends="base" table="c"><field key="name" phptype="string" default="b" /></object>
    </model>"#;
    let meta = SchemaMetadata::from_files(&[parse_schema(xml).unwrap()], &PackageRules::default());
    let fields = meta.field_meta("child").unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[1], FieldMeta::new("name", "string", "b"));
}

#[test]
fn test_child_index_overrides_inherited_in_place() {
    let xml = r#"<model package="modx">
        <object class="modBase" extends="xPDOSimpleObject">
            <field key="name" phptype="string" />
            <index alias="name" name="name" unique="false" />
            <index alias="rank" name="rank" unique="false" />
        </object>
        <object class="modChild" extends="modBase" table="child">
            <index alias="name" name="name" unique="true" />
            <index alias="extra" name="extra" unique="false" />
        </object>
    </model>"#;
    let meta = SchemaMetadata::from_files(&[parse_schema(xml).unwrap()], &PackageRules::default());
    let aliases: Vec<_> = meta
        .index_meta("modChild")
        .into_iter()
        .map(|i| i.alias)
        .collect();
    assert_eq!(aliases, vec!["PRIMARY", "name", "rank", "extra"]);
}

#[test]
fn test_parse_schema_rejects_bad_attribute_escape() {
    let xml = r#"<model package="modx"><object class="mod&bogus;" table="t" /></model>"#;
    let err = parse_schema(xml).unwrap_err();
    match err {
        crate::error::BuildError::SchemaParse { path, message } => {
            assert!(path.is_none());
            assert!(message.contains("`class`"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_in_memory_metadata() {
    let meta = InMemoryMetadata::new().with_class(
        "modThing",
        vec![FieldMeta::new("name", "string", "")],
        vec![IndexMeta::new("PRIMARY")],
    );
    assert_eq!(meta.field_meta("modThing").unwrap().len(), 1);
    assert!(meta.index_meta("modThing")[0].is_primary());
    assert!(meta.field_meta("other").is_none());
}
