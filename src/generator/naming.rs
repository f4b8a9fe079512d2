//! Titles and URIs derived from xPDO class names.
//!
//! `modTemplateVarResourceGroup` → `Template Var Resource Group` and
//! `/template-var-resource-group`.

/// Namespace prefix carried by core class names
pub const CLASS_PREFIX: &str = "mod";

/// Split a class name on upper-case boundaries after dropping the namespace
/// prefix. Only the first character is lower-cased before splitting, so
/// internal capitals still start new words.
fn words(class_name: &str) -> Option<Vec<String>> {
    let rest = class_name.strip_prefix(CLASS_PREFIX)?;
    let mut chars = rest.chars();
    let mut current: String = chars
        .next()
        .map(|c| c.to_ascii_lowercase().to_string())
        .unwrap_or_default();
    let mut out = Vec::new();
    for ch in chars {
        if ch.is_ascii_uppercase() {
            out.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    out.push(current);
    Some(out)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Human readable title, e.g. `modTemplateVar` → `Template Var`.
///
/// Names without the namespace prefix are returned unchanged.
pub fn title_from_class(class_name: &str) -> String {
    match words(class_name) {
        Some(words) => words
            .iter()
            .map(|w| capitalize(w))
            .collect::<Vec<_>>()
            .join(" "),
        None => class_name.to_string(),
    }
}

/// REST collection URI for a class, e.g. `modTemplateVar` → `/template-var`.
///
/// A non-empty package is prepended with dots turned into slashes
/// (`registry.db` + `modSetting` → `/registry/db/setting`). `modClassMap`
/// is always `/class`.
pub fn uri_from_class(class_name: &str, package: &str) -> String {
    if class_name == "modClassMap" {
        return "/class".to_string();
    }
    let slug = match words(class_name) {
        Some(words) => words.join("-").to_ascii_lowercase(),
        None => class_name.to_string(),
    };
    if package.is_empty() {
        format!("/{slug}")
    } else {
        format!("/{}/{slug}", package.replace('.', "/"))
    }
}
