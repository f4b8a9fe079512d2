use serde::Serialize;
use serde_json::Value;

/// JSON Schema primitive a property maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Integer,
    Boolean,
    String,
}

/// OpenAPI schema fragment for a single property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub ty: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl PropertySchema {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Map an xPDO `phptype` onto an OpenAPI property schema.
///
/// Total over all inputs: anything that is not an integer or boolean
/// type is described as a string.
pub fn map_type(php_type: &str) -> PropertySchema {
    match php_type {
        "integer" => PropertySchema {
            ty: SchemaType::Integer,
            format: Some("int32"),
            default: None,
        },
        "bool" | "boolean" => PropertySchema {
            ty: SchemaType::Boolean,
            format: None,
            default: None,
        },
        _ => PropertySchema {
            ty: SchemaType::String,
            format: None,
            default: None,
        },
    }
}

/// Coerce a raw schema default to the JSON type of the property.
///
/// Booleans are false only for `"0"` and the empty string. Integers take the
/// leading signed digits (`"12abc"` is 12, `"abc"` is 0).
pub fn coerce_default(ty: SchemaType, raw: &str) -> Value {
    match ty {
        SchemaType::Boolean => Value::Bool(!(raw.is_empty() || raw == "0")),
        SchemaType::Integer => Value::from(leading_integer(raw)),
        SchemaType::String => Value::String(raw.to_string()),
    }
}

fn leading_integer(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative {
        -value
    } else {
        value
    }
}
