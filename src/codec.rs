//! Field codec: wire JSON values <-> stored SQLite values.
//!
//! Writes never fail on shape: a field that should hold an array but does not is stored as `[]`,
//! and stored JSON that cannot be parsed reads back as `[]`.

use crate::config::{FieldSpec, FieldType, IdStrategy, ResourceKind};
use crate::error::AppError;
use serde_json::{Map, Value};

/// Serialize an array-valued field. Anything that is not an array is stored as `[]`.
pub fn encode_json_array(input: &Value) -> String {
    match input {
        Value::Array(_) => input.to_string(),
        _ => "[]".to_string(),
    }
}

/// Parse stored array text. Missing, corrupt, or non-array text yields an empty array.
pub fn decode_json_array(stored: Option<&str>) -> Value {
    match stored.map(serde_json::from_str::<Value>) {
        Some(Ok(v @ Value::Array(_))) => v,
        _ => Value::Array(Vec::new()),
    }
}

/// Truthiness of a wire value, stored as 1 or 0.
pub fn encode_bool(input: &Value) -> i64 {
    let truthy = match input {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
    i64::from(truthy)
}

/// Only integer 1 or boolean true read back as true.
pub fn decode_bool(stored: &Value) -> bool {
    match stored {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    }
}

/// Strings are kept verbatim, arrays become JSON text, anything else becomes `[]`.
pub fn encode_text_or_array(input: &Value) -> String {
    match input {
        Value::String(s) => s.clone(),
        other => encode_json_array(other),
    }
}

/// Text holding a JSON array reads back as that array; any other text is returned as a string.
pub fn decode_text_or_array(stored: &Value) -> Value {
    match stored {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(v @ Value::Array(_)) => v,
            _ => Value::String(s.clone()),
        },
        other => other.clone(),
    }
}

/// Look up a field's value in a request body under any of its accepted names.
pub fn lookup<'a>(body: &'a Map<String, Value>, field: &FieldSpec) -> Option<&'a Value> {
    field.input_names().find_map(|name| body.get(name)).filter(|v| !v.is_null())
}

/// Stored value for one field of a write. Missing or null input takes the field's default.
pub fn encode_field(field: &FieldSpec, input: Option<&Value>) -> Value {
    let default = field.default.value();
    let v = input.filter(|v| !v.is_null()).unwrap_or(&default);
    match field.ty {
        FieldType::JsonArray => Value::String(encode_json_array(v)),
        FieldType::TextOrJsonArray => Value::String(encode_text_or_array(v)),
        FieldType::Bool => Value::Number(encode_bool(v).into()),
        _ if v.is_null() => Value::Null,
        FieldType::Text => match v {
            Value::String(_) => v.clone(),
            Value::Number(n) => Value::String(n.to_string()),
            Value::Bool(b) => Value::String(b.to_string()),
            other => Value::String(other.to_string()),
        },
        FieldType::Integer => match v {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(truncate))
                .map(Value::from)
                .unwrap_or(Value::Null),
            Value::Bool(b) => Value::Number(i64::from(*b).into()),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(truncate))
                    .map(Value::from)
                    .unwrap_or(Value::Null)
            }
            _ => Value::Null,
        },
        FieldType::Real => match v {
            Value::Number(_) => v.clone(),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::Null,
        },
    }
}

/// Fractional input for an integer field keeps its whole part.
fn truncate(f: f64) -> i64 {
    f.trunc() as i64
}

/// JSON number for a stored REAL. Whole values read back as integers.
pub fn number_from_f64(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        Value::from(f as i64)
    } else {
        serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Wire value for one stored field.
pub fn decode_field(field: &FieldSpec, stored: &Value) -> Value {
    match field.ty {
        FieldType::Bool => Value::Bool(decode_bool(stored)),
        FieldType::JsonArray => decode_json_array(stored.as_str()),
        FieldType::TextOrJsonArray => decode_text_or_array(stored),
        FieldType::Text | FieldType::Integer | FieldType::Real => stored.clone(),
    }
}

/// Build the wire object for a stored row keyed by column name.
pub fn decode_row(kind: &ResourceKind, row: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    out.insert(
        kind.id_wire.to_string(),
        row.get(kind.id_column).cloned().unwrap_or(Value::Null),
    );
    for field in kind.fields {
        let stored = row.get(field.column).unwrap_or(&Value::Null);
        out.insert(field.wire.to_string(), decode_field(field, stored));
    }
    for (wire, source) in kind.presentation.mirrors {
        let v = out.get(*source).cloned().unwrap_or(Value::Null);
        out.insert((*wire).to_string(), v);
    }
    for (wire, value) in kind.presentation.constants {
        out.insert((*wire).to_string(), Value::Number((*value).into()));
    }
    Value::Object(out)
}

/// Time-ordered, collision-resistant identifier (UUIDv7: millisecond timestamp + random bits).
pub fn generate_time_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Parse an identifier taken from a URL path.
pub fn parse_path_id(kind: &ResourceKind, raw: &str) -> Result<Value, AppError> {
    if kind.id_strategy.is_integer() {
        let n: i64 = raw
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid {} id: '{}'", kind.name, raw)))?;
        Ok(Value::Number(n.into()))
    } else {
        Ok(Value::String(raw.to_string()))
    }
}

/// Identifier to insert for a new row. `None` lets the store assign one.
pub fn id_for_create(kind: &ResourceKind, body: &Map<String, Value>) -> Result<Option<Value>, AppError> {
    let supplied = body.get(kind.id_wire).filter(|v| !v.is_null());
    Ok(match kind.id_strategy {
        IdStrategy::AutoIncrement => None,
        IdStrategy::IntegerOrAuto => supplied.and_then(as_integer).map(|n| Value::Number(n.into())),
        IdStrategy::TimeDerived => Some(Value::String(generate_time_id())),
        IdStrategy::CallerOrTimeDerived => Some(Value::String(
            supplied.and_then(as_text_id).unwrap_or_else(generate_time_id),
        )),
        IdStrategy::NaturalKey => {
            let key = supplied
                .and_then(as_text_id)
                .ok_or_else(|| AppError::BadRequest(format!("'{}' is required", kind.id_wire)))?;
            Some(Value::String(key))
        }
    })
}

fn as_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_text_id(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::kinds::{FAQ_CATEGORIES, PACKAGES, PROJECTS, REVIEWS, SERVICES};
    use crate::config::{FieldDefault, FieldSpec};
    use serde_json::json;

    #[test]
    fn array_survives_encoding() {
        for arr in [json!([]), json!(["a", "b"]), json!([1, {"x": [true]}])] {
            assert_eq!(decode_json_array(Some(&encode_json_array(&arr))), arr);
        }
    }

    #[test]
    fn non_array_input_is_stored_as_empty_array() {
        assert_eq!(encode_json_array(&json!("a,b")), "[]");
        assert_eq!(encode_json_array(&json!({"a": 1})), "[]");
        assert_eq!(encode_json_array(&Value::Null), "[]");
    }

    #[test]
    fn corrupt_or_missing_text_reads_as_empty_array() {
        assert_eq!(decode_json_array(Some("not json")), json!([]));
        assert_eq!(decode_json_array(Some("{\"a\":1}")), json!([]));
        assert_eq!(decode_json_array(Some("")), json!([]));
        assert_eq!(decode_json_array(None), json!([]));
    }

    #[test]
    fn bool_decoding_is_strict() {
        assert!(decode_bool(&json!(1)));
        assert!(decode_bool(&json!(true)));
        assert!(!decode_bool(&json!(0)));
        assert!(!decode_bool(&json!(2)));
        assert!(!decode_bool(&json!("1")));
        assert!(!decode_bool(&Value::Null));
        for b in [true, false] {
            assert_eq!(decode_bool(&json!(encode_bool(&json!(b)))), b);
        }
    }

    #[test]
    fn bool_encoding_follows_truthiness() {
        assert_eq!(encode_bool(&json!("yes")), 1);
        assert_eq!(encode_bool(&json!("")), 0);
        assert_eq!(encode_bool(&json!(0)), 0);
        assert_eq!(encode_bool(&json!(3)), 1);
        assert_eq!(encode_bool(&Value::Null), 0);
    }

    #[test]
    fn requested_services_keeps_plain_text() {
        assert_eq!(encode_text_or_array(&json!("SEO")), "SEO");
        assert_eq!(encode_text_or_array(&json!(["SEO", "Ads"])), "[\"SEO\",\"Ads\"]");
        assert_eq!(decode_text_or_array(&json!("SEO")), json!("SEO"));
        assert_eq!(decode_text_or_array(&json!("[\"SEO\"]")), json!(["SEO"]));
    }

    #[test]
    fn missing_fields_take_their_defaults() {
        let title = FieldSpec::new("title", FieldType::Text, FieldDefault::EmptyString);
        let order = FieldSpec::new("display_order", FieldType::Integer, FieldDefault::Null);
        let active = FieldSpec::new("is_active", FieldType::Bool, FieldDefault::False);
        let features = FieldSpec::new("features", FieldType::JsonArray, FieldDefault::EmptyArray);
        assert_eq!(encode_field(&title, None), json!(""));
        assert_eq!(encode_field(&order, Some(&Value::Null)), Value::Null);
        assert_eq!(encode_field(&active, None), json!(0));
        assert_eq!(encode_field(&features, None), json!("[]"));
        assert_eq!(encode_field(&order, Some(&json!("7"))), json!(7));
    }

    #[test]
    fn fractional_input_for_integer_fields_is_truncated() {
        let order = FieldSpec::new("display_order", FieldType::Integer, FieldDefault::Null);
        assert_eq!(encode_field(&order, Some(&json!(1.5))), json!(1));
        assert_eq!(encode_field(&order, Some(&json!(-2.9))), json!(-2));
        assert_eq!(encode_field(&order, Some(&json!("42.5"))), json!(42));
        assert_eq!(encode_field(&order, Some(&json!("soon"))), Value::Null);
    }

    #[test]
    fn whole_reals_read_back_as_integers() {
        assert_eq!(number_from_f64(100.0), json!(100));
        assert_eq!(number_from_f64(99.5), json!(99.5));
        assert_eq!(number_from_f64(f64::NAN), Value::Null);
    }

    #[test]
    fn lookup_accepts_aliases() {
        let body = json!({"order": 4, "isActive": true});
        let body = body.as_object().unwrap();
        let order = PACKAGES.field_by_column("display_order").unwrap();
        let active = PACKAGES.field_by_column("is_active").unwrap();
        assert_eq!(lookup(body, order), Some(&json!(4)));
        assert_eq!(lookup(body, active), Some(&json!(true)));
    }

    #[test]
    fn review_rows_use_testimonial_names() {
        let row = json!({
            "id": "r1", "name": "Sara", "experience": "30 months", "image": "/uploads/a.jpg",
            "isActive": 1, "ordering": 2
        });
        let out = decode_row(&REVIEWS, row.as_object().unwrap());
        assert_eq!(out["clientName"], "Sara");
        assert_eq!(out["projectValue"], "30 months");
        assert_eq!(out["projectDuration"], "30 months");
        assert_eq!(out["projectImage"], "/uploads/a.jpg");
        assert_eq!(out["isActive"], true);
        assert_eq!(out["order"], 2);
        assert_eq!(out["rating"], 5);
    }

    #[test]
    fn service_row_decodes_arrays_and_flag() {
        let row = json!({"id": 1, "features": "[\"a\"]", "benefits": "oops", "is_active": 0});
        let out = decode_row(&SERVICES, row.as_object().unwrap());
        assert_eq!(out["features"], json!(["a"]));
        assert_eq!(out["benefits"], json!([]));
        assert_eq!(out["is_active"], false);
    }

    #[test]
    fn path_ids_follow_strategy() {
        assert_eq!(parse_path_id(&PACKAGES, "12").unwrap(), json!(12));
        assert!(matches!(parse_path_id(&PACKAGES, "abc"), Err(AppError::BadRequest(_))));
        assert_eq!(parse_path_id(&PROJECTS, "p-1").unwrap(), json!("p-1"));
    }

    #[test]
    fn create_ids_follow_strategy() {
        let empty = Map::new();
        assert_eq!(id_for_create(&PACKAGES, &empty).unwrap(), None);
        let explicit = json!({"id": 9});
        assert_eq!(id_for_create(&PACKAGES, explicit.as_object().unwrap()).unwrap(), Some(json!(9)));
        let caller = json!({"id": "tower-1"});
        assert_eq!(
            id_for_create(&PROJECTS, caller.as_object().unwrap()).unwrap(),
            Some(json!("tower-1"))
        );
        assert!(id_for_create(&PROJECTS, &empty).unwrap().unwrap().is_string());
        assert!(matches!(id_for_create(&FAQ_CATEGORIES, &empty), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn time_ids_do_not_collide() {
        let a = generate_time_id();
        let b = generate_time_id();
        assert_ne!(a, b);
    }
}
