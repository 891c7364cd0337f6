//! Payload validation.
//!
//! Turns an untyped JSON body into an [`Item`], or into a [`ValidationReport`]
//! listing every offending field. This runs before the store is called, so
//! the store only ever sees well-formed items.
//!
//! Coercion rules are deliberately lax in the same places a typical JSON API
//! is lax:
//! - integers may arrive as whole floats (`1.0`) or numeric strings (`"1"`)
//! - numbers may arrive as numeric strings (`"9.99"`)
//! - booleans are never numbers
//! - unknown fields are ignored

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::id::ItemId;
use crate::item::Item;

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Location of the field, e.g. `["body", "price"]` or `["path", "item_id"]`.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Extra detail about the failure, e.g. the decoder's position report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<String>,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &'static str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind,
            ctx: None,
        }
    }

    pub fn with_ctx(mut self, ctx: impl Into<String>) -> Self {
        self.ctx = Some(ctx.into());
        self
    }
}

/// Structured per-field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Error)]
#[error("{} validation error(s)", .errors.len())]
#[serde(transparent)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Append every error from `other`, keeping order.
    pub fn merge(mut self, other: ValidationReport) -> Self {
        self.errors.extend(other.errors);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, field: &str, msg: &str, kind: &'static str) {
        self.errors.push(FieldError::new(&["body", field], msg, kind));
    }
}

const MSG_MISSING: &str = "Field required";
const MSG_STRING: &str = "Input should be a valid string";
const MSG_INT: &str = "Input should be a valid integer";
const MSG_INT_PARSE: &str = "Input should be a valid integer, unable to parse string as an integer";
const MSG_INT_FRACTION: &str = "Input should be a valid integer, got a number with a fractional part";
const MSG_FLOAT: &str = "Input should be a valid number";
const MSG_FLOAT_PARSE: &str = "Input should be a valid number, unable to parse string as a number";
const MSG_FINITE: &str = "Input should be a finite number";

/// Parse raw request bytes and validate them as an item.
pub fn validate_item_bytes(body: &[u8]) -> Result<Item, ValidationReport> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        ValidationReport::single(
            FieldError::new(&["body"], "JSON decode error", "json_invalid").with_ctx(e.to_string()),
        )
    })?;
    validate_item(&value)
}

/// Validate an already-decoded JSON value as an item.
///
/// Every field is checked; the report lists all failures, not just the first.
pub fn validate_item(value: &Value) -> Result<Item, ValidationReport> {
    let Some(obj) = value.as_object() else {
        return Err(ValidationReport::single(FieldError::new(
            &["body"],
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        )));
    };

    let mut report = ValidationReport::default();

    let id = required(obj, "id", &mut report).and_then(|v| check(int_field(v), "id", &mut report));
    let name =
        required(obj, "name", &mut report).and_then(|v| check(string_field(v), "name", &mut report));
    let price =
        required(obj, "price", &mut report).and_then(|v| check(float_field(v), "price", &mut report));
    let description = match obj.get("description") {
        None | Some(Value::Null) => Some(None),
        Some(v) => check(string_field(v), "description", &mut report).map(Some),
    };

    match (id, name, price, description) {
        (Some(id), Some(name), Some(price), Some(description)) if report.is_empty() => Ok(Item {
            id: ItemId::new(id),
            name,
            price,
            description,
        }),
        _ => Err(report),
    }
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    report: &mut ValidationReport,
) -> Option<&'a Value> {
    let v = obj.get(field);
    if v.is_none() {
        report.push(field, MSG_MISSING, "missing");
    }
    v
}

fn check<T>(
    result: Result<T, (&'static str, &'static str)>,
    field: &str,
    report: &mut ValidationReport,
) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err((kind, msg)) => {
            report.push(field, msg, kind);
            None
        }
    }
}

fn int_field(v: &Value) -> Result<i64, (&'static str, &'static str)> {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() != 0.0 => Err(("int_from_float", MSG_INT_FRACTION)),
                // i64::MAX is not exactly representable; the upper bound is exclusive.
                Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(("int_parsing", MSG_INT)),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ("int_parsing", MSG_INT_PARSE)),
        _ => Err(("int_type", MSG_INT)),
    }
}

fn float_field(v: &Value) -> Result<f64, (&'static str, &'static str)> {
    let f = match v {
        Value::Number(n) => n.as_f64().ok_or(("float_type", MSG_FLOAT))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ("float_parsing", MSG_FLOAT_PARSE))?,
        _ => return Err(("float_type", MSG_FLOAT)),
    };
    if f.is_finite() {
        Ok(f)
    } else {
        Err(("finite_number", MSG_FINITE))
    }
}

fn string_field(v: &Value) -> Result<String, (&'static str, &'static str)> {
    match v {
        Value::String(s) => Ok(s.clone()),
        _ => Err(("string_type", MSG_STRING)),
    }
}
