//! Field-level rules. Each helper records its failures and returns the
//! converted value when the field passed.

use serde_json::Value;

use super::{Field, Payload, ValidationErrors};

fn label(field: &str) -> String {
    field.replace('_', " ")
}

pub(super) fn required(field: &str) -> String {
    format!("The {} field is required.", label(field))
}

pub(crate) fn taken(field: &str) -> String {
    format!("The {} has already been taken.", label(field))
}

pub(super) fn invalid_selection(field: &str) -> String {
    format!("The selected {} is invalid.", label(field))
}

pub(super) fn invalid_format(field: &str) -> String {
    format!("The {} field format is invalid.", label(field))
}

fn check_string(
    value: &Value,
    field: &str,
    max: Option<usize>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let Value::String(s) = value else {
        errors.add(field, format!("The {} field must be a string.", label(field)));
        return None;
    };
    if let Some(max) = max {
        if s.chars().count() > max {
            errors.add(
                field,
                format!(
                    "The {} field must not be greater than {max} characters.",
                    label(field)
                ),
            );
            return None;
        }
    }
    Some(s.clone())
}

fn check_integer(value: &Value, field: &str, errors: &mut ValidationErrors) -> Option<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        errors.add(field, format!("The {} field must be an integer.", label(field)));
    }
    parsed
}

/// `required|string|max:N`. Blank strings count as missing.
pub(super) fn required_string(
    payload: &Payload,
    field: &str,
    max: usize,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match payload.field(field) {
        Field::Absent | Field::Null => {
            errors.add(field, required(field));
            None
        }
        Field::Present(Value::String(s)) if s.trim().is_empty() => {
            errors.add(field, required(field));
            None
        }
        Field::Present(value) => check_string(value, field, Some(max), errors),
    }
}

/// `nullable|string[|max:N]`. The outer `None` means absent or invalid.
pub(super) fn nullable_string(
    payload: &Payload,
    field: &str,
    max: Option<usize>,
    errors: &mut ValidationErrors,
) -> Option<Option<String>> {
    match payload.field(field) {
        Field::Absent => None,
        Field::Null => Some(None),
        Field::Present(value) => check_string(value, field, max, errors).map(Some),
    }
}

/// `required|integer`.
pub(super) fn required_integer(
    payload: &Payload,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    match payload.field(field) {
        Field::Absent | Field::Null => {
            errors.add(field, required(field));
            None
        }
        Field::Present(value) => check_integer(value, field, errors),
    }
}

/// `nullable|integer`. The outer `None` means absent or invalid.
pub(super) fn nullable_integer(
    payload: &Payload,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<Option<i64>> {
    match payload.field(field) {
        Field::Absent => None,
        Field::Null => Some(None),
        Field::Present(value) => check_integer(value, field, errors).map(Some),
    }
}

/// `boolean`, optional. Accepts the usual form and JSON spellings.
pub(super) fn optional_boolean(
    payload: &Payload,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<bool> {
    let value = match payload.field(field) {
        Field::Absent => return None,
        Field::Null => None,
        Field::Present(Value::Bool(b)) => Some(*b),
        Field::Present(Value::Number(n)) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Field::Present(Value::String(s)) => match s.as_str() {
            "1" | "true" | "on" => Some(true),
            "0" | "false" | "off" => Some(false),
            _ => None,
        },
        Field::Present(_) => None,
    };
    if value.is_none() {
        errors.add(field, format!("The {} field must be true or false.", label(field)));
    }
    value
}
