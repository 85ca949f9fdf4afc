//! Request body shape checks for create and update

use domain::{AttributePatch, Attributes, DomainError};
use serde_json::{Map, Value};

/// Keys owned by the store; callers may not set them
const RESERVED_KEYS: [&str; 4] = ["id", "ordinal_index", "created_at", "updated_at"];

fn invalid(msg: impl Into<String>) -> DomainError {
    DomainError::ValidationFailed(msg.into())
}

fn as_object(body: Value) -> Result<Map<String, Value>, DomainError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(invalid("Body must be a JSON object")),
    }
}

fn check_reserved(map: &Map<String, Value>) -> Result<(), DomainError> {
    match RESERVED_KEYS.iter().find(|key| map.contains_key(**key)) {
        Some(key) => Err(invalid(format!("Field {key} is assigned by the server"))),
        None => Ok(()),
    }
}

fn check_name(value: &Value) -> Result<(), DomainError> {
    match value.as_str() {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(invalid("name must be a non-empty string")),
    }
}

fn check_description(value: &Value, nullable: bool) -> Result<(), DomainError> {
    match value {
        Value::String(_) => Ok(()),
        Value::Null if nullable => Ok(()),
        _ => Err(invalid("description must be a string")),
    }
}

/// Create body: `name` required, `description` optional, other keys kept as-is
pub fn create_attributes(body: Value) -> Result<Attributes, DomainError> {
    let map = as_object(body)?;
    check_reserved(&map)?;

    check_name(map.get("name").unwrap_or(&Value::Null))?;
    if let Some(description) = map.get("description") {
        check_description(description, false)?;
    }

    Ok(Attributes::new(map))
}

/// Update body: at least one field; `description: null` clears it
pub fn update_patch(body: Value) -> Result<AttributePatch, DomainError> {
    let map = as_object(body)?;
    if map.is_empty() {
        return Err(invalid("Update must change at least one field"));
    }
    check_reserved(&map)?;

    if let Some(name) = map.get("name") {
        check_name(name)?;
    }
    if let Some(description) = map.get("description") {
        check_description(description, true)?;
    }

    Ok(AttributePatch::new(map))
}
