//! Declarative JSON request validation
//!
//! Each POST endpoint declares a schema once at startup: an ordered list of
//! field names, each carrying either a primitive type tag or a predicate.
//! The schema is enforced by route middleware before the handler runs;
//! the first failing field short-circuits into a 400 with a field-level
//! message. `validate` itself is a pure function over its inputs.

use crate::error::ApiError;
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Largest request body the validation middleware will buffer.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Primitive JSON type tags for type-constrained fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Integer,
    Number,
    String,
    Boolean,
    Array,
    Object,
}

impl TypeTag {
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Integer => "integer",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Boolean => "boolean",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeTag::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
            TypeTag::Number => value.is_number(),
            TypeTag::String => value.is_string(),
            TypeTag::Boolean => value.is_boolean(),
            TypeTag::Array => value.is_array(),
            TypeTag::Object => value.is_object(),
        }
    }
}

/// Runtime type name of a JSON value, for mismatch messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A field constraint: a type tag or a named predicate.
#[derive(Clone, Copy)]
pub enum Constraint {
    Type(TypeTag),
    Predicate {
        name: &'static str,
        check: fn(&Value) -> bool,
    },
}

/// Ordered field-to-constraint mapping, built once per endpoint.
#[derive(Default)]
pub struct Schema {
    fields: Vec<(&'static str, Constraint)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, constraint: Constraint) -> Self {
        self.fields.push((name, constraint));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Outcome of validating one payload against one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid { field: String, message: String },
}

impl ValidationOutcome {
    fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationOutcome::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate `payload` against `schema`. Fields are checked in schema
/// (insertion) order and the first failure wins.
pub fn validate(schema: &Schema, payload: Option<&Value>) -> ValidationOutcome {
    if schema.is_empty() {
        return ValidationOutcome::Valid;
    }

    // A JSON `null` body counts as no payload at all.
    let Some(payload) = payload.filter(|v| !v.is_null()) else {
        return ValidationOutcome::invalid("<request body>", "Missing JSON in request");
    };

    for (field, constraint) in &schema.fields {
        let Some(value) = payload.get(field) else {
            return ValidationOutcome::invalid(
                *field,
                format!("Missing required field: {}", field),
            );
        };
        match constraint {
            Constraint::Predicate { check, .. } => {
                if !check(value) {
                    return ValidationOutcome::invalid(
                        *field,
                        format!("Invalid value for field: {}", field),
                    );
                }
            }
            Constraint::Type(tag) => {
                if !tag.matches(value) {
                    return ValidationOutcome::invalid(
                        *field,
                        format!(
                            "Invalid type for field: {}. Expected {}, got {}",
                            field,
                            tag.name(),
                            json_type_name(value)
                        ),
                    );
                }
            }
        }
    }

    ValidationOutcome::Valid
}

/// Predicate: integer strictly greater than zero.
pub fn is_positive_int(value: &Value) -> bool {
    match value.as_i64() {
        Some(n) => n > 0,
        None => value.as_u64().is_some_and(|n| n > 0),
    }
}

/// Predicate: string with non-whitespace content.
pub fn is_non_empty_string(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.trim().is_empty())
}

/// Route middleware: buffer the body, validate it against `schema`, and
/// either short-circuit with a 400 or restore the body and run the inner
/// handler. Compose per-route with `axum::middleware::from_fn`.
pub async fn enforce_schema(schema: &'static Schema, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to buffer request body: {}", e);
            return ApiError::Validation("Missing JSON in request".to_string()).into_response();
        }
    };

    let payload: Option<Value> = if bytes.is_empty() {
        None
    } else {
        serde_json::from_slice(&bytes).ok()
    };

    match validate(schema, payload.as_ref()) {
        ValidationOutcome::Valid => {
            next.run(Request::from_parts(parts, Body::from(bytes))).await
        }
        ValidationOutcome::Invalid { field, message } => {
            tracing::info!("Rejected request: invalid field {}", field);
            ApiError::Validation(message).into_response()
        }
    }
}
