//! Post payload validation.
//!
//! [`validate`] checks an untyped JSON value against the post schema and
//! either returns a normalized [`NewPost`] or every rule violation it found.
//! Rules never short-circuit: a payload missing both `email` and
//! `content.type` is reported with both errors.

use crate::models::content_type::CONTENT_TYPES;
use crate::models::{Content, ContentType, NewPost};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::OnceLock;

pub const PASSWORD_MIN_LEN: usize = 8;

const EMAIL_REGEX: &str = r"^\S+@\S+\.\S+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_REGEX).expect("email pattern is valid"))
}

/// A single rule violation, addressed by dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Ordered list of violations. Only built with at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(error: FieldError) -> Self {
        ValidationErrors(vec![error])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Outcome of validating a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(ValidationErrors),
}

impl<T> Validated<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    pub fn into_result(self) -> Result<T, ValidationErrors> {
        match self {
            Validated::Valid(value) => Ok(value),
            Validated::Invalid(errors) => Err(errors),
        }
    }
}

/// Collects errors while each field is checked independently.
#[derive(Default)]
struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Required string field. Returns the value only when it passed the
    /// presence and type checks.
    fn required_str<'v>(
        &mut self,
        object: &'v Map<String, Value>,
        key: &str,
        field: &str,
        label: &str,
    ) -> Option<&'v str> {
        match object.get(key) {
            None | Some(Value::Null) => {
                self.push(field, format!("{label} is required"));
                None
            }
            Some(Value::String(value)) => Some(value.as_str()),
            Some(_) => {
                self.push(field, format!("{label} must be a string"));
                None
            }
        }
    }
}

/// Validates a post payload.
pub fn validate(payload: &Value) -> Validated<NewPost> {
    let Some(object) = payload.as_object() else {
        return Validated::Invalid(ValidationErrors::single(FieldError::new(
            "",
            "Payload must be a JSON object",
        )));
    };

    let mut collector = Collector::default();

    let user_id = match object.get("user_id") {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            collector.push("user_id", "User ID must be a string");
            None
        }
    };

    let email = collector
        .required_str(object, "email", "email", "Email")
        .and_then(|email| {
            if email_regex().is_match(email) {
                Some(email.to_string())
            } else {
                collector.push("email", "Invalid email format");
                None
            }
        });

    let password = collector
        .required_str(object, "password", "password", "Password")
        .and_then(|password| {
            if password.chars().count() >= PASSWORD_MIN_LEN {
                Some(password.to_string())
            } else {
                collector.push(
                    "password",
                    format!("Password must be at least {PASSWORD_MIN_LEN} characters long"),
                );
                None
            }
        });

    let content = validate_content(object.get("content"), &mut collector);

    match (email, password, content) {
        (Some(email), Some(password), Some(content)) if collector.errors.is_empty() => {
            Validated::Valid(NewPost {
                user_id,
                email,
                password,
                content,
            })
        }
        _ => Validated::Invalid(ValidationErrors(collector.errors)),
    }
}

fn validate_content(value: Option<&Value>, collector: &mut Collector) -> Option<Content> {
    let object = match value {
        None | Some(Value::Null) => {
            collector.push("content", "Content is required");
            return None;
        }
        Some(Value::Object(object)) => object,
        Some(_) => {
            collector.push("content", "Content must be an object");
            return None;
        }
    };

    let content_type = collector
        .required_str(object, "type", "content.type", "Content type")
        .and_then(|raw| match ContentType::try_from(raw) {
            Ok(content_type) => Some(content_type),
            Err(_) => {
                let allowed = CONTENT_TYPES
                    .iter()
                    .map(|name| format!("'{name}'"))
                    .collect::<Vec<_>>();
                collector.push(
                    "content.type",
                    format!(
                        "Content type must be one of {}, or {}",
                        allowed[..allowed.len() - 1].join(", "),
                        allowed[allowed.len() - 1]
                    ),
                );
                None
            }
        });

    let data = collector
        .required_str(object, "data", "content.data", "Content data")
        .and_then(|data| {
            if data.is_empty() {
                collector.push("content.data", "Content data must not be empty");
                None
            } else {
                Some(data.to_string())
            }
        });

    Some(Content {
        content_type: content_type?,
        data: data?,
    })
}
