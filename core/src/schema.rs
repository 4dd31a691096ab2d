//! Schema seam: turns an untyped JSON value into a typed one.
//!
//! Any `T: DeserializeOwned` is a schema through `Json<T>`; serde acts as
//! the validation engine and `serde_path_to_error` supplies the location of
//! the failure. Validators that report several failures at once can be
//! plugged in as plain closures.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Separator placed between rendered validation errors in a decode message.
///
/// This is the literal two-character sequence `/n`, not a newline; existing
/// callers split on it.
pub const VALIDATION_SEPARATOR: &str = "/n";

/// One failure reported by a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Location of the offending value, empty for the root.
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Validates a JSON value and produces the typed result.
pub trait Schema {
    type Output;

    fn decode(&self, value: Value) -> Result<Self::Output, Vec<ValidationError>>;
}

impl<F, T> Schema for F
where
    F: Fn(Value) -> Result<T, Vec<ValidationError>>,
{
    type Output = T;

    fn decode(&self, value: Value) -> Result<T, Vec<ValidationError>> {
        self(value)
    }
}

/// Serde-backed schema for `T`.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> Json<T> {
    pub fn new() -> Self {
        Json(PhantomData)
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Json<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Json<T> {}

impl<T> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Json<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> Schema for Json<T> {
    type Output = T;

    fn decode(&self, value: Value) -> Result<T, Vec<ValidationError>> {
        serde_path_to_error::deserialize(value).map_err(|err| {
            let path = err.path().to_string();
            let path = if path == "." { String::new() } else { path };
            vec![ValidationError::new(path, err.into_inner().to_string())]
        })
    }
}

/// Shorthand for `Json::<T>::new()`.
pub fn json<T: DeserializeOwned>() -> Json<T> {
    Json::new()
}

/// Flattens validation errors into a single decode message.
pub fn render_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(VALIDATION_SEPARATOR)
}
