//! Ordered argument lists and their decoding from request payloads

use std::ops::Index;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Ordered string arguments for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentList(Vec<String>);

impl ArgumentList {
    /// Create an empty argument list
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Decode a JSON array of strings
    ///
    /// # Errors
    ///
    /// Returns error if the payload is not an array or any element is not a string
    pub fn from_json(payload: &Value) -> Result<Self> {
        let items = payload.as_array().ok_or_else(|| {
            Error::MalformedArguments(format!("expected an array, got {}", json_type(payload)))
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(ToString::to_string).ok_or_else(|| {
                    Error::MalformedArguments(format!(
                        "argument {i} must be a string, got {}",
                        json_type(item)
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Decode a JSON array of strings from raw text
    ///
    /// # Errors
    ///
    /// Returns error if the text is not valid JSON or not an array of strings
    pub fn parse_json(text: &str) -> Result<Self> {
        let payload: Value = serde_json::from_str(text)
            .map_err(|e| Error::MalformedArguments(format!("invalid json: {e}")))?;
        Self::from_json(&payload)
    }

    /// Append an argument
    pub fn push(&mut self, arg: impl Into<String>) {
        self.0.push(arg.into());
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Index<usize> for ArgumentList {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}

impl From<Vec<String>> for ArgumentList {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl<'a> FromIterator<&'a str> for ArgumentList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(ToString::to_string).collect())
    }
}

impl FromIterator<String> for ArgumentList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
