//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The value contains a sequence reserved by the log format.
    #[error("{field} cannot contain {reserved:?}: {value}")]
    Reserved {
        field: &'static str,
        reserved: &'static str,
        value: String,
    },
}

/// Sequences that delimit fields in a log line and so cannot appear in a project name.
const RESERVED: [&str; 4] = [":", " - ", "\n", "\r"];

/// Name of a tracked project.
///
/// Always trimmed and non-empty, and free of the log's field delimiters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Project(String);

impl Project {
    /// Creates a project name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "project" });
        }
        if let Some(reserved) = RESERVED.into_iter().find(|r| name.contains(r)) {
            return Err(ValidationError::Reserved {
                field: "project",
                reserved,
                value: name.to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Project {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Project> for String {
    fn from(project: Project) -> Self {
        project.0
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Project {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Project {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
