use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One violated rule, located by a dotted field path (`metadata.timestamp`).
///
/// The path is empty when the failure concerns the input as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Non-empty list of issues in the order the rules were declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new(issue: ValidationIssue) -> Self {
        Self { issues: vec![issue] }
    }

    /// Returns `None` for an empty list, which would not be a failure.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Option<Self> {
        if issues.is_empty() { None } else { Some(Self { issues }) }
    }

    pub fn first(&self) -> &ValidationIssue {
        &self.issues[0]
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationIssue> {
        self.issues.iter()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Always `false`: every constructor requires at least one issue.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.message.as_str()).collect()
    }

    /// Issues on `path` or below it.
    pub fn at_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationIssue> + 'a {
        self.issues.iter().filter(move |issue| {
            issue.path == path
                || (issue.path.starts_with(path) && issue.path[path.len()..].starts_with('.'))
        })
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// `[{"path": .., "message": ..}, ..]`, used as an error cause.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.issues).unwrap_or(Value::Null)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationIssue;
    type IntoIter = std::slice::Iter<'a, ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
