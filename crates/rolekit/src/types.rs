//! Core types for role application.

use crate::error::{Error, FAILURE_EXIT_CODE, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::process::ExitStatus;
use std::str::FromStr;

/// Name of a role, conventionally `namespace.name`.
///
/// The name is joined onto the role directory, so it must be non-blank and
/// must not contain a path separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Validate and wrap a role name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() || name.contains('/') || name.contains('\\') {
            return Err(Error::InvalidRoleName(name));
        }
        Ok(Self(name))
    }

    /// The role name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoleName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoleName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RoleName> for String {
    fn from(role: RoleName) -> Self {
        role.0
    }
}

/// A value that can be passed through to a role as an inline parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtraValue {
    /// `true` / `false`
    Bool(bool),
    /// Plain string
    String(String),
    /// List of strings
    List(Vec<String>),
}

impl ExtraValue {
    /// Convert a JSON value, rejecting anything but bools, strings and
    /// string lists. `name` is only used for the error message.
    pub fn from_json(name: &str, value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        let unsupported = |found| Error::UnsupportedExtraType {
            name: name.to_string(),
            found,
        };

        match value {
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::String(s) => Ok(Self::String(s)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(unsupported(json_type_name(&other))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            other => Err(unsupported(json_type_name(&other))),
        }
    }

    /// JSON rendering used inside the playbook (`true`, `"x"`, `["a"]`).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<bool> for ExtraValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for ExtraValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Check that `name` can be used bare as a key in the playbook's role entry:
/// an ASCII letter or `_`, then letters, digits or `_`.
pub fn validate_extra_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidExtras(format!(
            "{name:?} is not a valid variable name"
        )))
    }
}

/// Extra variables injected into the synthesized playbook, keyed by name.
///
/// Keys iterate in sorted order so the rendered playbook is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extras(BTreeMap<String, ExtraValue>);

impl Extras {
    /// Create an empty set of extras.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse extras from a JSON object such as `{"flag": true}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    /// Add or replace a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ExtraValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Whether no variables are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtraValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for Extras {
    type Error = Error;

    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        map.into_iter()
            .map(|(name, value)| {
                validate_extra_name(&name)?;
                let value = ExtraValue::from_json(&name, value)?;
                Ok((name, value))
            })
            .collect::<Result<BTreeMap<_, _>>>()
            .map(Self)
    }
}

impl TryFrom<serde_json::Value> for Extras {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Self::try_from(map),
            other => Err(Error::InvalidExtras(format!(
                "expected a JSON object, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

/// Outcome of an external command: whether it succeeded and its exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    /// Whether the command reported success
    pub success: bool,
    /// Exit code of the command
    pub code: i32,
}

impl Invocation {
    /// Successful invocation with exit code 0.
    pub fn succeeded() -> Self {
        Self {
            success: true,
            code: 0,
        }
    }

    /// Failed invocation with the given exit code.
    pub fn failed(code: i32) -> Self {
        Self {
            success: false,
            code,
        }
    }

    /// Outcome of a run that was aborted by `err`.
    pub fn from_error(err: &Error) -> Self {
        Self::failed(err.exit_code())
    }
}

impl From<ExitStatus> for Invocation {
    fn from(status: ExitStatus) -> Self {
        // Killed by a signal: no exit code
        let code = status.code().unwrap_or(FAILURE_EXIT_CODE);
        Self {
            success: status.success(),
            code,
        }
    }
}

/// Settings that shape the synthesized playbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookOptions {
    /// Enable privilege escalation (`become`)
    #[serde(rename = "become", default = "default_escalate")]
    pub escalate: bool,
    /// Escalation method (`become_method`)
    #[serde(default = "default_become_method")]
    pub become_method: String,
}

fn default_escalate() -> bool {
    true
}

fn default_become_method() -> String {
    "sudo".to_string()
}

impl Default for PlaybookOptions {
    fn default() -> Self {
        Self {
            escalate: default_escalate(),
            become_method: default_become_method(),
        }
    }
}
