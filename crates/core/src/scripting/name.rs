//! Logical script name validation.
//!
//! A logical name is concatenated into a filesystem path, so validation is a
//! security boundary: any name that could step outside the scripts directory
//! is rejected before the filesystem is touched. The check is purely lexical
//! and treats both separator styles as unsafe regardless of the host OS.

use std::fmt;

use crate::error::CoreError;

/// Substrings that may never appear in a logical script name.
const FORBIDDEN_SEQUENCES: [&str; 4] = ["/", "\\", "..", "\0"];

/// A logical script name that has passed [`validate_script_name`].
///
/// The only way to build one is through validation, so anything holding a
/// `ScriptName` can safely be joined onto the scripts directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptName(String);

impl ScriptName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScriptName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate a caller-supplied logical script name.
///
/// Rejects empty names and names containing `/`, `\`, `..` or a NUL byte.
pub fn validate_script_name(raw: &str) -> Result<ScriptName, CoreError> {
    if raw.is_empty() {
        return Err(CoreError::InvalidScriptName(raw.to_string()));
    }

    if FORBIDDEN_SEQUENCES.iter().any(|seq| raw.contains(seq)) {
        return Err(CoreError::InvalidScriptName(raw.to_string()));
    }

    Ok(ScriptName(raw.to_string()))
}
