/// Outcome taxonomy for a script run.
///
/// Every variant is terminal for the request that produced it; nothing in
/// the runner retries.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Empty or unsafe logical name. Raised before any filesystem access.
    #[error("Invalid script name: {0:?}")]
    InvalidScriptName(String),

    /// The name was safe but no script file exists for it.
    #[error("Script {name} not found")]
    ScriptNotFound { name: String },

    /// Non-zero exit, timeout, or spawn failure. Carries the diagnostic text
    /// (captured stderr or the error message).
    #[error("Script execution failed: {0}")]
    Execution(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_name_is_debug_quoted() {
        let err = CoreError::InvalidScriptName("../x".to_string());
        assert_eq!(err.to_string(), "Invalid script name: \"../x\"");
    }

    #[test]
    fn display_not_found() {
        let err = CoreError::ScriptNotFound {
            name: "backup".to_string(),
        };
        assert_eq!(err.to_string(), "Script backup not found");
    }

    #[test]
    fn display_execution_carries_detail() {
        let err = CoreError::Execution("disk full\n".to_string());
        assert_eq!(err.to_string(), "Script execution failed: disk full\n");
    }
}
