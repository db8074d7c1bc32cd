use std::fmt;

#[derive(Debug)]
pub enum AxError {
    /// The calling process is not trusted by the accessibility service
    PermissionDenied,

    /// Neither the target window nor the frontmost main window could be resolved
    WindowNotFound,

    /// No node under the resolved window hashes to the requested id
    ElementNotFound { id: String },

    /// The accessibility service declined an action invocation
    ActionFailed { action: String, reason: String },

    /// The node's value attribute cannot be written
    ValueNotSettable,

    /// JSON serialization failed
    Serialization { context: String, source: serde_json::Error },

    /// Recorded tree could not be parsed
    Fixture { context: String, source: serde_yaml::Error },

    /// Reading a file from disk failed
    Io { path: String, source: std::io::Error },
}

impl fmt::Display for AxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxError::PermissionDenied => {
                write!(f, "Error: Accessibility permissions not granted")
            }
            AxError::WindowNotFound => write!(f, "Error: Target window not found"),
            AxError::ElementNotFound { .. } => write!(f, "Error: Element not found in window"),
            AxError::ActionFailed { action, reason } => {
                write!(f, "Error: Failed to perform action {}: {}", action, reason)
            }
            AxError::ValueNotSettable => write!(f, "Error: Value attribute is not settable"),
            AxError::Serialization { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            AxError::Fixture { context, source } => {
                write!(f, "Fixture parse error ({}): {}", context, source)
            }
            AxError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for AxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AxError::Serialization { source, .. } => Some(source),
            AxError::Fixture { source, .. } => Some(source),
            AxError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl AxError {
    /// Message without the `Error: ` prefix, as carried in the snapshot
    /// error document.
    pub fn message(&self) -> String {
        let text = self.to_string();
        match text.strip_prefix("Error: ") {
            Some(stripped) => stripped.to_string(),
            None => text,
        }
    }
}
