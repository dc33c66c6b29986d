//! Error handling for wordlist-forge

use thiserror::Error;

/// Main error type for wordlist-forge
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WordlistError {
    #[error("Unknown enumerator '{name}' referenced in pattern")]
    UnknownEnumerator { name: String },

    #[error("Malformed pattern at offset {position}: {message}")]
    MalformedPattern { message: String, position: usize },

    #[error("Invalid enumerator pattern for '{name}' ({spec}): {message}")]
    EnumeratorPattern {
        name: String,
        spec: String,
        message: String,
    },

    #[error("Cannot load enumerator '{name}' from {path}: {message}")]
    EnumeratorSource {
        name: String,
        path: String,
        message: String,
    },

    #[error("Invalid limit {limit}={value}: {message}")]
    InvalidLimit {
        limit: String,
        value: String,
        message: String,
    },

    #[error("Enumerator '{name}' is already defined")]
    DuplicateEnumerator { name: String },

    #[error("Invalid binding declaration: {message}")]
    InvalidBinding { message: String },

    #[error("Encoding error ({encoding}): {message}")]
    Encoding { encoding: String, message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl WordlistError {
    /// Create an unknown enumerator error
    pub fn unknown_enumerator(name: impl Into<String>) -> Self {
        Self::UnknownEnumerator { name: name.into() }
    }

    /// Create a malformed pattern error
    pub fn malformed_pattern(message: impl Into<String>, position: usize) -> Self {
        Self::MalformedPattern {
            message: message.into(),
            position,
        }
    }

    /// Create an enumerator pattern error
    pub fn enumerator_pattern(
        name: impl Into<String>,
        spec: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::EnumeratorPattern {
            name: name.into(),
            spec: spec.into(),
            message: message.into(),
        }
    }

    /// Create an enumerator source error
    pub fn enumerator_source(
        name: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::EnumeratorSource {
            name: name.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid limit error
    pub fn invalid_limit(
        limit: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidLimit {
            limit: limit.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate enumerator error
    pub fn duplicate_enumerator(name: impl Into<String>) -> Self {
        Self::DuplicateEnumerator { name: name.into() }
    }

    /// Create an invalid binding error
    pub fn invalid_binding(message: impl Into<String>) -> Self {
        Self::InvalidBinding {
            message: message.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding(encoding: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encoding {
            encoding: encoding.into(),
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownEnumerator { name } => {
                format!(
                    "❌ Unknown enumerator '%({})'\n💡 Declare it with -e or -w, or use a built-in (digits, ascii_lowercase, ascii_uppercase, ascii_visible, punctuation)",
                    name
                )
            }
            Self::MalformedPattern { message, position } => {
                format!("❌ Malformed pattern (offset {}): {}\n💡 Placeholders look like %(name) or %(name){{3}}", position, message)
            }
            Self::EnumeratorPattern { name, spec, message } => {
                format!("❌ Enumerator '{}' has an invalid pattern '{}': {}\n💡 Use [a-z] or (one|two|three)", name, spec, message)
            }
            Self::EnumeratorSource { name, path, message } => {
                format!("❌ Wordlist for '{}' could not be loaded ({}): {}\n💡 Check the file exists and is not empty", name, path, message)
            }
            Self::InvalidLimit { limit, value, message } => {
                format!("❌ Invalid {} '{}': {}\n💡 Limits must be non-negative numbers", limit, value, message)
            }
            Self::DuplicateEnumerator { name } => {
                format!("❌ Enumerator '{}' is defined more than once\n💡 Built-in names cannot be redeclared", name)
            }
            Self::InvalidBinding { message } => {
                format!("❌ Invalid declaration: {}\n💡 Use name=value", message)
            }
            Self::Encoding { encoding, message } => {
                format!("❌ Encoding problem ({}): {}\n💡 Supported encodings: utf-8, ascii, latin-1", encoding, message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or environment", message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<std::io::Error> for WordlistError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WordlistError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::WordlistError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::WordlistError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! pattern_error {
    ($pos:expr, $msg:expr) => {
        $crate::error::WordlistError::malformed_pattern($msg, $pos)
    };
    ($pos:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::error::WordlistError::malformed_pattern(format!($fmt, $($arg)*), $pos)
    };
}
