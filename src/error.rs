use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    /// No image or sound is registered under this name.
    NotFound { name: String },
    /// The name exists but the device cannot use it (e.g. a sound passed as an image).
    Unsupported { name: String, reason: &'static str },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "asset not found: {name}"),
            Self::Unsupported { name, reason } => {
                write!(f, "asset {name} cannot be loaded: {reason}")
            }
        }
    }
}

impl std::error::Error for AssetError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse { path: String, message: String },
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read config {path}: {message}"),
            Self::Parse { path, message } => write!(f, "invalid config {path}: {message}"),
            Self::Invalid { field, reason } => write!(f, "config field {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
