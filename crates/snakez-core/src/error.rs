/// Configuration rejected at construction time.
///
/// The simulation step itself never fails; every error surfaces here, before
/// the first frame runs.
#[derive(Debug)]
pub enum ConfigError {
    /// A field holds a value the simulation cannot run with.
    Invalid { field: &'static str, reason: String },
    /// The TOML document could not be parsed into the config schema.
    Parse(toml::de::Error),
    /// The config file exists but could not be read.
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { field, .. } => Some(field),
            Self::Parse(_) | Self::Io { .. } => None,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Io { path, source } => write!(f, "failed to read {path}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid { .. } => None,
            Self::Parse(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

/// Fail with [`ConfigError::Invalid`] unless `cond` holds.
pub fn ensure(cond: bool, field: &'static str, reason: &str) -> Result<(), ConfigError> {
    if cond {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, reason))
    }
}
