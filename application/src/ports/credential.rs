//! Credential port
//!
//! The relay resolves the provider credential on every request so a missing
//! secret fails each call instead of the process.

/// Source of the upstream provider credential.
pub trait CredentialProvider: Send + Sync {
    /// Name used in error messages (e.g. the environment variable).
    fn name(&self) -> &str;

    /// Current credential, `None` when not configured.
    fn credential(&self) -> Option<String>;
}

/// Fixed credential, for tests and embedding.
pub struct StaticCredential {
    name: String,
    value: Option<String>,
}

impl StaticCredential {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }
}

impl CredentialProvider for StaticCredential {
    fn name(&self) -> &str {
        &self.name
    }

    fn credential(&self) -> Option<String> {
        self.value.clone().filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_counts_as_missing() {
        let credential = StaticCredential::new("KEY", Some(String::new()));
        assert_eq!(credential.credential(), None);
        assert_eq!(credential.name(), "KEY");
    }
}
