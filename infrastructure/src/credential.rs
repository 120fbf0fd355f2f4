//! Credential adapter reading the process environment

use travelmate_application::ports::credential::CredentialProvider;

/// Reads the provider credential from an environment variable on every call,
/// so rotating or removing the secret takes effect without a restart.
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredential {
    fn name(&self) -> &str {
        &self.var
    }

    fn credential(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|v| !v.is_empty())
    }
}
