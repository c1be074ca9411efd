//! Credential provider port

/// Supplies the bearer credential for the chat endpoint.
///
/// A missing or blank credential stops a turn before any network call.
pub trait CredentialProvider: Send + Sync {
    fn credential(&self) -> Option<String>;
}

/// A fixed credential (tests, or a key already resolved from config).
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(credential: impl Into<String>) -> Self {
        Self(Some(credential.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredential {
    fn credential(&self) -> Option<String> {
        self.0.clone()
    }
}
