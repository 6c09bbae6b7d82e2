//! The publishing collaborator: authenticate, upload, close.

use super::PublishError;
use serde::Serialize;
use std::fmt;

/// Account used to log in. The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identity: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Identifier the service assigned to a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A remote service that accepts one image with a caption per session.
///
/// [`close`](Self::close) cannot fail from the caller's point of view:
/// implementations report logout problems through the log.
pub trait PublishingService {
    type Session;

    fn authenticate(&self, credentials: &Credentials) -> Result<Self::Session, PublishError>;

    fn upload(
        &self,
        session: &Self::Session,
        image: Vec<u8>,
        caption: &str,
    ) -> Result<PostId, PublishError>;

    fn close(&self, session: Self::Session);
}
