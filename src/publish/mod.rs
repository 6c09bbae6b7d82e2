//! Posting one image with its caption.
//!
//! [`publish`] logs in, uploads and logs out. The session lives in a
//! [`SessionGuard`], so logout happens on every exit path: after a successful
//! upload, after a rejected one, and when the image cannot be read.

pub mod http;
pub mod service;

pub use http::HttpService;
pub use service::{Credentials, PostId, PublishingService};

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Upload rejected: {0}")]
    Rejected(String),
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Holds an open session and closes it when dropped.
pub struct SessionGuard<'a, S: PublishingService> {
    service: &'a S,
    session: Option<S::Session>,
}

impl<'a, S: PublishingService> SessionGuard<'a, S> {
    pub fn new(service: &'a S, session: S::Session) -> Self {
        Self {
            service,
            session: Some(session),
        }
    }

    pub fn session(&self) -> &S::Session {
        self.session
            .as_ref()
            .expect("session is only taken in drop")
    }
}

impl<S: PublishingService> Drop for SessionGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            self.service.close(session);
            log::debug!("Session closed");
        }
    }
}

/// Log in, upload `image_path` with `caption`, log out.
pub fn publish<S: PublishingService>(
    service: &S,
    credentials: &Credentials,
    image_path: &Path,
    caption: &str,
) -> Result<PostId, PublishError> {
    let session = SessionGuard::new(service, service.authenticate(credentials)?);
    log::info!("Logged in as {}", credentials.identity);

    let image = std::fs::read(image_path).map_err(|source| PublishError::Io {
        path: image_path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Uploading {} with caption: {}",
        image_path.display(),
        caption
    );

    let post_id = service.upload(session.session(), image, caption)?;
    log::info!("Uploaded as post {post_id}");
    Ok(post_id)
}
