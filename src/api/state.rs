//! Shared application state

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use tokio::sync::RwLock;
use tracing::info;

use crate::auth::JwtVerifier;
use crate::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};
use crate::error::{AppError, Result};
use crate::render::Templates;
use crate::store::CustomerStore;

/// Application state shared across all handlers.
///
/// The store sits behind one `RwLock`: lookups share it, and every mutation
/// holds the write half across both the in-memory change and the file
/// rewrite, so concurrent writers never interleave. Mutations go through
/// [`AppState::mutate`] to keep the blocking file rewrite off the runtime
/// workers.
#[derive(Clone)]
pub struct AppState {
    /// Customer working set and its backing file
    pub store: Arc<RwLock<CustomerStore>>,
    /// HTML templates for non-JSON callers
    pub templates: Arc<Templates>,
    /// Bearer token verifier for protected routes
    pub verifier: Arc<JwtVerifier>,
    /// Directory uploads are written to
    pub upload_dir: Arc<PathBuf>,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Creates a new AppState from already-built parts.
    pub fn new(
        store: CustomerStore,
        templates: Templates,
        verifier: JwtVerifier,
        upload_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            templates: Arc::new(templates),
            verifier: Arc::new(verifier),
            upload_dir: Arc::new(upload_dir.into()),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Overrides the upload body limit.
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Runs `f` against the store on the blocking pool while holding the
    /// write lock.
    pub async fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut CustomerStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut guard = Arc::clone(&self.store).write_owned().await;
        tokio::task::spawn_blocking(move || f(&mut guard))
            .await
            .map_err(|err| AppError::internal("Store task failed", err))?
    }

    /// Creates a new AppState from configuration.
    ///
    /// Loads the customer file, compiles templates and makes sure the
    /// upload directory exists.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = CustomerStore::open(&config.csv_file)
            .with_context(|| format!("loading customers from {}", config.csv_file.display()))?;
        let templates =
            Templates::new(config.templates_dir.as_deref()).context("compiling templates")?;

        std::fs::create_dir_all(&config.upload_dir).with_context(|| {
            format!("creating upload directory {}", config.upload_dir.display())
        })?;
        info!(upload_dir = %config.upload_dir.display(), "Upload directory ready");

        Ok(Self::new(
            store,
            templates,
            JwtVerifier::new(&config.jwt_secret),
            config.upload_dir.clone(),
        )
        .with_max_upload_bytes(config.max_upload_bytes))
    }
}
