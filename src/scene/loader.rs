//! Asynchronous model loading.
//!
//! A load runs on the tokio blocking pool and reports back over a oneshot
//! channel. The frame loop polls the [`PendingModel`] once per frame and
//! never waits on it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::core::{Error, Result};
use crate::scene::model::LoadedModel;

/// Produces a model from a path. Implemented by the engine's asset layer.
pub trait ModelLoader: Send + Sync + 'static {
    fn load(&self, path: &Path) -> Result<LoadedModel>;
}

/// Reads a [`LoadedModel`] serialized as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonModelLoader;

impl ModelLoader for JsonModelLoader {
    fn load(&self, path: &Path) -> Result<LoadedModel> {
        let asset_error = |reason: String| Error::AssetLoad {
            path: path.to_path_buf(),
            reason,
        };

        let json = std::fs::read_to_string(path).map_err(|e| asset_error(e.to_string()))?;
        let model: LoadedModel = serde_json::from_str(&json).map_err(|e| asset_error(e.to_string()))?;
        model.validate()?;

        log::info!(
            "Loaded model '{}' with {} clips from {}",
            model.name,
            model.clips.len(),
            path.display()
        );
        Ok(model)
    }
}

/// A load in flight.
pub struct PendingModel {
    path: PathBuf,
    result_rx: oneshot::Receiver<Result<LoadedModel>>,
}

impl PendingModel {
    /// Non-blocking check for the result.
    ///
    /// Returns `Some` once, when the load has finished. A loader task that
    /// died without answering is reported as a failed load.
    pub fn poll(&mut self) -> Option<Result<LoadedModel>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(Error::AssetLoad {
                path: self.path.clone(),
                reason: "loader task ended without a result".to_string(),
            })),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Start loading `path` with `loader` on the runtime's blocking pool.
pub fn spawn_load<L: ModelLoader>(handle: &Handle, loader: Arc<L>, path: PathBuf) -> PendingModel {
    let (result_tx, result_rx) = oneshot::channel();
    let task_path = path.clone();

    handle.spawn_blocking(move || {
        let result = loader.load(&task_path);
        // Receiver gone means the scene stopped caring
        let _ = result_tx.send(result);
    });

    log::debug!("Model load started: {}", path.display());
    PendingModel { path, result_rx }
}
