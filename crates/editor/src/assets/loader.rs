//! Model loaders. A loader only fetches and inspects bytes; the resolver
//! decides what the scene shows.

use serde::{Deserialize, Serialize};

use super::gltf::ModelInfo;
use crate::error::AssetError;

/// Handle of one in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadTicket(pub u64);

/// A load the host still has to perform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub path: String,
}

/// Result of a load reported back by a loader
#[derive(Debug, Clone, PartialEq)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub result: Result<ModelInfo, AssetError>,
}

/// Source of model files.
pub trait ModelLoader {
    /// Start loading `path`. Never blocks.
    fn request(&mut self, ticket: LoadTicket, path: &str);

    /// Completions that arrived since the last call.
    fn poll(&mut self) -> Vec<LoadCompletion>;

    /// Requests that must be fulfilled by the host.
    fn drain_requests(&mut self) -> Vec<LoadRequest> {
        Vec::new()
    }

    /// Block until every outstanding load has completed.
    fn wait(&mut self) -> Vec<LoadCompletion> {
        self.poll()
    }
}

/// Queues requests for a host that performs the IO itself and reports back
/// through the session (browser, tests).
#[derive(Debug, Default)]
pub struct DeferredLoader {
    queued: Vec<LoadRequest>,
}

impl DeferredLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModelLoader for DeferredLoader {
    fn request(&mut self, ticket: LoadTicket, path: &str) {
        self.queued.push(LoadRequest {
            ticket,
            path: path.to_string(),
        });
    }

    fn poll(&mut self) -> Vec<LoadCompletion> {
        Vec::new()
    }

    fn drain_requests(&mut self) -> Vec<LoadRequest> {
        std::mem::take(&mut self.queued)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FsModelLoader;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

    use super::{LoadCompletion, LoadTicket, ModelLoader};
    use crate::assets::gltf;
    use crate::error::AssetError;

    /// Reads models from a directory on a background tokio runtime.
    pub struct FsModelLoader {
        root: PathBuf,
        runtime: tokio::runtime::Runtime,
        tx: UnboundedSender<LoadCompletion>,
        rx: UnboundedReceiver<LoadCompletion>,
        in_flight: usize,
    }

    impl FsModelLoader {
        pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("model-loader")
                .enable_all()
                .build()?;
            let (tx, rx) = unbounded_channel();
            Ok(Self {
                root: root.into(),
                runtime,
                tx,
                rx,
                in_flight: 0,
            })
        }

        pub fn root(&self) -> &std::path::Path {
            &self.root
        }
    }

    async fn load(full: PathBuf, path: String) -> Result<gltf::ModelInfo, AssetError> {
        match tokio::fs::read(&full).await {
            Ok(bytes) => gltf::inspect(&path, &bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AssetError::NotFound { path })
            }
            Err(e) => Err(AssetError::Io {
                path,
                message: e.to_string(),
            }),
        }
    }

    impl ModelLoader for FsModelLoader {
        fn request(&mut self, ticket: LoadTicket, path: &str) {
            let full = self.root.join(path);
            let path = path.to_string();
            let tx = self.tx.clone();
            self.in_flight += 1;
            tracing::debug!(ticket = ticket.0, path = %full.display(), "model load started");
            self.runtime.spawn(async move {
                let result = load(full, path).await;
                // Receiver lives as long as the loader
                let _ = tx.send(LoadCompletion { ticket, result });
            });
        }

        fn poll(&mut self) -> Vec<LoadCompletion> {
            let mut done = Vec::new();
            while let Ok(completion) = self.rx.try_recv() {
                done.push(completion);
            }
            self.in_flight = self.in_flight.saturating_sub(done.len());
            done
        }

        fn wait(&mut self) -> Vec<LoadCompletion> {
            let mut done = Vec::new();
            while self.in_flight > 0 {
                match self.rx.blocking_recv() {
                    Some(completion) => {
                        self.in_flight -= 1;
                        done.push(completion);
                    }
                    None => break,
                }
            }
            done
        }
    }
}
