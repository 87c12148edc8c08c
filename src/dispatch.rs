//! The background update dispatcher. Lifecycle hooks enqueue widget ids
//! here and return; a worker thread performs the blocking store queries
//! and hands each finished view back to the host.

use std::{
    sync::{mpsc, Arc, Mutex},
    thread,
};

use indexmap::IndexSet;
use log::{debug, warn};

use crate::{provider::WidgetRenderer, store::WidgetId, view::RenderedView};

/// What the dispatcher needs from the host runtime.
pub trait HostRuntime: Send + Sync {
    /// Every id currently registered for this widget kind.
    fn registered_ids(&self) -> Vec<WidgetId>;

    /// Hands a finished view to the host to draw.
    fn push_update(&self, id: WidgetId, view: RenderedView);
}

enum WorkerEvent {
    Wake,
    Shutdown,
}

struct Worker {
    tx: mpsc::Sender<WorkerEvent>,
    handle: thread::JoinHandle<()>,
}

/// Collects update requests and renders them off the host's dispatch
/// thread.
///
/// Requests deduplicate while preserving arrival order; a widget asked for
/// twice before the worker gets to it renders once. The worker is spawned
/// lazily on the first [`start`](Self::start) and lives until
/// [`shutdown`](Self::shutdown) or drop.
pub struct UpdateDispatcher {
    renderer: Arc<WidgetRenderer>,
    host: Arc<dyn HostRuntime>,
    pending: Arc<Mutex<IndexSet<WidgetId>>>,
    worker: Mutex<Option<Worker>>,
}

impl UpdateDispatcher {
    pub fn new(renderer: Arc<WidgetRenderer>, host: Arc<dyn HostRuntime>) -> Self {
        Self {
            renderer,
            host,
            pending: Arc::new(Mutex::new(IndexSet::new())),
            worker: Mutex::new(None),
        }
    }

    /// Queues `ids` for a refresh. No work happens until [`start`](Self::start).
    pub fn request_update(&self, ids: &[WidgetId]) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        for &id in ids {
            pending.insert(id);
        }
    }

    /// Ensures the worker is running and wakes it to drain the queue.
    pub fn start(&self) {
        let mut worker = self.worker.lock().unwrap_or_else(|e| e.into_inner());

        if worker.is_none() {
            *worker = Some(self.spawn_worker());
        }

        if let Some(w) = worker.as_ref() {
            if w.tx.send(WorkerEvent::Wake).is_err() {
                warn!("dispatch worker is gone; respawning");
                let respawned = self.spawn_worker();
                let _ = respawned.tx.send(WorkerEvent::Wake);
                *worker = Some(respawned);
            }
        }
    }

    /// Stops the worker after it finishes whatever is already queued.
    pub fn shutdown(&self) {
        let worker = {
            let mut slot = self.worker.lock().unwrap_or_else(|e| e.into_inner());
            slot.take()
        };

        if let Some(worker) = worker {
            let _ = worker.tx.send(WorkerEvent::Shutdown);
            if worker.handle.join().is_err() {
                warn!("dispatch worker panicked during shutdown");
            }
        }
    }

    fn spawn_worker(&self) -> Worker {
        let (tx, rx) = mpsc::channel();
        let renderer = Arc::clone(&self.renderer);
        let host = Arc::clone(&self.host);
        let pending = Arc::clone(&self.pending);

        let handle = thread::spawn(move || {
            debug!("dispatch worker started");
            while let Ok(event) = rx.recv() {
                match event {
                    WorkerEvent::Wake => {
                        // Keep draining: ids queued while we render are
                        // picked up in the same pass.
                        loop {
                            let batch: Vec<WidgetId> = {
                                let mut pending =
                                    pending.lock().unwrap_or_else(|e| e.into_inner());
                                pending.drain(..).collect()
                            };
                            if batch.is_empty() {
                                break;
                            }
                            for id in batch {
                                let view = renderer.build_update(id);
                                host.push_update(id, view);
                            }
                        }
                    }
                    WorkerEvent::Shutdown => break,
                }
            }
            debug!("dispatch worker stopped");
        });

        Worker { tx, handle }
    }
}

impl Drop for UpdateDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
