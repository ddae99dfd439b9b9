use std::sync::Arc;

use crate::{BatchProgressUpdate, BatchProgressUpdater};

#[derive(Debug, Default)]
pub struct NoOpProgressUpdater;

impl NoOpProgressUpdater {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }
}

impl BatchProgressUpdater for NoOpProgressUpdater {
    fn register_update(&self, _update: &BatchProgressUpdate) {}
}
