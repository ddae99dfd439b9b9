use std::sync::Arc;

use more_asserts::assert_le;
use parking_lot::Mutex;

use crate::{BatchProgressUpdate, BatchProgressUpdater};

/// A wrapper that forwards updates to an inner updater while checking the invariants every
/// batch report must satisfy:
///
/// - the aggregate percentage never decreases,
/// - completed bytes never exceed the known total,
/// - an item's sent bytes never exceed its total, and never decrease for the same item.
///
/// All updates are recorded so tests can inspect them afterwards.
pub struct ProgressUpdaterVerificationWrapper {
    inner: Arc<dyn BatchProgressUpdater>,
    updates: Mutex<Vec<BatchProgressUpdate>>,
}

impl ProgressUpdaterVerificationWrapper {
    pub fn new(inner: Arc<dyn BatchProgressUpdater>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            updates: Mutex::new(Vec::new()),
        })
    }

    pub fn updates(&self) -> Vec<BatchProgressUpdate> {
        self.updates.lock().clone()
    }

    pub fn percentages(&self) -> Vec<u8> {
        self.updates.lock().iter().map(|u| u.percent).collect()
    }

    pub fn last_percent(&self) -> Option<u8> {
        self.updates.lock().last().map(|u| u.percent)
    }

    /// Asserts that the last report shows a finished batch.
    pub fn assert_complete(&self) {
        let updates = self.updates.lock();
        let last = updates.last().expect("no progress updates were registered");
        assert_eq!(last.percent, 100);
        assert_eq!(last.total_bytes_completed, last.total_bytes);
    }
}

impl BatchProgressUpdater for ProgressUpdaterVerificationWrapper {
    fn register_update(&self, update: &BatchProgressUpdate) {
        {
            let mut updates = self.updates.lock();

            assert_le!(update.percent, 100);
            assert_le!(update.total_bytes_completed, update.total_bytes);

            if let Some(previous) = updates.last() {
                assert_le!(previous.percent, update.percent, "aggregate progress went backwards");
            }

            if let Some(item) = &update.item {
                assert_le!(item.bytes_sent, item.bytes_total);

                let previous_for_item = updates
                    .iter()
                    .rev()
                    .filter_map(|u| u.item.as_ref())
                    .find(|i| i.index == item.index);

                if let Some(previous) = previous_for_item {
                    assert_le!(previous.bytes_sent, item.bytes_sent, "item progress went backwards");
                }
            }

            updates.push(update.clone());
        }

        self.inner.register_update(update);
    }
}
