mod aggregation;
mod no_op_tracker;
mod progress_info;
pub mod verification_wrapper;

pub use aggregation::{ProgressAggregator, ProgressTotals};
pub use no_op_tracker::NoOpProgressUpdater;
pub use progress_info::{BatchProgressUpdate, ItemProgressUpdate};

/// Receives aggregate progress reports for a batch of transfers.
///
/// Reports are delivered synchronously from the task driving the batch, so implementations
/// must return quickly; anything expensive (rendering, I/O) should be handed off.
pub trait BatchProgressUpdater: Send + Sync {
    fn register_update(&self, update: &BatchProgressUpdate);
}

impl<F> BatchProgressUpdater for F
where
    F: Fn(&BatchProgressUpdate) + Send + Sync,
{
    fn register_update(&self, update: &BatchProgressUpdate) {
        self(update)
    }
}
