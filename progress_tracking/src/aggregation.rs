use more_asserts::debug_assert_le;
use tracing::trace;

use crate::{BatchProgressUpdate, BatchProgressUpdater, ItemProgressUpdate};

/// Sums of the byte counters across a set of items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressTotals {
    pub bytes_sent: u64,
    pub bytes_total: u64,
}

impl ProgressTotals {
    /// Sums `(bytes_sent, bytes_total)` pairs.  Always computed from scratch so that the result
    /// never drifts from the per-item counters.
    pub fn from_items(items: impl IntoIterator<Item = (u64, u64)>) -> Self {
        items
            .into_iter()
            .fold(Self::default(), |acc, (sent, total)| {
                debug_assert_le!(sent, total);
                Self {
                    bytes_sent: acc.bytes_sent.saturating_add(sent),
                    bytes_total: acc.bytes_total.saturating_add(total),
                }
            })
    }

    /// `round(100 * sent / total)` clamped to `[0, 100]`.  An empty total counts as done.
    pub fn percent(&self) -> u8 {
        if self.bytes_total == 0 {
            return 100;
        }

        let sent = self.bytes_sent.min(self.bytes_total) as u128;
        let total = self.bytes_total as u128;

        // Integer round-half-up of 100 * sent / total.
        let percent = (200 * sent + total) / (2 * total);
        percent.min(100) as u8
    }
}

/// Turns per-item counters into aggregate reports for a [`BatchProgressUpdater`].
///
/// The reported percentage never goes down over the lifetime of the aggregator, even if an
/// item's total is revised upward mid-transfer.
pub struct ProgressAggregator<'a> {
    updater: &'a dyn BatchProgressUpdater,
    last_percent: Option<u8>,
}

impl<'a> ProgressAggregator<'a> {
    pub fn new(updater: &'a dyn BatchProgressUpdater) -> Self {
        Self {
            updater,
            last_percent: None,
        }
    }

    /// The last percentage handed to the updater, if any report has been made.
    pub fn last_percent(&self) -> Option<u8> {
        self.last_percent
    }

    /// Recomputes the aggregate from `totals` and reports it, attributing the change to `item`.
    pub fn report(&mut self, totals: ProgressTotals, item: Option<ItemProgressUpdate>) -> u8 {
        let computed = totals.percent();
        let percent = self.last_percent.map_or(computed, |last| last.max(computed));

        if percent != computed {
            trace!(computed, reported = percent, "Holding aggregate progress at previous value");
        }

        self.last_percent = Some(percent);

        self.updater.register_update(&BatchProgressUpdate {
            percent,
            total_bytes: totals.bytes_total,
            total_bytes_completed: totals.bytes_sent,
            item,
        });

        percent
    }
}
