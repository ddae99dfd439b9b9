use std::sync::Arc;

/// The byte counters of a single item in a batch, as of the update that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemProgressUpdate {
    /// Position of the item in the submitted batch.
    pub index: usize,

    pub item_name: Arc<str>,

    /// Bytes of this item sent so far; never exceeds `bytes_total`.
    pub bytes_sent: u64,

    // The total bytes in this item, independent from the total bytes of all items.
    pub bytes_total: u64,
}

impl ItemProgressUpdate {
    pub fn is_complete(&self) -> bool {
        self.bytes_sent == self.bytes_total
    }
}

/// A report of the total progress across every item in a batch.
///
/// `percent` is size-weighted: a 300 byte item counts three times as much as a 100 byte one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchProgressUpdate {
    /// Rounded aggregate completion in `0..=100`.
    pub percent: u8,

    /// The total bytes known to process across the batch.
    pub total_bytes: u64,

    /// The total bytes that have been sent across the batch.
    pub total_bytes_completed: u64,

    /// The item whose change triggered this report, if any.  The first report of a batch
    /// has no triggering item.
    pub item: Option<ItemProgressUpdate>,
}

impl BatchProgressUpdate {
    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }
}
