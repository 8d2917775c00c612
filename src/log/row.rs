/// Prefix that marks a progress line written by the benchmark harness.
pub const EPOCH_MARKER: &str = "[Epoch] ";

/// A single per-thread progress record from the epoch log.
///
/// Line shape: `[Epoch] <thread_id>,<last_done>,<cur_done>,<segment_time>,<timestamp>`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochRecord {
    pub thread_id: f64,
    /// Cumulative operations completed at the start of the epoch.
    pub last_done: f64,
    /// Cumulative operations completed at the end of the epoch.
    pub cur_done: f64,
    pub segment_time: f64,
    pub timestamp: f64,
}

impl EpochRecord {
    /// Bucket index for this record, if the thread id is a whole number below `max_threads`.
    pub fn thread_slot(&self, max_threads: usize) -> Option<usize> {
        let id = self.thread_id;
        if !id.is_finite() || id < 0.0 || id.fract() != 0.0 || id >= max_threads as f64 {
            return None;
        }
        Some(id as usize)
    }
}
