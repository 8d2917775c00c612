//! Aggregation model: per-thread epoch records -> aligned system-wide throughput.

pub mod window;

use crate::error::EpochError;
use crate::log::{EpochRecord, parse_epoch_file};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

pub use window::WindowConfig;

/// Raw operation counts are reported in millions (2^20) of operations.
pub const OPS_SCALE: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateConfig {
    /// Scan bound for thread ids; ids at or above it are ignored.
    pub max_threads: usize,
    /// Seconds covered by one epoch record.
    pub time_epoch: f64,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            max_threads: 20,
            time_epoch: 1.0,
        }
    }
}

impl AggregateConfig {
    pub fn validate(&self) -> Result<(), EpochError> {
        if self.max_threads == 0 {
            return Err(EpochError::InvalidConfig(
                "max_threads must be at least 1".into(),
            ));
        }
        if !self.time_epoch.is_finite() || self.time_epoch <= 0.0 {
            return Err(EpochError::InvalidConfig(format!(
                "time_epoch must be a positive number, got {}",
                self.time_epoch
            )));
        }
        Ok(())
    }
}

/// `last_done` samples per thread id, in file order. Index = thread id.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadBuckets(pub Vec<Vec<f64>>);

impl ThreadBuckets {
    /// Partition records by thread id into `max_threads` buckets.
    ///
    /// Out-of-range or fractional ids are dropped.
    pub fn partition(records: &[EpochRecord], max_threads: usize) -> Self {
        let mut buckets = vec![Vec::new(); max_threads];
        let mut dropped = 0usize;
        for record in records {
            match record.thread_slot(max_threads) {
                Some(slot) => buckets[slot].push(record.last_done),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(
                "dropped {} records with thread id outside [0, {})",
                dropped, max_threads
            );
        }
        Self(buckets)
    }

    /// Length of the longest bucket.
    pub fn max_len(&self) -> usize {
        self.0.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Zero-pad every bucket to `max_len` and sum element-wise.
    pub fn aligned_sum(&self) -> Result<Vec<f64>, EpochError> {
        let max_len = self.max_len();
        if max_len == 0 {
            return Err(EpochError::EmptyLog);
        }

        let total = self
            .0
            .iter()
            .filter(|bucket| !bucket.is_empty())
            .fold(vec![0.0; max_len], |mut acc, bucket| {
                for (slot, value) in acc.iter_mut().zip(bucket) {
                    *slot += value;
                }
                acc
            });
        Ok(total)
    }
}

/// Aggregate throughput over time, in Mops/s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputSeries {
    pub time_axis: Vec<f64>,
    pub throughput: Vec<f64>,
}

impl ThroughputSeries {
    pub fn len(&self) -> usize {
        self.throughput.len()
    }

    pub fn is_empty(&self) -> bool {
        self.throughput.is_empty()
    }

    /// (x, y) pairs for rendering.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.time_axis
            .iter()
            .copied()
            .zip(self.throughput.iter().copied())
            .collect()
    }
}

/// Build the throughput series from parsed records.
pub fn aggregate_records(
    records: &[EpochRecord],
    config: &AggregateConfig,
) -> Result<ThroughputSeries, EpochError> {
    config.validate()?;

    let buckets = ThreadBuckets::partition(records, config.max_threads);
    for (thread, bucket) in buckets.0.iter().enumerate() {
        if !bucket.is_empty() {
            debug!("thread {}: {} epochs", thread, bucket.len());
        }
    }

    let total = buckets.aligned_sum()?;
    let max_len = total.len();
    info!("max runtime = {} epochs", max_len);

    let divisor = config.time_epoch * OPS_SCALE;
    let throughput = total.iter().map(|ops| ops / divisor).collect();
    let time_axis = (1..=max_len)
        .map(|i| i as f64 * config.time_epoch)
        .collect();

    Ok(ThroughputSeries {
        time_axis,
        throughput,
    })
}

/// Parse an epoch log and aggregate it in one step.
pub fn aggregate(path: &Path, config: &AggregateConfig) -> Result<ThroughputSeries, EpochError> {
    config.validate()?;
    let records = parse_epoch_file(path)?;
    info!("{}: parsed {} epoch records", path.display(), records.len());
    aggregate_records(&records, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::parse::parse_epoch_reader;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn buckets(series: &[&[f64]]) -> ThreadBuckets {
        ThreadBuckets(series.iter().map(|s| s.to_vec()).collect())
    }

    fn records(text: &str) -> Vec<EpochRecord> {
        parse_epoch_reader(text.as_bytes(), Path::new("<memory>")).unwrap()
    }

    #[test]
    fn zero_pad_sum() {
        let b = buckets(&[&[1.0, 2.0, 3.0], &[10.0, 20.0]]);
        assert_eq!(b.aligned_sum().unwrap(), vec![11.0, 22.0, 3.0]);
    }

    #[test]
    fn aggregate_length_is_longest_bucket() {
        let b = buckets(&[&[], &[1.0], &[], &[1.0, 1.0, 1.0, 1.0], &[2.0, 2.0]]);
        let total = b.aligned_sum().unwrap();
        assert_eq!(total.len(), 4);
        assert_eq!(total, vec![4.0, 3.0, 1.0, 1.0]);
    }

    #[test]
    fn all_empty_buckets_fail() {
        let b = buckets(&[&[], &[], &[]]);
        assert!(matches!(b.aligned_sum(), Err(EpochError::EmptyLog)));
    }

    #[test]
    fn partition_uses_last_done_and_ignores_out_of_range() {
        let recs = records(
            "[Epoch] 0,5,6,0,1\n[Epoch] 25,100,200,0,1\n[Epoch] 1,3,4,0,1\n[Epoch] 0,9,10,0,2\n",
        );
        let b = ThreadBuckets::partition(&recs, 20);
        assert_eq!(b.0.len(), 20);
        assert_eq!(b.0[0], vec![5.0, 9.0]);
        assert_eq!(b.0[1], vec![3.0]);
        assert!(b.0[2..].iter().all(Vec::is_empty));
    }

    #[test]
    fn max_threads_is_a_scan_bound() {
        let recs = records("[Epoch] 0,1,1,0,1\n[Epoch] 2,7,7,0,1\n[Epoch] 2,7,7,0,2\n");
        let narrow = AggregateConfig {
            max_threads: 2,
            ..Default::default()
        };
        let series = aggregate_records(&recs, &narrow).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.throughput, vec![1.0 / OPS_SCALE]);

        let wide = AggregateConfig {
            max_threads: 3,
            ..Default::default()
        };
        let series = aggregate_records(&recs, &wide).unwrap();
        assert_eq!(series.throughput, vec![8.0 / OPS_SCALE, 7.0 / OPS_SCALE]);
    }

    #[test]
    fn records_all_out_of_range_are_empty() {
        let recs = records("[Epoch] 42,1,1,0,1\n");
        assert!(matches!(
            aggregate_records(&recs, &AggregateConfig::default()),
            Err(EpochError::EmptyLog)
        ));
    }

    #[test]
    fn throughput_scales_by_epoch_and_mega() {
        let recs = records("[Epoch] 0,1048576,0,0,1\n[Epoch] 0,4194304,0,0,3\n");
        let config = AggregateConfig {
            time_epoch: 2.0,
            ..Default::default()
        };
        let series = aggregate_records(&recs, &config).unwrap();
        assert_eq!(series.throughput, vec![0.5, 2.0]);
        assert_eq!(series.time_axis, vec![2.0, 4.0]);
    }

    #[test]
    fn rejects_unusable_config() {
        let recs = records("[Epoch] 0,1,1,0,1\n");
        for config in [
            AggregateConfig {
                max_threads: 0,
                ..Default::default()
            },
            AggregateConfig {
                time_epoch: 0.0,
                ..Default::default()
            },
            AggregateConfig {
                time_epoch: f64::NAN,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                aggregate_records(&recs, &config),
                Err(EpochError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn end_to_end_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "starting benchmark").unwrap();
        writeln!(file, "[Epoch] 0,5,6,0,1").unwrap();
        writeln!(file, "[Epoch] 1,3,4,0,1").unwrap();
        writeln!(file, "[Epoch] 0,9,10,0,2").unwrap();

        let series = aggregate(file.path(), &AggregateConfig::default()).unwrap();
        assert_eq!(series.time_axis, vec![1.0, 2.0]);
        assert_eq!(series.throughput, vec![8.0 / 1048576.0, 9.0 / 1048576.0]);
        assert_eq!(
            series.points(),
            vec![(1.0, 8.0 / 1048576.0), (2.0, 9.0 / 1048576.0)]
        );
    }

    #[test]
    fn serializes_as_two_arrays() {
        let series = ThroughputSeries {
            time_axis: vec![1.0, 2.0],
            throughput: vec![0.5, 0.25],
        };
        assert_eq!(
            serde_json::to_string(&series).unwrap(),
            r#"{"time_axis":[1.0,2.0],"throughput":[0.5,0.25]}"#
        );
    }
}
