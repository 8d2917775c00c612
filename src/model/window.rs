//! Fixed-window averaging applied before plotting.

use crate::error::EpochError;
use crate::model::ThroughputSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Samples averaged into one output point.
    pub gap: usize,
    /// Samples kept from the start of the series.
    pub time_strip: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            gap: 1,
            time_strip: 80,
        }
    }
}

/// Truncate to `limit` samples, then average non-overlapping groups of `window`.
///
/// A trailing group shorter than `window` is dropped.
pub fn downsample(series: &[f64], window: usize, limit: usize) -> Result<Vec<f64>, EpochError> {
    if window == 0 {
        return Err(EpochError::InvalidConfig("window must be at least 1".into()));
    }
    let head = &series[..limit.min(series.len())];
    Ok(head
        .chunks_exact(window)
        .map(|group| group.iter().sum::<f64>() / window as f64)
        .collect())
}

impl ThroughputSeries {
    /// Downsampled copy. Point `i` (1-based) sits at `i * gap * time_epoch`.
    pub fn windowed(&self, config: &WindowConfig, time_epoch: f64) -> Result<Self, EpochError> {
        let throughput = downsample(&self.throughput, config.gap, config.time_strip)?;
        let step = config.gap as f64 * time_epoch;
        let time_axis = (1..=throughput.len()).map(|i| i as f64 * step).collect();
        Ok(Self {
            time_axis,
            throughput,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drops_trailing_partial_window() {
        assert_eq!(
            downsample(&[1.0, 2.0, 3.0, 4.0, 5.0], 2, 5).unwrap(),
            vec![1.5, 3.5]
        );
    }

    #[test]
    fn window_of_one_is_truncation_only() {
        let input = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(downsample(&input, 1, 10).unwrap(), input.to_vec());
        assert_eq!(downsample(&input, 1, 3).unwrap(), vec![3.0, 1.0, 4.0]);
    }

    #[test]
    fn limit_applies_before_grouping() {
        let input = [1.0, 1.0, 1.0, 9.0, 9.0, 9.0];
        assert_eq!(downsample(&input, 3, 4).unwrap(), vec![1.0]);
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(
            downsample(&[1.0], 0, 1),
            Err(EpochError::InvalidConfig(_))
        ));
    }

    #[test]
    fn windowed_series_rebuilds_time_axis() {
        let series = ThroughputSeries {
            time_axis: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            throughput: vec![2.0, 4.0, 6.0, 8.0, 10.0],
        };
        let config = WindowConfig {
            gap: 2,
            time_strip: 80,
        };
        let out = series.windowed(&config, 1.0).unwrap();
        assert_eq!(out.throughput, vec![3.0, 7.0]);
        assert_eq!(out.time_axis, vec![2.0, 4.0]);
    }

    #[test]
    fn consecutive_calls_are_independent() {
        let a = downsample(&[1.0, 2.0, 3.0], 2, 3).unwrap();
        let b = downsample(&[10.0, 20.0], 2, 2).unwrap();
        assert_eq!(a, vec![1.5]);
        assert_eq!(b, vec![15.0]);
    }
}
