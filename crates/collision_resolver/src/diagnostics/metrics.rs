//! Running performance counters

use serde::Serialize;

/// Incrementally updated running average of operation durations
///
/// Stores only the count and the current mean; no raw samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningAverage {
    count: u64,
    average_ms: f64,
}

impl RunningAverage {
    /// Fold one duration sample into the average.
    pub fn record(&mut self, duration_ms: f64) {
        self.count += 1;
        self.average_ms += (duration_ms - self.average_ms) / self.count as f64;
    }

    /// Number of samples recorded.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Current mean duration in milliseconds (0 before any sample).
    pub fn average_ms(&self) -> f64 {
        self.average_ms
    }
}

/// Snapshot of detection and resolution timing counters
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PerformanceMetrics {
    /// Number of detection queries performed
    pub detection_count: u64,
    /// Mean detection duration in milliseconds
    pub average_detection_ms: f64,
    /// Number of resolutions that reached the search phase
    pub resolution_count: u64,
    /// Mean resolution duration in milliseconds
    pub average_resolution_ms: f64,
}

impl PerformanceMetrics {
    pub(crate) fn from_averages(detection: &RunningAverage, resolution: &RunningAverage) -> Self {
        Self {
            detection_count: detection.count(),
            average_detection_ms: detection.average_ms(),
            resolution_count: resolution.count(),
            average_resolution_ms: resolution.average_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_running_average_is_incremental_mean() {
        let mut average = RunningAverage::default();
        average.record(10.0);
        average.record(20.0);
        average.record(30.0);

        assert_eq!(average.count(), 3);
        assert_relative_eq!(average.average_ms(), 20.0);
    }

    #[test]
    fn test_empty_average_is_zero() {
        let average = RunningAverage::default();
        assert_eq!(average.count(), 0);
        assert_relative_eq!(average.average_ms(), 0.0);
    }
}
