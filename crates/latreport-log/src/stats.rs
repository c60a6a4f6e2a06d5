// Dweve LatReport - RTAI latency test reports
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Statistics over measurement series.
//!
//! All functions are pure and total: empty or degenerate input yields NaN
//! results instead of errors, and a NaN anywhere in the input propagates to
//! every output.

use crate::record::{Measurements, Series, TestType};
use tracing::trace;

/// Options for turning raw series into report statistics.
///
/// ```
/// use latreport_log::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.init, 10);
/// assert_eq!(config.outlier, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Number of initial samples of every series to skip (warm-up).
    pub init: usize,
    /// Outlier percentile; samples outside `[outlier, 100 - outlier]` are
    /// left out of mean and standard deviation.
    pub outlier: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            init: 10,
            outlier: 0.0,
        }
    }
}

/// Mean, standard deviation and maximum of latency-like samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyStats {
    /// Mean of the retained samples.
    pub mean: f64,
    /// Population standard deviation of the retained samples.
    pub stdev: f64,
    /// Maximum over all samples, trimmed or not.
    pub max: f64,
}

impl LatencyStats {
    /// All fields NaN.
    pub const NAN: LatencyStats = LatencyStats {
        mean: f64::NAN,
        stdev: f64::NAN,
        max: f64::NAN,
    };
}

/// Peak per-interval overrun and number of intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverrunStats {
    /// Largest diff, NaN without intervals.
    pub max: f64,
    /// Number of intervals observed.
    pub count: usize,
}

/// Percentile of sorted samples with linear interpolation between closest
/// ranks. `p` is in percent and clamped to `[0, 100]`.
///
/// ```
/// use latreport_log::percentile;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&sorted, 50.0), 2.5);
/// assert_eq!(percentile(&sorted, 100.0), 4.0);
/// assert!(percentile(&[], 50.0).is_nan());
/// ```
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() || p.is_nan() {
        return f64::NAN;
    }
    let rank = p.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Arithmetic mean, NaN for empty input.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation, NaN for empty input.
pub fn stdev(samples: &[f64]) -> f64 {
    let m = mean(samples);
    if m.is_nan() {
        return f64::NAN;
    }
    let var = samples.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / samples.len() as f64;
    var.sqrt()
}

/// Maximum, NaN for empty input or if any sample is NaN.
pub fn max(samples: &[f64]) -> f64 {
    samples.iter().copied().fold(
        if samples.is_empty() { f64::NAN } else { f64::NEG_INFINITY },
        |acc, x| if x.is_nan() || acc.is_nan() { f64::NAN } else { acc.max(x) },
    )
}

/// First difference of a counter.
///
/// ```
/// assert_eq!(latreport_log::diff(&[0, 0, 1, 1]), vec![0, 1, 0]);
/// ```
pub fn diff(counter: &[i64]) -> Vec<i64> {
    counter.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Mean and standard deviation over the samples inside the outlier band,
/// maximum over all samples.
///
/// With `outlier_pct <= 0` no trimming happens. The band is inclusive and
/// bounded by the `outlier_pct` and `100 - outlier_pct` percentiles, so
/// `outlier_pct >= 50` leaves at most the samples equal to the median.
///
/// ```
/// use latreport_log::trimmed_latency_stats;
///
/// let stats = trimmed_latency_stats(&[1.0, 2.0, 3.0, 100.0], 0.0);
/// assert_eq!(stats.mean, 26.5);
/// assert_eq!(stats.max, 100.0);
///
/// let trimmed = trimmed_latency_stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0], 10.0);
/// assert_eq!(trimmed.mean, 3.5);
/// assert_eq!(trimmed.max, 100.0);
/// ```
pub fn trimmed_latency_stats(samples: &[f64], outlier_pct: f64) -> LatencyStats {
    if samples.is_empty() || samples.iter().any(|x| x.is_nan()) {
        return LatencyStats::NAN;
    }
    let max = max(samples);
    if outlier_pct.is_nan() || outlier_pct <= 0.0 {
        return LatencyStats {
            mean: mean(samples),
            stdev: stdev(samples),
            max,
        };
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let low = percentile(&sorted, outlier_pct);
    let high = percentile(&sorted, 100.0 - outlier_pct);
    let core: Vec<f64> = samples
        .iter()
        .copied()
        .filter(|&x| x >= low && x <= high)
        .collect();
    trace!(
        kept = core.len(),
        total = samples.len(),
        low,
        high,
        "trimmed outliers"
    );
    LatencyStats {
        mean: mean(&core),
        stdev: stdev(&core),
        max,
    }
}

/// Peak and count of already differenced overrun intervals.
pub fn overrun_stats(diffs: &[i64]) -> OverrunStats {
    OverrunStats {
        max: diffs.iter().max().map_or(f64::NAN, |&m| m as f64),
        count: diffs.len(),
    }
}

fn skip(series: &[i64], init: usize) -> &[i64] {
    &series[init.min(series.len())..]
}

fn to_f64(series: &[i64]) -> Vec<f64> {
    series.iter().map(|&x| x as f64).collect()
}

fn series_max(series: &[i64]) -> f64 {
    series.iter().max().map_or(f64::NAN, |&m| m as f64)
}

/// Statistics of a latency test block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyAnalysis {
    /// Latency jitter.
    pub jitter: LatencyStats,
    /// Overruns per sampling interval.
    pub overruns: OverrunStats,
}

/// Statistics of a preempt test block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreemptAnalysis {
    /// Latency jitter.
    pub jitter: LatencyStats,
    /// Largest fast-task jitter.
    pub fast_max: f64,
    /// Largest slow-task jitter.
    pub slow_max: f64,
}

/// Analyze a latency block: skip `init` samples, then compute trimmed
/// jitter statistics and the overrun diffs of the retained rows.
///
/// The overrun counter is differenced from one row before the first
/// retained sample, giving one interval per retained sample.
pub fn analyze_latency(latencies: &[i64], overruns: &[i64], config: &AnalysisConfig) -> LatencyAnalysis {
    let samples = to_f64(skip(latencies, config.init));
    let start = config.init.saturating_sub(1).min(overruns.len());
    let diffs = diff(&overruns[start..]);
    LatencyAnalysis {
        jitter: trimmed_latency_stats(&samples, config.outlier),
        overruns: overrun_stats(&diffs),
    }
}

/// Analyze a preempt block.
pub fn analyze_preempt(
    latencies: &[i64],
    jitter_fast: &[i64],
    jitter_slow: &[i64],
    config: &AnalysisConfig,
) -> PreemptAnalysis {
    let samples = to_f64(skip(latencies, config.init));
    PreemptAnalysis {
        jitter: trimmed_latency_stats(&samples, config.outlier),
        fast_max: series_max(skip(jitter_fast, config.init)),
        slow_max: series_max(skip(jitter_slow, config.init)),
    }
}

/// Analyze a switches block.
pub fn analyze_switches(switches: &[i64], config: &AnalysisConfig) -> LatencyStats {
    trimmed_latency_stats(&to_f64(skip(switches, config.init)), config.outlier)
}

/// Result of analyzing one test block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Analysis {
    /// From a latency block.
    Latency(LatencyAnalysis),
    /// From a preempt block.
    Preempt(PreemptAnalysis),
    /// From a switches block.
    Switches(LatencyStats),
}

impl Analysis {
    /// Analyze the `test` block of `mode`, if the transcript has one.
    pub fn of(record: &Measurements, mode: &str, test: TestType, config: &AnalysisConfig) -> Option<Self> {
        if !record.has_test(mode, test) {
            return None;
        }
        let series = |s: Series| record.get(mode, test, s).unwrap_or(&[]);
        let analysis = match test {
            TestType::Latency => Analysis::Latency(analyze_latency(
                series(Series::Latencies),
                series(Series::Overruns),
                config,
            )),
            TestType::Preempt => Analysis::Preempt(analyze_preempt(
                series(Series::Latencies),
                series(Series::JitterFast),
                series(Series::JitterSlow),
                config,
            )),
            TestType::Switches => {
                Analysis::Switches(analyze_switches(series(Series::Switches), config))
            }
        };
        Some(analysis)
    }

    /// Result values in report column order, grouped by section.
    ///
    /// Latency: jitter mean, stdev, max; overrun max, count.
    /// Preempt: jitter mean, stdev, max; fast max; slow max.
    /// Switches: mean, stdev, max.
    pub fn groups(&self) -> Vec<Vec<f64>> {
        let triple = |s: &LatencyStats| vec![s.mean, s.stdev, s.max];
        match self {
            Analysis::Latency(a) => vec![
                triple(&a.jitter),
                vec![a.overruns.max, a.overruns.count as f64],
            ],
            Analysis::Preempt(a) => vec![triple(&a.jitter), vec![a.fast_max], vec![a.slow_max]],
            Analysis::Switches(s) => vec![triple(s)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SeriesKey;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 25.0), 20.0);
        assert!(close(percentile(&sorted, 10.0), 14.0));
        assert!(close(percentile(&sorted, 90.0), 46.0));
        assert_eq!(percentile(&sorted, 150.0), 50.0);
        assert_eq!(percentile(&[7.0], 33.0), 7.0);
    }

    #[test]
    fn test_untrimmed_stats() {
        let stats = trimmed_latency_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 0.0);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.stdev, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn test_empty_and_nan_inputs() {
        for p in [0.0, 5.0, 49.0] {
            let stats = trimmed_latency_stats(&[], p);
            assert!(stats.mean.is_nan() && stats.stdev.is_nan() && stats.max.is_nan());
        }
        let stats = trimmed_latency_stats(&[1.0, f64::NAN, 3.0], 0.0);
        assert!(stats.mean.is_nan() && stats.max.is_nan());
    }

    #[test]
    fn test_trimmed_max_is_untrimmed() {
        let samples = [5.0, 6.0, 5.0, 7.0, 6.0, 5.0, 300.0];
        let stats = trimmed_latency_stats(&samples, 10.0);
        assert_eq!(stats.max, 300.0);
        assert!(stats.mean < 7.0);
    }

    #[test]
    fn test_band_without_samples() {
        let stats = trimmed_latency_stats(&[1.0, 9.0], 10.0);
        assert!(stats.mean.is_nan());
        assert!(stats.stdev.is_nan());
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn test_overrun_stats() {
        let stats = overrun_stats(&[0, 1, 0]);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.count, 3);
        let empty = overrun_stats(&[]);
        assert!(empty.max.is_nan());
        assert_eq!(empty.count, 0);
    }

    #[test]
    fn test_analyze_latency_skips_init() {
        let latencies: Vec<i64> = (0..12).map(|i| if i < 10 { 99_999 } else { 1000 + i }).collect();
        let mut overruns = vec![0; 12];
        overruns[10] = 1;
        overruns[11] = 1;
        let config = AnalysisConfig::default();

        let a = analyze_latency(&latencies, &overruns, &config);
        assert_eq!(a.jitter.mean, 1010.5);
        assert_eq!(a.jitter.stdev, 0.5);
        assert_eq!(a.jitter.max, 1011.0);
        assert_eq!(a.overruns.max, 1.0);
        assert_eq!(a.overruns.count, 2);
    }

    #[test]
    fn test_analyze_short_series() {
        let config = AnalysisConfig::default();
        let a = analyze_latency(&[1, 2, 3], &[0, 0, 0], &config);
        assert!(a.jitter.mean.is_nan());
        assert!(a.overruns.max.is_nan());
        assert_eq!(a.overruns.count, 0);
    }

    #[test]
    fn test_analyze_without_init() {
        let config = AnalysisConfig { init: 0, outlier: 0.0 };
        let a = analyze_latency(&[4, 6], &[0, 2], &config);
        assert_eq!(a.jitter.mean, 5.0);
        assert_eq!(a.overruns.max, 2.0);
        assert_eq!(a.overruns.count, 1);
    }

    #[test]
    fn test_analysis_of_record() {
        let mut record = Measurements::new();
        record.insert(SeriesKey::new("kern", TestType::Preempt, Series::Latencies), vec![10, 20]);
        record.insert(SeriesKey::new("kern", TestType::Preempt, Series::JitterFast), vec![3, 8]);
        record.insert(SeriesKey::new("kern", TestType::Preempt, Series::JitterSlow), vec![5, 1]);
        let config = AnalysisConfig { init: 0, outlier: 0.0 };

        assert_eq!(Analysis::of(&record, "kern", TestType::Latency, &config), None);
        let analysis = Analysis::of(&record, "kern", TestType::Preempt, &config).unwrap();
        assert_eq!(
            analysis.groups(),
            vec![vec![15.0, 5.0, 20.0], vec![8.0], vec![5.0]]
        );
    }
}
