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


//! Property-based tests for the statistics functions.
//!
//! - No trimming at 0 %: plain mean, population deviation and maximum
//! - The maximum is never trimmed
//! - Empty input gives NaN everywhere
//! - Overrun diffs of a non-decreasing counter are non-negative

use latreport_log::stats::{max, mean, stdev};
use latreport_log::{diff, overrun_stats, percentile, trimmed_latency_stats};
use proptest::prelude::*;

const TEST_CASES: u32 = 500;

fn samples() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6, 1..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(TEST_CASES))]

    #[test]
    fn prop_zero_percent_is_untrimmed(s in samples()) {
        let stats = trimmed_latency_stats(&s, 0.0);
        prop_assert_eq!(stats.mean, mean(&s));
        prop_assert_eq!(stats.stdev, stdev(&s));
        prop_assert_eq!(stats.max, max(&s));
    }

    #[test]
    fn prop_max_is_never_trimmed(s in samples(), p in 0.01f64..49.99) {
        let stats = trimmed_latency_stats(&s, p);
        let expected = s.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(stats.max, expected);
    }

    #[test]
    fn prop_trimmed_mean_within_band(s in samples(), p in 0.01f64..49.99) {
        let stats = trimmed_latency_stats(&s, p);
        let mut sorted = s.clone();
        sorted.sort_by(f64::total_cmp);
        let (low, high) = (percentile(&sorted, p), percentile(&sorted, 100.0 - p));
        if !stats.mean.is_nan() {
            prop_assert!(stats.mean >= low - 1e-6 * low.abs().max(1.0));
            prop_assert!(stats.mean <= high + 1e-6 * high.abs().max(1.0));
        }
    }

    #[test]
    fn prop_empty_is_nan(p in -10.0f64..100.0) {
        let stats = trimmed_latency_stats(&[], p);
        prop_assert!(stats.mean.is_nan());
        prop_assert!(stats.stdev.is_nan());
        prop_assert!(stats.max.is_nan());
    }

    #[test]
    fn prop_percentile_endpoints(s in samples()) {
        let mut sorted = s;
        sorted.sort_by(f64::total_cmp);
        prop_assert_eq!(percentile(&sorted, 0.0), sorted[0]);
        prop_assert_eq!(percentile(&sorted, 100.0), sorted[sorted.len() - 1]);
    }

    #[test]
    fn prop_counter_diffs(steps in prop::collection::vec(0i64..5, 0..100)) {
        let counter: Vec<i64> = steps
            .iter()
            .scan(0, |acc, s| {
                *acc += s;
                Some(*acc)
            })
            .collect();
        let diffs = diff(&counter);
        prop_assert_eq!(diffs.len(), counter.len().saturating_sub(1));
        prop_assert!(diffs.iter().all(|&d| d >= 0));
        let stats = overrun_stats(&diffs);
        prop_assert_eq!(stats.count, diffs.len());
        if diffs.is_empty() {
            prop_assert!(stats.max.is_nan());
        }
    }
}
