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


//! Parser output: measurement series and environment facts of one transcript.

use std::collections::BTreeMap;
use std::fmt;

/// Kind of RTAI test block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum TestType {
    /// Periodic task latency with overrun counter.
    Latency,
    /// Preemption test with fast and slow jitter.
    Preempt,
    /// Task switch time.
    Switches,
}

impl TestType {
    /// All recognized test types.
    pub const ALL: [TestType; 3] = [TestType::Latency, TestType::Preempt, TestType::Switches];

    /// Name as it appears in a test header (`kern/latency`).
    pub fn name(self) -> &'static str {
        match self {
            TestType::Latency => "latency",
            TestType::Preempt => "preempt",
            TestType::Switches => "switches",
        }
    }

    /// Recognize a test type name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named numeric series extracted from a test block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Series {
    /// Latency deltas in nanoseconds.
    Latencies,
    /// Raw, non-decreasing overrun counter.
    Overruns,
    /// Fast-task jitter.
    JitterFast,
    /// Slow-task jitter.
    JitterSlow,
    /// Switch times.
    Switches,
}

impl Series {
    /// Series name.
    pub fn name(self) -> &'static str {
        match self {
            Series::Latencies => "latencies",
            Series::Overruns => "overruns",
            Series::JitterFast => "jitterfast",
            Series::JitterSlow => "jitterslow",
            Series::Switches => "switches",
        }
    }

    /// The series a test type produces, in extraction order.
    pub fn of(test: TestType) -> &'static [Series] {
        match test {
            TestType::Latency => &[Series::Latencies, Series::Overruns],
            TestType::Preempt => &[Series::Latencies, Series::JitterFast, Series::JitterSlow],
            TestType::Switches => &[Series::Switches],
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of a measurement series: test mode (`kern`, `kthreads`, `user`),
/// test type and series name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SeriesKey {
    /// Test mode.
    pub mode: String,
    /// Test type.
    pub test: TestType,
    /// Series within the test.
    pub series: Series,
}

impl SeriesKey {
    /// Build a key.
    pub fn new(mode: impl Into<String>, test: TestType, series: Series) -> Self {
        Self {
            mode: mode.into(),
            test,
            series,
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.mode, self.test, self.series)
    }
}

/// The measurement record of one transcript.
///
/// ```
/// use latreport_log::{Measurements, Series, SeriesKey, TestType};
///
/// let mut record = Measurements::new();
/// record.insert(SeriesKey::new("kern", TestType::Latency, Series::Latencies), vec![900, 1100]);
/// assert!(record.has_test("kern", TestType::Latency));
/// assert_eq!(record.get("kern", TestType::Latency, Series::Latencies), Some(&[900, 1100][..]));
/// assert_eq!(record.get("user", TestType::Latency, Series::Latencies), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measurements {
    series: BTreeMap<SeriesKey, Vec<i64>>,
}

impl Measurements {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a series, replacing an earlier one with the same key.
    pub fn insert(&mut self, key: SeriesKey, values: Vec<i64>) -> Option<Vec<i64>> {
        self.series.insert(key, values)
    }

    /// Look up a series.
    pub fn get(&self, mode: &str, test: TestType, series: Series) -> Option<&[i64]> {
        self.series
            .get(&SeriesKey::new(mode, test, series))
            .map(Vec::as_slice)
    }

    /// Whether a block of `test` was recorded for `mode`.
    pub fn has_test(&self, mode: &str, test: TestType) -> bool {
        self.series.keys().any(|k| k.mode == mode && k.test == test)
    }

    /// Distinct test modes, sorted.
    pub fn modes(&self) -> Vec<&str> {
        let mut modes: Vec<&str> = self.series.keys().map(|k| k.mode.as_str()).collect();
        modes.dedup();
        modes
    }

    /// All series in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SeriesKey, &[i64])> {
        self.series.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of stored series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no series were recorded.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Measurements {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.series.iter().map(|(k, v)| (k.to_string(), v)))
    }
}

/// Facts about the machine the tests ran on. Absent facts are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Environment {
    /// CPU the tests ran on.
    pub cpu_id: Option<String>,
    /// Core temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Core frequency in GHz.
    pub frequency: Option<f64>,
    /// Share of time the core spent in the polling idle state, in percent.
    pub poll: Option<f64>,
    /// Number of CPUs listed in `isolcpus=`.
    pub isolated_cpus: Option<usize>,
    /// Kernel command line tokens.
    pub kernel_parameters: Vec<String>,
}

/// Everything extracted from one transcript.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Transcript {
    /// Measurement series keyed by mode, test type and series.
    pub measurements: Measurements,
    /// Machine facts.
    pub environment: Environment,
    /// Test blocks opened, including those of unknown type.
    pub blocks: Vec<String>,
    /// Lines read.
    pub lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        for test in TestType::ALL {
            assert_eq!(TestType::from_name(test.name()), Some(test));
        }
        assert_eq!(TestType::from_name("irq"), None);
    }

    #[test]
    fn test_series_per_type() {
        assert_eq!(Series::of(TestType::Latency), &[Series::Latencies, Series::Overruns]);
        assert_eq!(Series::of(TestType::Switches), &[Series::Switches]);
    }

    #[test]
    fn test_key_display() {
        let key = SeriesKey::new("kthreads", TestType::Preempt, Series::JitterSlow);
        assert_eq!(key.to_string(), "kthreads/preempt/jitterslow");
    }

    #[test]
    fn test_get_selects_exact_key() {
        let mut record = Measurements::new();
        record.insert(SeriesKey::new("kern", TestType::Latency, Series::Latencies), vec![1]);
        record.insert(SeriesKey::new("kern", TestType::Latency, Series::Overruns), vec![2]);
        record.insert(SeriesKey::new("kern", TestType::Preempt, Series::Latencies), vec![3]);
        record.insert(SeriesKey::new("user", TestType::Latency, Series::Latencies), vec![4]);

        assert_eq!(record.get("kern", TestType::Latency, Series::Overruns), Some(&[2][..]));
        assert_eq!(record.get("kern", TestType::Preempt, Series::Latencies), Some(&[3][..]));
        assert_eq!(record.get("user", TestType::Latency, Series::Latencies), Some(&[4][..]));
        assert_eq!(record.get("user", TestType::Latency, Series::Overruns), None);
        assert_eq!(record.get("kthreads", TestType::Latency, Series::Latencies), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut record = Measurements::new();
        let key = SeriesKey::new("user", TestType::Switches, Series::Switches);
        assert_eq!(record.insert(key.clone(), vec![1]), None);
        assert_eq!(record.insert(key, vec![2, 3]), Some(vec![1]));
        assert_eq!(record.len(), 1);
        assert_eq!(
            record.get("user", TestType::Switches, Series::Switches),
            Some(&[2, 3][..])
        );
    }

    #[test]
    fn test_modes_are_distinct() {
        let mut record = Measurements::new();
        record.insert(SeriesKey::new("user", TestType::Latency, Series::Latencies), vec![]);
        record.insert(SeriesKey::new("kern", TestType::Latency, Series::Overruns), vec![]);
        record.insert(SeriesKey::new("kern", TestType::Latency, Series::Latencies), vec![]);
        assert_eq!(record.modes(), vec!["kern", "user"]);
        assert!(!record.is_empty());
    }
}
