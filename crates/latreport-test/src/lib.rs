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


//! Shared test fixtures for latreport crates.
//!
//! Provides a builder for RTAI test transcripts, canonical sample
//! transcripts, degraded inputs, and a helper for the file naming scheme
//! the test scripts use.
//!
//! # Quick Start
//!
//! ```rust
//! use latreport_test::fixtures::{self, builders::TranscriptBuilder};
//!
//! let text = fixtures::full_run();
//! assert!(text.contains("kern/latency test:"));
//!
//! let custom = TranscriptBuilder::new()
//!     .latency("user", &[1000, 1200], &[0, 0])
//!     .cpu(2)
//!     .build();
//! assert!(custom.contains("tests run on cpu"));
//!
//! for (name, text) in fixtures::errors::degraded_samples() {
//!     assert!(!name.is_empty());
//!     let _ = text;
//! }
//! ```

pub mod fixtures;

/// File name of a transcript as produced by the test scripts:
/// `latencies-<host>-<kernel>-<num>-<date>-<params>-<load>-<quality>`.
///
/// The kernel is three dash-separated tokens, the date three more.
///
/// ```rust
/// let name = latreport_test::file_name("rt1", 7, &["isolcpus", "cpu1"], "cpu", "good");
/// assert_eq!(name, "latencies-rt1-4.4.115-rtai-1-007-2018-05-14-isolcpus-cpu1-cpu-good");
/// ```
pub fn file_name(host: &str, num: u32, params: &[&str], load: &str, quality: &str) -> String {
    let mut tokens = vec![
        "latencies".to_string(),
        host.to_string(),
        "4.4.115".to_string(),
        "rtai".to_string(),
        "1".to_string(),
        format!("{:03}", num),
        "2018".to_string(),
        "05".to_string(),
        "14".to_string(),
    ];
    tokens.extend(params.iter().map(|p| p.to_string()));
    tokens.push(load.to_string());
    tokens.push(quality.to_string());
    tokens.join("-")
}
