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


//! RTAI latency test transcript parsing and statistics.
//!
//! A transcript is the text log of one run of the RTAI latency test suite:
//! test blocks with `RTD|` data lines, followed by a description of the
//! machine. [`parse_transcript`] extracts the measurement series and the
//! environment facts in one pass; the [`stats`] functions reduce series to
//! report numbers.
//!
//! # Examples
//!
//! ```rust
//! use latreport_log::{parse_transcript, Analysis, AnalysisConfig, ParserConfig, TestType};
//! use std::io::Cursor;
//!
//! let text = "\
//! kern/latency test: period 100000 ns
//! RTD|   -200|   -200|    100|   1800|   1800|      0
//! RTD|   -100|   -200|    100|   2100|   2100|      1
//! --------------------------
//! ";
//! let transcript = parse_transcript(Cursor::new(text), &ParserConfig::default()).unwrap();
//! let config = AnalysisConfig { init: 0, outlier: 0.0 };
//! match Analysis::of(&transcript.measurements, "kern", TestType::Latency, &config) {
//!     Some(Analysis::Latency(a)) => {
//!         assert_eq!(a.jitter.max, 2200.0);
//!         assert_eq!(a.overruns.max, 1.0);
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

mod error;
mod parser;
mod reader;
mod record;
pub mod stats;

pub use error::{LogError, Result};
pub use parser::{parse_file, parse_transcript, ParserConfig, TranscriptParser};
pub use reader::{LineReader, DEFAULT_MAX_LINE_LENGTH};
pub use record::{Environment, Measurements, Series, SeriesKey, TestType, Transcript};
pub use stats::{
    diff, overrun_stats, percentile, trimmed_latency_stats, Analysis, AnalysisConfig,
    LatencyAnalysis, LatencyStats, OverrunStats, PreemptAnalysis,
};
