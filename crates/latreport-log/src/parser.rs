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


//! Transcript scanner.
//!
//! A transcript is read in one forward pass with two phases. The
//! measurement phase collects RTAI test blocks:
//!
//! ```text
//! kern/latency test: period 100000 ns
//! RTH|    lat min|    ovl min|    lat avg|    lat max|    ovl max|   overruns
//! RTD|      -1234|      -1234|        312|       2310|       2310|          0
//! ...
//! ------------------------------------------------
//! ```
//!
//! and ends at the `Loaded modules` line. The metadata phase then scans
//! titled regions (`Kernel parameter`, `Environment`, `CPU topology`,
//! `CPU core temperatures`), each running from its title line to the next
//! blank line. Malformed lines are skipped; facts that never show up stay
//! `None`.

use crate::error::{LogError, Result};
use crate::reader::{LineReader, DEFAULT_MAX_LINE_LENGTH};
use crate::record::{Environment, Series, SeriesKey, TestType, Transcript};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace, warn};

const LOADED_MODULES: &str = "Loaded modules";
const TEST_HEADER: &str = "test:";
const BLOCK_END: &str = "------------";
const SWITCH_TIME: &str = "SWITCH TIME";
const TESTS_RUN_ON_CPU: &str = "tests run on cpu";

/// Parser options.
///
/// ```rust
/// use latreport_log::ParserConfig;
///
/// let config = ParserConfig {
///     cpu_id: Some("1".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.frequency_field, 5);
/// assert_eq!(config.poll_field, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// CPU id to select topology and temperature rows when the transcript
    /// does not name one (for example taken from the file name). Without
    /// either, cpu `0` is used.
    pub cpu_id: Option<String>,
    /// Whitespace-separated field of a topology row holding the frequency.
    pub frequency_field: usize,
    /// Whitespace-separated field of a topology row holding the poll share.
    pub poll_field: usize,
    /// Longest accepted line in bytes.
    pub max_line_length: usize,
    /// Fail on a line longer than `max_line_length` instead of skipping it.
    pub strict: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            cpu_id: None,
            frequency_field: 5,
            poll_field: 8,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Measurement,
    Metadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    None,
    Parameter,
    Environment,
    Topology,
    Temperatures,
}

impl Region {
    fn from_title(line: &str) -> Option<Self> {
        if line.contains("Kernel parameter") {
            Some(Region::Parameter)
        } else if line.contains("Environment") {
            Some(Region::Environment)
        } else if line.contains("CPU topology") {
            Some(Region::Topology)
        } else if line.contains("CPU core temperatures") {
            Some(Region::Temperatures)
        } else {
            None
        }
    }
}

/// An open test block and its per-series buffers.
#[derive(Debug)]
struct Block {
    mode: String,
    test: Option<TestType>,
    buffers: Vec<Vec<i64>>,
}

fn field(cols: &[&str], index: usize) -> Option<i64> {
    cols.get(index)?.trim().parse().ok()
}

/// First number after the switch time marker, rounded to whole nanoseconds.
fn switch_time(line: &str) -> Option<i64> {
    let start = line.find(SWITCH_TIME)? + SWITCH_TIME.len();
    line[start..]
        .split(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .filter(|t| !t.is_empty())
        .find_map(|t| t.parse::<f64>().ok())
        .map(|x| x.round() as i64)
}

impl Block {
    fn new(mode: &str, test: Option<TestType>) -> Self {
        let series = test.map_or(0, |t| Series::of(t).len());
        Self {
            mode: mode.to_string(),
            test,
            buffers: vec![Vec::new(); series],
        }
    }

    fn data_fields(line: &str) -> Option<Vec<&str>> {
        let cols: Vec<&str> = line.split('|').collect();
        (cols[0].trim() == "RTD").then_some(cols)
    }

    fn extract(&self, line: &str) -> Option<Vec<i64>> {
        match self.test? {
            TestType::Latency => {
                let cols = Self::data_fields(line)?;
                let (min, avg_end, overruns) = (field(&cols, 1)?, field(&cols, 4)?, field(&cols, 6)?);
                Some(vec![avg_end - min, overruns])
            }
            TestType::Preempt => {
                let cols = Self::data_fields(line)?;
                let (min, max, fast, slow) =
                    (field(&cols, 1)?, field(&cols, 3)?, field(&cols, 4)?, field(&cols, 5)?);
                Some(vec![max - min, fast, slow])
            }
            TestType::Switches => Some(vec![switch_time(line)?]),
        }
    }

    fn feed(&mut self, line_number: usize, line: &str) {
        match self.extract(line) {
            Some(values) => {
                for (buffer, value) in self.buffers.iter_mut().zip(values) {
                    buffer.push(value);
                }
            }
            None if line.trim_start().starts_with("RTD") => {
                trace!(line = line_number, "skipping malformed data line");
            }
            None => {}
        }
    }
}

/// Incremental transcript scanner. Feed lines in order, then [`finish`].
///
/// [`finish`]: TranscriptParser::finish
///
/// ```rust
/// use latreport_log::{ParserConfig, Series, TestType, TranscriptParser};
///
/// let mut parser = TranscriptParser::new(ParserConfig::default());
/// for line in [
///     "user/switches test: 2 tasks",
///     "SWITCH TIME = 812 ns",
///     "------------------",
/// ] {
///     parser.feed(line);
/// }
/// let transcript = parser.finish();
/// assert_eq!(
///     transcript.measurements.get("user", TestType::Switches, Series::Switches),
///     Some(&[812][..])
/// );
/// ```
#[derive(Debug)]
pub struct TranscriptParser {
    config: ParserConfig,
    phase: Phase,
    region: Region,
    block: Option<Block>,
    transcript: Transcript,
}

impl TranscriptParser {
    /// Create a parser.
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            phase: Phase::Measurement,
            region: Region::None,
            block: None,
            transcript: Transcript::default(),
        }
    }

    /// Process the next line of the transcript.
    pub fn feed(&mut self, line: &str) {
        self.transcript.lines += 1;
        match self.phase {
            Phase::Measurement => self.feed_measurement(line),
            Phase::Metadata => self.feed_metadata(line),
        }
    }

    /// Close any open block and return what was extracted.
    pub fn finish(mut self) -> Transcript {
        self.close_block();
        let env = &mut self.transcript.environment;
        env.isolated_cpus = isolated_cpus(&env.kernel_parameters);
        self.transcript
    }

    /// CPU id used to select topology and temperature rows.
    pub fn cpu_id(&self) -> &str {
        self.transcript
            .environment
            .cpu_id
            .as_deref()
            .or(self.config.cpu_id.as_deref())
            .unwrap_or("0")
    }

    fn feed_measurement(&mut self, line: &str) {
        let line_number = self.transcript.lines;
        if line.contains(LOADED_MODULES) {
            self.close_block();
            debug!(line = line_number, "measurements done");
            self.phase = Phase::Metadata;
        } else if line.contains(TEST_HEADER) {
            self.open_block(line_number, line);
        } else if line.contains(BLOCK_END) {
            self.close_block();
        } else if let Some(block) = &mut self.block {
            block.feed(line_number, line);
        }
    }

    fn open_block(&mut self, line_number: usize, line: &str) {
        let Some(token) = line.split_whitespace().next() else {
            return;
        };
        let Some((mode, name)) = token.split_once('/') else {
            debug!(line = line_number, token, "test header without mode/type");
            return;
        };
        self.close_block();
        let test = TestType::from_name(name);
        if test.is_none() {
            debug!(line = line_number, name, "unknown test type, block is ignored");
        }
        debug!(line = line_number, mode, name, "test block opened");
        self.transcript.blocks.push(token.to_string());
        self.block = Some(Block::new(mode, test));
    }

    fn close_block(&mut self) {
        let Some(block) = self.block.take() else {
            return;
        };
        let Some(test) = block.test else {
            return;
        };
        let samples = block.buffers.first().map_or(0, Vec::len);
        debug!(mode = %block.mode, test = %test, samples, "test block closed");
        for (&series, values) in Series::of(test).iter().zip(block.buffers) {
            let key = SeriesKey::new(block.mode.as_str(), test, series);
            if self.transcript.measurements.insert(key, values).is_some() {
                debug!(mode = %block.mode, test = %test, "repeated test block replaces earlier one");
            }
        }
    }

    fn feed_metadata(&mut self, line: &str) {
        if self.region != Region::None && line.trim().is_empty() {
            trace!(region = ?self.region, "region closed");
            self.region = Region::None;
            return;
        }
        if let Some(region) = Region::from_title(line) {
            debug!(region = ?region, "region opened");
            self.region = region;
            if region == Region::Parameter {
                if let Some((_, rest)) = line.split_once(':') {
                    self.add_parameters(rest);
                }
            }
            return;
        }
        match self.region {
            Region::None => {}
            Region::Parameter => self.add_parameters(line),
            Region::Environment => {
                if line.contains(TESTS_RUN_ON_CPU) {
                    if let Some((_, value)) = line.split_once(':') {
                        let id = value.trim();
                        if !id.is_empty() {
                            self.transcript.environment.cpu_id = Some(id.to_string());
                        }
                    }
                }
            }
            Region::Topology => self.scan_topology(line),
            Region::Temperatures => self.scan_temperature(line),
        }
    }

    fn add_parameters(&mut self, text: &str) {
        self.transcript
            .environment
            .kernel_parameters
            .extend(text.split_whitespace().map(str::to_string));
    }

    fn scan_topology(&mut self, line: &str) {
        let token = format!("cpu{}", self.cpu_id());
        let cols: Vec<&str> = line.split_whitespace().collect();
        if !cols.iter().any(|c| *c == token) {
            return;
        }
        let env: &mut Environment = &mut self.transcript.environment;
        if let Some(freq) = cols
            .get(self.config.frequency_field)
            .and_then(|f| f.parse::<f64>().ok())
        {
            env.frequency = Some(if freq > 1000.0 { freq / 1000.0 } else { freq });
        }
        if let Some(poll) = cols
            .get(self.config.poll_field)
            .and_then(|p| p.trim_end_matches('%').parse::<f64>().ok())
        {
            env.poll = Some(poll);
        }
    }

    fn scan_temperature(&mut self, line: &str) {
        let Some((label, rest)) = line.split_once(':') else {
            return;
        };
        if label.trim() != format!("Core {}", self.cpu_id()) {
            return;
        }
        let temperature = rest
            .split_whitespace()
            .next()
            .map(|t| {
                t.trim_start_matches('+')
                    .trim_end_matches(|c: char| !c.is_ascii_digit())
            })
            .and_then(|t| t.parse::<f64>().ok());
        if temperature.is_some() {
            self.transcript.environment.temperature = temperature;
        }
    }
}

/// Count the CPUs of the last `isolcpus=` parameter. Flags such as `nohz`
/// or `domain` are ignored, ranges `a-b` count `b - a + 1`.
fn isolated_cpus(parameters: &[String]) -> Option<usize> {
    let list = parameters
        .iter()
        .rev()
        .find_map(|p| p.strip_prefix("isolcpus="))?;
    let count = list
        .split(',')
        .filter_map(|item| match item.split_once('-') {
            Some((a, b)) => {
                let (a, b) = (a.parse::<usize>().ok()?, b.parse::<usize>().ok()?);
                Some(b.checked_sub(a)? + 1)
            }
            None => item.parse::<usize>().ok().map(|_| 1),
        })
        .sum();
    Some(count)
}

/// Parse a transcript from a reader.
///
/// # Errors
///
/// Fails only if reading fails, or in strict mode if a line exceeds
/// `max_line_length`. Otherwise over-long lines are skipped.
pub fn parse_transcript<R: Read>(reader: R, config: &ParserConfig) -> Result<Transcript> {
    let mut lines = LineReader::with_limit(reader, config.max_line_length);
    let mut parser = TranscriptParser::new(config.clone());
    loop {
        match lines.next_line() {
            Ok(Some((_, line))) => parser.feed(&line),
            Ok(None) => break,
            Err(LogError::LineTooLong {
                line,
                length,
                limit,
            }) if !config.strict => {
                warn!(line, length, limit, "skipping over-long line");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(parser.finish())
}

/// Open and parse a transcript file.
pub fn parse_file(path: impl AsRef<Path>, config: &ParserConfig) -> Result<Transcript> {
    let path = path.as_ref();
    debug!(path = %path.display(), "parsing transcript");
    parse_transcript(File::open(path)?, config)
}
