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


//! Builder for RTAI test transcripts.

use std::fmt::Write;

/// Builder for transcript text.
///
/// Test blocks are emitted in the order they were added, followed by the
/// `Loaded modules` line and the machine description regions.
///
/// # Examples
///
/// ```
/// use latreport_test::fixtures::builders::TranscriptBuilder;
///
/// let text = TranscriptBuilder::new()
///     .latency("kern", &[1000, 1100], &[0, 1])
///     .build();
/// let data: Vec<&str> = text.lines().filter(|l| l.starts_with("RTD|")).collect();
/// assert_eq!(data.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranscriptBuilder {
    blocks: Vec<String>,
    kernel_parameters: Option<String>,
    cpu: Option<u32>,
    topology: Vec<(u32, u32, u32)>,
    temperatures: Vec<(u32, f64)>,
}

const RULE: &str = "------------------------------------------------------------------------";

impl TranscriptBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a latency block. Each data line encodes one latency (lat max
    /// minus lat min) and one raw overrun counter value.
    pub fn latency(mut self, mode: &str, latencies: &[i64], overruns: &[i64]) -> Self {
        let mut block = format!("{}/latency test: period = 100000 ns\n", mode);
        block.push_str("RTH|    lat min|    ovl min|    lat avg|    lat max|    ovl max|   overruns\n");
        for (&lat, &ovl) in latencies.iter().zip(overruns) {
            let min = -lat / 4;
            let max = lat + min;
            let _ = writeln!(
                block,
                "RTD|{:>11}|{:>11}|{:>11}|{:>11}|{:>11}|{:>11}",
                min,
                min,
                (min + max) / 2,
                max,
                max,
                ovl
            );
        }
        self.blocks.push(block);
        self
    }

    /// Adds a preempt block. Latency is lat max minus lat min.
    pub fn preempt(mut self, mode: &str, latencies: &[i64], fast: &[i64], slow: &[i64]) -> Self {
        let mut block = format!("{}/preempt test:\n", mode);
        block.push_str("RTH|     lat min|     lat avg|     lat max|    jit fast|    jit slow\n");
        for ((&lat, &f), &s) in latencies.iter().zip(fast).zip(slow) {
            let _ = writeln!(
                block,
                "RTD|{:>12}|{:>12}|{:>12}|{:>12}|{:>12}",
                500,
                500 + lat / 2,
                500 + lat,
                f,
                s
            );
        }
        self.blocks.push(block);
        self
    }

    /// Adds a switches block with one switch time line per value.
    pub fn switches(mut self, mode: &str, times: &[i64]) -> Self {
        let mut block = format!("{}/switches test:\n", mode);
        for t in times {
            let _ = writeln!(block, "SWITCH TIME = {} ns", t);
        }
        self.blocks.push(block);
        self
    }

    /// Adds a block of raw lines under a `mode/kind` header.
    pub fn raw_block(mut self, header: &str, lines: &[&str]) -> Self {
        let mut block = format!("{} test:\n", header);
        for line in lines {
            block.push_str(line);
            block.push('\n');
        }
        self.blocks.push(block);
        self
    }

    /// Sets the kernel command line.
    pub fn kernel_parameters(mut self, line: &str) -> Self {
        self.kernel_parameters = Some(line.to_string());
        self
    }

    /// Sets the CPU reported in the environment region.
    pub fn cpu(mut self, id: u32) -> Self {
        self.cpu = Some(id);
        self
    }

    /// Adds a topology row: cpu id, frequency in MHz, poll share in percent.
    pub fn topology(mut self, cpu: u32, mhz: u32, poll: u32) -> Self {
        self.topology.push((cpu, mhz, poll));
        self
    }

    /// Adds a core temperature line.
    pub fn temperature(mut self, core: u32, celsius: f64) -> Self {
        self.temperatures.push((core, celsius));
        self
    }

    /// Renders the transcript.
    pub fn build(self) -> String {
        let mut out = String::from("RTAI latency tests\n\n");
        for block in &self.blocks {
            out.push_str(block);
            out.push_str(RULE);
            out.push_str("\n\n");
        }

        out.push_str("Loaded modules:\n  rtai_hal\n  rtai_sched\n  rtai_math\n\n");
        if let Some(params) = &self.kernel_parameters {
            let _ = writeln!(out, "Kernel parameter:\n  {}\n", params);
        }
        if let Some(cpu) = self.cpu {
            let _ = writeln!(
                out,
                "Environment:\n  hostname          : rt1\n  tests run on cpu  : {}\n",
                cpu
            );
        }
        if !self.topology.is_empty() {
            out.push_str("CPU topology, frequencies, and idle states:\n");
            out.push_str("CPU pkg core thr name   freq    min    max  poll\n");
            for (cpu, mhz, poll) in &self.topology {
                let _ = writeln!(
                    out,
                    "  {}   0    {}   0 cpu{} {:>6} {:>6} {:>6} {:>4}%",
                    cpu, cpu, cpu, mhz, 800, 3400, poll
                );
            }
            out.push('\n');
        }
        if !self.temperatures.is_empty() {
            out.push_str("CPU core temperatures:\n");
            for (core, celsius) in &self.temperatures {
                let _ = writeln!(
                    out,
                    "Core {}:       +{:.1}\u{b0}C  (high = +80.0\u{b0}C, crit = +100.0\u{b0}C)",
                    core, celsius
                );
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_lines_encode_latency() {
        let text = TranscriptBuilder::new().latency("kern", &[1000], &[3]).build();
        let line = text.lines().find(|l| l.starts_with("RTD|")).unwrap();
        let cols: Vec<i64> = line
            .split('|')
            .skip(1)
            .map(|c| c.trim().parse().unwrap())
            .collect();
        assert_eq!(cols[3] - cols[0], 1000);
        assert_eq!(cols[5], 3);
    }

    #[test]
    fn test_regions_end_with_blank_lines() {
        let text = TranscriptBuilder::new()
            .cpu(1)
            .topology(1, 2800, 97)
            .temperature(1, 47.0)
            .build();
        assert!(text.contains("tests run on cpu  : 1\n\n"));
        assert!(text.contains("cpu1   2800    800   3400   97%\n\n"));
        assert!(text.ends_with("\n\n"));
    }
}
