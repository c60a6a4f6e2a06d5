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


//! Sample transcripts.
//!
//! - [`end_to_end_latency`]: one `kern/latency` block of 12 data lines
//! - [`full_run`]: every test type plus a complete machine description
//! - [`metadata_only`]: a transcript without test blocks
//! - [`errors`]: degraded inputs the parser must survive

pub mod builders;
pub mod errors;

use builders::TranscriptBuilder;

/// Latencies of [`end_to_end_latency`]: ten warm-up samples, then 1200 and 1400.
pub const END_TO_END_LATENCIES: [i64; 12] = [
    9000, 8000, 7000, 6000, 5000, 4000, 3000, 2000, 1000, 1000, 1200, 1400,
];

/// Raw overrun counter of [`end_to_end_latency`], ending in `0, 0, 1, 1`.
pub const END_TO_END_OVERRUNS: [i64; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1];

/// One `kern/latency` block with 12 data lines; with 10 skipped warm-up
/// samples the retained latencies are 1200 and 1400 and the overrun diffs
/// of the retained rows are `[1, 0]`.
pub fn end_to_end_latency() -> String {
    TranscriptBuilder::new()
        .latency("kern", &END_TO_END_LATENCIES, &END_TO_END_OVERRUNS)
        .build()
}

/// Latency, preempt and switches blocks on cpu 1 of a machine with one
/// isolated CPU, running at 2.8 GHz, polling 97 % of the time at 47 °C.
pub fn full_run() -> String {
    let latencies: Vec<i64> = (0..20).map(|i| 1500 + 10 * i).collect();
    let overruns: Vec<i64> = (0..20).map(|i| i / 8).collect();
    let jitter: Vec<i64> = (0..20).map(|i| 300 + i).collect();
    let switches: Vec<i64> = (0..15).map(|i| 700 + i % 3).collect();
    TranscriptBuilder::new()
        .latency("kern", &latencies, &overruns)
        .preempt("kern", &latencies, &jitter, &jitter)
        .latency("kthreads", &latencies, &overruns)
        .switches("user", &switches)
        .kernel_parameters("BOOT_IMAGE=/boot/vmlinuz-4.4.115-rtai-1 root=/dev/sda1 isolcpus=1 idle=poll")
        .cpu(1)
        .topology(0, 3400, 2)
        .topology(1, 2800, 97)
        .temperature(0, 52.0)
        .temperature(1, 47.0)
        .build()
}

/// Machine description only; every statistic of such a run is missing.
pub fn metadata_only() -> String {
    TranscriptBuilder::new()
        .cpu(0)
        .topology(0, 2400, 10)
        .temperature(0, 40.0)
        .build()
}
