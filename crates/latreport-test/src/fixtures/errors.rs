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


//! Degraded transcripts.
//!
//! None of these may make the parser fail; each is expected to produce a
//! record with some or all facts missing.

use super::builders::TranscriptBuilder;

/// Degraded transcript samples as (name, text) pairs.
pub fn degraded_samples() -> Vec<(&'static str, String)> {
    vec![
        ("empty", String::new()),
        ("blank_lines", "\n\n\n".to_string()),
        (
            "truncated_block",
            "kern/latency test:\nRTD|  -10|  -10|   0|  90|  90|   0\nRTD|  -10|".to_string(),
        ),
        (
            "short_fields",
            TranscriptBuilder::new()
                .raw_block("kern/latency", &["RTD|1|2|3", "RTD|", "RTD"])
                .build(),
        ),
        (
            "non_numeric_fields",
            TranscriptBuilder::new()
                .raw_block("kern/preempt", &["RTD|a|b|c|d|e", "RTD| 1 | 2 | x | 4 | 5"])
                .build(),
        ),
        (
            "header_without_type",
            "kern test:\nRTD|0|0|0|10|0|0\n------------\n".to_string(),
        ),
        (
            "unknown_test_type",
            TranscriptBuilder::new()
                .raw_block("kern/irq", &["RTD|0|0|0|10|0|0"])
                .build(),
        ),
        (
            "region_without_rows",
            "Loaded modules\nCPU topology\n\nCPU core temperatures\n\nEnvironment\n\n".to_string(),
        ),
        (
            "garbled_metadata",
            "Loaded modules\nEnvironment\n tests run on cpu\nCPU topology\ncpu0\n\nCPU core temperatures\nCore 0: hot\n"
                .to_string(),
        ),
        (
            "binary_noise",
            String::from_utf8_lossy(&[0xff, 0xfe, b'|', b'R', b'T', b'D', b'|', 0x00, b'\n'])
                .into_owned(),
        ),
    ]
}
