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


//! Run descriptions encoded in transcript file names.
//!
//! The test scripts name their transcripts
//! `latencies-<host>-<k1>-<k2>-<k3>-<num>-<yyyy>-<mm>-<dd>-<params...>-<load>-<quality>`:
//! three tokens of kernel release, three of date, any number of kernel
//! parameter flags. A few flags describe the test setup rather than the
//! kernel and are lifted into their own fields.

/// Fields decoded from a transcript file name. Missing tokens decode as
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunName {
    pub host: String,
    pub kernel: String,
    pub num: String,
    pub date: String,
    /// Remaining kernel parameter flags, dash-joined.
    pub parameters: String,
    pub load: String,
    pub quality: String,
    /// CPU from a `cpuN` flag.
    pub cpu_id: Option<String>,
    /// Which CPU latency request was left out: `user`, `cpu`, `kern` or `-`.
    pub latency: String,
    /// Whether the `performance` governor was used.
    pub performance: bool,
}

fn join(tokens: &[&str], range: std::ops::Range<usize>) -> String {
    let end = range.end.min(tokens.len());
    let start = range.start.min(end);
    tokens[start..end].join("-")
}

impl RunName {
    /// Decode a file name (directories are ignored).
    ///
    /// ```
    /// use latreport_cli::commands::RunName;
    ///
    /// let name = RunName::parse("results/latencies-rt1-4.4.115-rtai-1-003-2018-05-14-isolcpus-cpu1-nocpulatency-cpu-good");
    /// assert_eq!(name.host, "rt1");
    /// assert_eq!(name.kernel, "4.4.115-rtai-1");
    /// assert_eq!(name.num, "003");
    /// assert_eq!(name.date, "2018-05-14");
    /// assert_eq!(name.parameters, "isolcpus");
    /// assert_eq!(name.cpu_id.as_deref(), Some("1"));
    /// assert_eq!(name.latency, "cpu");
    /// assert_eq!((name.load.as_str(), name.quality.as_str()), ("cpu", "good"));
    /// ```
    pub fn parse(path: &str) -> Self {
        let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
        let tokens: Vec<&str> = file.split('-').collect();
        let n = tokens.len();

        let mut name = RunName {
            host: join(&tokens, 1..2),
            kernel: join(&tokens, 2..5),
            num: join(&tokens, 5..6),
            date: join(&tokens, 6..9),
            parameters: String::new(),
            load: String::new(),
            quality: String::new(),
            cpu_id: None,
            latency: "-".to_string(),
            performance: false,
        };
        if n < 11 {
            return name;
        }
        name.load = tokens[n - 2].to_string();
        name.quality = tokens[n - 1].to_string();

        let mut params = Vec::new();
        for &p in &tokens[9..n - 2] {
            match p {
                "nolatency" => name.latency = "user".to_string(),
                "nocpulatency" => name.latency = "cpu".to_string(),
                "nocpulatencyall" => name.latency = "kern".to_string(),
                "performance" => name.performance = true,
                _ => match p.strip_prefix("cpu") {
                    Some(id) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => {
                        name.cpu_id = Some(id.to_string());
                    }
                    _ => params.push(p),
                },
            }
        }
        name.parameters = params.join("-");
        name
    }
}
