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


//! Inspect command - parsed transcript as JSON

use super::RunName;
use crate::error::CliError;
use latreport_log::{parse_file, ParserConfig};
use std::path::Path;

/// Parse one transcript and print its measurements and environment as JSON.
///
/// A `cpuN` flag in the file name selects the CPU whose topology and
/// temperature rows are read, as in the report.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read.
///
/// # Examples
///
/// ```no_run
/// use latreport_cli::commands::inspect;
/// use std::path::Path;
///
/// # fn main() -> Result<(), latreport_cli::error::CliError> {
/// inspect(Path::new("latencies-rt1-4.4.115-rtai-1-001-2018-05-14-cpu-good"), true)?;
/// # Ok(())
/// # }
/// ```
pub fn inspect(file: &Path, pretty: bool) -> Result<(), CliError> {
    let run = RunName::parse(&file.to_string_lossy());
    let config = ParserConfig {
        cpu_id: run.cpu_id,
        ..ParserConfig::default()
    };
    let transcript = parse_file(file, &config).map_err(|e| CliError::log_error(file, e))?;

    let json = if pretty {
        serde_json::to_string_pretty(&transcript)?
    } else {
        serde_json::to_string(&transcript)?
    };
    println!("{json}");
    Ok(())
}
