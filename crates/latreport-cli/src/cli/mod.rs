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


//! Command definitions.

mod inspect;
mod report;

use crate::error::CliError;
use clap::Subcommand;

pub use inspect::InspectArgs;
pub use report::ReportArgs;

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize latency test transcripts in one table
    ///
    /// Every transcript becomes one row: the run description decoded from
    /// the file name, machine facts from the transcript, and jitter, overrun
    /// and switch time statistics per test mode.
    Report(ReportArgs),

    /// Print what is extracted from one transcript as JSON
    Inspect(InspectArgs),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an input cannot be read, no input is found, or the
    /// output cannot be written.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Report(args) => crate::commands::report(&args),
            Commands::Inspect(args) => crate::commands::inspect(&args.file, args.pretty),
        }
    }
}
