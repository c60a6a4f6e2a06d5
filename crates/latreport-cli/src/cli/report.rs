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


use clap::Args;
use latreport_log::AnalysisConfig;
use latreport_table::{Dialect, NumberCols, Units, WriteConfig};
use std::path::PathBuf;

/// Arguments of `latreport report`.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Transcript files, or directories holding `latencies-*` files
    #[arg(value_name = "FILES", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Number of initial samples of every test to skip
    #[arg(short, long, value_name = "N", default_value_t = 10)]
    pub init: usize,

    /// Percentile defining outliers, excluded from mean and stdev
    #[arg(short = 'p', long, value_name = "P", default_value_t = 0.0)]
    pub outlier: f64,

    /// Output format: dat, ascii, rtai, csv, md, html or latex
    #[arg(short, long, value_name = "FORMAT", default_value = "dat")]
    pub format: Dialect,

    /// Where to print units: row, header or none
    #[arg(short, long, default_value = "row")]
    pub units: Units,

    /// Add a header line numbering the columns: none, index, zero or alpha
    #[arg(short, long, value_name = "MODE", default_value = "none")]
    pub number_cols: NumberCols,

    /// Text printed for missing values
    #[arg(short, long, value_name = "TEXT", default_value = "-")]
    pub missing: String,

    /// Sort rows by a column path; prefix with ^ or ! for descending
    #[arg(short, long, value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Hide a column or section
    #[arg(long, value_name = "COLUMN")]
    pub hide: Vec<String>,

    /// Hide columns without any value
    #[arg(long)]
    pub hide_empty: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    /// Rendering options.
    pub fn write_config(&self) -> WriteConfig {
        WriteConfig {
            dialect: self.format,
            units: self.units,
            number_cols: self.number_cols,
            missing: self.missing.clone(),
        }
    }

    /// Statistics options.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            init: self.init,
            outlier: self.outlier,
        }
    }
}
