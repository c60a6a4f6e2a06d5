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


//! Error types for the latreport command line.

use latreport_log::LogError;
use latreport_table::TableError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the user. Each maps to exit code 1.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file open, directory listing or output write).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path involved
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Building or rendering the report table failed.
    #[error("Table error: {0}")]
    Table(String),

    /// Reading a transcript failed.
    #[error("Transcript error: {0}")]
    Log(String),

    /// JSON serialization failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// No transcript files were found in the given paths.
    #[error("No latency transcripts found")]
    NoInput,
}

impl CliError {
    /// Create an I/O error with path context.
    ///
    /// ```rust,no_run
    /// use latreport_cli::error::CliError;
    /// use std::fs;
    ///
    /// let result = fs::read_dir("results")
    ///     .map_err(|e| CliError::io_error("results", e));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Wrap a transcript error with the file it came from.
    pub fn log_error(path: impl Into<PathBuf>, source: LogError) -> Self {
        match source {
            LogError::Io(e) => Self::io_error(path, e),
            other => Self::Log(format!("{}: {}", path.into().display(), other)),
        }
    }
}

impl From<TableError> for CliError {
    fn from(err: TableError) -> Self {
        CliError::Table(err.to_string())
    }
}

impl From<LogError> for CliError {
    fn from(err: LogError) -> Self {
        CliError::Log(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::JsonFormat {
            message: err.to_string(),
        }
    }
}
