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


//! Error types for transcript parsing.
//!
//! Data problems inside a transcript are never errors: short or malformed
//! lines are skipped and missing facts stay absent. Only failures of the
//! underlying reader and, in strict mode, the per-line size guard surface
//! here.
//!
//! ```rust
//! use latreport_log::{parse_transcript, LogError, ParserConfig};
//! use std::io::Cursor;
//!
//! let config = ParserConfig {
//!     max_line_length: 16,
//!     strict: true,
//!     ..Default::default()
//! };
//! let long = "x".repeat(64);
//! match parse_transcript(Cursor::new(long), &config) {
//!     Err(LogError::LineTooLong { line, .. }) => assert_eq!(line, 1),
//!     other => panic!("unexpected: {:?}", other.map(|_| ())),
//! }
//! ```

use thiserror::Error;

/// Errors raised while reading a transcript.
#[derive(Error, Debug)]
pub enum LogError {
    /// The underlying reader failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line exceeded the configured maximum length.
    #[error("Line {line} is {length} bytes long, limit is {limit}")]
    LineTooLong {
        /// Line number (1-based).
        line: usize,
        /// Bytes read before giving up.
        length: usize,
        /// Configured limit.
        limit: usize,
    },
}

impl LogError {
    /// Line number the error refers to, if any.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            LogError::LineTooLong { line, .. } => Some(*line),
            LogError::Io(_) => None,
        }
    }
}

/// Result alias for transcript parsing.
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_line_too_long_display() {
        let err = LogError::LineTooLong {
            line: 3,
            length: 2048,
            limit: 1024,
        };
        assert_eq!(err.to_string(), "Line 3 is 2048 bytes long, limit is 1024");
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_io_from() {
        let err: LogError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, LogError::Io(_)));
        assert_eq!(err.line(), None);
        assert!(err.to_string().starts_with("IO error:"));
    }
}
