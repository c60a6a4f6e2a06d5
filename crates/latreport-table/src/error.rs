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

//! Error types for table construction and rendering.

use thiserror::Error;

/// Report engine error types.
///
/// Resolution misses (unknown column paths, unknown sort keys) are not
/// errors: they surface as `None` and a logged warning. This enum only
/// covers conditions the caller cannot recover from by skipping a write.
///
/// # Examples
///
/// ```
/// use latreport_table::TableError;
///
/// let err = TableError::InvalidFormat {
///     spec: "%q".to_string(),
///     reason: "unknown conversion 'q'".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Invalid format specification '%q': unknown conversion 'q'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum TableError {
    /// A printf-style format specification could not be parsed.
    #[error("Invalid format specification '{spec}': {reason}")]
    InvalidFormat {
        /// The offending specification.
        spec: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A write was addressed to a column position that does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use latreport_table::TableError;
    ///
    /// let err = TableError::NoSuchColumn(7);
    /// assert_eq!(err.to_string(), "No column at position 7");
    /// ```
    #[error("No column at position {0}")]
    NoSuchColumn(usize),

    /// A dialect token did not name any known dialect.
    #[error("Unknown table dialect '{0}'")]
    UnknownDialect(String),

    /// A units or column-numbering mode token was not recognized.
    #[error("Unknown {kind} mode '{token}'")]
    UnknownMode {
        /// Which option was being parsed.
        kind: &'static str,
        /// The rejected token.
        token: String,
    },

    /// I/O error while writing the rendered table.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendered output was not valid UTF-8.
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// What was being produced.
        context: String,
    },
}

/// Result type for report engine operations.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: TableError = io_err.into();
        assert!(matches!(err, TableError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_no_such_column_display() {
        assert_eq!(TableError::NoSuchColumn(0).to_string(), "No column at position 0");
    }
}
