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


//! Line reader for transcripts.
//!
//! Buffered, line-numbered reading with CRLF stripping. Bytes are decoded
//! lossily: transcripts come from `sensors` and kernel logs and may carry
//! stray Latin-1 degree signs.

use crate::error::{LogError, Result};
use std::io::{BufRead, BufReader, Read};

/// Default upper bound on a single line, in bytes.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Line reader with line number tracking and a per-line size guard.
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
    max_line_length: usize,
}

impl<R: Read> LineReader<R> {
    /// Create a reader with the default line length limit.
    pub fn new(reader: R) -> Self {
        Self::with_limit(reader, DEFAULT_MAX_LINE_LENGTH)
    }

    /// Create a reader that rejects lines longer than `max_line_length` bytes.
    pub fn with_limit(reader: R, max_line_length: usize) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: Vec::new(),
            max_line_length,
        }
    }

    /// Number of the line most recently returned (1-based, 0 before the first).
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line without its terminator.
    ///
    /// A line over the limit is consumed whole and reported as
    /// [`LogError::LineTooLong`]; reading can continue with the next line.
    pub fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        self.buffer.clear();

        let limit = self.max_line_length as u64 + 2;
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buffer)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let terminated = self.buffer.ends_with(b"\n");
        if terminated {
            self.buffer.pop();
            if self.buffer.ends_with(b"\r") {
                self.buffer.pop();
            }
        }
        if self.buffer.len() > self.max_line_length {
            let mut length = self.buffer.len();
            if !terminated {
                length += self.discard_rest_of_line()?;
            }
            return Err(LogError::LineTooLong {
                line: self.line_number,
                length,
                limit: self.max_line_length,
            });
        }

        Ok(Some((
            self.line_number,
            String::from_utf8_lossy(&self.buffer).into_owned(),
        )))
    }
}

impl<R: Read> LineReader<R> {
    /// Skip past the next newline without buffering; returns the bytes skipped
    /// before it. Leaves the reader at the start of the following line.
    fn discard_rest_of_line(&mut self) -> Result<usize> {
        let mut skipped = 0;
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(skipped);
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => {
                    let content = if i > 0 && available[i - 1] == b'\r' { i - 1 } else { i };
                    skipped += content;
                    self.reader.consume(i + 1);
                    return Ok(skipped);
                }
                None => {
                    let n = available.len();
                    skipped += n;
                    self.reader.consume(n);
                }
            }
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines() {
        let input = "line1\nline2\nline3";
        let mut reader = LineReader::new(Cursor::new(input));

        assert_eq!(reader.next_line().unwrap(), Some((1, "line1".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((2, "line2".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((3, "line3".to_string())));
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.line_number(), 3);
    }

    #[test]
    fn test_crlf_stripped() {
        let mut reader = LineReader::new(Cursor::new("RTD|1|2\r\n\r\n"));
        assert_eq!(reader.next_line().unwrap(), Some((1, "RTD|1|2".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((2, String::new())));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let bytes: &[u8] = b"Core 0:  +45.0\xb0C\n";
        let mut reader = LineReader::new(Cursor::new(bytes));
        let (_, line) = reader.next_line().unwrap().unwrap();
        assert!(line.starts_with("Core 0:  +45.0"));
        assert!(line.ends_with('C'));
    }

    #[test]
    fn test_line_limit() {
        let input = format!("short\n{}\nafter\n", "y".repeat(100));
        let mut reader = LineReader::with_limit(Cursor::new(input), 10);
        assert_eq!(reader.next_line().unwrap(), Some((1, "short".to_string())));
        match reader.next_line() {
            Err(LogError::LineTooLong { line, limit, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(limit, 10);
            }
            other => panic!("expected LineTooLong, got {:?}", other),
        }
        assert_eq!(reader.next_line().unwrap(), Some((3, "after".to_string())));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_long_line_length_is_reported_in_full() {
        let input = format!("{}\r\nnext\n", "w".repeat(5000));
        let mut reader = LineReader::with_limit(Cursor::new(input), 16);
        match reader.next_line() {
            Err(LogError::LineTooLong { line, length, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(length, 5000);
            }
            other => panic!("expected LineTooLong, got {:?}", other),
        }
        assert_eq!(reader.next_line().unwrap(), Some((2, "next".to_string())));
    }

    #[test]
    fn test_line_at_limit_passes() {
        let input = format!("{}\r\n", "z".repeat(10));
        let mut reader = LineReader::with_limit(Cursor::new(input), 10);
        assert_eq!(reader.next_line().unwrap().unwrap().1.len(), 10);
    }

    #[test]
    fn test_iterator() {
        let reader = LineReader::new(Cursor::new("a\nb\n"));
        let lines: Vec<String> = reader.map(|r| r.unwrap().1).collect();
        assert_eq!(lines, vec!["a", "b"]);
    }
}
