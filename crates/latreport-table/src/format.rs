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

//! Printf-style cell format specifications.
//!
//! Column formats are written the way the report tooling has always written
//! them: `%7.0f`, `%-20s`, `%3d`. The embedded width is the column width;
//! [`DataTable::adjust_columns`](crate::DataTable::adjust_columns) grows it
//! in place while the alignment flag, precision and conversion stay as they
//! were.
//!
//! # Examples
//!
//! ```
//! use latreport_table::{Align, CellFormat, Value};
//!
//! let fmt: CellFormat = "%-7.1f".parse().unwrap();
//! assert_eq!(fmt.align, Align::Left);
//! assert_eq!(fmt.width, 7);
//! assert_eq!(fmt.precision, Some(1));
//! assert_eq!(fmt.cell(&Value::Float(3.14159), "-"), "3.1    ");
//! assert_eq!(fmt.to_string(), "%-7.1f");
//! ```

use crate::error::{Result, TableError};
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Default precision of `f` and `e` conversions without an explicit one.
const DEFAULT_PRECISION: usize = 6;

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Pad on the right (`%-...`).
    Left,
    /// Pad on the left.
    #[default]
    Right,
}

/// The conversion character of a format specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conversion {
    /// `s`: values as they are.
    #[default]
    Str,
    /// `d` / `i`: integers, floats rounded.
    Int,
    /// `f`: fixed point.
    Float,
    /// `e`: scientific notation.
    Exp,
    /// `g`: shortest representation.
    General,
}

impl Conversion {
    fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Conversion::Str),
            'd' | 'i' => Some(Conversion::Int),
            'f' | 'F' => Some(Conversion::Float),
            'e' | 'E' => Some(Conversion::Exp),
            'g' | 'G' => Some(Conversion::General),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Conversion::Str => 's',
            Conversion::Int => 'd',
            Conversion::Float => 'f',
            Conversion::Exp => 'e',
            Conversion::General => 'g',
        }
    }
}

/// A parsed `%[-][width][.precision]conversion` specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellFormat {
    /// Alignment inside the field.
    pub align: Align,
    /// Minimum field width in characters (0 = unpadded).
    pub width: usize,
    /// Digits after the decimal point, if given.
    pub precision: Option<usize>,
    /// Conversion applied to numbers.
    pub conversion: Conversion,
}

impl CellFormat {
    /// Parse a format specification. An empty string yields `%s`.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec_trimmed = spec.trim();
        if spec_trimmed.is_empty() {
            return Ok(Self::default());
        }
        let invalid = |reason: String| TableError::InvalidFormat {
            spec: spec.to_string(),
            reason,
        };

        let rest = spec_trimmed
            .strip_prefix('%')
            .ok_or_else(|| invalid("missing leading '%'".to_string()))?;
        let (align, rest) = match rest.strip_prefix('-') {
            Some(r) => (Align::Left, r),
            None => (Align::Right, rest),
        };

        let width_len = rest.chars().take_while(char::is_ascii_digit).count();
        let width = if width_len == 0 {
            0
        } else {
            rest[..width_len]
                .parse()
                .map_err(|e| invalid(format!("bad width: {}", e)))?
        };
        let mut rest = &rest[width_len..];

        let mut precision = None;
        if let Some(r) = rest.strip_prefix('.') {
            let prec_len = r.chars().take_while(char::is_ascii_digit).count();
            precision = Some(if prec_len == 0 {
                0
            } else {
                r[..prec_len]
                    .parse()
                    .map_err(|e| invalid(format!("bad precision: {}", e)))?
            });
            rest = &r[prec_len..];
        }

        let mut chars = rest.chars();
        let conv_char = chars
            .next()
            .ok_or_else(|| invalid("missing conversion character".to_string()))?;
        let conversion = Conversion::from_char(conv_char)
            .ok_or_else(|| invalid(format!("unknown conversion '{}'", conv_char)))?;
        if chars.next().is_some() {
            return Err(invalid("trailing characters after conversion".to_string()));
        }

        Ok(Self {
            align,
            width,
            precision,
            conversion,
        })
    }

    /// Render a value without padding. Missing values render as `missing`.
    pub fn render(&self, value: &Value, missing: &str) -> String {
        if value.is_missing() {
            return missing.to_string();
        }
        match value {
            Value::Text(s) => s.clone(),
            Value::Int(i) => match self.conversion {
                Conversion::Float | Conversion::Exp => self.render_float(*i as f64),
                _ => i.to_string(),
            },
            Value::Float(x) => self.render_float(*x),
            Value::Missing => missing.to_string(),
        }
    }

    fn render_float(&self, x: f64) -> String {
        match self.conversion {
            Conversion::Int => format!("{:.0}", x),
            Conversion::Float => format!("{:.*}", self.precision.unwrap_or(DEFAULT_PRECISION), x),
            Conversion::Exp => format!("{:.*e}", self.precision.unwrap_or(DEFAULT_PRECISION), x),
            Conversion::Str | Conversion::General => match self.precision {
                Some(p) => format!("{:.*}", p, x),
                None => x.to_string(),
            },
        }
    }

    /// Pad already rendered text to `width` according to the alignment.
    pub fn pad(&self, text: &str, width: usize) -> String {
        match self.align {
            Align::Left => format!("{:<width$}", text, width = width),
            Align::Right => format!("{:>width$}", text, width = width),
        }
    }

    /// Render and pad a value to the format's own width.
    pub fn cell(&self, value: &Value, missing: &str) -> String {
        self.pad(&self.render(value, missing), self.width)
    }
}

impl FromStr for CellFormat {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CellFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("%")?;
        if self.align == Align::Left {
            f.write_str("-")?;
        }
        if self.width > 0 {
            write!(f, "{}", self.width)?;
        }
        if let Some(p) = self.precision {
            write!(f, ".{}", p)?;
        }
        write!(f, "{}", self.conversion.as_char())
    }
}
