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

//! Table rendering.
//!
//! One parametric renderer for all dialects: it walks the header levels from
//! the outermost section down to the leaf labels, then the optional unit and
//! column-number lines, then the data rows in [`DataTable::row_order`]
//! order. Everything dialect specific comes from the [`DialectSpec`] record.

use crate::dialect::{Dialect, DialectSpec, HeaderRule, Merge, RowStyle, Rule};
use crate::error::{Result, TableError};
use crate::format::Align;
use crate::table::DataTable;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Where column units are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// A separate header line below the leaf labels.
    #[default]
    Row,
    /// Appended to the leaf label as `label/unit` (units `1` and empty are skipped).
    Header,
    /// Not printed.
    None,
}

impl FromStr for Units {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "row" | "r" => Ok(Units::Row),
            "header" | "h" => Ok(Units::Header),
            "none" | "n" => Ok(Units::None),
            _ => Err(TableError::UnknownMode {
                kind: "units",
                token: s.to_string(),
            }),
        }
    }
}

/// Optional header line numbering the columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberCols {
    /// No numbering line.
    #[default]
    None,
    /// 1-based column positions.
    Index,
    /// 0-based column positions (usable as positional column references).
    Zero,
    /// Spreadsheet letters `A`..`Z`, `AA`.. over the printed columns.
    Alpha,
}

impl FromStr for NumberCols {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "n" => Ok(NumberCols::None),
            "index" | "i" | "1" => Ok(NumberCols::Index),
            "zero" | "z" | "0" => Ok(NumberCols::Zero),
            "alpha" | "a" => Ok(NumberCols::Alpha),
            _ => Err(TableError::UnknownMode {
                kind: "column numbering",
                token: s.to_string(),
            }),
        }
    }
}

/// Options for [`DataTable::write`].
///
/// # Examples
///
/// ```
/// use latreport_table::{Dialect, NumberCols, Units, WriteConfig};
///
/// let config = WriteConfig {
///     dialect: Dialect::Markdown,
///     units: Units::Header,
///     ..Default::default()
/// };
/// assert_eq!(config.number_cols, NumberCols::None);
/// assert_eq!(config.missing, "-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteConfig {
    /// Output dialect (default: plain).
    pub dialect: Dialect,
    /// Unit placement (default: separate line).
    pub units: Units,
    /// Column numbering line (default: none).
    pub number_cols: NumberCols,
    /// Placeholder for missing cells (default: `-`).
    pub missing: String,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Plain,
            units: Units::Row,
            number_cols: NumberCols::None,
            missing: "-".to_string(),
        }
    }
}

/// Spreadsheet-style column letters for a 0-based position.
///
/// ```
/// use latreport_table::column_letters;
///
/// assert_eq!(column_letters(0), "A");
/// assert_eq!(column_letters(25), "Z");
/// assert_eq!(column_letters(26), "AA");
/// assert_eq!(column_letters(701), "ZZ");
/// assert_eq!(column_letters(702), "AAA");
/// ```
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn fill(template: &str, text: &str, span: usize, align: Align) -> String {
    let align = match align {
        Align::Left => "left",
        Align::Right => "right",
    };
    template
        .replace("{span}", &span.to_string())
        .replace("{align}", align)
        .replace("{text}", text)
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{:<width$}", text, width = width),
        Align::Right => format!("{:>width$}", text, width = width),
    }
}

/// Widen columns so that every section label fits above its visible members.
/// The surplus goes to the last member of a merged span.
fn fit_section_labels(table: &DataTable, spec: &DialectSpec, widths: &mut [usize]) {
    let sep_width = spec.header.sep.chars().count();
    for depth in 1..=table.nsecs() {
        for span in table.spans(depth) {
            let (Some(&first), Some(&last)) = (span.visible.first(), span.visible.last()) else {
                continue;
            };
            let label = (spec.escape)(span.label).chars().count();
            match spec.merge {
                Merge::Pad => {
                    let total = span.visible.iter().map(|&c| widths[c]).sum::<usize>()
                        + (span.visible.len() - 1) * sep_width;
                    if label > total {
                        widths[last] += label - total;
                    }
                }
                Merge::Template(_) if span.visible.len() > 1 => {}
                Merge::Template(_) | Merge::Repeat => {
                    widths[first] = widths[first].max(label);
                }
            }
        }
    }
}

struct Renderer<'t> {
    table: &'t DataTable,
    spec: &'static DialectSpec,
    config: &'t WriteConfig,
    visible: Vec<usize>,
    labels: Vec<String>,
    numbers: Vec<String>,
    widths: Vec<usize>,
}

impl<'t> Renderer<'t> {
    fn new(table: &'t DataTable, config: &'t WriteConfig) -> Self {
        let spec = config.dialect.spec();
        let visible: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.hidden)
            .map(|(i, _)| i)
            .collect();

        let labels: Vec<String> = table
            .columns
            .iter()
            .map(|c| match config.units {
                Units::Header if !c.unit.is_empty() && c.unit != "1" => {
                    format!("{}/{}", c.label(), c.unit)
                }
                _ => c.label().to_string(),
            })
            .collect();

        let mut numbers = vec![String::new(); table.columns.len()];
        for (ordinal, &c) in visible.iter().enumerate() {
            numbers[c] = match config.number_cols {
                NumberCols::None => String::new(),
                NumberCols::Index => (c + 1).to_string(),
                NumberCols::Zero => c.to_string(),
                NumberCols::Alpha => column_letters(ordinal),
            };
        }

        let mut widths: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if !spec.pad {
                    return 0;
                }
                let unit = if config.units == Units::Row {
                    c.unit.chars().count()
                } else {
                    0
                };
                c.format
                    .width
                    .max(labels[i].chars().count())
                    .max(unit)
                    .max(numbers[i].chars().count())
            })
            .collect();
        if spec.pad {
            fit_section_labels(table, spec, &mut widths);
        }

        Self {
            table,
            spec,
            config,
            visible,
            labels,
            numbers,
            widths,
        }
    }

    fn escape(&self, text: &str) -> String {
        (self.spec.escape)(text)
    }

    fn header_cell(&self, text: &str, width: usize, align: Align) -> String {
        let text = self.escape(text);
        let text = if self.spec.pad {
            pad(&text, width, align)
        } else {
            text
        };
        fill(self.spec.header_cell, &text, 1, align)
    }

    fn row(style: &RowStyle, cells: &[String]) -> String {
        format!("{}{}{}", style.start, cells.join(style.sep), style.end)
    }

    fn section_line(&self, depth: usize) -> String {
        let sep_width = self.spec.header.sep.chars().count();
        let mut cells = Vec::new();
        for span in self.table.spans(depth) {
            let Some((&first, rest)) = span.visible.split_first() else {
                continue;
            };
            match self.spec.merge {
                Merge::Pad => {
                    let width = span.visible.iter().map(|&c| self.widths[c]).sum::<usize>()
                        + rest.len() * sep_width;
                    cells.push(self.header_cell(span.label, width, Align::Left));
                }
                Merge::Template(template) if !rest.is_empty() => {
                    let text = self.escape(span.label);
                    cells.push(fill(template, &text, span.visible.len(), Align::Left));
                }
                Merge::Template(_) => {
                    cells.push(self.header_cell(span.label, self.widths[first], Align::Left));
                }
                Merge::Repeat => {
                    cells.push(self.header_cell(span.label, self.widths[first], Align::Left));
                    for &c in rest {
                        cells.push(self.header_cell("", self.widths[c], Align::Left));
                    }
                }
            }
        }
        Self::row(&self.spec.header, &cells)
    }

    fn column_line<F>(&self, align: Align, text: F) -> String
    where
        F: Fn(usize) -> &'t str,
    {
        let cells: Vec<String> = self
            .visible
            .iter()
            .map(|&c| self.header_cell(text(c), self.widths[c], align))
            .collect();
        Self::row(&self.spec.header, &cells)
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for depth in (1..=self.table.nsecs()).rev() {
            lines.push(self.section_line(depth));
        }

        let cells: Vec<String> = self
            .visible
            .iter()
            .map(|&c| self.header_cell(&self.labels[c], self.widths[c], Align::Left))
            .collect();
        lines.push(Self::row(&self.spec.header, &cells));

        if self.config.units == Units::Row {
            let table = self.table;
            lines.push(self.column_line(Align::Left, |c| table.columns[c].unit.as_str()));
        }
        if self.config.number_cols != NumberCols::None {
            let cells: Vec<String> = self
                .visible
                .iter()
                .map(|&c| self.header_cell(&self.numbers[c], self.widths[c], Align::Right))
                .collect();
            lines.push(Self::row(&self.spec.header, &cells));
        }
        lines
    }

    fn rule(&self, rule: &Rule) -> Option<String> {
        match *rule {
            Rule::None => None,
            Rule::Text(text) => Some(text.to_string()),
            Rule::Drawn {
                start,
                fill,
                sep,
                end,
                extra,
                align_marks,
            } => {
                let cells: Vec<String> = self
                    .visible
                    .iter()
                    .map(|&c| {
                        let mut n = self.widths[c] + extra;
                        if align_marks {
                            n = n.max(3);
                        }
                        let mut cell: Vec<char> = vec![fill; n];
                        if align_marks {
                            match self.table.columns[c].format.align {
                                Align::Left => cell[0] = ':',
                                Align::Right => cell[n - 1] = ':',
                            }
                        }
                        cell.into_iter().collect()
                    })
                    .collect();
                Some(format!("{}{}{}", start, cells.join(sep), end))
            }
        }
    }

    fn data_line(&self, row: usize) -> String {
        let cells: Vec<String> = self
            .visible
            .iter()
            .map(|&c| {
                let column = &self.table.columns[c];
                let text = self.escape(&column.format.render(column.value(row), &self.config.missing));
                let text = if self.spec.pad {
                    column.format.pad(&text, self.widths[c])
                } else {
                    text
                };
                fill(self.spec.data_cell, &text, 1, column.format.align)
            })
            .collect();
        Self::row(&self.spec.data, &cells)
    }

    fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.visible.is_empty() {
            return Ok(());
        }
        if let Some(begin) = self.spec.begin {
            let colspec: String = self
                .visible
                .iter()
                .map(|&c| DialectSpec::colspec_char(self.table.columns[c].format.align))
                .collect();
            writeln!(out, "{}", begin.replace("{colspec}", &colspec))?;
        }
        if let Some(line) = self.rule(&self.spec.top_rule) {
            writeln!(out, "{}", line)?;
        }
        for (i, line) in self.header_lines().iter().enumerate() {
            writeln!(out, "{}", line)?;
            if i == 0 && self.spec.header_rule_at == HeaderRule::AfterFirstLine {
                if let Some(rule) = self.rule(&self.spec.header_rule) {
                    writeln!(out, "{}", rule)?;
                }
            }
        }
        if self.spec.header_rule_at == HeaderRule::AfterHeader {
            if let Some(rule) = self.rule(&self.spec.header_rule) {
                writeln!(out, "{}", rule)?;
            }
        }
        for row in self.table.row_order() {
            writeln!(out, "{}", self.data_line(row))?;
        }
        if let Some(line) = self.rule(&self.spec.bottom_rule) {
            writeln!(out, "{}", line)?;
        }
        if let Some(end) = self.spec.end {
            writeln!(out, "{}", end)?;
        }
        Ok(())
    }
}

impl DataTable {
    /// Render the visible columns of the table to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Io`] if writing fails.
    pub fn write<W: Write>(&self, mut out: W, config: &WriteConfig) -> Result<()> {
        Renderer::new(self, config).write(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Render the table into a string.
    pub fn to_string_with(&self, config: &WriteConfig) -> Result<String> {
        let mut buffer = Vec::with_capacity(64 * (self.rows() + self.nsecs() + 3));
        self.write(&mut buffer, config)?;
        String::from_utf8(buffer).map_err(|_| TableError::InvalidUtf8 {
            context: "rendered table".to_string(),
        })
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .to_string_with(&WriteConfig::default())
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
