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

//! The hierarchical table model.
//!
//! A [`DataTable`] is a flat list of [`Column`]s. There is no separate header
//! tree: every column stores the header labels it *opens*, leaf label first
//! and enclosing section labels after it. A column that stores fewer labels
//! than the table has header levels continues the sections opened by the
//! columns to its left. The section a column belongs to at depth `d` is
//! therefore found by scanning left for the nearest column that carries a
//! label at depth `d`, and a section at depth `d` spans all following columns
//! up to the next one that carries its own label at that depth.
//!
//! # Building a header
//!
//! ```
//! use latreport_table::DataTable;
//!
//! let mut table = DataTable::new();
//! table.add_section("kern latency");
//! table.add_section("jitter");
//! table.add_column("mean", "ns", "%7.0f").unwrap();
//! table.add_column("max", "ns", "%7.0f").unwrap();
//! table.add_section("overruns");
//! table.add_column("max", "1", "%6.0f").unwrap();
//!
//! assert_eq!(table.column("kern latency>jitter>max"), Some(1));
//! assert_eq!(table.column("kern latency>overruns>max"), Some(2));
//! assert_eq!(table.column("kern latency>overruns>mean"), None);
//! ```

use crate::error::{Result, TableError};
use crate::format::CellFormat;
use crate::value::Value;
use tracing::{debug, warn};

static MISSING: Value = Value::Missing;

/// A single table column.
#[derive(Debug, Clone, Default)]
pub struct Column {
    pub(crate) labels: Vec<String>,
    pub(crate) unit: String,
    pub(crate) format: CellFormat,
    pub(crate) hidden: bool,
    pub(crate) data: Vec<Value>,
}

impl Column {
    fn new(label: &str, unit: &str, format: CellFormat, rows: usize) -> Self {
        Self {
            labels: vec![label.to_string()],
            unit: unit.to_string(),
            format,
            hidden: false,
            data: vec![Value::Missing; rows],
        }
    }

    /// Labels opened by this column, leaf label first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The leaf label.
    pub fn label(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or_default()
    }

    /// Unit string.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Cell format.
    pub fn format(&self) -> &CellFormat {
        &self.format
    }

    /// Whether the column is excluded from rendering.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Stored cells in insertion order.
    pub fn values(&self) -> &[Value] {
        &self.data
    }

    /// Cell at `row`, or the missing sentinel past the end of a ragged column.
    pub fn value(&self, row: usize) -> &Value {
        self.data.get(row).unwrap_or(&MISSING)
    }

    #[inline]
    fn label_at(&self, depth: usize) -> Option<&str> {
        self.labels.get(depth).map(String::as_str)
    }
}

/// Addresses a column either by position or by `section>...>leaf` path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef<'a> {
    /// Position in the column list.
    Index(usize),
    /// Header path, or a numeric string meaning a position.
    Path(&'a str),
}

impl From<usize> for ColumnRef<'_> {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

impl<'a> From<&'a str> for ColumnRef<'a> {
    fn from(path: &'a str) -> Self {
        ColumnRef::Path(path)
    }
}

impl<'a> From<&'a String> for ColumnRef<'a> {
    fn from(path: &'a String) -> Self {
        ColumnRef::Path(path.as_str())
    }
}

/// A contiguous run of columns sharing one header cell at some depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Span<'t> {
    pub(crate) label: &'t str,
    pub(crate) visible: Vec<usize>,
}

/// Hierarchical table with cursor-based column-wise writing.
///
/// Values are written column by column: [`add_value`](Self::add_value)
/// appends one cell and moves the append cursor to the next column, so a
/// fixed-order tuple of results can be streamed across adjacent columns from
/// a single starting column. After all values of one logical row have been
/// written, [`fill_data`](Self::fill_data) pads every column to the same
/// length.
///
/// # Examples
///
/// ```
/// use latreport_table::{DataTable, Value};
///
/// let mut table = DataTable::new();
/// table.add_section("jitter");
/// table.add_column("mean", "ns", "%7.1f").unwrap();
/// table.add_column("stdev", "ns", "%7.1f").unwrap();
/// table.add_column("max", "ns", "%7.0f").unwrap();
///
/// let first = table.column("jitter").unwrap();
/// table.add_data([1.5, 0.25, 4.0], Some(first)).unwrap();
/// table.fill_data();
///
/// assert_eq!(table.rows(), 1);
/// assert_eq!(table.get(0, 2), &Value::Float(4.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    pub(crate) columns: Vec<Column>,
    cursor: usize,
    filled: usize,
    order: Option<Vec<usize>>,
}

impl DataTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns, hidden ones included.
    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (length of the longest column).
    pub fn rows(&self) -> usize {
        self.columns.iter().map(|c| c.data.len()).max().unwrap_or(0)
    }

    /// Deepest header level in use (0 = leaf labels only).
    pub fn nsecs(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.labels.len().saturating_sub(1))
            .max()
            .unwrap_or(0)
    }

    /// Position of the append cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the append cursor past the last column, so that the next
    /// [`add_section`](Self::add_section) or [`add_column`](Self::add_column)
    /// creates a new column instead of refining an existing one.
    pub fn seek_end(&mut self) {
        self.cursor = self.columns.len();
    }

    /// Column at `index`.
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Iterate over all columns.
    pub fn iter_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Cell at (`row`, `column`); missing if either is out of range.
    pub fn get(&self, row: usize, column: usize) -> &Value {
        self.columns.get(column).map_or(&MISSING, |c| c.value(row))
    }

    fn push_column(&mut self, label: &str, unit: &str, format: CellFormat) -> usize {
        self.columns
            .push(Column::new(label, unit, format, self.filled));
        self.columns.len() - 1
    }

    /// Open a section, or deepen the column under the append cursor.
    ///
    /// When the cursor is past the last column a new column is created that
    /// carries `label` as its only label. Otherwise `label` is prepended to
    /// the label list of the column under the cursor, which pushes the labels
    /// it already had one level outwards. The cursor is left on that column so
    /// that the following [`add_column`](Self::add_column) supplies its leaf
    /// label.
    ///
    /// Two sections added in a row therefore end up with the first one
    /// outermost:
    ///
    /// ```
    /// use latreport_table::DataTable;
    ///
    /// let mut table = DataTable::new();
    /// table.add_section("data");
    /// table.add_section("");
    /// table.add_column("num", "1", "%3s").unwrap();
    /// assert_eq!(table.column_at(0).unwrap().labels(), ["num", "", "data"]);
    /// ```
    pub fn add_section(&mut self, label: &str) -> usize {
        if self.cursor >= self.columns.len() {
            self.cursor = self.push_column(label, "", CellFormat::default());
        } else {
            self.columns[self.cursor].labels.insert(0, label.to_string());
        }
        self.cursor
    }

    /// Add a column, or finish the column under the append cursor.
    ///
    /// Returns the position of the new or updated column. The cursor always
    /// moves past the end of the column list afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidFormat`] if `format` is not a valid
    /// printf-style specification.
    pub fn add_column(&mut self, label: &str, unit: &str, format: &str) -> Result<usize> {
        let format = CellFormat::parse(format)?;
        let index = if self.cursor >= self.columns.len() {
            self.push_column(label, unit, format)
        } else {
            let column = &mut self.columns[self.cursor];
            column.labels.insert(0, label.to_string());
            column.unit = unit.to_string();
            column.format = format;
            self.cursor
        };
        self.cursor = self.columns.len();
        Ok(index)
    }

    /// Replace the format of an existing column and move the cursor onto it.
    pub fn set_format(&mut self, column: usize, format: &str) -> Result<()> {
        let format = CellFormat::parse(format)?;
        let col = self
            .columns
            .get_mut(column)
            .ok_or(TableError::NoSuchColumn(column))?;
        col.format = format;
        self.cursor = column;
        Ok(())
    }

    /// Replace the unit of an existing column.
    pub fn set_unit(&mut self, column: usize, unit: &str) -> Result<()> {
        let col = self
            .columns
            .get_mut(column)
            .ok_or(TableError::NoSuchColumn(column))?;
        col.unit = unit.to_string();
        Ok(())
    }

    /// Resolve a column reference to a position.
    ///
    /// Paths have the form `section>subsection>leaf`. Each segment is looked
    /// up from the outermost header level inwards, restricted to the span of
    /// the section matched by the previous segment. A path that ends at a
    /// section label resolves to the first column of that section. Empty
    /// segments skip one header level, so `>>leaf` starts the search two
    /// levels below the top. Numeric strings are positions.
    ///
    /// Returns `None` if nothing matches.
    pub fn column<'a>(&self, column: impl Into<ColumnRef<'a>>) -> Option<usize> {
        self.resolve(column.into()).map(|(index, _)| index)
    }

    /// Whether a column reference resolves.
    pub fn exist<'a>(&self, column: impl Into<ColumnRef<'a>>) -> bool {
        self.column(column).is_some()
    }

    /// Resolve a reference to (position, header depth of the last segment).
    fn resolve(&self, column: ColumnRef<'_>) -> Option<(usize, usize)> {
        match column {
            ColumnRef::Index(index) => (index < self.columns.len()).then_some((index, 0)),
            ColumnRef::Path(path) => match path.trim().parse::<usize>() {
                Ok(index) => (index < self.columns.len()).then_some((index, 0)),
                Err(_) => self.resolve_path(path),
            },
        }
    }

    fn resolve_path(&self, path: &str) -> Option<(usize, usize)> {
        let segments: Vec<&str> = path.trim_end_matches('>').split('>').collect();
        let last = segments.iter().rposition(|s| !s.is_empty())?;

        let mut maxns = Some(self.nsecs());
        let (mut c0, mut c1) = (0, self.columns.len());
        for (si, segment) in segments.iter().enumerate() {
            let top = maxns?;
            if segment.is_empty() {
                maxns = top.checked_sub(1);
                continue;
            }
            let (index, depth) = (0..=top).rev().find_map(|depth| {
                (c0..c1)
                    .find(|&c| self.columns[c].label_at(depth) == Some(*segment))
                    .map(|c| (c, depth))
            })?;
            if si == last {
                return Some((index, depth));
            }
            c0 = index;
            c1 = self.section_end(index, depth);
            maxns = depth.checked_sub(1);
        }
        None
    }

    /// One past the last column of the section opened by `column` at `depth`.
    fn section_end(&self, column: usize, depth: usize) -> usize {
        (column + 1..self.columns.len())
            .find(|&c| self.columns[c].labels.len() > depth)
            .unwrap_or(self.columns.len())
    }

    /// Full label path of a column, leaf first, with inherited section labels.
    pub fn header_path(&self, column: usize) -> Vec<String> {
        let mut path = Vec::new();
        if column >= self.columns.len() {
            return path;
        }
        for depth in 0..=self.nsecs() {
            let label = (0..=column)
                .rev()
                .find_map(|c| self.columns[c].label_at(depth));
            match label {
                Some(label) => path.push(label.to_string()),
                None => break,
            }
        }
        path
    }

    /// Header cells at `depth`: runs of columns under one label, with the
    /// visible members of each run.
    pub(crate) fn spans(&self, depth: usize) -> Vec<Span<'_>> {
        let mut spans: Vec<Span<'_>> = Vec::new();
        for (c, column) in self.columns.iter().enumerate() {
            match column.label_at(depth) {
                Some(label) => spans.push(Span {
                    label,
                    visible: Vec::new(),
                }),
                None if spans.is_empty() => spans.push(Span {
                    label: "",
                    visible: Vec::new(),
                }),
                None => {}
            }
            if !column.hidden {
                if let Some(span) = spans.last_mut() {
                    span.visible.push(c);
                }
            }
        }
        spans
    }

    /// Append a value to `column`, or to the column under the cursor.
    ///
    /// The cursor moves to the column after the one written.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NoSuchColumn`] if the target position does not
    /// exist (for example when the cursor has run past the last column).
    pub fn add_value(&mut self, value: impl Into<Value>, column: Option<usize>) -> Result<()> {
        let index = column.unwrap_or(self.cursor);
        let col = self
            .columns
            .get_mut(index)
            .ok_or(TableError::NoSuchColumn(index))?;
        col.data.push(value.into());
        self.cursor = index + 1;
        Ok(())
    }

    /// Append several values to consecutive columns starting at `column`
    /// (or at the cursor).
    pub fn add_data<I, V>(&mut self, values: I, column: Option<usize>) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut column = column;
        for value in values {
            self.add_value(value, column)?;
            column = None;
        }
        Ok(())
    }

    /// A writing cursor of its own, starting at `column`.
    ///
    /// Values pushed through the returned [`Cursor`] advance only that
    /// cursor; the table's append cursor is left where it was.
    pub fn cursor_at(&mut self, column: usize) -> Cursor<'_> {
        Cursor {
            table: self,
            column,
        }
    }

    /// Pad all columns with the missing sentinel to the same length.
    pub fn fill_data(&mut self) {
        let rows = self.rows();
        for column in &mut self.columns {
            column.data.resize(rows, Value::Missing);
        }
        self.filled = rows;
    }

    /// Grow every column width to fit its leaf label and its widest rendered
    /// value (missing cells count as `missing`). Widths never shrink.
    pub fn adjust_columns(&mut self, missing: &str) {
        for column in &mut self.columns {
            let label_width = column.label().chars().count();
            let value_width = column
                .data
                .iter()
                .map(|v| column.format.render(v, missing).chars().count())
                .max()
                .unwrap_or(0);
            let width = column.format.width.max(label_width).max(value_width);
            if width != column.format.width {
                debug!(
                    column = column.label(),
                    from = column.format.width,
                    to = width,
                    "widening column"
                );
                column.format.width = width;
            }
        }
    }

    /// Order rows by the given keys, first key most significant.
    ///
    /// A key prefixed with `^` or `!` sorts descending. Only the row order is
    /// changed; cells stay where they are. Missing cells sort last in both
    /// directions. Keys that do not resolve are logged, skipped and returned.
    pub fn sort<S: AsRef<str>>(&mut self, keys: &[S]) -> Vec<String> {
        let mut order: Vec<usize> = (0..self.rows()).collect();
        let mut unresolved = Vec::new();
        for key in keys.iter().rev() {
            let key = key.as_ref();
            let (descending, path) = match key.strip_prefix(|c: char| c == '^' || c == '!') {
                Some(path) => (true, path),
                None => (false, key),
            };
            let Some(index) = self.column(path) else {
                warn!(key, "sort key does not name a column");
                unresolved.push(key.to_string());
                continue;
            };
            let column = &self.columns[index];
            order.sort_by(|&a, &b| {
                let (va, vb) = (column.value(a), column.value(b));
                let ord = va.sort_cmp(vb);
                if descending && !va.is_missing() && !vb.is_missing() {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
        self.order = Some(order);
        unresolved
    }

    /// Row indices in output order.
    pub fn row_order(&self) -> Vec<usize> {
        let rows = self.rows();
        match &self.order {
            Some(order) => {
                let mut order: Vec<usize> = order.iter().copied().filter(|&r| r < rows).collect();
                order.extend(order.len()..rows);
                order
            }
            None => (0..rows).collect(),
        }
    }

    fn set_hidden<'a>(&mut self, column: impl Into<ColumnRef<'a>>, hidden: bool) -> bool {
        let column = column.into();
        match self.resolve(column) {
            Some((index, depth)) => {
                let end = if depth > 0 {
                    self.section_end(index, depth)
                } else {
                    index + 1
                };
                for col in &mut self.columns[index..end] {
                    col.hidden = hidden;
                }
                true
            }
            None => {
                warn!(column = ?column, "cannot change visibility of unknown column");
                false
            }
        }
    }

    /// Hide a column, or every column of a section. Returns whether it resolved.
    pub fn hide<'a>(&mut self, column: impl Into<ColumnRef<'a>>) -> bool {
        self.set_hidden(column, true)
    }

    /// Show a column, or every column of a section. Returns whether it resolved.
    pub fn show<'a>(&mut self, column: impl Into<ColumnRef<'a>>) -> bool {
        self.set_hidden(column, false)
    }

    /// Hide all columns.
    pub fn hide_all(&mut self) {
        for column in &mut self.columns {
            column.hidden = true;
        }
    }

    /// Show all columns.
    pub fn show_all(&mut self) {
        for column in &mut self.columns {
            column.hidden = false;
        }
    }

    /// Hide every column whose cells are all missing or equal to `missing`.
    pub fn hide_empty_columns(&mut self, missing: &str) {
        for column in &mut self.columns {
            if column
                .data
                .iter()
                .all(|v| v.is_missing() || v.as_str() == Some(missing))
            {
                column.hidden = true;
            }
        }
    }
}

/// Writing cursor returned by [`DataTable::cursor_at`].
pub struct Cursor<'t> {
    table: &'t mut DataTable,
    column: usize,
}

impl Cursor<'_> {
    /// Append a value to the current column and advance.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        let col = self
            .table
            .columns
            .get_mut(self.column)
            .ok_or(TableError::NoSuchColumn(self.column))?;
        col.data.push(value.into());
        self.column += 1;
        Ok(self)
    }

    /// Position the next value goes to.
    pub fn position(&self) -> usize {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        let mut table = DataTable::new();
        table.add_section("data");
        table.add_section("");
        table.add_column("num", "1", "%3s").unwrap();
        table.add_column("load", "1", "%-5s").unwrap();
        table.add_section("kern latency");
        table.add_section("jitter");
        table.add_column("mean", "ns", "%7.0f").unwrap();
        table.add_column("stdev", "ns", "%7.0f").unwrap();
        table.add_column("max", "ns", "%7.0f").unwrap();
        table.add_section("overruns");
        table.add_column("max", "1", "%6.0f").unwrap();
        table.add_column("count", "1", "%6d").unwrap();
        table
    }

    #[test]
    fn test_section_prepend_order() {
        let table = sample();
        assert_eq!(table.column_at(0).unwrap().labels(), ["num", "", "data"]);
        assert_eq!(table.column_at(1).unwrap().labels(), ["load"]);
        assert_eq!(
            table.column_at(2).unwrap().labels(),
            ["mean", "jitter", "kern latency"]
        );
        assert_eq!(table.column_at(5).unwrap().labels(), ["max", "overruns"]);
        assert_eq!(table.nsecs(), 2);
    }

    #[test]
    fn test_simple_path_resolution() {
        let mut table = DataTable::new();
        table.add_section("A");
        let x = table.add_column("x", "1", "%3d").unwrap();
        assert_eq!(table.column("A>x"), Some(x));
        assert_eq!(table.column("A>y"), None);
    }

    #[test]
    fn test_scoped_path_resolution() {
        let table = sample();
        assert_eq!(table.column("data>num"), Some(0));
        assert_eq!(table.column("data>load"), Some(1));
        assert_eq!(table.column("kern latency"), Some(2));
        assert_eq!(table.column("kern latency>jitter"), Some(2));
        assert_eq!(table.column("kern latency>jitter>max"), Some(4));
        assert_eq!(table.column("kern latency>overruns"), Some(5));
        assert_eq!(table.column("kern latency>overruns>max"), Some(5));
        assert_eq!(table.column("kern latency>overruns>count"), Some(6));
        assert_eq!(table.column("kern latency>overruns>mean"), None);
        assert_eq!(table.column("user latency>jitter"), None);
        assert_eq!(table.column("data>mean"), None);
    }

    #[test]
    fn test_leading_empty_segments_skip_levels() {
        let table = sample();
        assert_eq!(table.column(">jitter>stdev"), Some(3));
        assert_eq!(table.column(">>count"), Some(6));
        assert_eq!(table.column(">kern latency"), None);
        assert_eq!(table.column(">>>max"), None);
    }

    #[test]
    fn test_positional_resolution() {
        let table = sample();
        assert_eq!(table.column(3), Some(3));
        assert_eq!(table.column("3"), Some(3));
        assert_eq!(table.column(7), None);
        assert_eq!(table.column("42"), None);
    }

    #[test]
    fn test_header_path_inherits_sections() {
        let table = sample();
        assert_eq!(table.header_path(1), ["load", "", "data"]);
        assert_eq!(table.header_path(3), ["stdev", "jitter", "kern latency"]);
        assert_eq!(table.header_path(6), ["count", "overruns", "kern latency"]);
        assert!(table.header_path(99).is_empty());
    }

    #[test]
    fn test_auto_advance_cursor() {
        let mut table = sample();
        let jitter = table.column("kern latency>jitter").unwrap();
        table.add_value(10.0, Some(jitter)).unwrap();
        table.add_value(2.0, None).unwrap();
        table.add_value(30.0, None).unwrap();
        assert_eq!(table.cursor(), 5);
        table.add_data([1_i64, 3], None).unwrap();
        assert_eq!(table.get(0, 5), &Value::Int(1));
        assert_eq!(table.get(0, 6), &Value::Int(3));
        assert!(matches!(
            table.add_value(0, None),
            Err(TableError::NoSuchColumn(7))
        ));
    }

    #[test]
    fn test_cursor_at_leaves_table_cursor() {
        let mut table = sample();
        table.add_value("1", Some(0)).unwrap();
        assert_eq!(table.cursor(), 1);

        let overruns = table.column("kern latency>overruns").unwrap();
        let mut cursor = table.cursor_at(overruns);
        cursor.push(4.0).unwrap().push(12_i64).unwrap();
        assert_eq!(cursor.position(), 7);

        // the table cursor still follows the first write
        table.add_value("heavy", None).unwrap();
        assert_eq!(table.get(0, 1), &Value::from("heavy"));
        assert_eq!(table.get(0, 5), &Value::Float(4.0));
        assert_eq!(table.get(0, 6), &Value::Int(12));
    }

    #[test]
    fn test_fill_data_pads_and_is_idempotent() {
        let mut table = sample();
        table.add_value("1", Some(0)).unwrap();
        table.add_data([1.0, 2.0], Some(2)).unwrap();
        table.fill_data();
        assert!(table.iter_columns().all(|c| c.values().len() == 1));
        assert!(table.get(0, 4).is_missing());
        table.fill_data();
        assert!(table.iter_columns().all(|c| c.values().len() == 1));
    }

    #[test]
    fn test_late_column_lines_up_with_current_row() {
        let mut table = DataTable::new();
        table.add_column("num", "1", "%3s").unwrap();
        table.add_value("1", Some(0)).unwrap();
        table.fill_data();
        table.add_value("2", Some(0)).unwrap();
        let late = table.add_column("late", "1", "%3d").unwrap();
        table.add_value(7_i64, Some(late)).unwrap();
        table.fill_data();
        assert!(table.get(0, late).is_missing());
        assert_eq!(table.get(1, late), &Value::Int(7));
    }

    #[test]
    fn test_seek_end_appends_after_writes() {
        let mut table = sample();
        table.add_value("1", Some(0)).unwrap();
        assert_eq!(table.cursor(), 1);
        table.seek_end();
        table.add_section("user latency");
        let mean = table.add_column("mean", "ns", "%7.0f").unwrap();
        assert_eq!(mean, 7);
        assert_eq!(table.column_at(1).unwrap().labels(), ["load"]);
        assert_eq!(table.column("user latency>mean"), Some(7));
    }

    #[test]
    fn test_adjust_columns_grows_width() {
        let mut table = sample();
        table.add_value("12345", Some(0)).unwrap();
        table.fill_data();
        table.adjust_columns("-");
        assert_eq!(table.column_at(0).unwrap().format().width, 5);
        // "load" label is 4 wide, format was 5
        assert_eq!(table.column_at(1).unwrap().format().width, 5);
        assert_eq!(table.column_at(1).unwrap().format().to_string(), "%-5s");
        // "count" label wider than %6d? no: stays 6
        assert_eq!(table.column_at(6).unwrap().format().width, 6);
    }

    #[test]
    fn test_adjust_columns_counts_missing_marker() {
        let mut table = DataTable::new();
        table.add_column("t", "C", "%2s").unwrap();
        table.add_value(Value::Missing, Some(0)).unwrap();
        table.adjust_columns("n/a");
        assert_eq!(table.column_at(0).unwrap().format().width, 3);
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let mut table = DataTable::new();
        table.add_column("max", "ns", "%5.0f").unwrap();
        for v in [50.0, 10.0, 30.0] {
            table.add_value(v, Some(0)).unwrap();
            table.fill_data();
        }
        assert!(table.sort(&["max"]).is_empty());
        assert_eq!(table.row_order(), vec![1, 2, 0]);
        table.sort(&["^max"]);
        assert_eq!(table.row_order(), vec![0, 2, 1]);
        table.sort(&["!max"]);
        assert_eq!(table.row_order(), vec![0, 2, 1]);
    }

    #[test]
    fn test_sort_multiple_keys_first_is_primary() {
        let mut table = DataTable::new();
        table.add_column("load", "1", "%-5s").unwrap();
        table.add_column("max", "ns", "%5d").unwrap();
        let rows: [(&str, i64); 4] = [("cpu", 5), ("idle", 3), ("cpu", 1), ("idle", 9)];
        for (load, max) in rows {
            table.add_data([Value::from(load), Value::from(max)], Some(0)).unwrap();
            table.fill_data();
        }
        let unresolved = table.sort(&["load", "^max", "nothing"]);
        assert_eq!(unresolved, vec!["nothing".to_string()]);
        assert_eq!(table.row_order(), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_sort_keeps_missing_last() {
        let mut table = DataTable::new();
        table.add_column("max", "ns", "%5.0f").unwrap();
        for v in [f64::NAN, 10.0, 30.0] {
            table.add_value(v, Some(0)).unwrap();
            table.fill_data();
        }
        table.sort(&["max"]);
        assert_eq!(table.row_order(), vec![1, 2, 0]);
        table.sort(&["^max"]);
        assert_eq!(table.row_order(), vec![2, 1, 0]);
    }

    #[test]
    fn test_hide_show_sections_and_columns() {
        let mut table = sample();
        assert!(table.hide("kern latency>overruns"));
        assert!(table.column_at(5).unwrap().is_hidden());
        assert!(table.column_at(6).unwrap().is_hidden());
        assert!(!table.column_at(4).unwrap().is_hidden());
        assert!(table.show("kern latency>overruns>count"));
        assert!(!table.column_at(6).unwrap().is_hidden());
        assert!(!table.hide("no such"));
        table.hide_all();
        assert!(table.iter_columns().all(Column::is_hidden));
        table.show_all();
        assert!(!table.iter_columns().any(Column::is_hidden));
    }

    #[test]
    fn test_hide_empty_columns() {
        let mut table = DataTable::new();
        table.add_column("a", "", "%s").unwrap();
        table.add_column("b", "", "%s").unwrap();
        table.add_column("c", "", "%s").unwrap();
        table.add_data([Value::from("x"), Value::from("-"), Value::Missing], Some(0)).unwrap();
        table.fill_data();
        table.add_data([Value::Missing, Value::Float(f64::NAN)], Some(1)).unwrap();
        table.fill_data();
        table.hide_empty_columns("-");
        let hidden: Vec<bool> = table.iter_columns().map(Column::is_hidden).collect();
        assert_eq!(hidden, vec![false, true, true]);
    }

    #[test]
    fn test_spans_skip_hidden_members() {
        let mut table = sample();
        table.hide("kern latency>jitter>stdev");
        let spans = table.spans(1);
        let summary: Vec<(&str, Vec<usize>)> =
            spans.iter().map(|s| (s.label, s.visible.clone())).collect();
        assert_eq!(
            summary,
            vec![("", vec![0, 1]), ("jitter", vec![2, 4]), ("overruns", vec![5, 6])]
        );
    }
}
