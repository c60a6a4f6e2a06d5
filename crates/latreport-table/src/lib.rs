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


//! Hierarchical tabular report engine.
//!
//! Build a table column by column under nested section headers, fill it row
//! by row, then render it as plain text, ASCII art, RTAI tagged lines, CSV,
//! markdown, HTML or LaTeX.
//!
//! # Features
//!
//! - **Nested sections**: columns are grouped under any number of header levels
//! - **Path addressing**: columns resolve by `section>column` paths or by position
//! - **printf-style formats**: `%-7.1f`, `%5d`, `%s` per column
//! - **Missing cells**: ragged columns are padded with an explicit missing value
//! - **Sorting and visibility**: multi-key row sorting, hidden columns and sections
//!
//! # Examples
//!
//! ```
//! use latreport_table::{DataTable, Dialect, Units, WriteConfig};
//!
//! let mut table = DataTable::new();
//! table.add_section("jitter");
//! table.add_column("mean", "ns", "%6.1f").unwrap();
//! table.add_column("max", "ns", "%5.0f").unwrap();
//! table.add_data([12.5, 40.0], Some(0)).unwrap();
//! table.fill_data();
//!
//! let config = WriteConfig {
//!     dialect: Dialect::Csv,
//!     units: Units::None,
//!     ..Default::default()
//! };
//! let text = table.to_string_with(&config).unwrap();
//! assert_eq!(text, "jitter,\nmean,max\n12.5,40\n");
//! ```

mod dialect;
mod error;
mod format;
mod table;
mod value;
mod write;

pub use dialect::{Dialect, DialectSpec, HeaderRule, Merge, RowStyle, Rule};
pub use error::{Result, TableError};
pub use format::{Align, CellFormat, Conversion};
pub use table::{Column, ColumnRef, Cursor, DataTable};
pub use value::Value;
pub use write::{column_letters, NumberCols, Units, WriteConfig};
