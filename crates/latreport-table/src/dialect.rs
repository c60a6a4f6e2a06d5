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

//! Output dialects.
//!
//! Every dialect is a [`DialectSpec`] record: row delimiters, cell templates,
//! rule lines and how spanning section headers are merged. The renderer in
//! [`crate::write`] is one algorithm driven by these records.
//!
//! Templates use two placeholders: `{text}` for the cell content and
//! `{span}` for the number of columns a merged header cell covers. Data cell
//! templates may also use `{align}` (`left` / `right`).

use crate::error::TableError;
use crate::format::Align;
use std::fmt;
use std::str::FromStr;

/// Named rendering dialect.
///
/// Parsed from a token by its first character, so `d`, `dat` and `data` all
/// select [`Dialect::Plain`].
///
/// # Examples
///
/// ```
/// use latreport_table::Dialect;
///
/// assert_eq!("md".parse::<Dialect>().unwrap(), Dialect::Markdown);
/// assert_eq!("LaTeX".parse::<Dialect>().unwrap(), Dialect::Latex);
/// assert!("x".parse::<Dialect>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Fixed-width columns, `#`-prefixed header lines.
    #[default]
    Plain,
    /// Fixed-width columns inside `|` borders and `-` rules.
    Ascii,
    /// Legacy RTAI style: `RTH|` header and `RTD|` data lines.
    Rtai,
    /// Comma-separated values.
    Csv,
    /// GitHub-flavored markdown table.
    Markdown,
    /// HTML table.
    Html,
    /// LaTeX tabular environment.
    Latex,
}

impl Dialect {
    /// All dialects, in documentation order.
    pub const ALL: [Dialect; 7] = [
        Dialect::Plain,
        Dialect::Ascii,
        Dialect::Rtai,
        Dialect::Csv,
        Dialect::Markdown,
        Dialect::Html,
        Dialect::Latex,
    ];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Rendering record of this dialect.
    pub fn spec(self) -> &'static DialectSpec {
        match self {
            Dialect::Plain => &PLAIN,
            Dialect::Ascii => &ASCII,
            Dialect::Rtai => &RTAI,
            Dialect::Csv => &CSV,
            Dialect::Markdown => &MARKDOWN,
            Dialect::Html => &HTML,
            Dialect::Latex => &LATEX,
        }
    }
}

impl FromStr for Dialect {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('d') | Some('p') => Ok(Dialect::Plain),
            Some('a') => Ok(Dialect::Ascii),
            Some('r') => Ok(Dialect::Rtai),
            Some('c') => Ok(Dialect::Csv),
            Some('m') => Ok(Dialect::Markdown),
            Some('h') => Ok(Dialect::Html),
            Some('l') => Ok(Dialect::Latex),
            _ => Err(TableError::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Delimiters of one table row.
#[derive(Debug, Clone, Copy)]
pub struct RowStyle {
    /// Text before the first cell.
    pub start: &'static str,
    /// Text between cells.
    pub sep: &'static str,
    /// Text after the last cell.
    pub end: &'static str,
}

/// A horizontal rule line.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// No rule.
    None,
    /// A fixed line of text.
    Text(&'static str),
    /// A line drawn from the column widths.
    Drawn {
        /// Text before the first column.
        start: &'static str,
        /// Character repeated over each column width.
        fill: char,
        /// Text between columns.
        sep: &'static str,
        /// Text after the last column.
        end: &'static str,
        /// Extra fill characters per column (cell padding of the row style).
        extra: usize,
        /// Mark alignment with `:` at the padded side (markdown).
        align_marks: bool,
    },
}

/// How header cells spanning several columns are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// One cell padded to the summed width of its columns and separators.
    Pad,
    /// One cell from a template using `{span}` and `{text}`.
    Template(&'static str),
    /// The label in the first column, empty cells for the rest.
    Repeat,
}

/// Where the header rule goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRule {
    /// After the last header line.
    AfterHeader,
    /// After the first header line (the markdown table header).
    AfterFirstLine,
}

/// Rendering record of one dialect.
#[derive(Clone, Copy)]
pub struct DialectSpec {
    /// Canonical dialect name.
    pub name: &'static str,
    /// Emitted before the table; `{colspec}` expands to one `l`/`r` per column.
    pub begin: Option<&'static str>,
    /// Emitted after the table.
    pub end: Option<&'static str>,
    /// Header line delimiters.
    pub header: RowStyle,
    /// Data line delimiters.
    pub data: RowStyle,
    /// Template of a single header cell.
    pub header_cell: &'static str,
    /// Template of a data cell.
    pub data_cell: &'static str,
    /// Section header merging.
    pub merge: Merge,
    /// Rule above the header.
    pub top_rule: Rule,
    /// Rule between header and data.
    pub header_rule: Rule,
    /// Placement of the header rule.
    pub header_rule_at: HeaderRule,
    /// Rule below the data.
    pub bottom_rule: Rule,
    /// Pad cells to the column width.
    pub pad: bool,
    /// Escape cell text for the target markup.
    pub escape: fn(&str) -> String,
}

impl fmt::Debug for DialectSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectSpec")
            .field("name", &self.name)
            .field("merge", &self.merge)
            .field("pad", &self.pad)
            .finish_non_exhaustive()
    }
}

impl DialectSpec {
    /// `l` or `r` for a column alignment in `{colspec}`.
    pub(crate) fn colspec_char(align: Align) -> char {
        match align {
            Align::Left => 'l',
            Align::Right => 'r',
        }
    }
}

fn escape_none(s: &str) -> String {
    s.to_string()
}

fn escape_csv(s: &str) -> String {
    if s.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_latex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '\\' => out.push_str("\\textbackslash{}"),
            _ => out.push(c),
        }
    }
    out
}

static PLAIN: DialectSpec = DialectSpec {
    name: "dat",
    begin: None,
    end: None,
    header: RowStyle {
        start: "# ",
        sep: " | ",
        end: "",
    },
    data: RowStyle {
        start: "  ",
        sep: " | ",
        end: "",
    },
    header_cell: "{text}",
    data_cell: "{text}",
    merge: Merge::Pad,
    top_rule: Rule::None,
    header_rule: Rule::None,
    header_rule_at: HeaderRule::AfterHeader,
    bottom_rule: Rule::None,
    pad: true,
    escape: escape_none,
};

const ASCII_RULE: Rule = Rule::Drawn {
    start: "|-",
    fill: '-',
    sep: "-|-",
    end: "-|",
    extra: 0,
    align_marks: false,
};

static ASCII: DialectSpec = DialectSpec {
    name: "ascii",
    begin: None,
    end: None,
    header: RowStyle {
        start: "| ",
        sep: " | ",
        end: " |",
    },
    data: RowStyle {
        start: "| ",
        sep: " | ",
        end: " |",
    },
    header_cell: "{text}",
    data_cell: "{text}",
    merge: Merge::Pad,
    top_rule: ASCII_RULE,
    header_rule: ASCII_RULE,
    header_rule_at: HeaderRule::AfterHeader,
    bottom_rule: ASCII_RULE,
    pad: true,
    escape: escape_none,
};

static RTAI: DialectSpec = DialectSpec {
    name: "rtai",
    begin: None,
    end: None,
    header: RowStyle {
        start: "RTH|",
        sep: "|",
        end: "",
    },
    data: RowStyle {
        start: "RTD|",
        sep: "|",
        end: "",
    },
    header_cell: "{text}",
    data_cell: "{text}",
    merge: Merge::Pad,
    top_rule: Rule::None,
    header_rule: Rule::None,
    header_rule_at: HeaderRule::AfterHeader,
    bottom_rule: Rule::None,
    pad: true,
    escape: escape_none,
};

static CSV: DialectSpec = DialectSpec {
    name: "csv",
    begin: None,
    end: None,
    header: RowStyle {
        start: "",
        sep: ",",
        end: "",
    },
    data: RowStyle {
        start: "",
        sep: ",",
        end: "",
    },
    header_cell: "{text}",
    data_cell: "{text}",
    merge: Merge::Repeat,
    top_rule: Rule::None,
    header_rule: Rule::None,
    header_rule_at: HeaderRule::AfterHeader,
    bottom_rule: Rule::None,
    pad: false,
    escape: escape_csv,
};

static MARKDOWN: DialectSpec = DialectSpec {
    name: "md",
    begin: None,
    end: None,
    header: RowStyle {
        start: "| ",
        sep: " | ",
        end: " |",
    },
    data: RowStyle {
        start: "| ",
        sep: " | ",
        end: " |",
    },
    header_cell: "{text}",
    data_cell: "{text}",
    merge: Merge::Repeat,
    top_rule: Rule::None,
    header_rule: Rule::Drawn {
        start: "|",
        fill: '-',
        sep: "|",
        end: "|",
        extra: 2,
        align_marks: true,
    },
    header_rule_at: HeaderRule::AfterFirstLine,
    bottom_rule: Rule::None,
    pad: true,
    escape: escape_markdown,
};

static HTML: DialectSpec = DialectSpec {
    name: "html",
    begin: Some("<table>\n<thead>"),
    end: Some("</tbody>\n</table>"),
    header: RowStyle {
        start: "  <tr>",
        sep: "",
        end: "</tr>",
    },
    data: RowStyle {
        start: "  <tr>",
        sep: "",
        end: "</tr>",
    },
    header_cell: "<th>{text}</th>",
    data_cell: "<td align=\"{align}\">{text}</td>",
    merge: Merge::Template("<th colspan=\"{span}\">{text}</th>"),
    top_rule: Rule::None,
    header_rule: Rule::Text("</thead>\n<tbody>"),
    header_rule_at: HeaderRule::AfterHeader,
    bottom_rule: Rule::None,
    pad: false,
    escape: escape_html,
};

static LATEX: DialectSpec = DialectSpec {
    name: "latex",
    begin: Some("\\begin{tabular}{{colspec}}"),
    end: Some("\\end{tabular}"),
    header: RowStyle {
        start: "  ",
        sep: " & ",
        end: " \\\\",
    },
    data: RowStyle {
        start: "  ",
        sep: " & ",
        end: " \\\\",
    },
    header_cell: "{text}",
    data_cell: "{text}",
    merge: Merge::Template("\\multicolumn{{span}}{l}{{text}}"),
    top_rule: Rule::Text("  \\hline"),
    header_rule: Rule::Text("  \\hline"),
    header_rule_at: HeaderRule::AfterHeader,
    bottom_rule: Rule::Text("  \\hline"),
    pad: true,
    escape: escape_latex,
};
