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


//! Report command - one table row per transcript

use super::{write_output, RunName};
use crate::cli::ReportArgs;
use crate::error::CliError;
use latreport_log::{parse_file, Analysis, AnalysisConfig, ParserConfig, TestType, Transcript};
use latreport_table::{DataTable, Value};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Test modes that get report sections, in column order.
pub const MODES: [&str; 3] = ["kern", "kthreads", "user"];

/// File name prefix of transcripts inside input directories.
const TRANSCRIPT_PREFIX: &str = "latencies-";

/// (label, unit, format) of a leaf column.
type Leaf = (&'static str, &'static str, &'static str);

const DATA_COLUMNS: &[Leaf] = &[
    ("num", "1", "%3s"),
    ("kernel parameter", "1", "%-20s"),
    ("load", "1", "%-5s"),
    ("quality", "1", "%-7s"),
    ("cpuid", "1", "%-5s"),
    ("latency", "1", "%-4s"),
    ("performance", "1", "%-3s"),
    ("temp", "C", "%5.1f"),
    ("freq", "GHz", "%4.2f"),
    ("poll", "%", "%3.0f"),
    ("isol", "1", "%4d"),
];

const JITTER: &[Leaf] = &[
    ("mean", "ns", "%7.0f"),
    ("stdev", "ns", "%7.0f"),
    ("max", "ns", "%7.0f"),
];

const PEAK: &[Leaf] = &[("max", "ns", "%7.0f")];

const OVERRUNS: &[Leaf] = &[("max", "1", "%6.0f"), ("count", "1", "%6.0f")];

/// Subsections of a test section; matches the groups of [`Analysis::groups`].
fn subsections(test: TestType) -> &'static [(&'static str, &'static [Leaf])] {
    match test {
        TestType::Latency => &[("jitter", JITTER), ("overruns", OVERRUNS)],
        TestType::Preempt => &[("jitter", JITTER), ("fast", PEAK), ("slow", PEAK)],
        TestType::Switches => &[("time", JITTER)],
    }
}

/// Expand the command line inputs into transcript files.
///
/// Directories contribute their `latencies-*` files in name order; other
/// paths are taken as given.
///
/// # Errors
///
/// Returns [`CliError::Io`] if a directory cannot be listed and
/// [`CliError::NoInput`] if nothing is left.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in fs::read_dir(input).map_err(|e| CliError::io_error(input, e))? {
            let path = entry.map_err(|e| CliError::io_error(input, e))?.path();
            let is_transcript = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(TRANSCRIPT_PREFIX));
            if is_transcript && path.is_file() {
                found.push(path);
            }
        }
        found.sort();
        debug!(dir = %input.display(), files = found.len(), "expanded input directory");
        files.extend(found);
    }
    if files.is_empty() {
        return Err(CliError::NoInput);
    }
    Ok(files)
}

/// Accumulates one report row per run.
#[derive(Debug)]
pub struct ReportBuilder {
    table: DataTable,
    analysis: AnalysisConfig,
}

impl ReportBuilder {
    /// Create a report holding only the `data` section.
    pub fn new(analysis: AnalysisConfig) -> Result<Self, CliError> {
        let mut table = DataTable::new();
        table.add_section("data");
        table.add_section("");
        for (label, unit, format) in DATA_COLUMNS {
            table.add_column(label, unit, format)?;
        }
        Ok(Self { table, analysis })
    }

    fn put(&mut self, path: &str, value: impl Into<Value>) -> Result<(), CliError> {
        match self.table.column(path) {
            Some(index) => self.table.add_value(value, Some(index))?,
            None => warn!(path, "report has no such column"),
        }
        Ok(())
    }

    /// Append the row of one run.
    pub fn add_run(&mut self, run: &RunName, transcript: &Transcript) -> Result<(), CliError> {
        let env = &transcript.environment;
        let cpu = env
            .cpu_id
            .as_deref()
            .or(run.cpu_id.as_deref())
            .unwrap_or("0");

        self.put("data>num", run.num.as_str())?;
        self.put("data>kernel parameter", run.parameters.as_str())?;
        self.put("data>load", run.load.as_str())?;
        self.put("data>quality", run.quality.as_str())?;
        self.put("data>cpuid", format!("cpu{cpu}"))?;
        self.put("data>latency", run.latency.as_str())?;
        self.put("data>performance", if run.performance { "yes" } else { "no" })?;
        self.put("data>temp", env.temperature)?;
        self.put("data>freq", env.frequency)?;
        self.put("data>poll", env.poll)?;
        self.put("data>isol", env.isolated_cpus)?;

        for mode in MODES {
            for test in TestType::ALL {
                let analysis = Analysis::of(&transcript.measurements, mode, test, &self.analysis);
                if let Some(analysis) = analysis {
                    self.add_analysis(mode, test, &analysis)?;
                }
            }
        }
        self.table.fill_data();
        Ok(())
    }

    fn add_analysis(
        &mut self,
        mode: &str,
        test: TestType,
        analysis: &Analysis,
    ) -> Result<(), CliError> {
        let section = format!("{} {}", mode, test.name());
        let layout = subsections(test);
        if !self.table.exist(section.as_str()) {
            debug!(section = %section, "adding report section");
            self.table.seek_end();
            self.table.add_section(&section);
            for (sub, leaves) in layout {
                self.table.add_section(sub);
                for (label, unit, format) in *leaves {
                    self.table.add_column(label, unit, format)?;
                }
            }
        }

        for ((sub, _), values) in layout.iter().zip(analysis.groups()) {
            let path = format!("{section}>{sub}");
            let Some(start) = self.table.column(path.as_str()) else {
                warn!(path = %path, "report has no such section");
                continue;
            };
            let mut cursor = self.table.cursor_at(start);
            for value in values {
                cursor.push(value)?;
            }
        }
        Ok(())
    }

    /// The report so far.
    pub fn table(&self) -> &DataTable {
        &self.table
    }

    /// Finish building and hand out the table.
    pub fn into_table(self) -> DataTable {
        self.table
    }
}

/// Analyse transcripts and print the report table.
///
/// # Errors
///
/// Returns `Err` if no transcript is found, a transcript cannot be read, or
/// the output cannot be written.
pub fn report(args: &ReportArgs) -> Result<(), CliError> {
    let files = collect_inputs(&args.inputs)?;
    let mut builder = ReportBuilder::new(args.analysis_config())?;

    for file in &files {
        let run = RunName::parse(&file.to_string_lossy());
        let config = ParserConfig {
            cpu_id: run.cpu_id.clone(),
            ..ParserConfig::default()
        };
        let transcript = parse_file(file, &config).map_err(|e| CliError::log_error(file, e))?;
        info!(
            file = %file.display(),
            series = transcript.measurements.len(),
            "analysed transcript"
        );
        builder.add_run(&run, &transcript)?;
    }

    let config = args.write_config();
    let mut table = builder.into_table();
    table.adjust_columns(&config.missing);
    table.sort(&args.sort);
    for key in &args.hide {
        table.hide(key.as_str());
    }
    if args.hide_empty {
        table.hide_empty_columns(&config.missing);
    }

    let text = table.to_string_with(&config)?;
    write_output(&text, args.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use latreport_log::parse_transcript;
    use latreport_test::fixtures;

    fn run() -> RunName {
        RunName::parse("latencies-rt1-4.4.115-rtai-1-007-2018-05-14-isolcpus-cpu1-cpu-good")
    }

    fn full_run() -> Transcript {
        parse_transcript(fixtures::full_run().as_bytes(), &ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_data_section_only() {
        let builder = ReportBuilder::new(AnalysisConfig::default()).unwrap();
        let table = builder.table();
        assert_eq!(table.columns(), DATA_COLUMNS.len());
        assert_eq!(table.rows(), 0);
        assert_eq!(table.column("data>isol"), Some(DATA_COLUMNS.len() - 1));
    }

    #[test]
    fn test_full_run_row() {
        let mut builder = ReportBuilder::new(AnalysisConfig::default()).unwrap();
        builder.add_run(&run(), &full_run()).unwrap();
        let table = builder.into_table();

        assert_eq!(table.rows(), 1);
        assert!(table.exist("kern latency"));
        assert!(table.exist("kern preempt>slow>max"));
        assert!(table.exist("kthreads latency>overruns>count"));
        assert!(table.exist("user switches>time>stdev"));
        assert!(!table.exist("user latency"));

        let cell = |path: &str| table.get(0, table.column(path).unwrap()).clone();
        assert_eq!(cell("data>num"), Value::from("007"));
        assert_eq!(cell("data>cpuid"), Value::from("cpu1"));
        assert_eq!(cell("data>kernel parameter"), Value::from("isolcpus"));
        assert_eq!(cell("data>performance"), Value::from("no"));
        assert_eq!(cell("data>isol"), Value::from(1usize));
        assert!(cell("kern latency>jitter>max").as_f64().is_some());
    }

    #[test]
    fn test_late_sections_pad_earlier_rows() {
        let mut builder = ReportBuilder::new(AnalysisConfig::default()).unwrap();
        builder.add_run(&run(), &Transcript::default()).unwrap();
        builder.add_run(&run(), &full_run()).unwrap();
        let table = builder.into_table();

        assert_eq!(table.rows(), 2);
        let max = table.column("kern latency>jitter>max").unwrap();
        assert!(table.get(0, max).is_missing());
        assert!(!table.get(1, max).is_missing());
        assert!(table.get(0, table.column("data>temp").unwrap()).is_missing());
    }

    #[test]
    fn test_collect_inputs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["latencies-b", "latencies-a", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let files = collect_inputs(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["latencies-a", "latencies-b"]);

        let empty = tempfile::tempdir().unwrap();
        assert!(matches!(
            collect_inputs(&[empty.path().to_path_buf()]),
            Err(CliError::NoInput)
        ));
    }
}
