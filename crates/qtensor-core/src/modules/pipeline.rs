use super::analysis::{TimestampAnalysis, analyze_series};
use super::grouping::{
    CANDIDATE_GLOB, DirectoryScan, TimestampGroup, group_for_token, timestamp_tokens,
};
use super::record::{InputRecord, read_input_record};
use super::report::{RunReport, TimestampReport, write_run_report};
use super::serialization::write_gp_table;
use super::tensor::ComponentSeries;
use super::traits::InputDiscovery;
use crate::domain::{Component, OutputQuantity, ProcessResult, QtensorError, TimestampOutcome};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub report_path: Option<PathBuf>,
}

impl ProcessConfig {
    /// Outputs land next to the inputs unless redirected.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        Self {
            output_dir: input_dir.clone(),
            input_dir,
            report_path: None,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_report_path(mut self, report_path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(report_path.into());
        self
    }
}

/// Processes `input_dir` and, when `report_path` is set, writes the JSON
/// run report there.
pub fn run_processing(config: &ProcessConfig) -> ProcessResult<RunReport> {
    let report = process_inputs(DirectoryScan::new(&config.input_dir), &config.output_dir)?;
    if let Some(report_path) = &config.report_path {
        write_run_report(report_path, &report)?;
        tracing::info!(path = %report_path.display(), "wrote run report");
    }
    Ok(report)
}

/// Visits every discovered timestamp in order. Only discovery failures
/// are returned as errors; per-timestamp problems land in the report.
pub fn process_inputs<D: InputDiscovery>(
    discovery: D,
    output_dir: &Path,
) -> ProcessResult<RunReport> {
    let discovered = discovery.discover()?;
    let working_dir = discovered.working_dir;

    let tokens = timestamp_tokens(&discovered.candidates);
    if tokens.is_empty() {
        return Err(QtensorError::no_input_files(format!(
            "no '{}' files found in '{}'",
            CANDIDATE_GLOB,
            working_dir.display()
        )));
    }
    tracing::info!(?tokens, dir = %working_dir.display(), "timestamps found");

    let mut report = RunReport::new(&working_dir, output_dir);
    for token in &tokens {
        let timestamp = process_timestamp(&working_dir, output_dir, token, &discovered.candidates);
        report.timestamps.push(timestamp);
    }

    tracing::info!(
        complete = report.complete_count(),
        partial = report.partial_count(),
        skipped = report.skipped_count(),
        write_failed = report.write_failed_count(),
        "processing complete"
    );
    Ok(report)
}

pub fn process_timestamp(
    working_dir: &Path,
    output_dir: &Path,
    token: &str,
    candidates: &[String],
) -> TimestampReport {
    tracing::info!(token, "processing timestamp");

    let group = match group_for_token(working_dir, token, candidates) {
        Ok(group) => group,
        Err(error) => return skip(token, &error),
    };

    let (mesh_size, series) = match load_group(&group) {
        Ok(loaded) => loaded,
        Err(error) => return skip(token, &error),
    };

    let analysis = analyze_series(&series);
    tracing::info!(token, nodes = analysis.num_nodes(), "processed nodes");

    let outcome = match analysis.failure() {
        Some(failure) => {
            let error = QtensorError::eigen_failure(format!(
                "eigenvalue computation failed at node {} for timestamp {}: {}",
                failure.node_index, token, failure.error
            ));
            tracing::error!(token, node_index = failure.node_index, "{}", error.diagnostic_line());
            TimestampOutcome::PartiallyFailed {
                node_index: failure.node_index,
            }
        }
        None => TimestampOutcome::Complete,
    };

    let mut report = TimestampReport {
        token: token.to_string(),
        outcome,
        num_nodes: analysis.num_nodes(),
        processed_nodes: analysis.processed_nodes(),
        written_artifacts: Vec::new(),
    };

    if let Err(error) = write_outputs(output_dir, token, mesh_size, &analysis, &mut report) {
        tracing::error!(token, "{}", error.diagnostic_line());
        report.outcome = TimestampOutcome::WriteFailed {
            reason: error.diagnostic_line(),
        };
        return report;
    }

    tracing::info!(token, artifacts = ?report.written_artifacts, "saved results");
    report
}

/// Reads `q1`..`q6` in order; the header of `q1` supplies the output mesh size.
fn load_group(group: &TimestampGroup) -> ProcessResult<(i64, ComponentSeries)> {
    let mut records: Vec<InputRecord> = Vec::with_capacity(Component::ALL.len());
    for component in Component::ALL {
        let path = group.path(component);
        let record = read_input_record(path)?;
        tracing::info!(file = %path.display(), values = record.len(), "loaded values");
        records.push(record);
    }

    let mesh_size = records[0].mesh_size;
    let records: [InputRecord; 6] = records.try_into().map_err(|_| {
        QtensorError::internal(format!(
            "timestamp {} did not load six component records",
            group.token
        ))
    })?;
    Ok((mesh_size, ComponentSeries::from_records(records)))
}

fn write_outputs(
    output_dir: &Path,
    token: &str,
    mesh_size: i64,
    analysis: &TimestampAnalysis,
    report: &mut TimestampReport,
) -> ProcessResult<()> {
    fs::create_dir_all(output_dir).map_err(|source| {
        QtensorError::output_write(format!(
            "failed to create output directory '{}': {}",
            output_dir.display(),
            source
        ))
    })?;

    for quantity in OutputQuantity::ALL {
        let file_name = quantity.file_name(token);
        write_gp_table(&output_dir.join(&file_name), mesh_size, analysis.column(quantity))?;
        report.written_artifacts.push(file_name);
    }
    Ok(())
}

fn skip(token: &str, error: &QtensorError) -> TimestampReport {
    tracing::warn!(token, "{}", error.diagnostic_line());
    TimestampReport::skipped(token, error.diagnostic_line())
}
