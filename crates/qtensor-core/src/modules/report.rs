use crate::domain::{ProcessResult, QtensorError, TimestampOutcome};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampReport {
    pub token: String,
    pub outcome: TimestampOutcome,
    pub num_nodes: usize,
    pub processed_nodes: usize,
    pub written_artifacts: Vec<String>,
}

impl TimestampReport {
    pub fn skipped(token: &str, reason: impl Into<String>) -> Self {
        Self {
            token: token.to_string(),
            outcome: TimestampOutcome::Skipped {
                reason: reason.into(),
            },
            num_nodes: 0,
            processed_nodes: 0,
            written_artifacts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub timestamps: Vec<TimestampReport>,
}

impl RunReport {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            timestamps: Vec::new(),
        }
    }

    pub fn timestamp(&self, token: &str) -> Option<&TimestampReport> {
        self.timestamps.iter().find(|report| report.token == token)
    }

    pub fn complete_count(&self) -> usize {
        self.count_matching(|outcome| matches!(outcome, TimestampOutcome::Complete))
    }

    pub fn partial_count(&self) -> usize {
        self.count_matching(|outcome| matches!(outcome, TimestampOutcome::PartiallyFailed { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count_matching(|outcome| matches!(outcome, TimestampOutcome::Skipped { .. }))
    }

    pub fn write_failed_count(&self) -> usize {
        self.count_matching(|outcome| matches!(outcome, TimestampOutcome::WriteFailed { .. }))
    }

    fn count_matching(&self, predicate: impl Fn(&TimestampOutcome) -> bool) -> usize {
        self.timestamps
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

pub fn render_human_summary(report: &RunReport) -> String {
    let mut lines = Vec::with_capacity(report.timestamps.len() + 1);
    lines.push(format!(
        "Processing status: {} complete, {} partial, {} skipped, {} write-failed ({} timestamps)",
        report.complete_count(),
        report.partial_count(),
        report.skipped_count(),
        report.write_failed_count(),
        report.timestamps.len()
    ));

    for timestamp in &report.timestamps {
        let label = timestamp.outcome.label();
        let line = match &timestamp.outcome {
            TimestampOutcome::Complete => format!(
                "- {}: {} ({} nodes, {} artifacts)",
                timestamp.token,
                label,
                timestamp.num_nodes,
                timestamp.written_artifacts.len()
            ),
            TimestampOutcome::PartiallyFailed { node_index } => format!(
                "- {}: {}, stopped at node {} of {} ({} artifacts)",
                timestamp.token,
                label,
                node_index,
                timestamp.num_nodes,
                timestamp.written_artifacts.len()
            ),
            TimestampOutcome::Skipped { reason } | TimestampOutcome::WriteFailed { reason } => {
                format!("- {}: {}: {}", timestamp.token, label, reason)
            }
        };
        lines.push(line);
    }

    lines.join("\n")
}

pub fn write_run_report(path: &Path, report: &RunReport) -> ProcessResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| {
            QtensorError::output_write(format!(
                "failed to create report directory '{}': {}",
                parent.display(),
                source
            ))
        })?;
    }

    let report_json = serde_json::to_string_pretty(report).map_err(|source| {
        QtensorError::internal(format!("failed to serialize run report: {}", source))
    })?;
    fs::write(path, format!("{report_json}\n")).map_err(|source| {
        QtensorError::output_write(format!(
            "failed to write run report '{}': {}",
            path.display(),
            source
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::{RunReport, TimestampReport, render_human_summary, write_run_report};
    use crate::domain::TimestampOutcome;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    fn sample_report() -> RunReport {
        let mut report = RunReport::new("run", "run");
        report.timestamps.push(TimestampReport {
            token: "0100".to_string(),
            outcome: TimestampOutcome::Complete,
            num_nodes: 12,
            processed_nodes: 12,
            written_artifacts: vec!["eigen_0100.gp".to_string(); 7],
        });
        report.timestamps.push(TimestampReport {
            token: "0200".to_string(),
            outcome: TimestampOutcome::PartiallyFailed { node_index: 4 },
            num_nodes: 12,
            processed_nodes: 4,
            written_artifacts: vec!["eigen_0200.gp".to_string(); 7],
        });
        report
            .timestamps
            .push(TimestampReport::skipped("0300", "missing q5_0300.gp"));
        report
    }

    #[test]
    fn counts_follow_outcomes() {
        let report = sample_report();
        assert_eq!(report.complete_count(), 1);
        assert_eq!(report.partial_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.write_failed_count(), 0);
        assert!(report.timestamp("0300").is_some());
        assert!(report.timestamp("0400").is_none());
    }

    #[test]
    fn human_summary_lists_every_timestamp() {
        let summary = render_human_summary(&sample_report());
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(
            lines[0],
            "Processing status: 1 complete, 1 partial, 1 skipped, 0 write-failed (3 timestamps)"
        );
        assert_eq!(lines[1], "- 0100: COMPLETE (12 nodes, 7 artifacts)");
        assert_eq!(lines[2], "- 0200: PARTIAL, stopped at node 4 of 12 (7 artifacts)");
        assert_eq!(lines[3], "- 0300: SKIPPED: missing q5_0300.gp");
    }

    #[test]
    fn json_report_tags_outcomes_in_snake_case() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("reports/run.json");

        write_run_report(&path, &sample_report()).expect("report should be written");
        let parsed: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("report should be readable"))
                .expect("report JSON should parse");

        assert_eq!(parsed["timestamps"][0]["outcome"]["status"], "complete");
        assert_eq!(parsed["timestamps"][1]["outcome"]["status"], "partially_failed");
        assert_eq!(parsed["timestamps"][1]["outcome"]["node_index"], 4);
        assert_eq!(parsed["timestamps"][2]["outcome"]["reason"], "missing q5_0300.gp");
        assert_eq!(parsed["input_dir"], "run");
    }
}
