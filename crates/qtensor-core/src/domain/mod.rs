pub mod errors;

pub use errors::{
    ErrorCategory, ParserResult, ProcessErrorKind, ProcessResult, QtensorError, QtensorResult,
};

use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const INPUT_EXTENSION: &str = ".gp";

/// One of the six independent entries of a symmetric 3x3 Q-tensor, in file
/// order `q1`..`q6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
}

impl Component {
    pub const ALL: [Component; 6] = [
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::Q4,
        Self::Q5,
        Self::Q6,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
            Self::Q5 => 5,
            Self::Q6 => 6,
        }
    }

    /// Upper-triangle `(row, col)` slot; the mirrored slot holds the same value.
    pub const fn tensor_slot(self) -> (usize, usize) {
        match self {
            Self::Q1 => (0, 0),
            Self::Q2 => (0, 1),
            Self::Q3 => (0, 2),
            Self::Q4 => (1, 1),
            Self::Q5 => (1, 2),
            Self::Q6 => (2, 2),
        }
    }

    pub const fn is_off_diagonal(self) -> bool {
        let (row, col) = self.tensor_slot();
        row != col
    }

    pub fn file_name(self, token: &str) -> String {
        format!("q{}_{}{}", self.index(), token, INPUT_EXTENSION)
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.index())
    }
}

/// Derived per-node quantities, one output file each per timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputQuantity {
    Eigen,
    Eigenvector1,
    Eigenvector2,
    Eigenvector3,
    S,
    S2,
    NormQ2,
}

impl OutputQuantity {
    pub const ALL: [OutputQuantity; 7] = [
        Self::Eigen,
        Self::Eigenvector1,
        Self::Eigenvector2,
        Self::Eigenvector3,
        Self::S,
        Self::S2,
        Self::NormQ2,
    ];

    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Eigen => "eigen",
            Self::Eigenvector1 => "eigenvector1",
            Self::Eigenvector2 => "eigenvector2",
            Self::Eigenvector3 => "eigenvector3",
            Self::S => "S",
            Self::S2 => "S2",
            Self::NormQ2 => "normQ2",
        }
    }

    pub fn file_name(self, token: &str) -> String {
        format!("{}_{}{}", self.file_stem(), token, INPUT_EXTENSION)
    }
}

impl Display for OutputQuantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Terminal state of one timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TimestampOutcome {
    Complete,
    Skipped { reason: String },
    /// Eigen analysis stopped at `node_index`; earlier nodes were written.
    PartiallyFailed { node_index: usize },
    WriteFailed { reason: String },
}

impl TimestampOutcome {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Complete => "COMPLETE",
            Self::Skipped { .. } => "SKIPPED",
            Self::PartiallyFailed { .. } => "PARTIAL",
            Self::WriteFailed { .. } => "WRITE_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Component, OutputQuantity, TimestampOutcome};

    #[test]
    fn component_slots_cover_the_upper_triangle() {
        let slots: Vec<(usize, usize)> = Component::ALL
            .iter()
            .map(|component| component.tensor_slot())
            .collect();
        assert_eq!(slots, vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);

        let off_diagonal: Vec<usize> = Component::ALL
            .iter()
            .filter(|component| component.is_off_diagonal())
            .map(|component| component.index())
            .collect();
        assert_eq!(off_diagonal, vec![2, 3, 5]);
    }

    #[test]
    fn component_file_names_follow_input_pattern() {
        assert_eq!(Component::Q1.file_name("0100"), "q1_0100.gp");
        assert_eq!(Component::Q6.file_name("t_final"), "q6_t_final.gp");
        assert_eq!(Component::Q4.to_string(), "q4");
    }

    #[test]
    fn output_file_names_follow_quantity_stems() {
        let names: Vec<String> = OutputQuantity::ALL
            .iter()
            .map(|quantity| quantity.file_name("42"))
            .collect();
        assert_eq!(
            names,
            vec![
                "eigen_42.gp",
                "eigenvector1_42.gp",
                "eigenvector2_42.gp",
                "eigenvector3_42.gp",
                "S_42.gp",
                "S2_42.gp",
                "normQ2_42.gp",
            ]
        );
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(TimestampOutcome::Complete.label(), "COMPLETE");
        assert_eq!(TimestampOutcome::PartiallyFailed { node_index: 3 }.label(), "PARTIAL");
        assert_eq!(
            TimestampOutcome::WriteFailed {
                reason: "denied".to_string()
            }
            .label(),
            "WRITE_FAILED"
        );
    }
}
