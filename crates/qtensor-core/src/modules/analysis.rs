use super::tensor::{ComponentSeries, assemble_tensor, weighted_norm_squared};
use crate::domain::OutputQuantity;
use crate::numerics::{DenseRealMatrix, EigenError, symmetric_eigen};

const TENSOR_DIMENSION: usize = 3;

/// Leading eigenstructure of one node tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeResult {
    pub eigenvalue_max: f64,
    pub eigenvector_max: [f64; 3],
    /// `|λ1 - λ2|` for the two largest eigenvalues.
    pub s: f64,
    /// `|z|` of the leading eigenvector.
    pub s2: f64,
}

pub fn analyze_tensor(tensor: &DenseRealMatrix) -> Result<NodeResult, EigenError> {
    if tensor.nrows() != TENSOR_DIMENSION || tensor.ncols() != TENSOR_DIMENSION {
        return Err(EigenError::UnexpectedDimension {
            expected: TENSOR_DIMENSION,
            rows: tensor.nrows(),
            cols: tensor.ncols(),
        });
    }

    let decomposition = symmetric_eigen(tensor)?;
    let eigenvalues = decomposition.eigenvalues();
    let largest = eigenvalues[TENSOR_DIMENSION - 1];
    let second = eigenvalues[TENSOR_DIMENSION - 2];

    let top = decomposition.eigenvector(TENSOR_DIMENSION - 1);
    let eigenvector_max = [top[0], top[1], top[2]];

    Ok(NodeResult {
        eigenvalue_max: largest,
        eigenvector_max,
        s: (largest - second).abs(),
        s2: eigenvector_max[2].abs(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeFailure {
    pub node_index: usize,
    pub error: EigenError,
}

/// Per-node output columns for one timestamp, in ascending node order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampAnalysis {
    num_nodes: usize,
    eigen: Vec<f64>,
    eigenvector: [Vec<f64>; 3],
    s: Vec<f64>,
    s2: Vec<f64>,
    norm_q2: Vec<f64>,
    failure: Option<NodeFailure>,
}

impl TimestampAnalysis {
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Nodes with a complete eigen result.
    pub fn processed_nodes(&self) -> usize {
        self.eigen.len()
    }

    pub fn failure(&self) -> Option<&NodeFailure> {
        self.failure.as_ref()
    }

    /// Values written for `quantity`. The `Eigenvector1..3` columns keep the
    /// solver's sign for each node and are not flipped into a common
    /// hemisphere; `S2` is the only column that takes an absolute value.
    pub fn column(&self, quantity: OutputQuantity) -> &[f64] {
        match quantity {
            OutputQuantity::Eigen => &self.eigen,
            OutputQuantity::Eigenvector1 => &self.eigenvector[0],
            OutputQuantity::Eigenvector2 => &self.eigenvector[1],
            OutputQuantity::Eigenvector3 => &self.eigenvector[2],
            OutputQuantity::S => &self.s,
            OutputQuantity::S2 => &self.s2,
            OutputQuantity::NormQ2 => &self.norm_q2,
        }
    }
}

/// Runs every node in order. The first eigen failure stops the loop: the
/// failing node keeps its `normQ2` entry but has no eigen-derived values, and
/// later nodes are dropped.
pub fn analyze_series(series: &ComponentSeries) -> TimestampAnalysis {
    let num_nodes = series.num_nodes();
    let mut eigen = vec![0.0; num_nodes];
    let mut eigenvector = [
        vec![0.0; num_nodes],
        vec![0.0; num_nodes],
        vec![0.0; num_nodes],
    ];
    let mut s = vec![0.0; num_nodes];
    let mut s2 = vec![0.0; num_nodes];
    let mut norm_q2 = vec![0.0; num_nodes];
    let mut failure = None;

    for node in 0..num_nodes {
        let Some(components) = series.node_components(node) else {
            break;
        };
        norm_q2[node] = weighted_norm_squared(components);

        match analyze_tensor(&assemble_tensor(components)) {
            Ok(result) => {
                eigen[node] = result.eigenvalue_max;
                for (column, value) in eigenvector.iter_mut().zip(result.eigenvector_max) {
                    column[node] = value;
                }
                s[node] = result.s;
                s2[node] = result.s2;
            }
            Err(error) => {
                failure = Some(NodeFailure {
                    node_index: node,
                    error,
                });
                break;
            }
        }
    }

    if let Some(failed) = &failure {
        let processed = failed.node_index;
        eigen.truncate(processed);
        for column in &mut eigenvector {
            column.truncate(processed);
        }
        s.truncate(processed);
        s2.truncate(processed);
        norm_q2.truncate(processed + 1);
    }

    TimestampAnalysis {
        num_nodes,
        eigen,
        eigenvector,
        s,
        s2,
        norm_q2,
        failure,
    }
}
