use super::DenseRealMatrix;

const MAX_JACOBI_SWEEPS: usize = 64;
const SYMMETRY_RELATIVE_EPSILON: f64 = 1.0e-12;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EigenError {
    #[error("eigen decomposition requires a square matrix, got {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },
    #[error("eigen decomposition requires a non-empty matrix")]
    EmptyMatrix,
    #[error("matrix entry ({row},{col}) is not finite")]
    NonFiniteEntry { row: usize, col: usize },
    #[error("matrix is not symmetric at entry ({row},{col})")]
    AsymmetricMatrix { row: usize, col: usize },
    #[error("Jacobi iteration did not converge after {sweeps} sweeps")]
    NoConvergence { sweeps: usize },
    #[error("expected a {expected}x{expected} matrix, got {rows}x{cols}")]
    UnexpectedDimension {
        expected: usize,
        rows: usize,
        cols: usize,
    },
}

/// Eigenpairs of a real symmetric matrix. Eigenvalues ascend;
/// `eigenvector(i)` is the unit eigenvector of `eigenvalues[i]`. Eigenvector
/// signs are whatever the rotations produced and are not canonicalized.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricEigen {
    eigenvalues: Vec<f64>,
    eigenvectors: DenseRealMatrix,
}

impl SymmetricEigen {
    pub fn dimension(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    pub fn eigenvector(&self, index: usize) -> Vec<f64> {
        (0..self.dimension())
            .map(|row| self.eigenvectors[(row, index)])
            .collect()
    }
}

/// Cyclic Jacobi diagonalization. Ties between equal eigenvalues keep the
/// order in which they sit on the converged diagonal.
pub fn symmetric_eigen(matrix: &DenseRealMatrix) -> Result<SymmetricEigen, EigenError> {
    let dimension = validate_square_shape(matrix)?;
    validate_finite(matrix)?;

    let scale = max_abs_entry(matrix);
    if scale == 0.0 {
        return Ok(SymmetricEigen {
            eigenvalues: vec![0.0; dimension],
            eigenvectors: identity_matrix(dimension),
        });
    }

    // Iterate on entries in [-1, 1] so the squared norms neither underflow
    // nor overflow; eigenvalues are rescaled at the end.
    let mut work = DenseRealMatrix::zeros(dimension, dimension);
    for row in 0..dimension {
        for col in 0..dimension {
            work[(row, col)] = matrix[(row, col)] / scale;
        }
    }
    validate_symmetric(&work)?;

    let mut vectors = identity_matrix(dimension);
    let frobenius = frobenius_norm(&work);
    let mut sweeps = 0;
    loop {
        let off_diagonal = off_diagonal_norm(&work);
        if !off_diagonal.is_finite() {
            return Err(EigenError::NoConvergence { sweeps });
        }
        if off_diagonal <= f64::EPSILON * frobenius {
            break;
        }
        if sweeps == MAX_JACOBI_SWEEPS {
            return Err(EigenError::NoConvergence { sweeps });
        }
        for p in 0..dimension {
            for q in (p + 1)..dimension {
                rotate(&mut work, &mut vectors, p, q);
            }
        }
        sweeps += 1;
    }

    let mut order: Vec<usize> = (0..dimension).collect();
    order.sort_by(|&lhs, &rhs| work[(lhs, lhs)].total_cmp(&work[(rhs, rhs)]));

    let eigenvalues = order
        .iter()
        .map(|&index| work[(index, index)] * scale)
        .collect();
    let mut eigenvectors = DenseRealMatrix::zeros(dimension, dimension);
    for (target, &source) in order.iter().enumerate() {
        for row in 0..dimension {
            eigenvectors[(row, target)] = vectors[(row, source)];
        }
    }

    Ok(SymmetricEigen {
        eigenvalues,
        eigenvectors,
    })
}

fn rotate(work: &mut DenseRealMatrix, vectors: &mut DenseRealMatrix, p: usize, q: usize) {
    let apq = work[(p, q)];
    if apq == 0.0 {
        return;
    }

    let theta = (work[(q, q)] - work[(p, p)]) / (2.0 * apq);
    let t = theta.signum() / (theta.abs() + theta.hypot(1.0));
    let c = 1.0 / t.hypot(1.0);
    let s = t * c;
    let dimension = work.nrows();

    for k in 0..dimension {
        let akp = work[(k, p)];
        let akq = work[(k, q)];
        work[(k, p)] = c * akp - s * akq;
        work[(k, q)] = s * akp + c * akq;
    }
    for k in 0..dimension {
        let apk = work[(p, k)];
        let aqk = work[(q, k)];
        work[(p, k)] = c * apk - s * aqk;
        work[(q, k)] = s * apk + c * aqk;
    }
    work[(p, q)] = 0.0;
    work[(q, p)] = 0.0;

    for k in 0..dimension {
        let vkp = vectors[(k, p)];
        let vkq = vectors[(k, q)];
        vectors[(k, p)] = c * vkp - s * vkq;
        vectors[(k, q)] = s * vkp + c * vkq;
    }
}

fn validate_square_shape(matrix: &DenseRealMatrix) -> Result<usize, EigenError> {
    let rows = matrix.nrows();
    let cols = matrix.ncols();
    if rows == 0 || cols == 0 {
        return Err(EigenError::EmptyMatrix);
    }
    if rows != cols {
        return Err(EigenError::NonSquareMatrix { rows, cols });
    }

    Ok(rows)
}

fn validate_finite(matrix: &DenseRealMatrix) -> Result<(), EigenError> {
    for row in 0..matrix.nrows() {
        for col in 0..matrix.ncols() {
            if !matrix[(row, col)].is_finite() {
                return Err(EigenError::NonFiniteEntry { row, col });
            }
        }
    }
    Ok(())
}

/// Expects a matrix already scaled to unit max entry.
fn validate_symmetric(matrix: &DenseRealMatrix) -> Result<(), EigenError> {
    let tolerance = SYMMETRY_RELATIVE_EPSILON * frobenius_norm(matrix).max(1.0);
    let dimension = matrix.nrows();
    for row in 0..dimension {
        for col in (row + 1)..dimension {
            if (matrix[(row, col)] - matrix[(col, row)]).abs() > tolerance {
                return Err(EigenError::AsymmetricMatrix { row, col });
            }
        }
    }
    Ok(())
}

fn max_abs_entry(matrix: &DenseRealMatrix) -> f64 {
    let mut largest = 0.0_f64;
    for row in 0..matrix.nrows() {
        for col in 0..matrix.ncols() {
            largest = largest.max(matrix[(row, col)].abs());
        }
    }
    largest
}

fn identity_matrix(size: usize) -> DenseRealMatrix {
    let mut identity = DenseRealMatrix::zeros(size, size);
    for index in 0..size {
        identity[(index, index)] = 1.0;
    }
    identity
}

fn frobenius_norm(matrix: &DenseRealMatrix) -> f64 {
    let mut sum = 0.0_f64;
    for row in 0..matrix.nrows() {
        for col in 0..matrix.ncols() {
            sum += matrix[(row, col)] * matrix[(row, col)];
        }
    }
    sum.sqrt()
}

fn off_diagonal_norm(matrix: &DenseRealMatrix) -> f64 {
    let mut sum = 0.0_f64;
    for row in 0..matrix.nrows() {
        for col in 0..matrix.ncols() {
            if row != col {
                sum += matrix[(row, col)] * matrix[(row, col)];
            }
        }
    }
    sum.sqrt()
}
