pub mod eigen;

pub use eigen::{EigenError, SymmetricEigen, symmetric_eigen};

use faer::Mat;

pub type DenseRealMatrix = Mat<f64>;
