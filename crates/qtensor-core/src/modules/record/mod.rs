mod parser;

pub use parser::{parse_input_record, read_input_record};

/// One `q*.gp` component file: a mesh-size header and every value that
/// follows it, flattened in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    pub mesh_size: i64,
    pub values: Vec<f64>,
    /// Header was not an integer and `mesh_size` fell back to 0.
    pub mesh_size_defaulted: bool,
}

impl InputRecord {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
