use super::record::InputRecord;
use crate::domain::Component;
use crate::numerics::DenseRealMatrix;

/// The six component sequences of one timestamp, indexed `q1`..`q6`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSeries {
    columns: [Vec<f64>; 6],
}

impl ComponentSeries {
    pub fn new(columns: [Vec<f64>; 6]) -> Self {
        Self { columns }
    }

    pub fn from_records(records: [InputRecord; 6]) -> Self {
        Self::new(records.map(|record| record.values))
    }

    pub fn values(&self, component: Component) -> &[f64] {
        &self.columns[component.index() - 1]
    }

    /// Shortest of the six sequences; nodes past it are ignored.
    pub fn num_nodes(&self) -> usize {
        self.columns.iter().map(Vec::len).min().unwrap_or(0)
    }

    pub fn node_components(&self, node: usize) -> Option<[f64; 6]> {
        if node >= self.num_nodes() {
            return None;
        }
        Some(Component::ALL.map(|component| self.values(component)[node]))
    }

    pub fn node_tensor(&self, node: usize) -> Option<DenseRealMatrix> {
        self.node_components(node).map(assemble_tensor)
    }

    pub fn norm_q2(&self, node: usize) -> Option<f64> {
        self.node_components(node).map(weighted_norm_squared)
    }
}

pub fn assemble_tensor(components: [f64; 6]) -> DenseRealMatrix {
    let mut tensor = DenseRealMatrix::zeros(3, 3);
    for (component, value) in Component::ALL.into_iter().zip(components) {
        let (row, col) = component.tensor_slot();
        tensor[(row, col)] = value;
        tensor[(col, row)] = value;
    }
    tensor
}

/// `q1² + 2q2² + 2q3² + q4² + 2q5² + q6²`: off-diagonal entries appear
/// twice in the full tensor.
pub fn weighted_norm_squared(components: [f64; 6]) -> f64 {
    Component::ALL
        .into_iter()
        .zip(components)
        .map(|(component, value)| {
            let weight = if component.is_off_diagonal() { 2.0 } else { 1.0 };
            weight * value * value
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{ComponentSeries, assemble_tensor, weighted_norm_squared};
    use crate::domain::Component;
    use crate::modules::record::InputRecord;

    #[test]
    fn tensor_places_components_symmetrically() {
        let tensor = assemble_tensor([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let expected = [[1.0, 2.0, 3.0], [2.0, 4.0, 5.0], [3.0, 5.0, 6.0]];
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(tensor[(row, col)], expected[row][col]);
                assert_eq!(tensor[(row, col)], tensor[(col, row)]);
            }
        }
    }

    #[test]
    fn norm_counts_off_diagonal_terms_twice() {
        assert_eq!(weighted_norm_squared([1.0, 0.0, 0.0, 1.0, 0.0, 1.0]), 3.0);
        assert_eq!(weighted_norm_squared([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]), 2.0);
        assert_eq!(
            weighted_norm_squared([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            1.0 + 8.0 + 18.0 + 16.0 + 50.0 + 36.0
        );
    }

    #[test]
    fn norm_matches_frobenius_norm_of_assembled_tensor() {
        let components = [0.3, -0.1, 0.05, -0.2, 0.12, -0.1];
        let tensor = assemble_tensor(components);
        let mut frobenius_sq = 0.0;
        for row in 0..3 {
            for col in 0..3 {
                frobenius_sq += tensor[(row, col)] * tensor[(row, col)];
            }
        }
        assert!((weighted_norm_squared(components) - frobenius_sq).abs() < 1.0e-15);
    }

    #[test]
    fn num_nodes_is_the_shortest_sequence() {
        let series = ComponentSeries::new([
            vec![1.0, 2.0, 3.0, 4.0],
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0, 1.0],
        ]);

        assert_eq!(series.num_nodes(), 3);
        assert_eq!(series.node_components(2), Some([3.0, 0.0, 0.0, 1.0, 0.0, 1.0]));
        assert_eq!(series.node_components(3), None);
        assert_eq!(series.norm_q2(0), Some(3.0));
        assert!(series.node_tensor(3).is_none());
    }

    #[test]
    fn series_from_records_keeps_component_order() {
        let records = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0].map(|value| InputRecord {
            mesh_size: 1,
            values: vec![value],
            mesh_size_defaulted: false,
        });
        let series = ComponentSeries::from_records(records);

        assert_eq!(series.values(Component::Q1), &[1.0]);
        assert_eq!(series.values(Component::Q6), &[6.0]);
        let tensor = series.node_tensor(0).expect("node 0 exists");
        assert_eq!(tensor[(1, 2)], 5.0);
        assert_eq!(tensor[(2, 1)], 5.0);
    }
}
