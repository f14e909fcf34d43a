use crate::{error::SequencerError, location::LocationIdx};

pub type Cost = f64;

/// Square travel cost matrix stored as a flat vector.
/// To find the index for a pair of locations, use the formula:
/// `index = from * num_locations + to`
#[derive(Debug, Clone)]
pub struct TravelCostMatrix {
    costs: Vec<Cost>,
    num_locations: usize,
}

impl TravelCostMatrix {
    /// Builds the matrix from rows, rejecting anything that is not square or
    /// holds a negative or non-finite off-diagonal cost.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, SequencerError> {
        let num_locations = rows.len();
        let mut costs = Vec::with_capacity(num_locations * num_locations);

        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != num_locations {
                return Err(SequencerError::MatrixColumnCount {
                    row: from,
                    expected: num_locations,
                    actual: row.len(),
                });
            }

            for (to, value) in row.into_iter().enumerate() {
                if from == to {
                    // The diagonal is never travelled
                    costs.push(0.0);
                } else if value.is_finite() && value >= 0.0 {
                    costs.push(value);
                } else {
                    return Err(SequencerError::InvalidCost { from, to, value });
                }
            }
        }

        Ok(TravelCostMatrix {
            costs,
            num_locations,
        })
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    #[inline(always)]
    pub fn travel_cost(&self, from: LocationIdx, to: LocationIdx) -> Cost {
        self.costs[self.index(from, to)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_flattens_row_major() {
        let matrix =
            TravelCostMatrix::from_rows(vec![vec![0.0, 1.0, 2.0], vec![3.0, 0.0, 4.0], vec![5.0, 6.0, 0.0]])
                .unwrap();

        assert_eq!(matrix.travel_cost(0.into(), 2.into()), 2.0);
        assert_eq!(matrix.travel_cost(2.into(), 0.into()), 5.0);
        assert_eq!(matrix.travel_cost(1.into(), 2.into()), 4.0);
    }

    #[test]
    fn test_diagonal_is_ignored() {
        let matrix = TravelCostMatrix::from_rows(vec![vec![7.0, 1.0], vec![1.0, -3.0]]).unwrap();

        assert_eq!(matrix.travel_cost(0.into(), 0.into()), 0.0);
        assert_eq!(matrix.travel_cost(1.into(), 1.into()), 0.0);
        assert_eq!(matrix.travel_cost(1.into(), 0.into()), 1.0);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = TravelCostMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]);

        assert_eq!(
            result.unwrap_err(),
            SequencerError::MatrixColumnCount {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_rejects_negative_cost() {
        let result = TravelCostMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]);

        assert!(matches!(
            result,
            Err(SequencerError::InvalidCost { from: 0, to: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_cost() {
        let result = TravelCostMatrix::from_rows(vec![vec![0.0, 1.0], vec![f64::NAN, 0.0]]);

        assert!(matches!(
            result,
            Err(SequencerError::InvalidCost { from: 1, to: 0, .. })
        ));
    }
}
