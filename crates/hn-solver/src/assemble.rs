//! Assembly of collected equation rows into the global linear system.

use crate::error::{SolverError, SolverResult};
use hn_network::EquationRow;
use nalgebra::{DMatrix, DVector};

/// Build `A` and `b` from one row per unknown.
///
/// A pure function of the rows: identical inputs produce bit-identical
/// systems. Coefficients hitting the same position accumulate.
pub fn assemble(rows: &[EquationRow], unknowns: usize) -> SolverResult<(DMatrix<f64>, DVector<f64>)> {
    if rows.len() != unknowns {
        return Err(SolverError::SystemShapeMismatch {
            rows: rows.len(),
            unknowns,
        });
    }
    let mut a = DMatrix::zeros(unknowns, unknowns);
    let mut b = DVector::zeros(unknowns);
    for (r, row) in rows.iter().enumerate() {
        for (&index, &coefficient) in row.indices.iter().zip(&row.coefficients) {
            if index >= unknowns {
                return Err(SolverError::IndexOutOfRange {
                    index,
                    len: unknowns,
                });
            }
            a[(r, index)] += coefficient;
        }
        b[r] = row.rhs;
    }
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_rows_in_order() {
        let rows = vec![
            EquationRow::prescribe(0, 5.0),
            EquationRow::new(vec![0, 1], vec![2.0, -1.0], 1.0),
        ];
        let (a, b) = assemble(&rows, 2).unwrap();
        assert_eq!(a[(0, 0)], 1.0);
        assert_eq!(a[(0, 1)], 0.0);
        assert_eq!(a[(1, 0)], 2.0);
        assert_eq!(a[(1, 1)], -1.0);
        assert_eq!(b[0], 5.0);
        assert_eq!(b[1], 1.0);
    }

    #[test]
    fn duplicate_indices_accumulate() {
        let rows = vec![EquationRow::new(vec![0, 0], vec![1.0, 2.0], 0.0)];
        let (a, _) = assemble(&rows, 1).unwrap();
        assert_eq!(a[(0, 0)], 3.0);
    }

    #[test]
    fn shape_mismatch_rejected() {
        let rows = vec![EquationRow::prescribe(0, 0.0)];
        assert!(matches!(
            assemble(&rows, 2),
            Err(SolverError::SystemShapeMismatch { rows: 1, unknowns: 2 })
        ));
    }

    #[test]
    fn out_of_range_index_rejected() {
        let rows = vec![EquationRow::prescribe(3, 0.0)];
        assert!(matches!(
            assemble(&rows, 1),
            Err(SolverError::IndexOutOfRange { index: 3, len: 1 })
        ));
    }
}
