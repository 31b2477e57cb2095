//! State and row builders shared by every asset variant.

use crate::equation::{DISCHARGE, EquationRow, INTERNAL_ENERGY, NUM_CORE_QUANTITIES, PRESSURE};
use crate::error::{NetworkError, NetworkResult};
use crate::node::Node;
use hn_core::{AssetId, NodeId};

/// Identity, connection-point bookkeeping, and the slice of the global
/// unknown vector an asset owns.
///
/// Sign convention: a connection point's discharge unknown is positive
/// when mass flows into the asset at that point.
#[derive(Debug, Clone)]
pub struct AssetCore {
    pub id: AssetId,
    number_of_connection_points: usize,
    pub number_of_unknowns: usize,
    pub matrix_index: usize,
    pub prev_sol: Vec<f64>,
    connected_nodes: Vec<Option<NodeId>>,
}

impl AssetCore {
    pub fn new(id: AssetId, connection_points: usize) -> Self {
        let number_of_unknowns = connection_points * NUM_CORE_QUANTITIES;
        Self {
            id,
            number_of_connection_points: connection_points,
            number_of_unknowns,
            matrix_index: 0,
            prev_sol: vec![0.0; number_of_unknowns],
            connected_nodes: vec![None; connection_points],
        }
    }

    pub fn connection_points(&self) -> usize {
        self.number_of_connection_points
    }

    pub fn check_point(&self, point: usize) -> NetworkResult<()> {
        if point >= self.number_of_connection_points {
            return Err(NetworkError::ConnectionPointOob {
                id: self.id,
                point,
                points: self.number_of_connection_points,
            });
        }
        Ok(())
    }

    pub fn connect_node(&mut self, point: usize, node: NodeId) -> NetworkResult<()> {
        self.check_point(point)?;
        if self.connected_nodes[point].is_some() {
            return Err(NetworkError::AlreadyConnected {
                a: self.id,
                b: self.id,
            });
        }
        self.connected_nodes[point] = Some(node);
        Ok(())
    }

    pub fn is_connected(&self, point: usize) -> bool {
        self.connected_nodes.get(point).copied().flatten().is_some()
    }

    pub fn connected_node(&self, point: usize) -> Option<NodeId> {
        self.connected_nodes.get(point).copied().flatten()
    }

    /// True when every connection point is bound to a node.
    pub fn is_all_connected(&self) -> bool {
        self.connected_nodes.iter().all(|n| n.is_some())
    }

    pub fn set_matrix_index(&mut self, index: usize) {
        self.matrix_index = index;
    }

    /// Global position of one unknown of one connection point.
    pub fn unknown_index(&self, point: usize, offset: usize) -> usize {
        self.matrix_index + point * NUM_CORE_QUANTITIES + offset
    }

    /// Previous iterate of one unknown of one connection point.
    pub fn prev(&self, point: usize, offset: usize) -> f64 {
        self.prev_sol[point * NUM_CORE_QUANTITIES + offset]
    }

    /// For two-point assets: the point where flow enters from the node,
    /// by the sign of the previous discharge at point 0. Stagnant flow
    /// counts as forward so the choice stays deterministic.
    pub fn inflow_point(&self) -> usize {
        if self.prev(0, DISCHARGE) >= 0.0 { 0 } else { 1 }
    }

    pub fn outflow_point(&self) -> usize {
        1 - self.inflow_point()
    }

    /// Mass entering at all points sums to zero.
    pub fn internal_continuity_row(&self) -> EquationRow {
        let indices = (0..self.number_of_connection_points)
            .map(|point| self.unknown_index(point, DISCHARGE))
            .collect();
        let coefficients = vec![1.0; self.number_of_connection_points];
        EquationRow::new(indices, coefficients, 0.0)
    }

    /// The point's pressure equals the attached node's pressure.
    pub fn press_to_node_row(&self, point: usize, node: &Node) -> EquationRow {
        EquationRow::difference(
            self.unknown_index(point, PRESSURE),
            node.unknown_index(PRESSURE),
            0.0,
        )
    }

    /// The point's internal energy equals the attached node's.
    pub fn thermal_to_node_row(&self, point: usize, node: &Node) -> EquationRow {
        EquationRow::difference(
            self.unknown_index(point, INTERNAL_ENERGY),
            node.unknown_index(INTERNAL_ENERGY),
            0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::EntityId;

    #[test]
    fn unknown_layout() {
        let mut core = AssetCore::new(EntityId::new_random(), 2);
        core.set_matrix_index(9);
        assert_eq!(core.number_of_unknowns, 6);
        assert_eq!(core.unknown_index(0, DISCHARGE), 9);
        assert_eq!(core.unknown_index(0, INTERNAL_ENERGY), 11);
        assert_eq!(core.unknown_index(1, PRESSURE), 13);
    }

    #[test]
    fn connect_node_guards() {
        let mut core = AssetCore::new(EntityId::new_random(), 1);
        let node = EntityId::new_random();
        assert!(!core.is_all_connected());
        core.connect_node(0, node).unwrap();
        assert!(core.is_all_connected());
        assert_eq!(core.connected_node(0), Some(node));
        assert!(matches!(
            core.connect_node(0, EntityId::new_random()),
            Err(NetworkError::AlreadyConnected { .. })
        ));
        assert!(matches!(
            core.connect_node(1, node),
            Err(NetworkError::ConnectionPointOob { .. })
        ));
    }

    #[test]
    fn upwind_point_follows_discharge_sign() {
        let mut core = AssetCore::new(EntityId::new_random(), 2);
        assert_eq!(core.inflow_point(), 0);
        core.prev_sol[DISCHARGE] = -1.5;
        assert_eq!(core.inflow_point(), 1);
        assert_eq!(core.outflow_point(), 0);
    }
}
