//! Network container: entity arenas, connectivity, and indexing.

use std::collections::HashMap;

use crate::assets::base::AssetCore;
use crate::assets::{AssetKind, AssetVariant};
use crate::equation::EquationRow;
use crate::error::{NetworkError, NetworkResult};
use crate::node::Node;
use hn_core::{AssetId, EntityId, NodeId};

/// The entity graph: assets joined at nodes, each owning a slice of the
/// global unknown vector.
///
/// Entities live in insertion-ordered arenas; the id maps are lookup
/// only, so iteration order (and therefore matrix layout and row order)
/// is deterministic across runs.
#[derive(Debug, Default)]
pub struct Network {
    assets: Vec<AssetVariant>,
    nodes: Vec<Node>,
    asset_slots: HashMap<AssetId, usize>,
    node_slots: HashMap<NodeId, usize>,
    total_unknowns: Option<usize>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an asset of the given kind. A random id is generated when
    /// no name is supplied; a name collision is a structural error.
    pub fn add_asset(&mut self, kind: AssetKind, name: Option<AssetId>) -> NetworkResult<AssetId> {
        let id = name.unwrap_or_else(EntityId::new_random);
        if self.asset_slots.contains_key(&id) {
            return Err(NetworkError::DuplicateEntity { id });
        }
        self.asset_slots.insert(id, self.assets.len());
        self.assets.push(AssetVariant::construct(kind, id));
        self.total_unknowns = None;
        Ok(id)
    }

    /// Create an asset from its registry tag (the string names an
    /// importing layer works with). Unregistered tags are rejected.
    pub fn add_asset_by_tag(&mut self, kind: &str, name: Option<AssetId>) -> NetworkResult<AssetId> {
        self.add_asset(kind.parse()?, name)
    }

    /// Add a pre-built asset; its id must not collide with an existing one.
    pub fn add_existing_asset(&mut self, asset: AssetVariant) -> NetworkResult<AssetId> {
        let id = asset.id();
        if self.asset_slots.contains_key(&id) {
            return Err(NetworkError::DuplicateEntity { id });
        }
        self.asset_slots.insert(id, self.assets.len());
        self.assets.push(asset);
        self.total_unknowns = None;
        Ok(id)
    }

    pub fn exists_asset(&self, id: AssetId) -> bool {
        self.asset_slots.contains_key(&id)
    }

    pub fn exists_node(&self, id: NodeId) -> bool {
        self.node_slots.contains_key(&id)
    }

    fn asset_slot(&self, id: AssetId) -> NetworkResult<usize> {
        self.asset_slots
            .get(&id)
            .copied()
            .ok_or(NetworkError::MissingEntity { id })
    }

    fn node_slot(&self, id: NodeId) -> NetworkResult<usize> {
        self.node_slots
            .get(&id)
            .copied()
            .ok_or(NetworkError::MissingEntity { id })
    }

    pub fn asset(&self, id: AssetId) -> NetworkResult<&AssetVariant> {
        Ok(&self.assets[self.asset_slot(id)?])
    }

    pub fn asset_mut(&mut self, id: AssetId) -> NetworkResult<&mut AssetVariant> {
        let slot = self.asset_slot(id)?;
        Ok(&mut self.assets[slot])
    }

    pub fn node(&self, id: NodeId) -> NetworkResult<&Node> {
        Ok(&self.nodes[self.node_slot(id)?])
    }

    pub fn node_mut(&mut self, id: NodeId) -> NetworkResult<&mut Node> {
        let slot = self.node_slot(id)?;
        Ok(&mut self.nodes[slot])
    }

    /// Assets in insertion order.
    pub fn assets(&self) -> impl Iterator<Item = &AssetVariant> {
        self.assets.iter()
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Join two asset connection points at a node.
    ///
    /// Creates a fresh node when neither point is bound, reuses the
    /// bound side's node when exactly one is, and rejects the call when
    /// both already are — merging existing nodes is unsupported.
    pub fn connect(
        &mut self,
        asset_a: AssetId,
        point_a: usize,
        asset_b: AssetId,
        point_b: usize,
    ) -> NetworkResult<NodeId> {
        let slot_a = self.asset_slot(asset_a)?;
        let slot_b = self.asset_slot(asset_b)?;
        let bound_a = {
            let core = self.assets[slot_a].core();
            core.check_point(point_a)?;
            core.connected_node(point_a)
        };
        let bound_b = {
            let core = self.assets[slot_b].core();
            core.check_point(point_b)?;
            core.connected_node(point_b)
        };

        match (bound_a, bound_b) {
            (None, None) => {
                let node_id = EntityId::new_random();
                let mut node = Node::new(node_id);
                node.connect_asset(asset_a, point_a);
                node.connect_asset(asset_b, point_b);
                self.assets[slot_a].core_mut().connect_node(point_a, node_id)?;
                self.assets[slot_b].core_mut().connect_node(point_b, node_id)?;
                self.node_slots.insert(node_id, self.nodes.len());
                self.nodes.push(node);
                self.total_unknowns = None;
                Ok(node_id)
            }
            (Some(node_id), None) => {
                self.assets[slot_b].core_mut().connect_node(point_b, node_id)?;
                let node_slot = self.node_slot(node_id)?;
                self.nodes[node_slot].connect_asset(asset_b, point_b);
                Ok(node_id)
            }
            (None, Some(node_id)) => {
                self.assets[slot_a].core_mut().connect_node(point_a, node_id)?;
                let node_slot = self.node_slot(node_id)?;
                self.nodes[node_slot].connect_asset(asset_a, point_a);
                Ok(node_id)
            }
            (Some(_), Some(_)) => Err(NetworkError::AlreadyConnected {
                a: asset_a,
                b: asset_b,
            }),
        }
    }

    /// True iff every asset connection point is bound to a node and
    /// every node has at least one bound asset.
    pub fn check_connectivity(&self) -> bool {
        self.assets.iter().all(|a| a.core().is_all_connected())
            && self.nodes.iter().all(|n| n.is_connected())
    }

    /// Assign non-overlapping contiguous unknown ranges: assets in
    /// insertion order, then nodes in creation order. Returns the total
    /// number of unknowns.
    pub fn assign_indices(&mut self) -> usize {
        let mut index = 0;
        for asset in &mut self.assets {
            let core = asset.core_mut();
            core.set_matrix_index(index);
            index += core.number_of_unknowns;
        }
        for node in &mut self.nodes {
            node.matrix_index = index;
            index += node.number_of_unknowns;
        }
        self.total_unknowns = Some(index);
        index
    }

    pub fn total_unknowns(&self) -> Option<usize> {
        self.total_unknowns
    }

    /// Concatenate every entity's `prev_sol` into one global vector.
    pub fn gather_solution(&self) -> NetworkResult<Vec<f64>> {
        let total = self.total_unknowns.ok_or(NetworkError::IndicesNotAssigned)?;
        let mut x = vec![0.0; total];
        for asset in &self.assets {
            let core = asset.core();
            x[core.matrix_index..core.matrix_index + core.number_of_unknowns]
                .copy_from_slice(&core.prev_sol);
        }
        for node in &self.nodes {
            x[node.matrix_index..node.matrix_index + node.number_of_unknowns]
                .copy_from_slice(&node.prev_sol);
        }
        Ok(x)
    }

    /// Copy each entity's slice of a solved global vector into its
    /// `prev_sol`. The length is checked up front so a mismatch writes
    /// nothing.
    pub fn scatter_solution(&mut self, x: &[f64]) -> NetworkResult<()> {
        let total = self.total_unknowns.ok_or(NetworkError::IndicesNotAssigned)?;
        if x.len() != total {
            return Err(NetworkError::SolutionSizeMismatch {
                expected: total,
                got: x.len(),
            });
        }
        for asset in &mut self.assets {
            let core = asset.core_mut();
            core.prev_sol
                .copy_from_slice(&x[core.matrix_index..core.matrix_index + core.number_of_unknowns]);
        }
        for node in &mut self.nodes {
            node.prev_sol
                .copy_from_slice(&x[node.matrix_index..node.matrix_index + node.number_of_unknowns]);
        }
        Ok(())
    }

    /// Per-iteration refresh of closure state (pipe friction and heat
    /// transport) from the previous iterate.
    pub fn prepare_iteration(&mut self) {
        for asset in &mut self.assets {
            asset.prepare();
        }
    }

    /// Collect every entity's rows: assets first, then nodes, each in
    /// insertion order. With indices assigned, the row count equals the
    /// unknown count.
    pub fn equations(&self) -> NetworkResult<Vec<EquationRow>> {
        let mut rows = Vec::new();
        for asset in &self.assets {
            rows.extend(asset.equations(self)?);
        }
        for node in &self.nodes {
            rows.extend(node.equations(self)?);
        }
        Ok(rows)
    }

    pub(crate) fn connected_node_ref(
        &self,
        core: &AssetCore,
        point: usize,
    ) -> NetworkResult<&Node> {
        let node_id = core
            .connected_node(point)
            .ok_or(NetworkError::PointNotConnected {
                id: core.id,
                point,
            })?;
        self.node(node_id)
    }
}
