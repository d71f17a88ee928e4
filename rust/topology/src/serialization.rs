// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for the skeleton graph.
//!
//! SlotMap keys are mapped to sequential integer IDs for the wire format, the
//! same approach the rest of the arena-based storage in this crate uses
//! internally — it keeps the format portable and independent of the arena's
//! generational key internals.

use serde::{Deserialize, Serialize};

use rustc_hash::FxHashMap;

use crate::arena::GraphArena;
use crate::error::{Error, Result};

/// Serializable representation of a built skeleton graph.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: usize,
    pub members: Vec<usize>,
    pub edges: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub id: usize,
    pub voxels: Vec<usize>,
    pub length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<usize>,
}

impl GraphArena {
    /// Serializes the graph to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn to_snapshot(&self) -> GraphSnapshot {
        let mut node_ids = FxHashMap::default();
        let mut edge_ids = FxHashMap::default();

        let nodes: Vec<NodeSnapshot> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, (k, n))| {
                node_ids.insert(k, i);
                (i, n)
            })
            .map(|(i, n)| NodeSnapshot {
                id: i,
                members: n.members.clone(),
                edges: Vec::new(), // filled below once edge_ids is complete
            })
            .collect();

        let edges: Vec<EdgeSnapshot> = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, (k, e))| {
                edge_ids.insert(k, i);
                EdgeSnapshot {
                    id: i,
                    voxels: e.voxels.iter().copied().collect(),
                    length: e.length,
                    first: e.first.map(|nk| node_ids[&nk]),
                    second: e.second.map(|nk| node_ids[&nk]),
                }
            })
            .collect();

        let mut nodes = nodes;
        for (k, n) in self.nodes.iter() {
            let id = node_ids[&k];
            nodes[id].edges = n.edges.iter().map(|ek| edge_ids[ek]).collect();
        }

        GraphSnapshot { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_empty_graph_serializes_to_empty_lists() {
        let arena = GraphArena::new();
        let json = arena.to_json().unwrap();
        let snapshot: GraphSnapshot = serde_json::from_str(&json).unwrap();
        assert!(snapshot.nodes.is_empty());
        assert!(snapshot.edges.is_empty());
    }

    #[test]
    fn snapshot_carries_length_and_endpoints() {
        let mut arena = GraphArena::new();
        let a = arena.new_node();
        let b = arena.new_node();
        let e = arena.new_edge(0);
        arena.edge_mut(e).unwrap().push_back(1, 1.0);
        arena.edge_mut(e).unwrap().first = Some(a);
        arena.edge_mut(e).unwrap().second = Some(b);
        arena.node_mut(a).unwrap().edges.push(e);
        arena.node_mut(b).unwrap().edges.push(e);

        let json = arena.to_json().unwrap();
        let snapshot: GraphSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.edges.len(), 1);
        assert!((snapshot.edges[0].length - 1.0).abs() < 1e-9);
        assert!(snapshot.edges[0].first.is_some());
        assert!(snapshot.edges[0].second.is_some());
    }
}
