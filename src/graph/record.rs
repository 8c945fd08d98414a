use crate::graph::{EdgeKey, Topology, TopologyEdge, TopologyGraph, TopologyNode};

use geo::{LineString, Point};
use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: usize,
    pub position: Point,
    pub turn: bool,
    pub terminal: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub key: EdgeKey,
    pub geometry: LineString,
    pub length: f64,
    pub terminal: bool,
}

/// The plain-data form of a [`Topology`], for exchange with
/// other tools. Node identifiers match the [`EdgeKey`]s.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyRecords {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl Topology {
    pub fn records(&self) -> TopologyRecords {
        let nodes = self
            .nodes()
            .map(|(id, node)| NodeRecord {
                id,
                position: node.position,
                turn: node.turn,
                terminal: node.terminal,
            })
            .collect();

        let edges = self
            .edges()
            .map(|edge| EdgeRecord {
                key: edge.key,
                geometry: edge.geometry.clone(),
                length: edge.length,
                terminal: edge.terminal,
            })
            .collect();

        TopologyRecords { nodes, edges }
    }
}

impl From<TopologyRecords> for Topology {
    /// Rebuilds a topology from its records.
    ///
    /// Nodes are renumbered densely in order of their identifiers, and
    /// edge keys are rewritten to match. Edges naming an unknown node are
    /// dropped.
    fn from(records: TopologyRecords) -> Self {
        let mut nodes = records.nodes;
        nodes.sort_by_key(|node| node.id);

        let mut graph = TopologyGraph::with_capacity(nodes.len(), records.edges.len());
        let renumbered = nodes
            .into_iter()
            .map(|record| {
                let index = graph.add_node(TopologyNode {
                    position: record.position,
                    turn: record.turn,
                    terminal: record.terminal,
                });

                (record.id, index)
            })
            .collect::<FxHashMap<_, _>>();

        for record in records.edges {
            let endpoints = (
                renumbered.get(&record.key.source),
                renumbered.get(&record.key.target),
            );

            let (Some(source), Some(target)) = endpoints else {
                warn!("Dropping edge {} with an unknown endpoint", record.key);
                continue;
            };

            let key = EdgeKey::new(source.index(), target.index(), record.key.key);
            graph.add_edge(
                *source,
                *target,
                TopologyEdge {
                    key,
                    geometry: record.geometry,
                    length: record.length,
                    terminal: record.terminal,
                },
            );
        }

        Topology::new(graph)
    }
}
