use crate::graph::{Topology, TopologyGraph, TopologyNode, connect};
use crate::spatial::{GeometryKernel, SpatialIndex, Vector};
use crate::topology::{Cell, Partition};

use geo::{LineString, Point};
use log::{debug, info, warn};
use measure_time::debug_time;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use rstar::RTree;
use rstar::primitives::GeomWithData;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// An undirected skeleton edge. The geometry runs between the edge's
/// endpoints in the order they were given when it was added.
#[derive(Clone, Debug)]
pub struct SkeletonEdge {
    pub geometry: LineString,
    pub terminal: bool,
}

pub type SkeletonGraph = StableUnGraph<TopologyNode, SkeletonEdge>;

/// The medial graph of the region, running through the middle of every
/// corridor and meeting at junction centroids.
#[derive(Debug, Default)]
pub struct Skeleton {
    pub graph: SkeletonGraph,
}

impl Skeleton {
    /// Extracts the skeleton of the partitioned mesh.
    ///
    /// Every pair of adjacent cells contributes a node at the midpoint of
    /// the boundary they share. A cell with two neighbours joins their two
    /// nodes, while a cell with more contributes a hub at its centroid which
    /// joins all of them. Cells at the end of a corridor join their forced
    /// vertices, the ends of traces, to their single neighbour.
    pub fn extract<K: GeometryKernel>(kernel: &K, partition: &Partition) -> Self {
        debug_time!("extract skeleton");

        let mesh = partition.mesh();
        let dual = partition.dual();
        let cells = partition.cells();

        let mut skeleton = Skeleton::default();
        let mut midpoints = FxHashMap::default();
        for (a, b, shared) in dual.all_edges() {
            if let Some(midpoint) = shared.midpoint(mesh) {
                let node = skeleton.graph.add_node(TopologyNode::new(midpoint));
                midpoints.insert(ordered(a, b), node);
            }
        }

        for (id, cell) in &cells {
            let incident = dual
                .neighbors(*id)
                .filter_map(|neighbour| midpoints.get(&ordered(*id, neighbour)))
                .copied()
                .collect::<SmallVec<[NodeIndex; 4]>>();

            let forced = |skeleton: &mut Skeleton| {
                cell.forced
                    .iter()
                    .map(|vertex| skeleton.add(mesh.point(*vertex)))
                    .collect::<SmallVec<[NodeIndex; 2]>>()
            };

            match incident.as_slice() {
                [] if cell.forced.len() == 2 => {
                    if let [a, b] = forced(&mut skeleton).as_slice() {
                        skeleton.join(*a, *b);
                    }
                }
                [] if cell.forced.len() > 2 => {
                    let ends = forced(&mut skeleton);
                    skeleton.hub(kernel, cell, &ends);
                }
                [] => {}
                [single] => {
                    for end in forced(&mut skeleton) {
                        skeleton.join(*single, end);
                    }
                }
                [a, b] => skeleton.join(*a, *b),
                around => skeleton.hub(kernel, cell, around),
            }
        }

        info!(
            "Extracted skeleton of {} nodes and {} edges from {} cells",
            skeleton.graph.node_count(),
            skeleton.graph.edge_count(),
            cells.len()
        );

        skeleton
    }

    /// Adds a node at the centroid of `cell`, joined to each of `around`.
    fn hub<K: GeometryKernel>(&mut self, kernel: &K, cell: &Cell, around: &[NodeIndex]) {
        let Some(centroid) = kernel
            .centroid(&cell.polygon)
            .or_else(|| cell.polygon.exterior().points().next())
        else {
            return;
        };

        let hub = self.add(centroid);
        for node in around {
            self.join(hub, *node);
        }
    }

    fn add(&mut self, position: Point) -> NodeIndex {
        self.graph.add_node(TopologyNode::new(position))
    }

    /// Joins two nodes by a straight edge.
    fn join(&mut self, a: NodeIndex, b: NodeIndex) {
        if a == b {
            return;
        }

        let geometry = LineString::from(vec![self.graph[a].position.0, self.graph[b].position.0]);
        self.graph.add_edge(
            a,
            b,
            SkeletonEdge {
                geometry,
                terminal: false,
            },
        );
    }

    /// Connects each anchor to its nearest skeleton node by a terminal edge.
    pub fn anchor(&mut self, anchors: &[Point]) {
        if anchors.is_empty() {
            return;
        }

        let tree = RTree::bulk_load(
            self.graph
                .node_indices()
                .map(|node| GeomWithData::new(self.graph[node].position, node))
                .collect::<Vec<_>>(),
        );

        for anchor in anchors {
            let Some(nearest) = tree.nearest(anchor) else {
                warn!("No skeleton node to anchor {anchor:?} to");
                continue;
            };

            let node = self.graph.add_node(TopologyNode {
                position: *anchor,
                turn: false,
                terminal: true,
            });

            let geometry = LineString::from(vec![anchor.0, nearest.geom().0]);
            self.graph.add_edge(
                node,
                nearest.data,
                SkeletonEdge {
                    geometry,
                    terminal: true,
                },
            );
        }

        debug!("Anchored {} terminal node(s)", anchors.len());
    }

    /// Splices out straight nodes and merges nearby junctions, until
    /// neither applies, then marks the nodes left joining two edges at
    /// a sharp angle as turns.
    pub fn simplify<K: GeometryKernel>(&mut self, kernel: &K, turn_threshold: f64, reach: f64) {
        debug_time!("simplify skeleton");

        let bound = turn_threshold.cos();
        let (mut spliced, mut contracted) = (0, 0);

        loop {
            let splices = self.splice(kernel, bound, reach);
            let contractions = self.contract(kernel, reach);

            spliced += splices;
            contracted += contractions;

            if splices + contractions == 0 {
                break;
            }
        }

        let nodes = self.graph.node_indices().collect::<Vec<_>>();
        for node in nodes {
            let bend = self.bend(kernel, node, reach);
            self.graph[node].turn = bend.is_some_and(|(_, _, cosine)| cosine < bound);
        }

        debug!("Spliced {spliced} straight node(s), contracted {contracted} junction edge(s)");
    }

    /// The two edges meeting at `node` and the cosine of the angle
    /// between their directions, measured `reach` away from the node.
    ///
    /// Returns `None` unless the node joins exactly two distinct edges.
    fn bend<K: GeometryKernel>(
        &self,
        kernel: &K,
        node: NodeIndex,
        reach: f64,
    ) -> Option<(EdgeIndex, EdgeIndex, f64)> {
        let [first, second] = self
            .graph
            .edges(node)
            .map(|edge| edge.id())
            .collect::<SmallVec<[EdgeIndex; 2]>>()
            .into_inner()
            .ok()?;

        if first == second {
            return None;
        }

        let position = self.graph.node_weight(node)?.position;
        let incoming = self.oriented(first, node, false)?;
        let outgoing = self.oriented(second, node, true)?;

        let (into, out) = (kernel.length(&incoming), kernel.length(&outgoing));
        let before = kernel.interpolate(&incoming, into - reach.min(into))?;
        let after = kernel.interpolate(&outgoing, reach.min(out))?;

        let arriving = Vector::between(before.0, position.0).unit()?;
        let leaving = Vector::between(position.0, after.0).unit()?;

        Some((first, second, arriving.dot(&leaving)))
    }

    /// The geometry of `edge`, running from `node` if `leaving`,
    /// otherwise running into it.
    fn oriented(&self, edge: EdgeIndex, node: NodeIndex, leaving: bool) -> Option<LineString> {
        let (source, _) = self.graph.edge_endpoints(edge)?;
        let mut geometry = self.graph.edge_weight(edge)?.geometry.clone();

        if (source == node) != leaving {
            geometry.0.reverse();
        }

        Some(geometry)
    }

    fn splice<K: GeometryKernel>(&mut self, kernel: &K, bound: f64, reach: f64) -> usize {
        let mut spliced = 0;
        let nodes = self.graph.node_indices().collect::<Vec<_>>();

        for node in nodes {
            if self.graph.node_weight(node).is_none_or(|node| node.terminal) {
                continue;
            }

            let Some((first, second, cosine)) = self.bend(kernel, node, reach) else {
                continue;
            };

            if cosine < bound || self.graph[first].terminal || self.graph[second].terminal {
                continue;
            }

            let (Some(from), Some(to)) = (
                self.opposite(first, node),
                self.opposite(second, node),
            ) else {
                continue;
            };

            if from == to || from == node || to == node {
                continue;
            }

            let (Some(incoming), Some(outgoing)) = (
                self.oriented(first, node, false),
                self.oriented(second, node, true),
            ) else {
                continue;
            };

            let geometry = incoming
                .into_iter()
                .chain(outgoing.into_iter().skip(1))
                .collect::<LineString>();

            self.graph.remove_node(node);
            self.graph.add_edge(
                from,
                to,
                SkeletonEdge {
                    geometry,
                    terminal: false,
                },
            );

            spliced += 1;
        }

        spliced
    }

    fn opposite(&self, edge: EdgeIndex, node: NodeIndex) -> Option<NodeIndex> {
        let (source, target) = self.graph.edge_endpoints(edge)?;
        Some(if source == node { target } else { source })
    }

    /// Merges the endpoints of edges shorter than `reach` which join two
    /// junctions, placing the merged junction at the middle of the edge.
    ///
    /// A single junction may otherwise be split into two where the cells
    /// about it could not be collapsed into one.
    fn contract<K: GeometryKernel>(&mut self, kernel: &K, reach: f64) -> usize {
        let mut contracted = 0;
        let edges = self.graph.edge_indices().collect::<Vec<_>>();

        for edge in edges {
            let Some((keep, absorb)) = self.graph.edge_endpoints(edge) else {
                continue;
            };

            let junction = |node: NodeIndex| {
                !self.graph[node].terminal && self.graph.edges(node).count() > 2
            };

            if keep == absorb || self.graph[edge].terminal || !junction(keep) || !junction(absorb)
            {
                continue;
            }

            let geometry = &self.graph[edge].geometry;
            let length = kernel.length(geometry);
            if length >= reach {
                continue;
            }

            let Some(middle) = kernel.interpolate(geometry, length / 2.0) else {
                continue;
            };

            self.graph.remove_edge(edge);

            let around = self
                .graph
                .edges(keep)
                .map(|edge| edge.id())
                .collect::<Vec<_>>();

            for edge in around {
                if let Some(mut geometry) = self.oriented(edge, keep, true) {
                    if let Some(first) = geometry.0.first_mut() {
                        *first = middle.0;
                    }

                    self.replace(edge, keep, geometry);
                }
            }

            let absorbed = self
                .graph
                .edges(absorb)
                .map(|edge| (edge.id(), edge.weight().terminal))
                .collect::<Vec<_>>();

            for (edge, terminal) in absorbed {
                let (Some(other), Some(mut geometry)) =
                    (self.opposite(edge, absorb), self.oriented(edge, absorb, true))
                else {
                    continue;
                };

                if other == keep || other == absorb {
                    debug!("Dropping loop formed by contracting {keep:?} and {absorb:?}");
                    continue;
                }

                if let Some(first) = geometry.0.first_mut() {
                    *first = middle.0;
                }

                self.graph
                    .add_edge(keep, other, SkeletonEdge { geometry, terminal });
            }

            self.graph.remove_node(absorb);
            self.graph[keep].position = middle;
            contracted += 1;
        }

        contracted
    }

    /// Replaces the geometry of `edge` by one running from `node`.
    fn replace(&mut self, edge: EdgeIndex, node: NodeIndex, mut geometry: LineString) {
        let Some((source, _)) = self.graph.edge_endpoints(edge) else {
            return;
        };

        if source != node {
            geometry.0.reverse();
        }

        self.graph[edge].geometry = geometry;
    }

    /// Converts the skeleton into a [`Topology`], simplifying each edge
    /// geometry by `tolerance`. Nodes without edges are dropped.
    pub fn into_topology<K: GeometryKernel>(self, kernel: &K, tolerance: f64) -> Topology {
        debug_time!("convert skeleton");

        let mut graph = TopologyGraph::default();
        let mut mapping = FxHashMap::default();

        for node in self.graph.node_indices() {
            if self.graph.edges(node).next().is_some() {
                mapping.insert(node, graph.add_node(self.graph[node]));
            }
        }

        for edge in self.graph.edge_indices() {
            let Some((a, b)) = self.graph.edge_endpoints(edge) else {
                continue;
            };

            let (Some(source), Some(target)) = (mapping.get(&a), mapping.get(&b)) else {
                continue;
            };

            if source == target {
                debug!("Skipping loop at {source:?}");
                continue;
            }

            let weight = &self.graph[edge];
            let geometry = kernel.simplify(&weight.geometry, tolerance);
            let length = kernel.length(&geometry);
            connect(&mut graph, *source, *target, geometry, length, weight.terminal);
        }

        let topology = Topology::new(graph);
        info!(
            "Built topology of {} nodes and {} edges",
            topology.node_count(),
            topology.edge_count() / 2
        );

        topology
    }
}

#[inline]
fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}
