use crate::mesh::Mesh;
use crate::spatial::{GeometryKernel, Vector};

use geo::{Coord, LineString, Point, Polygon};
use itertools::Itertools;
use log::{debug, warn};
use pathfinding::undirected::connected_components::connected_components;
use petgraph::graphmap::UnGraphMap;
use petgraph::unionfind::UnionFind;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// The mesh edges two cells have in common.
#[derive(Clone, Debug, Default)]
pub struct Shared {
    pub segments: SmallVec<[[usize; 2]; 2]>,
}

impl Shared {
    /// The length-weighted centre of the shared segments.
    pub fn midpoint(&self, mesh: &Mesh) -> Option<Point> {
        let (mut x, mut y, mut total) = (0.0, 0.0, 0.0);
        for [a, b] in &self.segments {
            let (a, b) = (mesh.vertices[*a], mesh.vertices[*b]);
            let length = Vector::between(a, b).norm();
            x += (a.x + b.x) / 2.0 * length;
            y += (a.y + b.y) / 2.0 * length;
            total += length;
        }

        (total > f64::EPSILON).then(|| Point::new(x / total, y / total))
    }

    fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().flatten().copied()
    }
}

/// Cells keyed by their representative triangle, joined
/// wherever they share a mesh edge.
pub type DualGraph = UnGraphMap<usize, Shared>;

/// A polygon formed from one or more merged triangles.
#[derive(Clone, Debug)]
pub struct Cell {
    pub triangles: Vec<usize>,

    /// The vertices of the outer boundary, counter-clockwise.
    pub ring: Vec<usize>,
    pub polygon: Polygon,

    /// The forced mesh vertices held by the cell's triangles.
    pub forced: SmallVec<[usize; 2]>,
}

/// A grouping of the triangles of a mesh into cells.
///
/// Cells only ever grow: merging two cells unions their triangle sets.
/// The dual graph is derived from the grouping on demand.
pub struct Partition<'a> {
    mesh: &'a Mesh,
    sets: UnionFind<usize>,

    /// Every pair of triangles sharing a mesh edge, and that edge.
    adjacency: Vec<(usize, usize, [usize; 2])>,
}

impl<'a> Partition<'a> {
    /// Groups the triangles which share an interior vertex, so that the
    /// vertices introduced by refinement do not split a cell.
    pub fn new(mesh: &'a Mesh) -> Self {
        let mut sets = UnionFind::new(mesh.triangles.len());

        let mut around = FxHashMap::<usize, usize>::default();
        let mut edges = FxHashMap::<[usize; 2], SmallVec<[usize; 2]>>::default();

        for (triangle, vertices) in mesh.triangles.iter().enumerate() {
            for vertex in vertices.iter().filter(|v| mesh.is_interior(**v)) {
                match around.get(vertex) {
                    Some(first) => {
                        sets.union(*first, triangle);
                    }
                    None => {
                        around.insert(*vertex, triangle);
                    }
                }
            }

            for (a, b) in vertices.iter().circular_tuple_windows() {
                edges.entry(undirected(*a, *b)).or_default().push(triangle);
            }
        }

        let mut adjacency = Vec::with_capacity(edges.len());
        for (edge, triangles) in edges {
            if triangles.len() > 2 {
                warn!(
                    "Edge {edge:?} is shared by {} triangles, joining each pair",
                    triangles.len()
                );
            }

            for (a, b) in triangles.iter().tuple_combinations() {
                adjacency.push((*a, *b, edge));
            }
        }

        Partition {
            mesh,
            sets,
            adjacency,
        }
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        self.mesh
    }

    /// The representative of the cell holding `triangle`.
    #[inline]
    pub fn cell(&self, triangle: usize) -> usize {
        self.sets.find(triangle)
    }

    #[inline]
    pub fn merge(&mut self, a: usize, b: usize) -> bool {
        self.sets.union(a, b)
    }

    pub fn dual(&self) -> DualGraph {
        let mut dual = DualGraph::default();
        for triangle in 0..self.mesh.triangles.len() {
            dual.add_node(self.cell(triangle));
        }

        for (a, b, edge) in &self.adjacency {
            let (a, b) = (self.cell(*a), self.cell(*b));
            if a == b {
                continue;
            }

            match dual.edge_weight_mut(a, b) {
                Some(shared) => shared.segments.push(*edge),
                None => {
                    let mut shared = Shared::default();
                    shared.segments.push(*edge);
                    dual.add_edge(a, b, shared);
                }
            }
        }

        dual
    }

    pub fn cells(&self) -> FxHashMap<usize, Cell> {
        let mut groups = FxHashMap::<usize, Vec<usize>>::default();
        for triangle in 0..self.mesh.triangles.len() {
            groups.entry(self.cell(triangle)).or_default().push(triangle);
        }

        groups
            .into_iter()
            .map(|(id, triangles)| (id, self.assemble(triangles)))
            .collect()
    }

    /// Walks the boundary of the union of `triangles`.
    ///
    /// Directed triangle edges whose reverse is not also present lie on
    /// the boundary. Following them yields one loop per boundary component,
    /// the largest of which is the outer ring.
    fn assemble(&self, triangles: Vec<usize>) -> Cell {
        let directed = triangles
            .iter()
            .flat_map(|triangle| {
                self.mesh.triangles[*triangle]
                    .into_iter()
                    .circular_tuple_windows::<(_, _)>()
            })
            .collect::<FxHashSet<_>>();

        let mut next = FxHashMap::<usize, SmallVec<[usize; 1]>>::default();
        for (a, b) in directed.iter().filter(|(a, b)| !directed.contains(&(*b, *a))) {
            next.entry(*a).or_default().push(*b);
        }

        let mut ring = Vec::new();
        let mut best = f64::NEG_INFINITY;
        while let Some(start) = next.keys().next().copied() {
            let mut walk = vec![start];
            let mut current = start;

            while let Some(following) = next.get_mut(&current).and_then(|targets| targets.pop()) {
                if next.get(&current).is_some_and(|targets| targets.is_empty()) {
                    next.remove(&current);
                }

                if following == start {
                    break;
                }

                walk.push(following);
                current = following;
            }

            let area = signed_area(&self.mesh.vertices, &walk);
            if area > best {
                best = area;
                ring = walk;
            }
        }

        let polygon = Polygon::new(
            ring.iter()
                .chain(ring.first())
                .map(|vertex| self.mesh.vertices[*vertex])
                .collect::<LineString>(),
            vec![],
        );

        let forced = triangles
            .iter()
            .flat_map(|triangle| self.mesh.triangles[*triangle])
            .filter(|vertex| self.mesh.is_forced(*vertex))
            .unique()
            .collect();

        Cell {
            triangles,
            ring,
            polygon,
            forced,
        }
    }

    /// Merges leaf cells holding no forced vertex into their neighbour,
    /// until none remain. These are spurs at the corners of the region,
    /// which no trace ends within.
    pub fn prune(&mut self) -> usize {
        let mut merged = 0;

        loop {
            let dual = self.dual();
            let cells = self.cells();

            let leaves = dual
                .nodes()
                .filter(|cell| dual.neighbors(*cell).count() == 1)
                .filter(|cell| cells.get(cell).is_some_and(|cell| cell.forced.is_empty()))
                .filter_map(|cell| dual.neighbors(cell).next().map(|neighbour| (cell, neighbour)))
                .collect::<Vec<_>>();

            let count = leaves
                .into_iter()
                .filter(|(leaf, neighbour)| self.merge(*leaf, *neighbour))
                .count();

            if count == 0 {
                break;
            }

            merged += count;
        }

        debug!("Pruned {merged} spur cell(s)");
        merged
    }

    /// Merges every cluster of mutually adjacent cells of degree
    /// greater than two into a single cell, so that a junction is
    /// represented by exactly one cell.
    pub fn collapse_hubs(&mut self) -> usize {
        let dual = self.dual();
        let is_hub = |cell: &usize| dual.neighbors(*cell).count() > 2;

        let hubs = dual.nodes().filter(is_hub).collect::<Vec<_>>();
        let clusters = connected_components(&hubs, |cell| {
            dual.neighbors(*cell).filter(is_hub).collect::<Vec<_>>()
        });

        let mut merged = 0;
        for cluster in clusters.into_iter().filter(|cluster| cluster.len() > 1) {
            let mut members = cluster.into_iter();
            if let Some(first) = members.next() {
                merged += members.filter(|member| self.merge(first, *member)).count();
            }
        }

        debug!("Collapsed {merged} hub cell(s)");
        merged
    }

    /// Merges single-triangle cells into a neighbour across which their
    /// circumcircle extends, where either of the two is a junction.
    ///
    /// Such triangles sit between junction cells without belonging to
    /// any corridor, and would otherwise split one junction in two.
    pub fn tidy<K: GeometryKernel>(&mut self, kernel: &K, tolerance: f64) -> usize {
        let dual = self.dual();
        let cells = self.cells();
        let degree = |cell: usize| dual.neighbors(cell).count();

        let mut merges = Vec::new();
        for (id, cell) in cells.iter().filter(|(_, cell)| cell.triangles.len() == 1) {
            let [a, b, c] = self.mesh.triangles[cell.triangles[0]];
            let Some((center, radius)) = circumcircle(
                self.mesh.vertices[a],
                self.mesh.vertices[b],
                self.mesh.vertices[c],
            ) else {
                continue;
            };

            for neighbour in dual.neighbors(*id) {
                if degree(*id) < 3 && degree(neighbour) < 3 {
                    continue;
                }

                let (Some(other), Some(shared)) =
                    (cells.get(&neighbour), dual.edge_weight(*id, neighbour))
                else {
                    continue;
                };

                let inside = kernel.contains(&other.polygon, &center);
                let close = other
                    .ring
                    .iter()
                    .filter(|vertex| !shared.vertices().contains(*vertex))
                    .any(|vertex| {
                        kernel.distance(center, self.mesh.point(*vertex)) < tolerance * radius
                    });

                if inside || close {
                    merges.push((*id, neighbour));
                    break;
                }
            }
        }

        let merged = merges
            .into_iter()
            .filter(|(a, b)| self.merge(*a, *b))
            .count();

        debug!("Tidied {merged} intersection cell(s)");
        merged
    }
}

#[inline]
fn undirected(a: usize, b: usize) -> [usize; 2] {
    if a < b { [a, b] } else { [b, a] }
}

fn signed_area(vertices: &[Coord], ring: &[usize]) -> f64 {
    ring.iter()
        .circular_tuple_windows()
        .map(|(a, b)| {
            let (a, b) = (vertices[*a], vertices[*b]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

/// The circumcenter and circumradius of a triangle, or `None`
/// where its vertices are collinear.
pub fn circumcircle(a: Coord, b: Coord, c: Coord) -> Option<(Point, f64)> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() <= f64::EPSILON {
        return None;
    }

    let (a2, b2, c2) = (
        a.x * a.x + a.y * a.y,
        b.x * b.x + b.y * b.y,
        c.x * c.x + c.y * c.y,
    );

    let x = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let y = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    let radius = Vector::between(a, Coord { x, y }).norm();

    Some((Point::new(x, y), radius))
}
