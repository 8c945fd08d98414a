use crate::graph::{EdgeKey, Topology};

use log::{trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};

/// A route between two nodes, as seen from the node it was looked up from.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    pub length: f64,
    pub edges: Vec<EdgeKey>,
}

impl Sequence {
    /// The number of edges crossed by the route.
    #[inline]
    pub fn hops(&self) -> usize {
        self.edges.len()
    }
}

#[derive(Debug)]
struct Entry {
    /// The node the stored edges depart from.
    from: usize,
    length: f64,
    edges: Vec<EdgeKey>,
}

#[inline]
fn unordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Memoizes the shortest routes between pairs of nodes.
///
/// A route is stored once per unordered pair of nodes. Looking it up
/// from the opposite end yields the stored edges reversed, each replaced
/// by its twin, which is valid as every edge exists in both directions.
///
/// Entries are only ever appended. Pairs for which no route exists are
/// remembered so that routing between them is not repeated.
#[derive(Debug, Default)]
pub struct SequenceCache {
    map: FxHashMap<(usize, usize), Entry>,
    unreachable: FxHashSet<(usize, usize)>,
}

impl SequenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the route running from `from` to `to`.
    ///
    /// A pair which already holds a route keeps it.
    pub fn add(&mut self, from: usize, to: usize, length: f64, edges: Vec<EdgeKey>) {
        self.map
            .entry(unordered(from, to))
            .or_insert(Entry {
                from,
                length,
                edges,
            });
    }

    /// The stored route from `from` to `to`, if one has been stored in
    /// either direction.
    pub fn lookup(&self, from: usize, to: usize) -> Option<Sequence> {
        let entry = self.map.get(&unordered(from, to))?;

        if entry.from == from {
            return Some(Sequence {
                length: entry.length,
                edges: entry.edges.clone(),
            });
        }

        Some(Sequence {
            length: entry.length,
            edges: entry.edges.iter().rev().map(EdgeKey::reverse).collect(),
        })
    }

    pub fn mark_unreachable(&mut self, from: usize, to: usize) {
        self.unreachable.insert(unordered(from, to));
    }

    #[inline]
    pub fn is_unreachable(&self, from: usize, to: usize) -> bool {
        self.unreachable.contains(&unordered(from, to))
    }

    /// The route from `from` to `to`, routing across the topology upon a miss.
    ///
    /// Returns `None` when no route exists.
    pub fn query(&mut self, topology: &Topology, from: usize, to: usize) -> Option<Sequence> {
        if let Some(sequence) = self.lookup(from, to) {
            return Some(sequence);
        }

        if self.is_unreachable(from, to) {
            return None;
        }

        match topology.route(from, to) {
            Some((length, edges)) => {
                trace!("Cached route {from} -> {to} of length {length:.1}");
                let sequence = Sequence {
                    length,
                    edges: edges.clone(),
                };

                self.add(from, to, length, edges);
                Some(sequence)
            }
            None => {
                warn!("No route between nodes {from} and {to}");
                self.mark_unreachable(from, to);
                None
            }
        }
    }

    /// The number of stored routes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
