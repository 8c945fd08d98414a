use crate::transition::candidate::{Candidate, Label};
use crate::transition::layer::Sample;

use std::fmt::{Debug, Formatter};
use std::ops::Range;

/// The layered graph of candidates searched by the solver.
///
/// Each layer holds the candidates of one sample, and every candidate of
/// a layer is joined to every candidate of the next. The first and last
/// layers are bound to a single source and target.
///
/// ```text
///                   Layer     Layer
///                     0         N
///
///               __/---+   ...   +---\__
///              /                       \
///   SOURCE    +-------+   ...   +-------+  TARGET
///              \                       /
///               ‾‾\---+   ...   +---/‾‾
/// ```
///
/// The joins are implicit, given by [`CandidateGraph::successors`].
pub struct CandidateGraph {
    candidates: Vec<Candidate>,
    layers: Vec<Range<usize>>,
    samples: Vec<Sample>,
}

impl Debug for CandidateGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CandidateGraph {{ layers: {}, candidates: {} }}",
            self.layers.len(),
            self.candidates.len()
        )
    }
}

impl CandidateGraph {
    /// Lays out the candidates of each sample, in order.
    ///
    /// The layer of each candidate is assigned from its position in `layers`.
    pub fn new(layers: Vec<(Sample, Vec<Candidate>)>) -> Self {
        let mut candidates = Vec::new();
        let mut ranges = Vec::with_capacity(layers.len());
        let mut samples = Vec::with_capacity(layers.len());

        for (layer, (sample, entries)) in layers.into_iter().enumerate() {
            let start = candidates.len();
            candidates.extend(entries.into_iter().map(|candidate| Candidate { layer, ..candidate }));

            ranges.push(start..candidates.len());
            samples.push(sample);
        }

        CandidateGraph {
            candidates,
            layers: ranges,
            samples,
        }
    }

    #[inline]
    pub fn candidate(&self, label: Label) -> Option<&Candidate> {
        match label {
            Label::Candidate(index) => self.candidates.get(index),
            Label::Source | Label::Target => None,
        }
    }

    /// The sample a candidate was generated for.
    #[inline]
    pub fn sample(&self, layer: usize) -> Option<&Sample> {
        self.samples.get(layer)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn layer(&self, layer: usize) -> &[Candidate] {
        self.layers
            .get(layer)
            .map_or(&[], |range| &self.candidates[range.clone()])
    }

    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// The labels reachable in one step from `label`.
    pub fn successors(&self, label: Label) -> impl Iterator<Item = Label> + use<> {
        let next = match label {
            Label::Source => Some(0),
            Label::Candidate(index) => self.candidates.get(index).map(|c| c.layer + 1),
            Label::Target => None,
        };

        let (range, target) = match next {
            Some(layer) if layer < self.layers.len() => (self.layers[layer].clone(), None),
            Some(_) => (0..0, Some(Label::Target)),
            None => (0..0, None),
        };

        range.map(Label::Candidate).chain(target)
    }
}
