use crate::constellation::Constellation;
use crate::pair::{PairSet, PairSignature};

/// Signatures of one accepted constellation.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusFace {
    name: String,
    pairs: PairSet,
}

impl CorpusFace {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pairs(&self) -> &PairSet {
        &self.pairs
    }
}

/// Append-only collection of every accepted constellation's signatures.
///
/// Seeded from the persisted store, grown only through [`Corpus::commit`].
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    faces: Vec<CorpusFace>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the corpus by re-deriving signatures of stored constellations.
    pub fn from_constellations<'a, I>(constellations: I) -> Self
    where
        I: IntoIterator<Item = &'a Constellation>,
    {
        let mut corpus = Self::new();
        for constellation in constellations {
            corpus.commit(constellation.name(), constellation.pairs());
        }
        corpus
    }

    pub fn commit(&mut self, name: &str, pairs: PairSet) {
        self.faces.push(CorpusFace {
            name: name.to_string(),
            pairs,
        });
    }

    pub fn faces(&self) -> &[CorpusFace] {
        &self.faces
    }

    /// Number of constellations committed.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of signatures held.
    pub fn len(&self) -> usize {
        self.faces.iter().map(|face| face.pairs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &PairSignature> {
        self.faces.iter().flat_map(|face| face.pairs.iter())
    }
}
