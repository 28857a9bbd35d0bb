use glam::DVec3;

use crate::segment::{segment_name, SegmentSet, SEGMENT_COUNT};

/// C(6, 2) signatures per constellation.
pub const PAIR_COUNT: usize = 15;

/// Segment index pairs `(i, j)` with `i < j`, in enumeration order.
pub const PAIR_INDICES: [(usize, usize); PAIR_COUNT] = pair_indices();

const fn pair_indices() -> [(usize, usize); PAIR_COUNT] {
    let mut out = [(0, 0); PAIR_COUNT];
    let mut k = 0;
    let mut i = 0;
    while i < SEGMENT_COUNT {
        let mut j = i + 1;
        while j < SEGMENT_COUNT {
            out[k] = (i, j);
            k += 1;
            j += 1;
        }
        i += 1;
    }
    out
}

/// Joint descriptor of two segments: both lengths and the angle between
/// their direction vectors.
///
/// The angle is taken between the raw segment vectors, which need not share
/// an endpoint, so it is a free-vector angle in `[0, pi]` rather than an
/// angle subtended at a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairSignature {
    /// Index of the first segment in enumeration order.
    pub first: usize,
    /// Index of the second segment in enumeration order.
    pub second: usize,
    pub length_a: f64,
    pub length_b: f64,
    pub angle: f64,
}

impl PairSignature {
    /// Name built from the structural index pair, e.g. `AB-AC`.
    pub fn name(&self) -> String {
        format!("{}-{}", segment_name(self.first), segment_name(self.second))
    }
}

/// Angle between two free vectors. The cosine is clamped so rounding noise
/// on (anti)parallel vectors cannot produce NaN; a zero vector yields NaN.
pub fn free_vector_angle(a: DVec3, b: DVec3) -> f64 {
    let denominator = a.length() * b.length();
    if denominator == 0.0 {
        return f64::NAN;
    }
    (a.dot(b) / denominator).clamp(-1.0, 1.0).acos()
}

/// All fifteen signatures of a constellation in [`PAIR_INDICES`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSet {
    pairs: [PairSignature; PAIR_COUNT],
}

impl PairSet {
    pub fn compute(segments: &SegmentSet) -> Self {
        let pairs = PAIR_INDICES.map(|(first, second)| {
            let a = segments.get(first);
            let b = segments.get(second);
            PairSignature {
                first,
                second,
                length_a: a.length,
                length_b: b.length,
                angle: free_vector_angle(a.direction, b.direction),
            }
        });
        Self { pairs }
    }

    #[inline]
    pub fn get(&self, index: usize) -> &PairSignature {
        &self.pairs[index]
    }

    pub fn as_slice(&self) -> &[PairSignature] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PairSignature> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        PAIR_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
