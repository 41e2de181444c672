//! Candidate cache: the sorted list of upcoming intersections for one
//! object class in the current volume.

use kirana_geom::Scalar;

use crate::intersection::Intersection;

/// The object class a cache serves. The same machinery handles sensitive
/// surfaces and portals; the discriminant decides which status the
/// navigator derives from the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectClass {
    /// Sensitive surfaces: crossings are recorded, the volume stays.
    Sensitive,
    /// Portals: crossings switch the volume.
    Portal,
}

/// Sorted candidate list plus a cursor, scoped to one object class in the
/// current volume.
///
/// Invariants: every record is `Inside`; records are sorted by ascending
/// path length (ties by surface id); the cursor never moves backwards
/// within one sorting; the cache is cleared on every volume switch.
#[derive(Clone, Debug)]
pub struct CandidateCache {
    /// Which object class this cache serves
    pub class: ObjectClass,
    /// Sorted intersection records
    pub candidates: Vec<Intersection>,
    /// Cursor: position of the next candidate to target
    pub next: usize,
}

impl CandidateCache {
    /// Create an empty cache for one object class.
    pub fn new(class: ObjectClass) -> Self {
        Self {
            class,
            candidates: Vec::new(),
            next: 0,
        }
    }

    /// True if the cache holds no candidates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// True if the cursor has run past the last candidate.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.next >= self.candidates.len()
    }

    /// The candidate under the cursor, if any.
    #[inline]
    pub fn current(&self) -> Option<&Intersection> {
        self.candidates.get(self.next)
    }

    /// Advance the cursor by one.
    #[inline]
    pub fn advance(&mut self) {
        self.next += 1;
    }

    /// Drop all candidates and reset the cursor.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.next = 0;
    }

    /// Sort the candidates and place the cursor on the first record whose
    /// path has not gone negative. Returns false when no live candidate
    /// remains.
    pub fn sort_and_reset(&mut self) -> bool {
        self.candidates.sort_by(Intersection::order);
        self.next = self
            .candidates
            .iter()
            .position(|c| c.path >= 0.0)
            .unwrap_or(self.candidates.len());
        !self.is_exhausted()
    }

    /// Path length of the candidate under the cursor.
    #[inline]
    pub fn current_path(&self) -> Option<Scalar> {
        self.current().map(|c| c.path)
    }
}
