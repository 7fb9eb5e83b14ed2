use crate::segment::{Segment, SegmentTransform};
use crate::types::{LatticePoint, SegmentId};

/// Fixed-capacity trail of segments belonging to one walker.
///
/// The buffer has two phases:
///
/// - **Growth**: while `segments.len() < capacity`, new segments are
///   appended at the tail.
/// - **Recycling**: once full, the buffer is a ring. `cursor` names the
///   oldest slot; it is rewritten as the newest segment and the cursor
///   moves on by one.
///
/// Storage never grows past `capacity`, and slots are reused rather than
/// freed.
#[derive(Debug, Clone)]
pub struct SegmentBuffer {
    segments: Vec<Segment>,
    capacity: usize,
    cursor: SegmentId,
}

impl SegmentBuffer {
    /// Creates a buffer holding a single fully extended segment.
    ///
    /// ### Parameters
    /// - `start`, `end` - Endpoints of the first segment.
    /// - `capacity` - Maximum number of segments; must be at least 1.
    pub fn new(start: LatticePoint, end: LatticePoint, capacity: usize) -> Self {
        debug_assert!(capacity >= 1);
        Self {
            segments: vec![Segment::extended(start, end)],
            capacity,
            cursor: 0,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.segments.len() >= self.capacity
    }

    /// Index of the oldest slot, due for reuse next.
    ///
    /// Only meaningful once the buffer is full; it stays `0` during growth.
    pub fn cursor(&self) -> SegmentId {
        self.cursor
    }

    /// The most recently extended segment.
    ///
    /// During growth this is the last element; once full it is the slot
    /// just behind the cursor.
    pub fn head_index(&self) -> SegmentId {
        if self.is_full() {
            (self.cursor + self.capacity - 1) % self.capacity
        } else {
            self.segments.len() - 1
        }
    }

    /// Point the next segment will start from.
    pub fn head_point(&self) -> LatticePoint {
        self.segments[self.head_index()].end
    }

    /// Iterator over the end points of every segment currently stored.
    pub fn ends(&self) -> impl Iterator<Item = LatticePoint> + Clone + '_ {
        self.segments.iter().map(|s| s.end)
    }

    /// Segments in walk order, oldest first.
    ///
    /// During growth this is storage order; once full it starts at the
    /// cursor and wraps around.
    pub fn chain(&self) -> impl Iterator<Item = &Segment> + '_ {
        let split = if self.is_full() { self.cursor } else { 0 };
        let (older, newer) = self.segments.split_at(split);
        newer.iter().chain(older.iter())
    }

    /// Current transforms of all segments in storage order.
    pub fn transforms(&self) -> impl Iterator<Item = SegmentTransform> + '_ {
        self.segments.iter().map(Segment::transform)
    }

    #[inline]
    pub fn get_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id]
    }

    /// Appends a collapsed segment from the head to `end`.
    ///
    /// ### Returns
    /// The index of the new segment.
    ///
    /// ### Panics
    /// Panics if the buffer is already full.
    pub fn append(&mut self, end: LatticePoint) -> SegmentId {
        assert!(!self.is_full(), "append on a full segment buffer");
        let start = self.head_point();
        self.segments.push(Segment::collapsed(start, end));
        self.segments.len() - 1
    }

    /// Rewrites the slot at the cursor to run from the head to `end`, then
    /// advances the cursor.
    ///
    /// The rewritten segment keeps its current extension.
    ///
    /// ### Returns
    /// The index of the rewritten slot.
    ///
    /// ### Panics
    /// Panics if the buffer is not full yet.
    pub fn recycle(&mut self, end: LatticePoint) -> SegmentId {
        assert!(self.is_full(), "recycle on a growing segment buffer");
        let start = self.head_point();
        let slot = self.cursor;
        self.segments[slot].rewrite(start, end);
        self.cursor = (self.cursor + 1) % self.capacity;
        slot
    }
}
