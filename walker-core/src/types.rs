use glam::IVec3;

/// Integer position in the walk lattice.
///
/// Compared by exact integer equality and never mutated once produced.
pub type LatticePoint = IVec3;

/// Identifier for a walker in a [`crate::pool::WalkerPool`].
///
/// This is an index into the pool's walker list and is stable for the
/// lifetime of the pool.
pub type WalkerId = usize;

/// Identifier for a segment inside a [`crate::buffer::SegmentBuffer`].
///
/// Slots are reused by recycling, so an id names a storage position, not
/// a particular step of the walk.
pub type SegmentId = usize;

/// One of the six unit lattice directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::PosX,
        Axis::NegX,
        Axis::PosY,
        Axis::NegY,
        Axis::PosZ,
        Axis::NegZ,
    ];

    pub fn offset(self) -> LatticePoint {
        match self {
            Axis::PosX => IVec3::X,
            Axis::NegX => IVec3::NEG_X,
            Axis::PosY => IVec3::Y,
            Axis::NegY => IVec3::NEG_Y,
            Axis::PosZ => IVec3::Z,
            Axis::NegZ => IVec3::NEG_Z,
        }
    }

    /// Returns the axis matching a unit offset, or `None` if `v` is not one
    /// of the six unit axis vectors.
    pub fn from_offset(v: LatticePoint) -> Option<Axis> {
        Axis::ALL.into_iter().find(|a| a.offset() == v)
    }
}

/// Returns `true` if `p` lies inside `[-bound, bound]` on every axis.
#[inline]
pub fn in_bounds(p: LatticePoint, bound: i32) -> bool {
    p.abs().max_element() <= bound
}
