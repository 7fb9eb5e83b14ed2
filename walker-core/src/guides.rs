//! Faint reference grid for the lattice box.

use glam::Vec3;

/// Returns every axis-parallel line through integer points of the box
/// `[-bound, bound]^3`, spanning the box from face to face.
///
/// Lines are grouped by direction (z, then y, then x) and there are
/// `3 * (2 * bound + 1)^2` of them. A `bound` below 1 yields no lines.
pub fn guide_lines(bound: i32) -> Vec<(Vec3, Vec3)> {
    if bound < 1 {
        return Vec::new();
    }

    let s = bound as f32;
    let side = (2 * bound + 1) as usize;
    let mut lines = Vec::with_capacity(3 * side * side);
    let range = || (-bound..=bound).map(|v| v as f32);

    for a in range() {
        for b in range() {
            lines.push((Vec3::new(a, b, -s), Vec3::new(a, b, s)));
        }
    }
    for a in range() {
        for c in range() {
            lines.push((Vec3::new(a, -s, c), Vec3::new(a, s, c)));
        }
    }
    for b in range() {
        for c in range() {
            lines.push((Vec3::new(-s, b, c), Vec3::new(s, b, c)));
        }
    }
    lines
}
