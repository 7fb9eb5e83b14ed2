use crate::types::LatticePoint;
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Smallest extension a segment is given, so its transform never
/// collapses to a zero scale.
pub const MIN_EXTENSION: f32 = 1e-3;

/// Which endpoint a partially extended segment stays attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Grows out of `start` toward `end`.
    #[default]
    Start,
    /// Collapses toward `end`, away from `start`.
    End,
}

/// One unit step of a walk, rendered as a bar that can be partially
/// extended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: LatticePoint,
    pub end: LatticePoint,
    /// Visible fraction of the step, in `[MIN_EXTENSION, 1]`.
    pub extension: f32,
    pub anchor: Anchor,
}

/// Rigid placement of the canonical primitive, a unit-length bar centred
/// at the origin and lying along +X.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl SegmentTransform {
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// World-space end points of the visible bar.
    pub fn endpoints(&self) -> (Vec3, Vec3) {
        let half = self.rotation * Vec3::new(self.scale.x * 0.5, 0.0, 0.0);
        (self.translation - half, self.translation + half)
    }
}

impl Segment {
    /// A collapsed segment, ready to grow from `start`.
    pub fn collapsed(start: LatticePoint, end: LatticePoint) -> Self {
        Self {
            start,
            end,
            extension: MIN_EXTENSION,
            anchor: Anchor::Start,
        }
    }

    /// A fully extended segment.
    pub fn extended(start: LatticePoint, end: LatticePoint) -> Self {
        Self {
            extension: 1.0,
            ..Self::collapsed(start, end)
        }
    }

    /// Sets the extension, clamped to `[MIN_EXTENSION, 1]`.
    #[inline]
    pub fn set_extension(&mut self, extension: f32) {
        self.extension = extension.clamp(MIN_EXTENSION, 1.0);
    }

    /// Rewrites the segment in place with new endpoints.
    ///
    /// The extension is kept, so a segment that was just shrunk stays
    /// collapsed and is ready to grow from its new `start`.
    pub fn rewrite(&mut self, start: LatticePoint, end: LatticePoint) {
        self.start = start;
        self.end = end;
        self.anchor = Anchor::Start;
    }

    /// Unit direction from `start` to `end`.
    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).as_vec3().normalize_or_zero()
    }

    /// Derives the transform from the current fields.
    ///
    /// Nothing is cached: calling this twice on an unchanged segment
    /// yields identical results.
    pub fn transform(&self) -> SegmentTransform {
        let dir = self.direction();

        // The bar is symmetric, so ±X needs no rotation.
        let axis = Vec3::X.cross(dir);
        let rotation = if axis.length_squared() > 0.0 {
            Quat::from_axis_angle(axis.normalize(), FRAC_PI_2)
        } else {
            Quat::IDENTITY
        };

        let half = dir * (self.extension * 0.5);
        let translation = match self.anchor {
            Anchor::Start => self.start.as_vec3() + half,
            Anchor::End => self.end.as_vec3() - half,
        };

        SegmentTransform {
            translation,
            rotation,
            scale: Vec3::new(self.extension, 1.0, 1.0),
        }
    }
}
