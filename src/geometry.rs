//! Lattice positions and cube rotations.
//!
//! A cube has 24 possible orientations in 3D space (the rotation group of a cube).
//! These are the 6 ways to choose which face points up, times 4 rotations around
//! the vertical axis.

use std::fmt;

use crate::error::FoldError;

/// One of the three lattice axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Axis {
    #[display("x")]
    X,
    #[display("y")]
    Y,
    #[display("z")]
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the 0-based index of this axis.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// A unit cube position on the integer lattice.
///
/// Positions are values: moving one produces a new position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate along `axis`.
    #[inline]
    pub const fn coord(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Returns the coordinates as an array indexed by [`Axis::index`].
    #[inline]
    pub const fn coords(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns a new position shifted by `delta` along `axis`.
    #[inline]
    #[must_use]
    pub const fn offset(self, axis: Axis, delta: i32) -> Self {
        match axis {
            Axis::X => Self::new(self.x + delta, self.y, self.z),
            Axis::Y => Self::new(self.x, self.y + delta, self.z),
            Axis::Z => Self::new(self.x, self.y, self.z + delta),
        }
    }

    /// Per-axis displacement from `self` to `other`.
    pub const fn vector_to(self, other: Self) -> [i32; 3] {
        [other.x - self.x, other.y - self.y, other.z - self.z]
    }

    pub fn manhattan_distance_to(self, other: Self) -> i32 {
        self.vector_to(other).iter().map(|d| d.abs()).sum()
    }

    /// Gives the axis and sign (+1 or -1) of the unit step from `self` to `other`.
    ///
    /// Fails with [`FoldError::InvalidAdjacency`] unless the two positions are
    /// exactly one unit apart.
    pub fn unit_direction_to(self, other: Self) -> Result<(Axis, i32), FoldError> {
        let invalid = FoldError::InvalidAdjacency {
            from: self,
            to: other,
        };
        if self.manhattan_distance_to(other) != 1 {
            return Err(invalid);
        }
        let vector = self.vector_to(other);
        Axis::ALL
            .into_iter()
            .find(|axis| vector[axis.index()] != 0)
            .map(|axis| (axis, vector[axis.index()]))
            .ok_or(invalid)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// All 24 rotation functions for a cube.
///
/// Organized as 6 face-up choices x 4 rotations around vertical:
/// - Rotations 0-3: +Z face up
/// - Rotations 4-7: +Y face up
/// - Rotations 8-11: -Z face up
/// - Rotations 12-15: -Y face up
/// - Rotations 16-19: +X face up
/// - Rotations 20-23: -X face up
pub const ROTATIONS: [fn(Position) -> Position; 24] = [
    // +Z face up (identity orientation), rotate around Z axis
    |p| Position::new(p.x, p.y, p.z), // 0 degrees
    |p| Position::new(-p.y, p.x, p.z), // 90 degrees
    |p| Position::new(-p.x, -p.y, p.z), // 180 degrees
    |p| Position::new(p.y, -p.x, p.z), // 270 degrees
    // +Y face up, rotate around Y axis
    |p| Position::new(p.x, -p.z, p.y),
    |p| Position::new(p.z, p.x, p.y),
    |p| Position::new(-p.x, p.z, p.y),
    |p| Position::new(-p.z, -p.x, p.y),
    // -Z face up, rotate around Z axis
    |p| Position::new(p.x, -p.y, -p.z),
    |p| Position::new(p.y, p.x, -p.z),
    |p| Position::new(-p.x, p.y, -p.z),
    |p| Position::new(-p.y, -p.x, -p.z),
    // -Y face up, rotate around Y axis
    |p| Position::new(p.x, p.z, -p.y),
    |p| Position::new(-p.z, p.x, -p.y),
    |p| Position::new(-p.x, -p.z, -p.y),
    |p| Position::new(p.z, -p.x, -p.y),
    // +X face up, rotate around X axis
    |p| Position::new(p.z, p.y, -p.x),
    |p| Position::new(-p.y, p.z, -p.x),
    |p| Position::new(-p.z, -p.y, -p.x),
    |p| Position::new(p.y, -p.z, -p.x),
    // -X face up, rotate around X axis
    |p| Position::new(-p.z, p.y, p.x),
    |p| Position::new(-p.y, -p.z, p.x),
    |p| Position::new(p.z, -p.y, p.x),
    |p| Position::new(p.y, p.z, p.x),
];

/// Mirrors a position through the yz plane.
#[inline]
pub const fn reflect_x(p: Position) -> Position {
    Position::new(-p.x, p.y, p.z)
}
