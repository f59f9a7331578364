//! Scene-space points and surface layers.
//!
//! `Point` uses `f32` world units on a y-up axis convention.  Distances that
//! drive gameplay (stopping distance, attack range, follow distance) are
//! measured on the ground plane by [`Point::planar_distance`]; the full 3-D
//! distance is kept for callers that need it.

use crate::CoreError;

/// A position in scene space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A point on the ground plane (`y = 0`).
    #[inline]
    pub fn ground(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Euclidean distance in 3-D.
    pub fn distance(self, other: Point) -> f32 {
        let (dx, dy, dz) = (other.x - self.x, other.y - self.y, other.z - self.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance on the x/z ground plane, ignoring height.
    pub fn planar_distance(self, other: Point) -> f32 {
        let (dx, dz) = (other.x - self.x, other.z - self.z);
        (dx * dx + dz * dz).sqrt()
    }

    /// Move from `self` toward `target` by at most `step` units on the ground
    /// plane.  Never overshoots.
    pub fn step_toward(self, target: Point, step: f32) -> Point {
        let d = self.planar_distance(target);
        if d <= step || d <= f32::EPSILON {
            return Point { y: self.y, ..target };
        }
        let t = step / d;
        Point {
            x: self.x + (target.x - self.x) * t,
            y: self.y,
            z: self.z + (target.z - self.z) * t,
        }
    }

    /// `[x, z]` pair used as the R-tree key.
    #[inline]
    pub fn planar(self) -> [f32; 2] {
        [self.x, self.z]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ── Layers ────────────────────────────────────────────────────────────────────

/// Index of the surface layer a point or object lies on (ground, water,
/// cliff, …).  Valid layers are `0..32`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer(pub u8);

impl Layer {
    pub const GROUND: Layer = Layer(0);
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer{}", self.0)
    }
}

/// A bit-set of allowed [`Layer`]s.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn of(layers: &[Layer]) -> Self {
        layers.iter().fold(Self::NONE, |m, &l| m.with(l))
    }

    /// Return a copy with `layer` added.  Layers `>= 32` are ignored.
    #[inline]
    pub fn with(self, layer: Layer) -> Self {
        match 1u32.checked_shl(layer.0 as u32) {
            Some(bit) => LayerMask(self.0 | bit),
            None => self,
        }
    }

    #[inline]
    pub fn contains(self, layer: Layer) -> bool {
        1u32.checked_shl(layer.0 as u32)
            .is_some_and(|bit| self.0 & bit != 0)
    }
}

impl std::str::FromStr for LayerMask {
    type Err = CoreError;

    /// Parse `"all"`, `"none"`, or a `|`-separated list of layer indices
    /// such as `"0|3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(LayerMask::ALL),
            "none" => Ok(LayerMask::NONE),
            list => list.split('|').try_fold(LayerMask::NONE, |mask, part| {
                match part.trim().parse::<u8>() {
                    Ok(n) if n < 32 => Ok(mask.with(Layer(n))),
                    _ => Err(CoreError::Parse(format!(
                        "invalid layer {part:?}: expected an index in 0..32"
                    ))),
                }
            }),
        }
    }
}
