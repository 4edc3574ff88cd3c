#![warn(missing_docs)]
//! Physics primitives (rays, entity collision shapes, sweeps).

use glam::Vec3;
use serde::{Deserialize, Serialize};

const EPSILON: f32 = 1e-6;

/// Half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalising `direction`. Returns `None` for a zero direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Ray covering the segment `from -> to`, plus the segment length.
    pub fn segment(from: Vec3, to: Vec3) -> Option<(Self, f32)> {
        let delta = to - from;
        let length = delta.length();
        if length <= EPSILON {
            return None;
        }
        Some((
            Self {
                origin: from,
                direction: delta / length,
            },
            length,
        ))
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Upright cylinder standing on `base`; trees, rocks and animals are all
/// approximated this way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    /// Centre of the bottom cap.
    pub base: Vec3,
    /// Horizontal radius.
    pub radius: f32,
    /// Height above `base`.
    pub height: f32,
}

impl Cylinder {
    /// Create a new cylinder.
    pub fn new(base: Vec3, radius: f32, height: f32) -> Self {
        debug_assert!(radius >= 0.0 && height >= 0.0);
        Self {
            base,
            radius,
            height,
        }
    }

    /// Whether `point` lies inside (or on) the cylinder.
    pub fn contains(&self, point: Vec3) -> bool {
        let local = point - self.base;
        local.y >= 0.0
            && local.y <= self.height
            && local.x * local.x + local.z * local.z <= self.radius * self.radius
    }

    /// Distance along `ray` to the first surface point, if the ray hits.
    ///
    /// A ray starting inside the cylinder hits at distance 0.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        if self.contains(ray.origin) {
            return Some(0.0);
        }

        let o = ray.origin - self.base;
        let d = ray.direction;
        let r2 = self.radius * self.radius;
        let mut best: Option<f32> = None;
        let mut consider = |t: f32| {
            if t >= 0.0 && best.map_or(true, |b| t < b) {
                best = Some(t);
            }
        };

        // Curved side.
        let a = d.x * d.x + d.z * d.z;
        if a > EPSILON {
            let b = 2.0 * (o.x * d.x + o.z * d.z);
            let c = o.x * o.x + o.z * o.z - r2;
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sqrt = disc.sqrt();
                for t in [(-b - sqrt) / (2.0 * a), (-b + sqrt) / (2.0 * a)] {
                    let y = o.y + d.y * t;
                    if (0.0..=self.height).contains(&y) {
                        consider(t);
                    }
                }
            }
        }

        // Caps.
        if d.y.abs() > EPSILON {
            for plane in [0.0, self.height] {
                let t = (plane - o.y) / d.y;
                let x = o.x + d.x * t;
                let z = o.z + d.z * t;
                if x * x + z * z <= r2 {
                    consider(t);
                }
            }
        }

        best
    }
}

/// Find the closest shape hit by `ray` no further than `max_distance`.
pub fn nearest_hit<T, I>(ray: &Ray, shapes: I, max_distance: f32) -> Option<(T, f32)>
where
    I: IntoIterator<Item = (T, Cylinder)>,
{
    shapes
        .into_iter()
        .filter_map(|(key, shape)| {
            shape
                .ray_intersection(ray)
                .filter(|t| *t <= max_distance)
                .map(|t| (key, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Horizontal (x, z) distance between two points.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
