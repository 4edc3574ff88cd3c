//! Player-placed campfires and the warmth field around them.

use emberwild_physics::horizontal_distance;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifier of a placed campfire.
pub type CampfireId = u64;

/// Distance in front of the player where a crafted campfire is placed.
pub const PLACEMENT_OFFSET: f32 = 3.0;

/// A burning fire placed in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campfire {
    /// Unique id.
    pub id: CampfireId,
    /// Ground position (y is ignored for warmth).
    pub position: Vec3,
    /// Remaining burn time in survival ticks.
    pub fuel: u32,
}

impl Campfire {
    /// Create a fire at `position` with `fuel` ticks of burn time.
    pub fn new(id: CampfireId, position: Vec3, fuel: u32) -> Self {
        Self { id, position, fuel }
    }

    /// Position a campfire `PLACEMENT_OFFSET` units ahead of a player.
    pub fn placement(player_position: Vec3, view_direction: Vec3) -> Vec3 {
        let flat = Vec3::new(view_direction.x, 0.0, view_direction.z)
            .try_normalize()
            .unwrap_or(Vec3::Z);
        Vec3::new(player_position.x, 0.0, player_position.z) + flat * PLACEMENT_OFFSET
    }

    /// Check if the fire still has fuel.
    pub fn is_lit(&self) -> bool {
        self.fuel > 0
    }
}

/// Warmth falloff around a fire.
///
/// Zero at `radius` and beyond, rising linearly as the player approaches and
/// saturating at 1.0 inside `saturation_radius`.
pub fn warmth_fraction(distance: f32, radius: f32, saturation_radius: f32) -> f32 {
    if distance >= radius {
        return 0.0;
    }
    let span = (radius - saturation_radius).max(f32::EPSILON);
    ((radius - distance) / span).clamp(0.0, 1.0)
}

/// Closest lit campfire to `position`, with its horizontal distance.
pub fn nearest_lit(campfires: &[Campfire], position: Vec3) -> Option<(&Campfire, f32)> {
    campfires
        .iter()
        .filter(|fire| fire.is_lit())
        .map(|fire| (fire, horizontal_distance(fire.position, position)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Burn one tick of fuel from every fire, removing those that go out.
///
/// Returns the ids of fires that were extinguished.
pub fn burn_fuel(campfires: &mut Vec<Campfire>) -> Vec<CampfireId> {
    let mut extinguished = Vec::new();
    campfires.retain_mut(|fire| {
        fire.fuel = fire.fuel.saturating_sub(1);
        if fire.is_lit() {
            true
        } else {
            extinguished.push(fire.id);
            false
        }
    });
    extinguished
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmth_is_zero_outside_radius() {
        assert_eq!(warmth_fraction(8.0, 8.0, 1.0), 0.0);
        assert_eq!(warmth_fraction(20.0, 8.0, 1.0), 0.0);
    }

    #[test]
    fn warmth_saturates_near_the_fire() {
        assert_eq!(warmth_fraction(0.0, 8.0, 1.0), 1.0);
        assert_eq!(warmth_fraction(0.5, 8.0, 1.0), 1.0);
        assert!((warmth_fraction(4.5, 8.0, 1.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn warmth_never_increases_with_distance() {
        let mut previous = warmth_fraction(0.0, 8.0, 1.0);
        for step in 1..=100 {
            let current = warmth_fraction(step as f32 * 0.1, 8.0, 1.0);
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn placement_is_three_units_ahead_on_the_ground() {
        let spot = Campfire::placement(Vec3::new(1.0, 1.6, 1.0), Vec3::new(0.0, -0.5, 1.0));
        assert!((spot - Vec3::new(1.0, 0.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn nearest_lit_skips_dead_fires() {
        let fires = vec![
            Campfire::new(1, Vec3::new(1.0, 0.0, 0.0), 0),
            Campfire::new(2, Vec3::new(5.0, 0.0, 0.0), 10),
            Campfire::new(3, Vec3::new(-3.0, 0.0, 0.0), 10),
        ];
        let (fire, distance) = nearest_lit(&fires, Vec3::ZERO).unwrap();
        assert_eq!(fire.id, 3);
        assert!((distance - 3.0).abs() < 1e-6);
    }

    #[test]
    fn burn_fuel_removes_spent_fires() {
        let mut fires = vec![
            Campfire::new(1, Vec3::ZERO, 1),
            Campfire::new(2, Vec3::ZERO, 5),
        ];
        assert_eq!(burn_fuel(&mut fires), vec![1]);
        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].fuel, 4);
    }
}
