//! Damage information and target selection helpers

use serde::{Deserialize, Serialize};
use void_ecs::EntityId;
use void_math::Vec3;

/// Payload of `health.damage`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageInfo {
    pub amount: f32,
    /// Entity credited with the hit
    pub attacker: Option<EntityId>,
}

impl DamageInfo {
    pub fn new(amount: f32) -> Self {
        Self { amount, attacker: None }
    }

    pub fn with_attacker(mut self, attacker: EntityId) -> Self {
        self.attacker = Some(attacker);
        self
    }
}

/// Damage for one hit: strength scaled by the weapon multiplier and rounded,
/// or raw strength when unarmed
pub fn compute_damage(strength: f32, multiplier: Option<f32>) -> f32 {
    match multiplier {
        Some(m) => (strength * m).round(),
        None => strength,
    }
}

/// Accepts targets whose direction is within a cone around the forward axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacingCone {
    /// Minimum cosine between forward and the direction to the target
    pub min_dot: f32,
}

impl Default for FacingCone {
    fn default() -> Self {
        // About 25.8 degrees either side
        Self { min_dot: 0.9 }
    }
}

impl FacingCone {
    /// Both vectors are expected to be normalized
    pub fn contains(&self, forward: Vec3, direction: Vec3) -> bool {
        forward.dot(direction) >= self.min_dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_rounding_only_with_weapon() {
        assert_eq!(compute_damage(50.0, Some(2.0)), 100.0);
        assert_eq!(compute_damage(2.5, Some(1.5)), 4.0);
        assert_eq!(compute_damage(2.5, None), 2.5);
    }

    #[test]
    fn test_cone_bounds() {
        let cone = FacingCone::default();
        let forward = Vec3::Z;
        assert!(cone.contains(forward, Vec3::Z));
        let angle = 0.9_f32.acos();
        let inside = Vec3::new((angle - 0.01).sin(), 0.0, (angle - 0.01).cos());
        let outside = Vec3::new((angle + 0.01).sin(), 0.0, (angle + 0.01).cos());
        assert!(cone.contains(forward, inside));
        assert!(!cone.contains(forward, outside));
        assert!(!cone.contains(forward, -Vec3::Z));
    }
}
