//! Melee timing driven by animation phase

use crate::damage::{compute_damage, DamageInfo, FacingCone};
use crate::health::HealthComponent;
use serde::{Deserialize, Serialize};
use void_ecs::prelude::*;
use void_inventory::{EquipWeapon, InventoryController};
use void_spatial::SpatialGridController;

/// Attack tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackParams {
    /// Phase time at which a swing connects
    pub timing: f32,
    /// Timing used when the equipped item has no attack speed
    pub base_speed: f32,
    /// Reach in world units
    pub range: f32,
    pub cone: FacingCone,
}

impl Default for AttackParams {
    fn default() -> Self {
        Self {
            timing: 0.7,
            base_speed: 0.7,
            range: 2.0,
            cone: FacingCone::default(),
        }
    }
}

impl AttackParams {
    pub fn with_timing(mut self, timing: f32) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }
}

/// Turns `player.action` phase updates into at most one hit per cycle.
///
/// A cycle starts when the action id changes, or when the phase time runs
/// backwards for the same id. The hit resolves the first time the phase
/// crosses the current timing threshold.
#[derive(Debug, Clone)]
pub struct AttackController {
    params: AttackParams,
    /// Threshold for the running cycle
    timing: f32,
    /// Threshold picked up at the start of the next cycle
    next_timing: f32,
    action: Option<u64>,
    elapsed: f32,
    fired: bool,
}

impl AttackController {
    pub fn new(params: AttackParams) -> Self {
        Self {
            params,
            timing: params.timing,
            next_timing: params.timing,
            action: None,
            elapsed: 0.0,
            fired: false,
        }
    }

    pub fn params(&self) -> &AttackParams {
        &self.params
    }

    /// Threshold of the running cycle
    pub fn timing(&self) -> f32 {
        self.timing
    }

    pub fn next_timing(&self) -> f32 {
        self.next_timing
    }

    fn on_equip(&mut self, item: &ItemRef, ctx: &Context<'_>) {
        let Some(definition) = ctx
            .sibling::<InventoryController>()
            .and_then(|inventory| inventory.definition(&item.name, ctx))
        else {
            return;
        };
        self.next_timing = definition.attack_speed.unwrap_or(self.params.base_speed);
        log::debug!("'{}' attack timing now {} after equipping '{}'", ctx.name(), self.next_timing, item.name);
    }

    fn on_phase(&mut self, phase: AnimationPhase, ctx: &mut Context<'_>) {
        if self.action != Some(phase.action) || phase.time < self.elapsed {
            self.action = Some(phase.action);
            self.elapsed = 0.0;
            self.fired = false;
            self.timing = self.next_timing;
        }

        let previous = self.elapsed;
        self.elapsed = phase.time;

        if !self.fired && previous < self.timing && self.elapsed >= self.timing {
            self.fired = true;
            self.resolve(ctx);
        }
    }

    /// Damage dealt by one hit from this entity
    pub fn hit_damage(ctx: &Context<'_>) -> f32 {
        let strength = ctx.sibling::<HealthComponent>().map_or(0.0, |h| h.stats().strength);
        let multiplier = ctx
            .sibling::<EquipWeapon>()
            .and_then(EquipWeapon::equipped)
            .and_then(|name| ctx.sibling::<InventoryController>()?.definition(name, ctx))
            .map(|definition| definition.damage);
        compute_damage(strength, multiplier)
    }

    fn resolve(&self, ctx: &mut Context<'_>) {
        let me = ctx.entity();
        let origin = ctx.position();
        let forward = ctx.rotation().forward().normalize_or_zero();
        let amount = Self::hit_damage(ctx);

        let targets: Vec<EntityId> = SpatialGridController::find_nearby(ctx, self.params.range)
            .into_iter()
            .map(|hit| hit.item)
            .filter(|&id| id != me)
            .filter(|&id| ctx.component::<HealthComponent>(id).is_some_and(HealthComponent::is_alive))
            .filter(|&id| {
                ctx.position_of(id)
                    .is_some_and(|p| self.params.cone.contains(forward, (p - origin).normalize_or_zero()))
            })
            .collect();

        for target in targets {
            log::debug!("'{}' hits {} for {}", ctx.name(), target, amount);
            ctx.send(target, Message::new(topics::HEALTH_DAMAGE, DamageInfo::new(amount).with_attacker(me)));
        }
    }
}

impl Component for AttackController {
    fn capability(&self) -> Capability {
        Capability::Attack
    }

    fn requires(&self) -> &'static [Capability] {
        &[Capability::Spatial, Capability::Health]
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::PLAYER_ACTION);
        ctx.subscribe(topics::INVENTORY_EQUIP);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        if let Some(phase) = message.payload::<AnimationPhase>() {
            self.on_phase(*phase, ctx);
        } else if let Some(item) = message.payload::<ItemRef>() {
            self.on_equip(item, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthStats;
    use approx::assert_relative_eq;
    use void_inventory::{InventoryItem, ItemDefinition};
    use void_spatial::{EntityGrid, GridConfig};

    fn manager() -> EntityManager {
        let mut manager = EntityManager::new();
        manager.insert_resource(EntityGrid::new(GridConfig::default()));
        for def in [
            ItemDefinition::weapon("Axe", 4.0).with_attack_speed(0.9),
            ItemDefinition::weapon("Sword", 2.0).with_attack_speed(0.35),
            ItemDefinition::weapon("Club", 1.5),
        ] {
            let name = def.name.to_lowercase();
            let item = Entity::new().with_component(InventoryItem::new(def)).unwrap();
            manager.add(item, Some(&name)).unwrap();
        }
        manager
    }

    fn attacker(manager: &mut EntityManager, strength: f32) -> EntityId {
        let entity = Entity::at(Vec3::ZERO)
            .with_component(SpatialGridController::new())
            .unwrap()
            .with_component(HealthComponent::new(HealthStats::default().with_health(300.0).with_strength(strength)))
            .unwrap()
            .with_component(InventoryController::default())
            .unwrap()
            .with_component(EquipWeapon::new())
            .unwrap()
            .with_component(AttackController::new(AttackParams::default()))
            .unwrap();
        manager.add(entity, Some("player")).unwrap()
    }

    fn target(manager: &mut EntityManager, name: &str, position: Vec3) -> EntityId {
        let entity = Entity::at(position)
            .with_component(SpatialGridController::new())
            .unwrap()
            .with_component(HealthComponent::new(HealthStats::default().with_health(1000.0)))
            .unwrap();
        manager.add(entity, Some(name)).unwrap()
    }

    fn health(manager: &EntityManager, id: EntityId) -> f32 {
        manager.component::<HealthComponent>(id).unwrap().health()
    }

    fn phase(manager: &mut EntityManager, id: EntityId, action: u64, time: f32) {
        manager.send(id, Message::new(topics::PLAYER_ACTION, AnimationPhase { action, time }));
    }

    fn hold(manager: &mut EntityManager, id: EntityId, item: &str, equip: bool) {
        manager.send(id, Message::new(topics::INVENTORY_ADD, ItemRef::new(item)));
        if equip {
            manager.send(id, Message::new(topics::INVENTORY_EQUIP, ItemRef::new(item)));
        }
    }

    #[test]
    fn test_requires_spatial_and_health() {
        let mut manager = manager();
        let entity = Entity::new().with_component(AttackController::new(AttackParams::default())).unwrap();
        assert!(matches!(manager.add(entity, None), Err(EcsError::MissingCapability { .. })));
    }

    #[test]
    fn test_one_hit_per_cycle() {
        let mut manager = manager();
        let player = attacker(&mut manager, 10.0);
        let front = target(&mut manager, "front", Vec3::new(0.0, 0.0, 1.5));

        phase(&mut manager, player, 1, 0.2);
        assert_eq!(health(&manager, front), 1000.0);
        phase(&mut manager, player, 1, 0.75);
        assert_eq!(health(&manager, front), 990.0);
        phase(&mut manager, player, 1, 0.9);
        phase(&mut manager, player, 1, 1.2);
        assert_eq!(health(&manager, front), 990.0);

        phase(&mut manager, player, 2, 0.1);
        phase(&mut manager, player, 2, 0.8);
        assert_eq!(health(&manager, front), 980.0);
    }

    #[test]
    fn test_phase_rewind_starts_new_cycle() {
        let mut manager = manager();
        let player = attacker(&mut manager, 10.0);
        let front = target(&mut manager, "front", Vec3::new(0.0, 0.0, 1.0));

        phase(&mut manager, player, 7, 0.8);
        phase(&mut manager, player, 7, 0.1);
        phase(&mut manager, player, 7, 0.8);
        assert_eq!(health(&manager, front), 980.0);
    }

    #[test]
    fn test_cone_and_range_filter() {
        let mut manager = manager();
        let player = attacker(&mut manager, 10.0);
        let front = target(&mut manager, "front", Vec3::new(0.0, 0.0, 1.5));
        let side = target(&mut manager, "side", Vec3::new(1.5, 0.0, 0.0));
        let behind = target(&mut manager, "behind", Vec3::new(0.0, 0.0, -1.5));
        let far = target(&mut manager, "far", Vec3::new(0.0, 0.0, 3.0));

        phase(&mut manager, player, 1, 0.8);
        assert_eq!(health(&manager, front), 990.0);
        for id in [side, behind, far] {
            assert_eq!(health(&manager, id), 1000.0);
        }
        assert_eq!(health(&manager, player), 300.0);
    }

    #[test]
    fn test_weapon_multiplier_rounds() {
        let mut manager = manager();
        let player = attacker(&mut manager, 5.0);
        let front = target(&mut manager, "front", Vec3::new(0.0, 0.0, 1.0));
        hold(&mut manager, player, "club", true);

        // Club has no attack speed; base speed 0.7 applies from the next cycle
        phase(&mut manager, player, 1, 0.8);
        assert_eq!(health(&manager, front), 1000.0 - 8.0);
    }

    #[test]
    fn test_equip_applies_from_next_cycle() {
        let mut manager = manager();
        let player = attacker(&mut manager, 10.0);
        let front = target(&mut manager, "front", Vec3::new(0.0, 0.0, 1.0));
        hold(&mut manager, player, "axe", false);

        phase(&mut manager, player, 1, 0.1);
        hold(&mut manager, player, "axe", true);
        assert_relative_eq!(manager.component::<AttackController>(player).unwrap().next_timing(), 0.9);

        // Still the 0.7 threshold for this cycle
        phase(&mut manager, player, 1, 0.75);
        assert_eq!(health(&manager, front), 960.0);

        // Next cycle uses the axe timing
        phase(&mut manager, player, 2, 0.8);
        assert_eq!(health(&manager, front), 960.0);
        phase(&mut manager, player, 2, 0.95);
        assert_eq!(health(&manager, front), 920.0);
    }

    #[test]
    fn test_dead_targets_are_skipped() {
        let mut manager = manager();
        let player = attacker(&mut manager, 10.0);
        let front = target(&mut manager, "front", Vec3::new(0.0, 0.0, 1.0));
        manager.send(front, Message::new(topics::HEALTH_DAMAGE, DamageInfo::new(5000.0)));

        phase(&mut manager, player, 1, 0.8);
        assert_eq!(health(&manager, front), 0.0);
        // No kill credit for hitting a corpse
        assert_eq!(manager.component::<HealthComponent>(player).unwrap().experience(), 0);
    }

    #[test]
    fn test_unarmed_damage_is_raw_strength() {
        let mut manager = manager();
        let player = attacker(&mut manager, 2.5);
        let front = target(&mut manager, "front", Vec3::new(0.0, 0.0, 1.0));
        phase(&mut manager, player, 1, 0.8);
        assert_relative_eq!(health(&manager, front), 997.5);
    }
}
