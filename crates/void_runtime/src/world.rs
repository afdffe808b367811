//! World assembly
//!
//! Builds every entity the game starts with, in dependency order:
//! controllers first (so components can reach them during `init`), then
//! items, quest givers, the player and its camera, the environment, the
//! village, scenery and finally the monster population.

use crate::config::RuntimeConfig;
use crate::effects::LevelUpSpawner;
use crate::environment::DayNightCycle;
use crate::scenery::SceneModel;
use crate::town::{self, Town};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use void_combat::{AttackController, AttackParams, BrainParams, HealthComponent, HealthStats, MeleeBrain};
use void_ecs::prelude::*;
use void_ecs::Result;
use void_hud::UiController;
use void_inventory::{EquipWeapon, InventoryController, InventoryItem, ItemDefinition};
use void_player::{CameraManager, CharacterController, Pickable, PlayerInput, SittingController};
use void_quest::{QuestBook, QuestGiver, QuestManager};
use void_spatial::SpatialGridController;

/// Circular area kept free of monsters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeZone {
    pub center: Vec2,
    pub radius: f32,
}

pub const SAFE_ZONES: &[SafeZone] = &[
    SafeZone { center: Vec2::new(0.0, 0.0), radius: 80.0 },
    SafeZone { center: Vec2::new(30.0, 0.0), radius: 50.0 },
    SafeZone { center: Vec2::new(-30.0, 0.0), radius: 50.0 },
    SafeZone { center: Vec2::new(0.0, 30.0), radius: 50.0 },
    SafeZone { center: Vec2::new(200.0, 200.0), radius: 100.0 },
];

pub fn in_safe_zone(position: Vec2) -> bool {
    SAFE_ZONES
        .iter()
        .any(|zone| position.distance_squared(zone.center) < zone.radius * zone.radius)
}

/// Monster level from a uniform roll in [0, 1)
pub fn monster_level(roll: f32) -> u32 {
    match roll {
        r if r > 0.98 => 5,
        r if r > 0.90 => 4,
        r if r > 0.70 => 3,
        r if r > 0.40 => 2,
        _ => 1,
    }
}

/// Stat block of a monster at `level`
pub fn monster_stats(level: u32) -> HealthStats {
    let l = level as f32;
    HealthStats {
        health: 200.0 * l,
        max_health: 200.0 * l,
        strength: 2.0 * l,
        wisdomness: 2.0 * l,
        benchpress: 3.0 * l,
        curl: l,
        experience: 0,
        level,
    }
}

pub fn player_stats() -> HealthStats {
    HealthStats {
        health: 300.0,
        max_health: 300.0,
        strength: 50.0,
        wisdomness: 5.0,
        benchpress: 20.0,
        curl: 100.0,
        experience: 0,
        level: 1,
    }
}

/// Impact time of the player's unarmed swing
pub const PLAYER_ATTACK_TIMING: f32 = 0.7;
/// Impact time of every monster swing
pub const MONSTER_ATTACK_TIMING: f32 = 0.35;

/// (entity name, quest id, position)
pub const QUEST_GIVERS: &[(&str, &str, Vec3)] = &[
    ("girl", "welcome_quest", Vec3::new(30.0, 0.0, 0.0)),
    ("merchant", "monster_hunter", Vec3::new(-30.0, 0.0, 0.0)),
    ("elder", "elite_slayer", Vec3::new(0.0, 0.0, 30.0)),
];

/// (resource, creature kind)
const MONSTERS: &[(&str, &str)] = &[
    ("Ghost.fbx", "ghost"),
    ("Alien.fbx", "alien"),
    ("Skull.fbx", "skull"),
    ("GreenDemon.fbx", "green-demon"),
    ("Cyclops.fbx", "cyclops"),
    ("Cactus.fbx", "cactus"),
];

const TREES: &[&str] = &[
    "CommonTree_Dead",
    "CommonTree",
    "BirchTree",
    "BirchTree_Dead",
    "Willow",
    "Willow_Dead",
    "PineTree",
];

const NPC_MODEL: &str = "peasant_girl.fbx";
const NPC_IDLE: &str = "Standing Idle.fbx";

/// Handles to the entities the runtime and tests care about
#[derive(Debug, Clone)]
pub struct World {
    pub ui: EntityId,
    pub quest_manager: EntityId,
    pub level_up_spawner: EntityId,
    pub player: EntityId,
    pub camera: EntityId,
    pub environment: EntityId,
    pub items: Vec<EntityId>,
    pub quest_givers: Vec<EntityId>,
    pub town: Town,
    pub scenery: Vec<EntityId>,
    pub monsters: Vec<EntityId>,
}

/// Create the starting world in `manager`.
///
/// The manager must already hold the spatial grid resource.
pub fn build_world(manager: &mut EntityManager, config: &RuntimeConfig, quests: QuestBook) -> Result<World> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let (ui, quest_manager, level_up_spawner) = load_controllers(manager, quests)?;
    let items = load_items(manager)?;
    let quest_givers = load_quest_givers(manager)?;
    let player = load_player(manager)?;

    let camera = Entity::new().with_component(CameraManager::new(player))?;
    let camera = manager.add(camera, Some("player-camera"))?;
    manager.services_mut().register(Service::Camera, camera);

    let environment = Entity::new().with_component(DayNightCycle::new(config.clock.day_length))?;
    let environment = manager.add(environment, Some("day-night-cycle"))?;

    let town = town::load_town(manager, town::TOWN_CENTER)?;
    let mut scenery = load_foliage(manager, config, &mut rng)?;
    scenery.extend(load_clouds(manager, config, &mut rng)?);
    let monsters = spawn_monsters(manager, config, &mut rng)?;

    log::info!(
        "world ready: {} entities, {} monsters",
        manager.len(),
        monsters.len()
    );

    Ok(World {
        ui,
        quest_manager,
        level_up_spawner,
        player,
        camera,
        environment,
        items,
        quest_givers,
        town,
        scenery,
        monsters,
    })
}

fn load_controllers(manager: &mut EntityManager, quests: QuestBook) -> Result<(EntityId, EntityId, EntityId)> {
    let ui = manager.add(Entity::new().with_component(UiController::new())?, Some("ui"))?;
    manager.services_mut().register(Service::Ui, ui);

    let quest_manager = manager.add(Entity::new().with_component(QuestManager::new(quests))?, Some("quest-manager"))?;
    manager.services_mut().register(Service::QuestManager, quest_manager);

    let spawner = manager.add(Entity::new().with_component(LevelUpSpawner::new())?, Some("level-up-spawner"))?;
    manager.services_mut().register(Service::LevelUpSpawner, spawner);

    Ok((ui, quest_manager, spawner))
}

fn load_items(manager: &mut EntityManager) -> Result<Vec<EntityId>> {
    let axe = ItemDefinition::weapon("Axe", 4.0)
        .with_attack_speed(0.9)
        .with_icon("war-axe-64.png");
    let sword = ItemDefinition::weapon("Sword", 2.0)
        .with_attack_speed(0.35)
        .with_icon("pointy-sword-64.png");

    Ok(vec![
        manager.add(Entity::new().with_component(InventoryItem::new(axe))?, Some("axe"))?,
        manager.add(Entity::new().with_component(InventoryItem::new(sword))?, Some("sword"))?,
    ])
}

fn load_quest_givers(manager: &mut EntityManager) -> Result<Vec<EntityId>> {
    QUEST_GIVERS
        .iter()
        .map(|(name, quest, position)| {
            let giver = Entity::at(*position)
                .with_component(SceneModel::new(NPC_MODEL).with_animation(NPC_IDLE).with_scale(town::BUILDING_SCALE))?
                .with_component(SpatialGridController::new())?
                .with_component(Pickable)?
                .with_component(QuestGiver::new(*quest))?;
            manager.add(giver, Some(*name))
        })
        .collect()
}

fn load_player(manager: &mut EntityManager) -> Result<EntityId> {
    let player = Entity::at(Vec3::ZERO)
        .with_component(PlayerInput::new())?
        .with_component(CharacterController::default())?
        .with_component(EquipWeapon::new())?
        .with_component(InventoryController::default())?
        .with_component(HealthComponent::new(player_stats()).ui_bound())?
        .with_component(SpatialGridController::new())?
        .with_component(AttackController::new(AttackParams::default().with_timing(PLAYER_ATTACK_TIMING)))?
        .with_component(SittingController::new())?;
    let player = manager.add(player, Some("player"))?;
    manager.services_mut().register(Service::Player, player);

    manager.send(player, Message::new(topics::INVENTORY_ADD, ItemRef::new("axe")));
    manager.send(player, Message::new(topics::INVENTORY_ADD, ItemRef::new("sword")));
    manager.send(player, Message::new(topics::INVENTORY_EQUIP, ItemRef::new("sword")));
    Ok(player)
}

fn random_point(rng: &mut StdRng, extent: f32) -> Vec2 {
    Vec2::new(rng.gen_range(-extent..extent), rng.gen_range(-extent..extent))
}

fn load_foliage(manager: &mut EntityManager, config: &RuntimeConfig, rng: &mut StdRng) -> Result<Vec<EntityId>> {
    let mut trees = Vec::with_capacity(config.population.foliage);
    for _ in 0..config.population.foliage {
        let name = TREES[rng.gen_range(0..TREES.len())];
        let resource = format!("{}_{}.fbx", name, rng.gen_range(1..=5));
        let p = random_point(rng, config.population.extent);
        let tree = Entity::at(Vec3::new(p.x, 0.0, p.y))
            .with_component(SceneModel::new(resource).with_scale(0.25))?
            .with_component(SpatialGridController::new())?;
        let id = manager.add(tree, None)?;
        manager.set_active(id, false);
        trees.push(id);
    }
    Ok(trees)
}

fn load_clouds(manager: &mut EntityManager, config: &RuntimeConfig, rng: &mut StdRng) -> Result<Vec<EntityId>> {
    let mut clouds = Vec::with_capacity(config.population.clouds);
    for _ in 0..config.population.clouds {
        let resource = format!("Cloud{}.glb", rng.gen_range(1..=3));
        let p = random_point(rng, config.population.extent);
        let scale = rng.gen_range(10.0..15.0);
        let cloud = Entity::at(Vec3::new(p.x, 100.0, p.y))
            .with_component(SceneModel::new(resource).with_scale(scale))?;
        let id = manager.add(cloud, None)?;
        manager.set_active(id, false);
        clouds.push(id);
    }
    Ok(clouds)
}

/// Place the monster population. A monster whose every placement attempt
/// lands in a safe zone is skipped.
fn spawn_monsters(manager: &mut EntityManager, config: &RuntimeConfig, rng: &mut StdRng) -> Result<Vec<EntityId>> {
    let population = config.population;
    let mut monsters = Vec::with_capacity(population.monsters);
    let mut skipped = 0;

    for _ in 0..population.monsters {
        let (resource, kind) = MONSTERS[rng.gen_range(0..MONSTERS.len())];
        let level = monster_level(rng.gen::<f32>());

        let spot = (0..population.max_attempts)
            .map(|_| random_point(rng, population.extent))
            .find(|p| !in_safe_zone(*p));
        let Some(spot) = spot else {
            skipped += 1;
            continue;
        };

        let monster = Entity::at(Vec3::new(spot.x, 0.0, spot.y))
            .with_component(SceneModel::new(resource))?
            .with_component(HealthComponent::new(monster_stats(level)).with_kind(kind))?
            .with_component(SpatialGridController::new())?
            .with_component(AttackController::new(AttackParams::default().with_timing(MONSTER_ATTACK_TIMING)))?
            .with_component(MeleeBrain::new(BrainParams::default()))?;
        monsters.push(manager.add(monster, None)?);
    }

    if skipped > 0 {
        log::warn!("{} monsters found no spawn point outside the safe zones", skipped);
    }
    Ok(monsters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_levels() {
        assert_eq!(monster_level(0.0), 1);
        assert_eq!(monster_level(0.40), 1);
        assert_eq!(monster_level(0.41), 2);
        assert_eq!(monster_level(0.75), 3);
        assert_eq!(monster_level(0.95), 4);
        assert_eq!(monster_level(0.99), 5);
    }

    #[test]
    fn test_monster_stats_scale_with_level() {
        let stats = monster_stats(3);
        assert_eq!(stats.health, 600.0);
        assert_eq!(stats.max_health, 600.0);
        assert_eq!(stats.strength, 6.0);
        assert_eq!(stats.benchpress, 9.0);
        assert_eq!(stats.curl, 3.0);
        assert_eq!(stats.level, 3);
    }

    #[test]
    fn test_safe_zones() {
        assert!(in_safe_zone(Vec2::new(0.0, 0.0)));
        assert!(in_safe_zone(Vec2::new(250.0, 250.0)));
        assert!(in_safe_zone(Vec2::new(-70.0, 0.0)));
        assert!(!in_safe_zone(Vec2::new(-100.0, -100.0)));
        assert!(!in_safe_zone(Vec2::new(200.0, 301.0)));
    }
}
