//! Village layout: buildings, the plaza chair and idle villagers

use crate::scenery::SceneModel;
use void_ecs::prelude::*;
use void_ecs::Result;
use void_math::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI};
use void_player::{Interactable, Pickable};
use void_spatial::SpatialGridController;

/// Where the village sits
pub const TOWN_CENTER: Vec3 = Vec3::new(200.0, 0.0, 200.0);

/// Building model scale
pub const BUILDING_SCALE: f32 = 0.035;

/// A placed model relative to the town center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub resource: &'static str,
    pub offset: Vec3,
    /// Heading in radians
    pub rotation: f32,
}

const fn place(resource: &'static str, x: f32, z: f32, rotation: f32) -> Placement {
    Placement { resource, offset: Vec3::new(x, 0.0, z), rotation }
}

pub const BUILDINGS: &[Placement] = &[
    place("Bell_Tower.fbx", 0.0, 0.0, 0.0),
    place("Blacksmith.fbx", 60.0, -40.0, FRAC_PI_4),
    place("Inn.fbx", -50.0, -50.0, -FRAC_PI_6),
    place("Mill.fbx", 70.0, 60.0, FRAC_PI_3),
    place("House_1.fbx", -65.0, 30.0, FRAC_PI_2),
    place("House_2.fbx", -65.0, 60.0, FRAC_PI_2),
    place("House_3.fbx", 40.0, 70.0, -FRAC_PI_4),
    place("House_4.fbx", -20.0, 70.0, 0.0),
    place("House_1.fbx", 60.0, -70.0, PI),
    place("House_2.fbx", 20.0, -70.0, FRAC_PI_6),
    place("Stable.fbx", -70.0, -20.0, FRAC_PI_2),
    place("Sawmill.fbx", 75.0, 20.0, -FRAC_PI_4),
];

/// The one interactive seat, in front of the bell tower and facing it
pub const CHAIR: Placement = place("Chair_1.fbx", 0.0, 20.0, PI);

pub const VILLAGERS: &[Placement] = &[
    place("Peasant Girl.fbx", -15.0, 10.0, 0.0),
    place("Peasant Man.fbx", 18.0, -8.0, 0.0),
    place("Peasant Man.fbx", 45.0, -35.0, 0.0),
    place("Peasant Girl.fbx", -35.0, -45.0, 0.0),
    place("Peasant Man.fbx", -50.0, 45.0, 0.0),
    place("Peasant Girl.fbx", -55.0, 20.0, 0.0),
    place("Peasant Man.fbx", 30.0, 65.0, 0.0),
    place("Peasant Girl.fbx", -10.0, 65.0, 0.0),
    place("Peasant Man.fbx", 60.0, 50.0, 0.0),
    place("Peasant Girl.fbx", -60.0, -15.0, 0.0),
    place("Peasant Man.fbx", 65.0, 15.0, 0.0),
    place("Peasant Girl.fbx", 50.0, -65.0, 0.0),
    place("Peasant Man.fbx", 10.0, -65.0, 0.0),
];

const VILLAGER_IDLE: &str = "Standing Idle.fbx";

/// Entities created by [`load_town`]
#[derive(Debug, Clone, Default)]
pub struct Town {
    pub buildings: Vec<EntityId>,
    pub chair: Option<EntityId>,
    pub villagers: Vec<EntityId>,
}

/// Populate the village around `center`
pub fn load_town(manager: &mut EntityManager, center: Vec3) -> Result<Town> {
    log::info!("loading village at {:?}", center);
    let mut town = Town::default();

    for (index, building) in BUILDINGS.iter().enumerate() {
        let entity = placed(building, center)?;
        town.buildings.push(manager.add(entity, Some(&format!("town-building-{}", index)))?);
    }

    let chair = placed(&CHAIR, center)?
        .with_component(Pickable)?
        .with_component(Interactable::chair())?;
    town.chair = Some(manager.add(chair, Some("town-chair"))?);

    for (index, villager) in VILLAGERS.iter().enumerate() {
        let model = SceneModel::new(villager.resource)
            .with_animation(VILLAGER_IDLE)
            .with_scale(BUILDING_SCALE);
        let entity = Entity::at(center + villager.offset)
            .with_component(model)?
            .with_component(SpatialGridController::new())?;
        town.villagers.push(manager.add(entity, Some(&format!("villager-{}", index)))?);
    }

    log::info!(
        "village ready: {} buildings, {} villagers",
        town.buildings.len(),
        town.villagers.len()
    );
    Ok(town)
}

fn placed(placement: &Placement, center: Vec3) -> Result<Entity> {
    Entity::at(center + placement.offset)
        .with_rotation(Quat::from_rotation_y(placement.rotation))
        .with_component(SceneModel::new(placement.resource).with_scale(BUILDING_SCALE))?
        .with_component(SpatialGridController::new())
}
