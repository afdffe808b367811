//! Keeps an entity registered in the shared grid

use crate::grid::{Neighbor, SpatialIndex, SpatialToken};
use void_ecs::prelude::*;

/// The grid every spatially indexed entity shares, stored as a manager resource
pub type EntityGrid = SpatialIndex<EntityId>;

/// Indexes its entity on init, follows `update.position`, and leaves the
/// grid when the entity is removed
#[derive(Debug, Default)]
pub struct SpatialGridController {
    token: Option<SpatialToken<EntityId>>,
}

impl SpatialGridController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_indexed(&self) -> bool {
        self.token.is_some()
    }

    /// Active entities within `radius` of the calling entity, itself included
    pub fn find_nearby(ctx: &Context<'_>, radius: f32) -> Vec<Neighbor<EntityId>> {
        let Some(grid) = ctx.resource::<EntityGrid>() else {
            log::warn!("find_nearby on '{}' without a spatial grid resource", ctx.name());
            return Vec::new();
        };
        let mut hits = grid.find_near(ctx.position().xz(), radius);
        hits.retain(|hit| ctx.is_active(hit.item));
        hits
    }
}

impl Component for SpatialGridController {
    fn capability(&self) -> Capability {
        Capability::Spatial
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        let entity = ctx.entity();
        let position = ctx.position().xz();
        match ctx.resource_mut::<EntityGrid>() {
            Some(grid) => self.token = Some(grid.insert(entity, position)),
            None => log::error!("no spatial grid resource; '{}' is not indexed", ctx.name()),
        }
        ctx.subscribe(topics::UPDATE_POSITION);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        let (Some(token), Some(position)) = (self.token, message.payload::<Vec3>()) else {
            return;
        };
        if let Some(grid) = ctx.resource_mut::<EntityGrid>() {
            grid.update_position(token, position.xz());
        }
    }

    fn on_detach(&mut self, ctx: &mut Context<'_>) {
        if let Some(token) = self.token.take() {
            if let Some(grid) = ctx.resource_mut::<EntityGrid>() {
                grid.remove(token);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;

    fn manager() -> EntityManager {
        let mut manager = EntityManager::new();
        manager.insert_resource(EntityGrid::new(GridConfig::default()));
        manager
    }

    fn spawn(manager: &mut EntityManager, name: &str, position: Vec3) -> EntityId {
        let entity = Entity::at(position)
            .with_component(SpatialGridController::new())
            .unwrap();
        manager.add(entity, Some(name)).unwrap()
    }

    fn near(manager: &EntityManager, at: Vec3, radius: f32) -> Vec<EntityId> {
        let grid = manager.resource::<EntityGrid>().unwrap();
        grid.find_near(at.xz(), radius).into_iter().map(|n| n.item).collect()
    }

    #[test]
    fn test_indexed_on_registration() {
        let mut manager = manager();
        let a = spawn(&mut manager, "a", Vec3::new(5.0, 0.0, 5.0));
        assert_eq!(near(&manager, Vec3::new(5.0, 0.0, 6.0), 2.0), vec![a]);
        assert!(manager.component::<SpatialGridController>(a).unwrap().is_indexed());
    }

    #[test]
    fn test_follows_position_updates() {
        let mut manager = manager();
        let a = spawn(&mut manager, "a", Vec3::ZERO);
        manager.set_position(a, Vec3::new(100.0, 0.0, -40.0));
        assert!(near(&manager, Vec3::ZERO, 5.0).is_empty());
        assert_eq!(near(&manager, Vec3::new(100.0, 3.0, -40.0), 1.0), vec![a]);
    }

    #[test]
    fn test_removed_entity_leaves_grid() {
        let mut manager = manager();
        let a = spawn(&mut manager, "a", Vec3::ZERO);
        manager.remove(a);
        assert!(near(&manager, Vec3::ZERO, 5.0).is_empty());
        assert!(manager.resource::<EntityGrid>().unwrap().is_empty());
    }
}
