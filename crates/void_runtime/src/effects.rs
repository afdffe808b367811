//! Transient visual effects

use void_ecs::prelude::*;

/// Seconds a level-up burst stays in the world
pub const LEVEL_UP_LIFETIME: f32 = 1.5;

/// Spawns a short-lived burst entity for each `effect.spawn` request
#[derive(Debug, Default)]
pub struct LevelUpSpawner {
    spawned: u64,
}

impl LevelUpSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects spawned so far
    pub fn spawned(&self) -> u64 {
        self.spawned
    }
}

impl Component for LevelUpSpawner {
    fn capability(&self) -> Capability {
        Capability::LevelUpSpawner
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::EFFECT_SPAWN);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        let Some(request) = message.payload::<EffectRequest>() else {
            return;
        };
        let effect = Entity::at(request.position).with_component(TransientEffect::new(LEVEL_UP_LIFETIME));
        let result = effect.and_then(|entity| ctx.manager_mut().add(entity, None));
        match result {
            Ok(id) => {
                self.spawned += 1;
                log::debug!("level-up effect {} at {:?}", id, request.position);
            }
            Err(e) => log::warn!("could not spawn level-up effect: {}", e),
        }
    }
}

/// Removes its entity once its lifetime runs out
#[derive(Debug, Clone)]
pub struct TransientEffect {
    remaining: f32,
}

impl TransientEffect {
    pub fn new(lifetime: f32) -> Self {
        Self { remaining: lifetime }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

impl Component for TransientEffect {
    fn capability(&self) -> Capability {
        Capability::Custom("transient-effect")
    }

    fn has_update(&self) -> bool {
        true
    }

    fn update(&mut self, dt: f32, ctx: &mut Context<'_>) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            let id = ctx.entity();
            ctx.manager_mut().remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_expires() {
        let mut manager = EntityManager::new();
        let spawner = manager.add(Entity::new().with_component(LevelUpSpawner::new()).unwrap(), Some("level-up-spawner")).unwrap();
        manager.send(
            spawner,
            Message::new(topics::EFFECT_SPAWN, EffectRequest { kind: EffectKind::LevelUp, position: Vec3::new(1.0, 0.0, 2.0) }),
        );
        assert_eq!(manager.component::<LevelUpSpawner>(spawner).unwrap().spawned(), 1);
        assert_eq!(manager.len(), 2);

        for _ in 0..60 {
            manager.update(1.0 / 30.0);
        }
        assert_eq!(manager.len(), 1);
    }
}
