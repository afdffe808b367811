//! Melee driver for non-player fighters
//!
//! Stands still, turns toward the player once they are within reach of the
//! sibling [`AttackController`] and swings in back-to-back cycles, each one
//! published as `player.action` like the player's own attack animation.

use crate::attack::AttackController;
use crate::health::HealthComponent;
use serde::{Deserialize, Serialize};
use void_ecs::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainParams {
    /// Length of one swing cycle in seconds
    pub swing_duration: f32,
}

impl Default for BrainParams {
    fn default() -> Self {
        Self { swing_duration: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Swing {
    action: u64,
    time: f32,
}

#[derive(Debug, Clone, Default)]
pub struct MeleeBrain {
    params: BrainParams,
    swing: Option<Swing>,
    next_action: u64,
}

impl MeleeBrain {
    pub fn new(params: BrainParams) -> Self {
        Self { params, swing: None, next_action: 0 }
    }

    pub fn is_swinging(&self) -> bool {
        self.swing.is_some()
    }

    /// Cycles started so far
    pub fn swings(&self) -> u64 {
        self.next_action
    }

    /// Player position when the player is alive and within reach
    fn target_in_reach(ctx: &Context<'_>) -> Option<Vec3> {
        let player = ctx.service(Service::Player)?;
        if player == ctx.entity() {
            return None;
        }
        if !ctx.component::<HealthComponent>(player).is_some_and(HealthComponent::is_alive) {
            return None;
        }
        let reach = ctx.sibling::<AttackController>()?.params().range;
        let position = ctx.position_of(player)?;
        (position.xz().distance_squared(ctx.position().xz()) <= reach * reach).then_some(position)
    }

    fn face(target: Vec3, ctx: &mut Context<'_>) {
        let to = target - ctx.position();
        if to.x == 0.0 && to.z == 0.0 {
            return;
        }
        let rotation = Quat::from_rotation_y(to.x.atan2(to.z));
        if ctx.rotation() != rotation {
            ctx.set_rotation(rotation);
        }
    }

    fn publish(swing: Swing, ctx: &mut Context<'_>) {
        let phase = AnimationPhase { action: swing.action, time: swing.time };
        ctx.broadcast(Message::new(topics::PLAYER_ACTION, phase));
    }
}

impl Component for MeleeBrain {
    fn capability(&self) -> Capability {
        Capability::Custom("melee-brain")
    }

    fn requires(&self) -> &'static [Capability] {
        &[Capability::Health, Capability::Attack]
    }

    fn has_update(&self) -> bool {
        true
    }

    fn update(&mut self, dt: f32, ctx: &mut Context<'_>) {
        if !ctx.sibling::<HealthComponent>().is_some_and(HealthComponent::is_alive) {
            self.swing = None;
            return;
        }

        // A swing in progress always plays out
        if let Some(swing) = self.swing.as_mut() {
            swing.time += dt;
            let swing = *swing;
            Self::publish(swing, ctx);
            if swing.time >= self.params.swing_duration {
                self.swing = None;
            }
            return;
        }

        let Some(target) = Self::target_in_reach(ctx) else {
            return;
        };
        Self::face(target, ctx);
        self.next_action += 1;
        let swing = Swing { action: self.next_action, time: 0.0 };
        self.swing = Some(swing);
        log::debug!("'{}' swings at the player (cycle {})", ctx.name(), swing.action);
        Self::publish(swing, ctx);
    }
}
