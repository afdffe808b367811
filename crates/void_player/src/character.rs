//! Character controller: animation state, locomotion and attack cycles

use crate::error::PlayerError;
use crate::input::{MoveIntent, PlayerInput};
use crate::sitting::SittingController;
use serde::{Deserialize, Serialize};
use void_ecs::prelude::*;

/// Movement and attack tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionParams {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Length of one attack cycle in seconds
    pub attack_duration: f32,
}

impl Default for LocomotionParams {
    fn default() -> Self {
        Self {
            walk_speed: 12.0,
            run_speed: 24.0,
            attack_duration: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Run,
    Attack,
    Sit,
}

impl AnimState {
    /// Clip name in the loaded model
    pub fn clip(&self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Walk => "walk",
            AnimState::Run => "run",
            AnimState::Attack => "attack",
            AnimState::Sit => "sit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AttackCycle {
    action: u64,
    time: f32,
}

/// Facade over the animated model plus simple locomotion.
///
/// Reads the sibling [`PlayerInput`] every frame. While an attack cycle runs
/// it broadcasts `player.action` with the cycle id and elapsed time.
#[derive(Debug, Clone)]
pub struct CharacterController {
    params: LocomotionParams,
    animations: Vec<String>,
    state: AnimState,
    visible: bool,
    next_action: u64,
    attack: Option<AttackCycle>,
}

impl CharacterController {
    pub fn new(params: LocomotionParams) -> Self {
        Self {
            params,
            animations: Vec::new(),
            state: AnimState::Idle,
            visible: true,
            next_action: 0,
            attack: None,
        }
    }

    pub fn state(&self) -> AnimState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_some()
    }

    pub fn has_animation(&self, clip: &str) -> bool {
        self.animations.iter().any(|a| a == clip)
    }

    /// Switch animation. Idle is always available; other states need their
    /// clip to be loaded.
    pub fn set_state(&mut self, state: AnimState) -> Result<(), PlayerError> {
        if state != AnimState::Idle && !self.has_animation(state.clip()) {
            return Err(PlayerError::MissingAnimation(state.clip().to_string()));
        }
        self.state = state;
        Ok(())
    }

    /// Try `state`, dropping to idle with a warning when its clip is missing
    pub fn set_state_or_idle(&mut self, state: AnimState) {
        if let Err(e) = self.set_state(state) {
            log::warn!("{}, staying in idle", e);
            self.state = AnimState::Idle;
        }
    }

    fn start_attack(&mut self, ctx: &mut Context<'_>) {
        self.next_action += 1;
        let cycle = AttackCycle { action: self.next_action, time: 0.0 };
        self.attack = Some(cycle);
        if let Err(e) = self.set_state(AnimState::Attack) {
            log::debug!("'{}' attacks without an animation: {}", ctx.name(), e);
        }
        Self::publish(cycle, ctx);
    }

    fn advance_attack(&mut self, dt: f32, ctx: &mut Context<'_>) {
        let Some(cycle) = self.attack.as_mut() else {
            return;
        };
        cycle.time += dt;
        let cycle = *cycle;
        Self::publish(cycle, ctx);
        if cycle.time >= self.params.attack_duration {
            self.attack = None;
            self.state = AnimState::Idle;
        }
    }

    fn publish(cycle: AttackCycle, ctx: &mut Context<'_>) {
        let phase = AnimationPhase { action: cycle.action, time: cycle.time };
        ctx.broadcast(Message::new(topics::PLAYER_ACTION, phase));
    }

    fn locomote(&mut self, intent: MoveIntent, dt: f32, ctx: &mut Context<'_>) {
        if !intent.is_moving() {
            if matches!(self.state, AnimState::Walk | AnimState::Run) {
                self.state = AnimState::Idle;
            }
            return;
        }

        let forward = ctx.rotation().forward().with_y(0.0).normalize_or_zero();
        let right = forward.cross(Vec3::Y);
        let direction = (forward * intent.forward + right * intent.strafe).normalize_or_zero();
        let (speed, state) = if intent.run {
            (self.params.run_speed, AnimState::Run)
        } else {
            (self.params.walk_speed, AnimState::Walk)
        };

        let position = ctx.position() + direction * (speed * dt);
        ctx.set_position(position);
        if self.set_state(state).is_err() {
            self.state = AnimState::Idle;
        }
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new(LocomotionParams::default())
    }
}

impl Component for CharacterController {
    fn capability(&self) -> Capability {
        Capability::CharacterController
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::MODEL_LOADED);
        ctx.subscribe(topics::MODEL_VISIBILITY);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        if let Some(loaded) = message.payload::<ModelLoaded>() {
            log::info!("'{}' model loaded with {} animations", ctx.name(), loaded.animations.len());
            self.animations = loaded.animations.clone();
        } else if let Some(visible) = message.payload::<bool>() {
            self.visible = *visible;
        }
    }

    fn has_update(&self) -> bool {
        true
    }

    fn update(&mut self, dt: f32, ctx: &mut Context<'_>) {
        if ctx.sibling::<SittingController>().is_some_and(SittingController::is_sitting) {
            return;
        }
        if self.attack.is_some() {
            self.advance_attack(dt, ctx);
            return;
        }

        let intent = ctx.sibling::<PlayerInput>().map(PlayerInput::intent).unwrap_or_default();
        if intent.attack {
            self.start_attack(ctx);
        } else {
            self.locomote(intent, dt, ctx);
        }
    }
}
