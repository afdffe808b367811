//! Sitting mode

use crate::character::{AnimState, CharacterController};
use crate::error::PlayerError;
use void_ecs::prelude::*;

/// Seat position relative to the chair, in the chair's frame
pub const SEAT_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.5);
/// Height the character sits at
pub const SEAT_HEIGHT: f32 = 0.35;

const SITTING_PROMPT: &str = "Relaxing... Press E to stand up";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SeatState {
    #[default]
    Standing,
    Sitting {
        seat: EntityId,
        /// Where the character is pinned while seated
        position: Vec3,
    },
}

/// Where a character sits on a chair at `transform`
pub fn seat_position(chair: Transform) -> Vec3 {
    (chair.position + chair.rotation.rotate(SEAT_OFFSET)).with_y(SEAT_HEIGHT)
}

/// Handles `sit.toggle`: sits on the given seat, or stands up when already
/// seated. Tracks `audio.loaded` for the ambient track.
#[derive(Debug, Clone, Default)]
pub struct SittingController {
    state: SeatState,
    /// Where to return on standing up
    original_position: Option<Vec3>,
    music_loaded: bool,
}

impl SittingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SeatState {
        self.state
    }

    pub fn is_sitting(&self) -> bool {
        matches!(self.state, SeatState::Sitting { .. })
    }

    pub fn sit(&mut self, seat: EntityId, ctx: &mut Context<'_>) -> Result<(), PlayerError> {
        if self.is_sitting() {
            return Ok(());
        }
        let chair = ctx
            .manager()
            .transform(seat)
            .ok_or_else(|| PlayerError::SeatGone(seat.to_string()))?;
        let position = seat_position(chair);

        self.original_position = Some(ctx.position());
        self.state = SeatState::Sitting { seat, position };
        ctx.set_position(position);
        ctx.set_rotation(chair.rotation);

        // The input component is usually the one that asked us to sit
        ctx.broadcast(Message::new(topics::INPUT_MOVEMENT, false));
        animate(ctx, AnimState::Sit);

        if self.music_loaded {
            ctx.broadcast(Message::new(topics::AUDIO_PLAY, AudioCue::AmbientMusic));
        } else {
            log::warn!("{}", PlayerError::AudioNotLoaded(format!("{:?}", AudioCue::AmbientMusic)));
        }

        let prompt = InteractionPrompt { text: Some(SITTING_PROMPT.to_string()) };
        ctx.send_to_service(Service::Ui, Message::new(topics::UI_INTERACTION, prompt));
        log::info!("'{}' sat down", ctx.name());
        Ok(())
    }

    pub fn stand(&mut self, ctx: &mut Context<'_>) {
        if !self.is_sitting() {
            return;
        }
        self.state = SeatState::Standing;
        if let Some(position) = self.original_position.take() {
            ctx.set_position(position);
        }

        ctx.broadcast(Message::new(topics::INPUT_MOVEMENT, true));
        animate(ctx, AnimState::Idle);

        ctx.broadcast(Message::new(topics::AUDIO_STOP, AudioCue::AmbientMusic));
        ctx.send_to_service(Service::Ui, Message::new(topics::UI_INTERACTION, InteractionPrompt { text: None }));
        log::info!("'{}' stood up", ctx.name());
    }
}

fn animate(ctx: &mut Context<'_>, state: AnimState) {
    match ctx.sibling_mut::<CharacterController>() {
        Some(character) => character.set_state_or_idle(state),
        None => log::warn!("'{}' has no idle character controller to play {:?}", ctx.name(), state),
    }
}

impl Component for SittingController {
    fn capability(&self) -> Capability {
        Capability::Sitting
    }

    fn requires(&self) -> &'static [Capability] {
        &[Capability::CharacterController]
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::SIT_TOGGLE);
        ctx.subscribe(topics::AUDIO_LOADED);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        if message.is(topics::AUDIO_LOADED) {
            if message.payload::<AudioCue>() == Some(&AudioCue::AmbientMusic) {
                log::debug!("ambient music ready for '{}'", ctx.name());
                self.music_loaded = true;
            }
            return;
        }
        let Some(toggle) = message.payload::<SeatToggle>() else {
            return;
        };
        if self.is_sitting() {
            self.stand(ctx);
        } else if let Some(seat) = toggle.seat {
            if let Err(e) = self.sit(seat, ctx) {
                log::warn!("'{}' could not sit: {}", ctx.name(), e);
            }
        }
    }

    fn has_update(&self) -> bool {
        true
    }

    fn update(&mut self, _dt: f32, ctx: &mut Context<'_>) {
        if let SeatState::Sitting { position, .. } = self.state {
            if ctx.position() != position {
                ctx.set_position(position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyEvent, PlayerInput};
    use crate::interact::Interactable;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use void_math::consts::PI;
    use void_spatial::{EntityGrid, GridConfig, SpatialGridController};

    type Seen = Rc<RefCell<Vec<Message>>>;

    struct Recorder(Seen);

    impl Component for Recorder {
        fn capability(&self) -> Capability {
            Capability::Custom("recorder")
        }

        fn init(&mut self, ctx: &mut Context<'_>) {
            ctx.subscribe(topics::AUDIO_PLAY);
            ctx.subscribe(topics::AUDIO_STOP);
            ctx.subscribe(topics::UI_INTERACTION);
        }

        fn on_message(&mut self, message: &Message, _ctx: &mut Context<'_>) {
            self.0.borrow_mut().push(message.clone());
        }
    }

    struct World {
        manager: EntityManager,
        player: EntityId,
        chair: EntityId,
        audio: Seen,
        ui: Seen,
    }

    fn world() -> World {
        let mut manager = EntityManager::new();
        manager.insert_resource(EntityGrid::new(GridConfig::default()));

        let ui = Seen::default();
        let ui_id = manager.add(Entity::new().with_component(Recorder(ui.clone())).unwrap(), Some("ui")).unwrap();
        manager.services_mut().register(Service::Ui, ui_id);

        let chair = Entity::at(Vec3::new(3.0, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_y(PI))
            .with_component(SpatialGridController::new())
            .unwrap()
            .with_component(Interactable::chair())
            .unwrap();
        let chair = manager.add(chair, Some("chair")).unwrap();

        let audio = Seen::default();
        let player = Entity::at(Vec3::new(1.0, 0.0, 1.0))
            .with_component(SpatialGridController::new())
            .unwrap()
            .with_component(PlayerInput::new())
            .unwrap()
            .with_component(CharacterController::default())
            .unwrap()
            .with_component(SittingController::new())
            .unwrap()
            .with_component(Recorder(audio.clone()))
            .unwrap();
        let player = manager.add(player, Some("player")).unwrap();
        World { manager, player, chair, audio, ui }
    }

    fn interact(w: &mut World) {
        w.manager.send(w.player, Message::new(topics::INPUT_KEY_DOWN, KeyEvent::new(Key::Interact)));
        w.manager.send(w.player, Message::new(topics::INPUT_KEY_UP, KeyEvent::new(Key::Interact)));
    }

    fn sitting(w: &World) -> &SittingController {
        w.manager.component::<SittingController>(w.player).unwrap()
    }

    #[test]
    fn test_requires_character_controller() {
        let mut manager = EntityManager::new();
        let entity = Entity::new().with_component(SittingController::new()).unwrap();
        assert!(manager.add(entity, None).is_err());
    }

    #[test]
    fn test_sit_and_stand_round_trip() {
        let mut w = world();
        interact(&mut w);
        assert!(matches!(sitting(&w).state(), SeatState::Sitting { seat, .. } if seat == w.chair));

        let position = w.manager.position(w.player).unwrap();
        assert_relative_eq!(position.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(position.y, SEAT_HEIGHT, epsilon = 1e-5);
        assert_relative_eq!(position.z, -0.5, epsilon = 1e-5);
        assert_eq!(w.manager.rotation(w.player), w.manager.rotation(w.chair));
        assert!(!w.manager.component::<PlayerInput>(w.player).unwrap().movement_enabled());
        // No sit clip loaded
        assert_eq!(w.manager.component::<CharacterController>(w.player).unwrap().state(), AnimState::Idle);

        interact(&mut w);
        assert!(!sitting(&w).is_sitting());
        assert_eq!(w.manager.position(w.player), Some(Vec3::new(1.0, 0.0, 1.0)));
        assert!(w.manager.component::<PlayerInput>(w.player).unwrap().movement_enabled());

        let prompts: Vec<Option<String>> =
            w.ui.borrow().iter().filter_map(|m| m.payload::<InteractionPrompt>().map(|p| p.text.clone())).collect();
        assert_eq!(prompts, vec![Some(SITTING_PROMPT.to_string()), None]);
    }

    #[test]
    fn test_sitting_again_uses_the_same_seat() {
        let mut w = world();
        interact(&mut w);
        let first = w.manager.position(w.player).unwrap();

        interact(&mut w);
        assert!(w.manager.component::<PlayerInput>(w.player).unwrap().movement_enabled());
        w.manager.set_position(w.player, Vec3::new(2.0, 0.0, -1.0));

        interact(&mut w);
        assert!(sitting(&w).is_sitting());
        assert_eq!(w.manager.position(w.player), Some(first));
        assert!(!w.manager.component::<PlayerInput>(w.player).unwrap().movement_enabled());

        interact(&mut w);
        assert_eq!(w.manager.position(w.player), Some(Vec3::new(2.0, 0.0, -1.0)));
    }

    #[test]
    fn test_music_waits_for_load() {
        let mut w = world();
        interact(&mut w);
        interact(&mut w);
        let plays = |w: &World| w.audio.borrow().iter().filter(|m| m.is(topics::AUDIO_PLAY)).count();
        assert_eq!(plays(&w), 0);

        w.manager.send(w.player, Message::new(topics::AUDIO_LOADED, AudioCue::AmbientMusic));
        interact(&mut w);
        assert_eq!(plays(&w), 1);
    }

    #[test]
    fn test_sit_clip_used_when_loaded() {
        let mut w = world();
        let loaded = ModelLoaded { animations: vec!["idle".into(), "sit".into()] };
        w.manager.send(w.player, Message::new(topics::MODEL_LOADED, loaded));
        interact(&mut w);
        assert_eq!(w.manager.component::<CharacterController>(w.player).unwrap().state(), AnimState::Sit);
    }

    #[test]
    fn test_pinned_while_seated() {
        let mut w = world();
        interact(&mut w);
        w.manager.send(w.player, Message::new(topics::INPUT_KEY_DOWN, KeyEvent::new(Key::Forward)));
        w.manager.set_position(w.player, Vec3::new(9.0, 0.0, 9.0));
        w.manager.update(1.0 / 30.0);
        let position = w.manager.position(w.player).unwrap();
        assert_relative_eq!(position.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(position.z, -0.5, epsilon = 1e-5);
    }
}
