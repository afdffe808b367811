//! Keyboard and pointer input for the player

use crate::interact::{Interactable, InteractionKind};
use crate::sitting::SittingController;
use std::collections::HashSet;
use void_ecs::prelude::*;
use void_spatial::SpatialGridController;

/// How far the interact key reaches
pub const INTERACT_RANGE: f32 = 5.0;

/// Logical keys. The input collaborator maps device codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Attack,
    Run,
    CameraToggle,
    Inventory,
    Quests,
    Stats,
    Interact,
}

impl Key {
    /// Browser-style key codes (W A S D, space, shift, C I Q F E)
    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            87 => Key::Forward,
            65 => Key::Left,
            83 => Key::Backward,
            68 => Key::Right,
            32 => Key::Attack,
            16 => Key::Run,
            67 => Key::CameraToggle,
            73 => Key::Inventory,
            81 => Key::Quests,
            70 => Key::Stats,
            69 => Key::Interact,
            _ => return None,
        })
    }
}

/// Payload of `input.key-down` and `input.key-up`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key }
    }
}

/// Movement the player is asking for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    /// +1 forward, -1 backward
    pub forward: f32,
    /// +1 right, -1 left
    pub strafe: f32,
    pub run: bool,
    pub attack: bool,
}

impl MoveIntent {
    pub fn is_moving(&self) -> bool {
        self.forward != 0.0 || self.strafe != 0.0
    }
}

/// Tracks held keys and turns key-down edges into actions
#[derive(Debug, Clone)]
pub struct PlayerInput {
    held: HashSet<Key>,
    movement_enabled: bool,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self {
            held: HashSet::new(),
            movement_enabled: true,
        }
    }
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn movement_enabled(&self) -> bool {
        self.movement_enabled
    }

    /// Sitting turns movement off
    pub fn set_movement_enabled(&mut self, enabled: bool) {
        self.movement_enabled = enabled;
    }

    /// Current intent; nothing while movement is disabled
    pub fn intent(&self) -> MoveIntent {
        if !self.movement_enabled {
            return MoveIntent::default();
        }
        let axis = |positive: Key, negative: Key| {
            (self.is_held(positive) as i32 - self.is_held(negative) as i32) as f32
        };
        MoveIntent {
            forward: axis(Key::Forward, Key::Backward),
            strafe: axis(Key::Right, Key::Left),
            run: self.is_held(Key::Run),
            attack: self.is_held(Key::Attack),
        }
    }

    fn on_key_down(&mut self, key: Key, ctx: &mut Context<'_>) {
        // Repeats while held are not edges
        if !self.held.insert(key) {
            return;
        }
        match key {
            Key::CameraToggle => {
                ctx.send_to_service(Service::Camera, Message::signal(topics::CAMERA_TOGGLE));
            }
            Key::Inventory => {
                ctx.send_to_service(Service::Ui, Message::signal(topics::UI_TOGGLE_INVENTORY));
            }
            Key::Quests => {
                ctx.send_to_service(Service::Ui, Message::signal(topics::UI_TOGGLE_QUESTS));
            }
            Key::Stats => {
                ctx.send_to_service(Service::Ui, Message::signal(topics::UI_TOGGLE_STATS));
            }
            Key::Interact => Self::interact(ctx),
            _ => {}
        }
    }

    /// Stand up if sitting, otherwise sit on the closest chair in reach
    fn interact(ctx: &mut Context<'_>) {
        if ctx.sibling::<SittingController>().is_some_and(SittingController::is_sitting) {
            ctx.broadcast(Message::new(topics::SIT_TOGGLE, SeatToggle { seat: None }));
            return;
        }

        let me = ctx.entity();
        let chair = SpatialGridController::find_nearby(ctx, INTERACT_RANGE)
            .into_iter()
            .filter(|hit| hit.item != me)
            .filter(|hit| {
                ctx.component::<Interactable>(hit.item)
                    .is_some_and(|i| i.kind == InteractionKind::Chair)
            })
            .filter(|hit| hit.distance_squared < INTERACT_RANGE * INTERACT_RANGE)
            .min_by(|a, b| a.distance_squared.total_cmp(&b.distance_squared));

        match chair {
            Some(hit) => {
                log::debug!("'{}' interacts with chair {}", ctx.name(), hit.item);
                ctx.broadcast(Message::new(topics::SIT_TOGGLE, SeatToggle { seat: Some(hit.item) }));
            }
            None => log::debug!("nothing to interact with near '{}'", ctx.name()),
        }
    }

    fn on_pick(&mut self, pick: &PointerPick, ctx: &mut Context<'_>) {
        ctx.send_to_service(Service::Ui, Message::signal(topics::UI_HIDE_QUEST_PANEL));
        let Some(target) = pick.target else {
            return;
        };
        if ctx.has_capability(target, Capability::Pickable) {
            let me = ctx.entity();
            ctx.send(target, Message::new(topics::INPUT_PICKED, Picked { by: me }));
        }
    }
}

impl Component for PlayerInput {
    fn capability(&self) -> Capability {
        Capability::CharacterInput
    }

    fn requires(&self) -> &'static [Capability] {
        &[Capability::Spatial]
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::INPUT_KEY_DOWN);
        ctx.subscribe(topics::INPUT_KEY_UP);
        ctx.subscribe(topics::INPUT_POINTER_PICK);
        ctx.subscribe(topics::INPUT_MOVEMENT);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        if let Some(pick) = message.payload::<PointerPick>() {
            self.on_pick(pick, ctx);
            return;
        }
        if message.is(topics::INPUT_MOVEMENT) {
            if let Some(enabled) = message.payload::<bool>() {
                log::debug!("'{}' movement {}", ctx.name(), if *enabled { "enabled" } else { "disabled" });
                self.set_movement_enabled(*enabled);
            }
            return;
        }
        let Some(event) = message.payload::<KeyEvent>() else {
            return;
        };
        if message.is(topics::INPUT_KEY_DOWN) {
            self.on_key_down(event.key, ctx);
        } else {
            self.held.remove(&event.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::Pickable;
    use std::cell::RefCell;
    use std::rc::Rc;
    use void_spatial::{EntityGrid, GridConfig};

    type Seen = Rc<RefCell<Vec<Message>>>;

    struct Recorder {
        topics: &'static [Topic],
        seen: Seen,
    }

    impl Component for Recorder {
        fn capability(&self) -> Capability {
            Capability::Custom("recorder")
        }

        fn init(&mut self, ctx: &mut Context<'_>) {
            for topic in self.topics {
                ctx.subscribe(*topic);
            }
        }

        fn on_message(&mut self, message: &Message, _ctx: &mut Context<'_>) {
            self.seen.borrow_mut().push(message.clone());
        }
    }

    const UI_TOPICS: &[Topic] = &[
        topics::UI_TOGGLE_INVENTORY,
        topics::UI_TOGGLE_QUESTS,
        topics::UI_TOGGLE_STATS,
        topics::UI_HIDE_QUEST_PANEL,
    ];

    struct World {
        manager: EntityManager,
        player: EntityId,
        ui: Seen,
        sits: Seen,
    }

    fn world() -> World {
        let mut manager = EntityManager::new();
        manager.insert_resource(EntityGrid::new(GridConfig::default()));
        let ui = Seen::default();
        let ui_id = manager
            .add(Entity::new().with_component(Recorder { topics: UI_TOPICS, seen: ui.clone() }).unwrap(), Some("ui"))
            .unwrap();
        manager.services_mut().register(Service::Ui, ui_id);

        let sits = Seen::default();
        let player = Entity::at(Vec3::ZERO)
            .with_component(SpatialGridController::new())
            .unwrap()
            .with_component(PlayerInput::new())
            .unwrap()
            .with_component(Recorder { topics: &[topics::SIT_TOGGLE], seen: sits.clone() })
            .unwrap();
        let player = manager.add(player, Some("player")).unwrap();
        World { manager, player, ui, sits }
    }

    fn chair(w: &mut World, name: &str, position: Vec3) -> EntityId {
        let entity = Entity::at(position)
            .with_component(SpatialGridController::new())
            .unwrap()
            .with_component(Interactable::chair())
            .unwrap();
        w.manager.add(entity, Some(name)).unwrap()
    }

    fn key(w: &mut World, topic: Topic, key: Key) {
        w.manager.send(w.player, Message::new(topic, KeyEvent::new(key)));
    }

    fn seats(seen: &Seen) -> Vec<Option<EntityId>> {
        seen.borrow().iter().filter_map(|m| m.payload::<SeatToggle>().map(|t| t.seat)).collect()
    }

    #[test]
    fn test_toggle_keys_are_edge_triggered() {
        let mut w = world();
        key(&mut w, topics::INPUT_KEY_DOWN, Key::Quests);
        key(&mut w, topics::INPUT_KEY_DOWN, Key::Quests);
        key(&mut w, topics::INPUT_KEY_DOWN, Key::Quests);
        assert_eq!(w.ui.borrow().len(), 1);

        key(&mut w, topics::INPUT_KEY_UP, Key::Quests);
        key(&mut w, topics::INPUT_KEY_DOWN, Key::Quests);
        key(&mut w, topics::INPUT_KEY_DOWN, Key::Stats);
        let ui = w.ui.borrow();
        assert_eq!(ui.len(), 3);
        assert!(ui[2].is(topics::UI_TOGGLE_STATS));
    }

    #[test]
    fn test_interact_picks_closest_chair_in_reach() {
        let mut w = world();
        let _far = chair(&mut w, "far", Vec3::new(0.0, 0.0, 4.0));
        let near = chair(&mut w, "near", Vec3::new(2.0, 0.0, 0.0));
        let _out = chair(&mut w, "out", Vec3::new(6.0, 0.0, 0.0));

        key(&mut w, topics::INPUT_KEY_DOWN, Key::Interact);
        assert_eq!(seats(&w.sits), vec![Some(near)]);
    }

    #[test]
    fn test_interact_with_nothing_nearby() {
        let mut w = world();
        chair(&mut w, "out", Vec3::new(0.0, 0.0, 5.5));
        key(&mut w, topics::INPUT_KEY_DOWN, Key::Interact);
        assert!(seats(&w.sits).is_empty());
    }

    #[test]
    fn test_intent_and_disable() {
        let mut w = world();
        key(&mut w, topics::INPUT_KEY_DOWN, Key::Forward);
        key(&mut w, topics::INPUT_KEY_DOWN, Key::Left);
        key(&mut w, topics::INPUT_KEY_DOWN, Key::Run);
        let input = w.manager.component_mut::<PlayerInput>(w.player).unwrap();
        assert_eq!(input.intent(), MoveIntent { forward: 1.0, strafe: -1.0, run: true, attack: false });

        input.set_movement_enabled(false);
        assert!(!input.intent().is_moving());
    }

    #[test]
    fn test_movement_toggle_message() {
        let mut w = world();
        key(&mut w, topics::INPUT_KEY_DOWN, Key::Forward);
        w.manager.send(w.player, Message::new(topics::INPUT_MOVEMENT, false));
        let input = w.manager.component::<PlayerInput>(w.player).unwrap();
        assert!(!input.movement_enabled());
        assert_eq!(input.intent(), MoveIntent::default());

        w.manager.send(w.player, Message::new(topics::INPUT_MOVEMENT, true));
        assert_eq!(w.manager.component::<PlayerInput>(w.player).unwrap().intent().forward, 1.0);
    }

    #[test]
    fn test_pointer_pick() {
        let mut w = world();
        let seen = Seen::default();
        let npc = Entity::new()
            .with_component(Pickable)
            .unwrap()
            .with_component(Recorder { topics: &[topics::INPUT_PICKED], seen: seen.clone() })
            .unwrap();
        let npc = w.manager.add(npc, Some("girl")).unwrap();
        let rock = w.manager.add(Entity::new(), Some("rock")).unwrap();

        for target in [Some(rock), None, Some(npc)] {
            w.manager.send(w.player, Message::new(topics::INPUT_POINTER_PICK, PointerPick { target }));
        }

        let picks: Vec<EntityId> = seen.borrow().iter().filter_map(|m| m.payload::<Picked>().map(|p| p.by)).collect();
        assert_eq!(picks, vec![w.player]);
        let hides = w.ui.borrow().iter().filter(|m| m.is(topics::UI_HIDE_QUEST_PANEL)).count();
        assert_eq!(hides, 3);
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code(69), Some(Key::Interact));
        assert_eq!(Key::from_code(87), Some(Key::Forward));
        assert_eq!(Key::from_code(13), None);
    }
}
