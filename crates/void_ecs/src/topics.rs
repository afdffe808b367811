//! Message topic vocabulary
//!
//! Every topic exchanged between components or with outside collaborators
//! (renderer, input, audio, UI) is named here. Payload types for topics that
//! cross crate boundaries live in [`crate::events`]; the comment on each
//! constant names the payload.

use crate::message::Topic;

// Transform notifications, emitted synchronously by set_position/set_rotation
/// `Vec3`
pub const UPDATE_POSITION: Topic = Topic::new("update.position");
/// `Quat`
pub const UPDATE_ROTATION: Topic = Topic::new("update.rotation");

// Health and progression
/// `void_combat::DamageInfo`
pub const HEALTH_DAMAGE: Topic = Topic::new("health.damage");
/// [`ExperienceGain`](crate::events::ExperienceGain)
pub const HEALTH_ADD_EXPERIENCE: Topic = Topic::new("health.add-experience");
/// [`HealthChanged`](crate::events::HealthChanged)
pub const HEALTH_UPDATE: Topic = Topic::new("health.update");
/// [`DeathNotice`](crate::events::DeathNotice)
pub const HEALTH_DEATH: Topic = Topic::new("health.death");
/// [`LevelGained`](crate::events::LevelGained)
pub const HEALTH_LEVEL_GAINED: Topic = Topic::new("health.levelGained");

// Quest tracking
/// [`KillNotice`](crate::events::KillNotice)
pub const QUEST_ENEMY_KILLED: Topic = Topic::new("quest.enemy-killed");
/// [`LevelGained`](crate::events::LevelGained)
pub const QUEST_LEVEL_GAINED: Topic = Topic::new("quest.level-gained");
/// `void_quest::QuestOffer`
pub const QUEST_OFFER: Topic = Topic::new("quest.offer");

// Inventory
/// [`ItemRef`](crate::events::ItemRef)
pub const INVENTORY_ADD: Topic = Topic::new("inventory.add");
/// [`ItemRef`](crate::events::ItemRef)
pub const INVENTORY_EQUIP: Topic = Topic::new("inventory.equip");

// Animation timing from the character to its attack controller
/// [`AnimationPhase`](crate::events::AnimationPhase)
pub const PLAYER_ACTION: Topic = Topic::new("player.action");

// Input edges, delivered to the player by the input collaborator
/// `void_player::KeyEvent`
pub const INPUT_KEY_DOWN: Topic = Topic::new("input.key-down");
/// `void_player::KeyEvent`
pub const INPUT_KEY_UP: Topic = Topic::new("input.key-up");
/// `bool`; false while the character is seated
pub const INPUT_MOVEMENT: Topic = Topic::new("input.movement-enabled");
/// [`PointerPick`](crate::events::PointerPick)
pub const INPUT_POINTER_PICK: Topic = Topic::new("input.pointer-pick");
/// [`Picked`](crate::events::Picked), sent to the picked entity
pub const INPUT_PICKED: Topic = Topic::new("input.picked");

// Modes
/// [`SeatToggle`](crate::events::SeatToggle)
pub const SIT_TOGGLE: Topic = Topic::new("sit.toggle");
/// no payload
pub const CAMERA_TOGGLE: Topic = Topic::new("camera.toggle");
/// [`LookDelta`](crate::events::LookDelta)
pub const CAMERA_LOOK: Topic = Topic::new("camera.look");
/// `f32` wheel delta
pub const CAMERA_ZOOM: Topic = Topic::new("camera.zoom");

// Asset and presentation collaborators
/// [`ModelLoaded`](crate::events::ModelLoaded)
pub const MODEL_LOADED: Topic = Topic::new("model.loaded");
/// `bool`
pub const MODEL_VISIBILITY: Topic = Topic::new("model.visibility");
/// [`AudioCue`](crate::events::AudioCue)
pub const AUDIO_LOADED: Topic = Topic::new("audio.loaded");
/// [`AudioCue`](crate::events::AudioCue)
pub const AUDIO_PLAY: Topic = Topic::new("audio.play");
/// [`AudioCue`](crate::events::AudioCue)
pub const AUDIO_STOP: Topic = Topic::new("audio.stop");
/// [`EffectRequest`](crate::events::EffectRequest)
pub const EFFECT_SPAWN: Topic = Topic::new("effect.spawn");

// UI controller
/// [`StatsSnapshot`](crate::events::StatsSnapshot)
pub const UI_STATS: Topic = Topic::new("ui.stats");
/// [`QuestNotice`](crate::events::QuestNotice)
pub const UI_QUEST_MESSAGE: Topic = Topic::new("ui.quest-message");
/// `void_quest::QuestSnapshot`
pub const UI_QUEST_JOURNAL: Topic = Topic::new("ui.quest-journal");
/// no payload
pub const UI_DEATH_SCREEN: Topic = Topic::new("ui.death-screen");
/// no payload
pub const UI_COMPLETION_SCREEN: Topic = Topic::new("ui.completion-screen");
/// [`InteractionPrompt`](crate::events::InteractionPrompt)
pub const UI_INTERACTION: Topic = Topic::new("ui.interaction");
/// no payload
pub const UI_TOGGLE_INVENTORY: Topic = Topic::new("ui.toggle-inventory");
/// no payload
pub const UI_TOGGLE_STATS: Topic = Topic::new("ui.toggle-stats");
/// no payload
pub const UI_TOGGLE_QUESTS: Topic = Topic::new("ui.toggle-quests");
/// no payload
pub const UI_HIDE_QUEST_PANEL: Topic = Topic::new("ui.hide-quest-panel");
