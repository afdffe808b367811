//! Simulation - owns the entity manager, the frame clock and the loaders

use crate::assets::AssetLoader;
use crate::config::RuntimeConfig;
use crate::environment::DayNightCycle;
use crate::error::Result;
use crate::world::{self, World};
use void_core::{FrameClock, FrameTime};
use void_ecs::prelude::*;
use void_hud::UiController;
use void_player::{Key, KeyEvent};
use void_quest::QuestBook;
use void_spatial::EntityGrid;

/// The running game world
pub struct Simulation {
    manager: EntityManager,
    clock: FrameClock,
    world: World,
    loader: Option<AssetLoader>,
}

impl Simulation {
    /// Build the world described by `config`
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        let quests = match &config.quests {
            Some(path) => {
                log::info!("loading quests from {}", path.display());
                QuestBook::load(path)?
            }
            None => QuestBook::default(),
        };
        Self::with_quests(config, quests)
    }

    /// Build the world with an explicit quest catalog
    pub fn with_quests(config: &RuntimeConfig, quests: QuestBook) -> Result<Self> {
        log::info!("creating simulation (seed {})", config.seed);
        let mut manager = EntityManager::new();
        manager.insert_resource(EntityGrid::new(config.grid));
        let world = world::build_world(&mut manager, config, quests)?;

        Ok(Self {
            manager,
            clock: FrameClock::new(config.clock.max_delta),
            world,
            loader: None,
        })
    }

    /// Start the background loader and request the player's assets.
    /// Results arrive on a later tick.
    pub fn start_loading(&mut self) -> std::io::Result<()> {
        let loader = AssetLoader::spawn(self.manager.completion_sender())?;
        loader.request_player_assets(self.world.player);
        self.loader = Some(loader);
        Ok(())
    }

    /// Advance one tick from the wall-clock time since the previous one
    pub fn tick(&mut self, elapsed: f32) -> FrameTime {
        let time = self.clock.begin_frame(elapsed);
        self.manager.update(time.delta);
        time
    }

    /// Run fixed steps until `seconds` of simulated time have passed
    pub fn run_for(&mut self, seconds: f32, step: f32) -> FrameTime {
        let target = self.clock.current().total + seconds as f64;
        while self.clock.current().total < target {
            self.tick(step);
        }
        self.clock.current()
    }

    /// Stop the loader, waiting for queued loads
    pub fn shutdown(&mut self) {
        if let Some(mut loader) = self.loader.take() {
            let served = loader.shutdown();
            log::info!("asset loader served {} requests", served);
        }
    }

    pub fn manager(&self) -> &EntityManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut EntityManager {
        &mut self.manager
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn ui(&self) -> Option<&UiController> {
        self.manager.component::<UiController>(self.world.ui)
    }

    pub fn environment(&self) -> Option<&DayNightCycle> {
        self.manager.component::<DayNightCycle>(self.world.environment)
    }

    // ========== Input collaborator ==========

    pub fn key_down(&mut self, key: Key) {
        self.manager.send(self.world.player, Message::new(topics::INPUT_KEY_DOWN, KeyEvent::new(key)));
    }

    pub fn key_up(&mut self, key: Key) {
        self.manager.send(self.world.player, Message::new(topics::INPUT_KEY_UP, KeyEvent::new(key)));
    }

    /// Press and release
    pub fn press(&mut self, key: Key) {
        self.key_down(key);
        self.key_up(key);
    }

    /// Pointer pick under the cursor, `None` for empty space
    pub fn pick(&mut self, target: Option<EntityId>) {
        self.manager.send(self.world.player, Message::new(topics::INPUT_POINTER_PICK, PointerPick { target }));
    }

    pub fn look(&mut self, dx: f32, dy: f32) {
        self.manager.send(self.world.camera, Message::new(topics::CAMERA_LOOK, LookDelta { dx, dy }));
    }

    pub fn zoom(&mut self, delta: f32) {
        self.manager.send(self.world.camera, Message::new(topics::CAMERA_ZOOM, delta));
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.shutdown();
    }
}
