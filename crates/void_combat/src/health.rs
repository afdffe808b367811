//! Health and progression

use crate::damage::DamageInfo;
use serde::{Deserialize, Serialize};
use void_ecs::prelude::*;

/// Health gained, and healed, on every level-up
pub const LEVEL_UP_HEALTH: f32 = 50.0;

/// Experience granted to the killer per level of the victim
pub const KILL_EXPERIENCE_PER_LEVEL: u32 = 100;

/// Cumulative experience needed to leave `level`
pub fn xp_requirement(level: u32) -> u32 {
    match level {
        1 => 300,
        2 => 800,
        3 => 1500,
        4 => 2500,
        5 => 4000,
        6 => 6000,
        7 => 8500,
        8 => 11500,
        9 => 15000,
        10 => 20000,
        _ => 20000 + level.saturating_sub(10) * 5000,
    }
}

/// Stat block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthStats {
    pub health: f32,
    pub max_health: f32,
    pub strength: f32,
    pub wisdomness: f32,
    pub benchpress: f32,
    pub curl: f32,
    pub experience: u32,
    pub level: u32,
}

impl Default for HealthStats {
    fn default() -> Self {
        Self {
            health: 100.0,
            max_health: 100.0,
            strength: 1.0,
            wisdomness: 1.0,
            benchpress: 1.0,
            curl: 1.0,
            experience: 0,
            level: 1,
        }
    }
}

impl HealthStats {
    /// Full health at `max_health`
    pub fn with_health(mut self, max_health: f32) -> Self {
        self.health = max_health;
        self.max_health = max_health;
        self
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            health: self.health,
            max_health: self.max_health,
            strength: self.strength,
            wisdomness: self.wisdomness,
            benchpress: self.benchpress,
            curl: self.curl,
            experience: self.experience,
            level: self.level,
        }
    }
}

/// One-way life state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vitality {
    Alive,
    Dead,
}

/// Takes damage, dies once, and levels up from experience.
///
/// Handles `health.damage` and `health.add-experience`; always broadcasts
/// `health.update` after damage.
#[derive(Debug, Clone)]
pub struct HealthComponent {
    stats: HealthStats,
    vitality: Vitality,
    /// Reported as the enemy type in kill notifications
    kind: Option<String>,
    /// Mirrors stats to the UI service and shows its death screen
    ui_bound: bool,
}

impl HealthComponent {
    pub fn new(stats: HealthStats) -> Self {
        let vitality = if stats.health > 0.0 { Vitality::Alive } else { Vitality::Dead };
        Self {
            stats,
            vitality,
            kind: None,
            ui_bound: false,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn ui_bound(mut self) -> Self {
        self.ui_bound = true;
        self
    }

    pub fn stats(&self) -> &HealthStats {
        &self.stats
    }

    pub fn health(&self) -> f32 {
        self.stats.health
    }

    pub fn max_health(&self) -> f32 {
        self.stats.max_health
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    pub fn experience(&self) -> u32 {
        self.stats.experience
    }

    pub fn vitality(&self) -> Vitality {
        self.vitality
    }

    pub fn is_alive(&self) -> bool {
        self.vitality == Vitality::Alive
    }

    fn on_damage(&mut self, damage: &DamageInfo, ctx: &mut Context<'_>) {
        self.stats.health = (self.stats.health - damage.amount).max(0.0);
        if self.stats.health == 0.0 && self.vitality == Vitality::Alive {
            self.vitality = Vitality::Dead;
            self.on_death(damage.attacker, ctx);
        }

        ctx.broadcast(Message::new(
            topics::HEALTH_UPDATE,
            HealthChanged { health: self.stats.health, max_health: self.stats.max_health },
        ));
        self.push_stats(ctx);
    }

    fn on_death(&mut self, attacker: Option<EntityId>, ctx: &mut Context<'_>) {
        log::info!("'{}' died (level {})", ctx.name(), self.stats.level);
        ctx.broadcast(Message::new(topics::AUDIO_PLAY, AudioCue::Death));

        if let Some(attacker) = attacker {
            let reward = ExperienceGain { amount: self.stats.level * KILL_EXPERIENCE_PER_LEVEL };
            ctx.send(attacker, Message::new(topics::HEALTH_ADD_EXPERIENCE, reward));

            if ctx.manager().services().is(Service::Player, attacker) {
                let notice = KillNotice {
                    enemy_type: self.kind.clone().unwrap_or_else(|| "any".to_string()),
                    level: self.stats.level,
                };
                ctx.send_to_service(Service::QuestManager, Message::new(topics::QUEST_ENEMY_KILLED, notice));
            }
        }

        ctx.broadcast(Message::new(topics::HEALTH_DEATH, DeathNotice { killer: attacker }));

        if self.ui_bound {
            ctx.send_to_service(Service::Ui, Message::signal(topics::UI_DEATH_SCREEN));
        }
    }

    fn on_add_experience(&mut self, gain: &ExperienceGain, ctx: &mut Context<'_>) {
        self.stats.experience += gain.amount;
        // One level per award, however far past the threshold it lands
        if self.stats.experience >= xp_requirement(self.stats.level) {
            self.level_up(ctx);
        }
        self.push_stats(ctx);
    }

    fn level_up(&mut self, ctx: &mut Context<'_>) {
        let stats = &mut self.stats;
        stats.level += 1;
        stats.strength += 1.0;
        stats.wisdomness += 1.0;
        stats.benchpress += 1.0;
        stats.curl += 2.0;
        stats.max_health += LEVEL_UP_HEALTH;
        stats.health = (stats.health + LEVEL_UP_HEALTH).min(stats.max_health);
        let level = stats.level;
        log::info!("'{}' reached level {}", ctx.name(), level);

        let effect = EffectRequest { kind: EffectKind::LevelUp, position: ctx.position() };
        ctx.send_to_service(Service::LevelUpSpawner, Message::new(topics::EFFECT_SPAWN, effect));

        ctx.broadcast(Message::new(topics::HEALTH_LEVEL_GAINED, LevelGained { level }));

        if ctx.is_service(Service::Player) {
            ctx.send_to_service(Service::QuestManager, Message::new(topics::QUEST_LEVEL_GAINED, LevelGained { level }));
        }
    }

    fn push_stats(&self, ctx: &mut Context<'_>) {
        if self.ui_bound {
            ctx.send_to_service(Service::Ui, Message::new(topics::UI_STATS, self.stats.snapshot()));
        }
    }
}

impl Component for HealthComponent {
    fn capability(&self) -> Capability {
        Capability::Health
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::HEALTH_DAMAGE);
        ctx.subscribe(topics::HEALTH_ADD_EXPERIENCE);
        self.push_stats(ctx);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        if let Some(damage) = message.payload::<DamageInfo>() {
            self.on_damage(damage, ctx);
        } else if let Some(gain) = message.payload::<ExperienceGain>() {
            self.on_add_experience(gain, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records topics it is subscribed to
    struct Recorder {
        topics: &'static [Topic],
        seen: Rc<RefCell<Vec<Message>>>,
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

    type Seen = Rc<RefCell<Vec<Message>>>;

    fn count(seen: &Seen, topic: Topic) -> usize {
        seen.borrow().iter().filter(|m| m.is(topic)).count()
    }

    const VICTIM_TOPICS: &[Topic] = &[topics::HEALTH_DEATH, topics::HEALTH_UPDATE, topics::AUDIO_PLAY];
    const QUEST_TOPICS: &[Topic] = &[topics::QUEST_ENEMY_KILLED, topics::QUEST_LEVEL_GAINED];

    struct World {
        manager: EntityManager,
        player: EntityId,
        victim: EntityId,
        victim_seen: Seen,
        quest_seen: Seen,
    }

    fn world() -> World {
        let mut manager = EntityManager::new();
        let quest_seen = Seen::default();
        let quests = manager
            .add(Entity::new().with_component(Recorder { topics: QUEST_TOPICS, seen: quest_seen.clone() }).unwrap(), Some("quest-manager"))
            .unwrap();
        manager.services_mut().register(Service::QuestManager, quests);

        let player = manager
            .add(Entity::new().with_component(HealthComponent::new(HealthStats::default().with_health(300.0))).unwrap(), Some("player"))
            .unwrap();
        manager.services_mut().register(Service::Player, player);

        let victim_seen = Seen::default();
        let victim = Entity::new()
            .with_component(HealthComponent::new(HealthStats::default().with_health(200.0).with_level(2)))
            .unwrap()
            .with_component(Recorder { topics: VICTIM_TOPICS, seen: victim_seen.clone() })
            .unwrap();
        let victim = manager.add(victim, Some("monster")).unwrap();

        World { manager, player, victim, victim_seen, quest_seen }
    }

    fn hit(world: &mut World, amount: f32) {
        let damage = DamageInfo::new(amount).with_attacker(world.player);
        world.manager.send(world.victim, Message::new(topics::HEALTH_DAMAGE, damage));
    }

    #[test]
    fn test_xp_curve() {
        assert_eq!(xp_requirement(1), 300);
        assert_eq!(xp_requirement(5), 4000);
        assert_eq!(xp_requirement(10), 20000);
        assert_eq!(xp_requirement(11), 25000);
        assert_eq!(xp_requirement(14), 40000);
    }

    #[test]
    fn test_health_never_negative_and_death_once() {
        let mut w = world();
        for amount in [150.0, 80.0, 30.0, 500.0] {
            hit(&mut w, amount);
            let health = w.manager.component::<HealthComponent>(w.victim).unwrap().health();
            assert!(health >= 0.0);
        }
        assert_eq!(count(&w.victim_seen, topics::HEALTH_DEATH), 1);
        assert_eq!(count(&w.victim_seen, topics::AUDIO_PLAY), 1);
        assert_eq!(count(&w.victim_seen, topics::HEALTH_UPDATE), 4);
        assert!(!w.manager.component::<HealthComponent>(w.victim).unwrap().is_alive());
    }

    #[test]
    fn test_death_fires_on_first_zero() {
        let mut w = world();
        hit(&mut w, 199.0);
        assert_eq!(count(&w.victim_seen, topics::HEALTH_DEATH), 0);
        hit(&mut w, 1.0);
        assert_eq!(count(&w.victim_seen, topics::HEALTH_DEATH), 1);
    }

    #[test]
    fn test_kill_rewards_player_and_notifies_quests() {
        let mut w = world();
        hit(&mut w, 1000.0);

        let player = w.manager.component::<HealthComponent>(w.player).unwrap();
        assert_eq!(player.experience(), 200);

        let quest_seen = w.quest_seen.borrow();
        let kill = quest_seen.iter().find_map(|m| m.payload::<KillNotice>()).unwrap();
        assert_eq!(kill.enemy_type, "any");
        assert_eq!(kill.level, 2);
    }

    #[test]
    fn test_kill_by_non_player_is_not_a_quest_kill() {
        let mut w = world();
        let stranger = w.manager.add(Entity::new(), Some("stranger")).unwrap();
        let damage = DamageInfo::new(1000.0).with_attacker(stranger);
        w.manager.send(w.victim, Message::new(topics::HEALTH_DAMAGE, damage));
        assert_eq!(count(&w.quest_seen, topics::QUEST_ENEMY_KILLED), 0);
    }

    #[test]
    fn test_single_level_per_award() {
        let mut w = world();
        w.manager.send(w.player, Message::new(topics::HEALTH_ADD_EXPERIENCE, ExperienceGain { amount: 1000 }));

        let player = w.manager.component::<HealthComponent>(w.player).unwrap();
        assert_eq!(player.level(), 2);
        assert_eq!(player.experience(), 1000);
        assert_eq!(player.stats().strength, 2.0);
        assert_eq!(player.stats().curl, 3.0);
        assert_eq!(player.max_health(), 350.0);
        assert_eq!(player.health(), 350.0);

        let levels: Vec<u32> = w
            .quest_seen
            .borrow()
            .iter()
            .filter_map(|m| m.payload::<LevelGained>().map(|l| l.level))
            .collect();
        assert_eq!(levels, vec![2]);
    }

    #[test]
    fn test_level_up_heal_is_clamped() {
        let mut w = world();
        hit_player(&mut w, 290.0);
        w.manager.send(w.player, Message::new(topics::HEALTH_ADD_EXPERIENCE, ExperienceGain { amount: 300 }));
        let player = w.manager.component::<HealthComponent>(w.player).unwrap();
        assert_eq!(player.health(), 60.0);
        assert_eq!(player.max_health(), 350.0);
    }

    fn hit_player(w: &mut World, amount: f32) {
        w.manager.send(w.player, Message::new(topics::HEALTH_DAMAGE, DamageInfo::new(amount)));
    }

    #[test]
    fn test_below_threshold_keeps_level() {
        let mut w = world();
        w.manager.send(w.player, Message::new(topics::HEALTH_ADD_EXPERIENCE, ExperienceGain { amount: 299 }));
        assert_eq!(w.manager.component::<HealthComponent>(w.player).unwrap().level(), 1);
        assert_eq!(count(&w.quest_seen, topics::QUEST_LEVEL_GAINED), 0);
    }
}
