//! The player's quest log

use crate::book::{OfferOutcome, Progress, QuestBook};
use crate::giver::QuestOffer;
use void_ecs::prelude::*;

/// Tracks quest progress for the player and pays out rewards.
///
/// Handles `quest.offer`, `quest.enemy-killed` and `quest.level-gained`.
/// Rewards go to the [`Service::Player`] entity; notices and journal updates
/// go to [`Service::Ui`].
#[derive(Debug, Clone, Default)]
pub struct QuestManager {
    book: QuestBook,
    finale_shown: bool,
}

impl QuestManager {
    pub fn new(book: QuestBook) -> Self {
        Self { book, finale_shown: false }
    }

    pub fn book(&self) -> &QuestBook {
        &self.book
    }

    /// Offer a quest and tell the player how it went
    pub fn offer(&mut self, quest_id: &str, ctx: &mut Context<'_>) -> OfferOutcome {
        let outcome = self.book.offer(quest_id);
        match outcome {
            OfferOutcome::Activated => {
                if let Some(quest) = self.book.get(quest_id) {
                    log::info!("quest activated: {}", quest.title);
                    let snapshot = quest.snapshot();
                    notify_ui(ctx, Message::new(topics::UI_QUEST_JOURNAL, snapshot));
                }
            }
            OfferOutcome::AlreadyCompleted => {
                show_notice(ctx, "Quest Already Completed", "You have already completed this quest!");
            }
            OfferOutcome::AlreadyActive => {
                let title = self.book.get(quest_id).map(|q| q.title.clone()).unwrap_or_default();
                show_notice(ctx, &title, "Quest is already active. Check your quest journal for objectives.");
            }
            OfferOutcome::Locked => {
                show_notice(ctx, "Quest Unavailable", "You must complete other quests first before taking this one.");
            }
            OfferOutcome::Unknown => log::warn!("quest not found: {}", quest_id),
        }
        outcome
    }

    fn on_kill(&mut self, kill: &KillNotice, ctx: &mut Context<'_>) {
        let progress = self.book.record_kill(&kill.enemy_type);
        for quest in self.book.taken().filter(|q| q.is_active()) {
            for objective in &quest.objectives {
                log::debug!("quest progress: {} - {}/{}", quest.title, objective.current, objective.required);
            }
        }
        let changed = progress.changed || !progress.completed.is_empty();
        self.settle(progress, ctx);
        if changed {
            self.refresh_journal(ctx);
        }
    }

    fn on_level(&mut self, level: u32, ctx: &mut Context<'_>) {
        let progress = self.book.record_level(level);
        self.settle(progress, ctx);
        self.refresh_journal(ctx);
    }

    /// Pay out and announce newly completed quests
    fn settle(&mut self, progress: Progress, ctx: &mut Context<'_>) {
        for id in progress.completed {
            let Some(quest) = self.book.get(&id) else {
                continue;
            };
            log::info!("quest completed: {}", quest.title);
            show_notice(ctx, "Quest Complete!", &format!("You completed: {}", quest.title));

            let rewards = quest.rewards.clone();
            if rewards.experience > 0 {
                let gain = ExperienceGain { amount: rewards.experience };
                ctx.send_to_service(Service::Player, Message::new(topics::HEALTH_ADD_EXPERIENCE, gain));
            }
            for item in rewards.items {
                ctx.send_to_service(Service::Player, Message::new(topics::INVENTORY_ADD, ItemRef::new(item)));
            }

            self.refresh_journal(ctx);
            if self.book.all_completed() && !self.finale_shown {
                self.finale_shown = true;
                log::info!("all quests completed");
                notify_ui(ctx, Message::signal(topics::UI_COMPLETION_SCREEN));
            }
        }
    }

    fn refresh_journal(&self, ctx: &mut Context<'_>) {
        for quest in self.book.taken() {
            notify_ui(ctx, Message::new(topics::UI_QUEST_JOURNAL, quest.snapshot()));
        }
    }
}

fn show_notice(ctx: &mut Context<'_>, title: &str, text: &str) {
    notify_ui(ctx, Message::new(topics::UI_QUEST_MESSAGE, QuestNotice::new(title, text)));
}

fn notify_ui(ctx: &mut Context<'_>, message: Message) {
    ctx.send_to_service(Service::Ui, message);
}

impl Component for QuestManager {
    fn capability(&self) -> Capability {
        Capability::QuestManager
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::QUEST_OFFER);
        ctx.subscribe(topics::QUEST_ENEMY_KILLED);
        ctx.subscribe(topics::QUEST_LEVEL_GAINED);
    }

    fn on_message(&mut self, message: &Message, ctx: &mut Context<'_>) {
        if let Some(offer) = message.payload::<QuestOffer>() {
            self.offer(&offer.quest_id, ctx);
        } else if let Some(kill) = message.payload::<KillNotice>() {
            self.on_kill(kill, ctx);
        } else if let Some(gained) = message.payload::<LevelGained>() {
            self.on_level(gained.level, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::giver::QuestGiver;
    use crate::quest::{Quest, QuestSnapshot, QuestState};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Seen = Rc<RefCell<Vec<Message>>>;

    /// Stands in for the UI and the player
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

    const UI_TOPICS: &[Topic] = &[topics::UI_QUEST_MESSAGE, topics::UI_QUEST_JOURNAL, topics::UI_COMPLETION_SCREEN];
    const PLAYER_TOPICS: &[Topic] = &[topics::HEALTH_ADD_EXPERIENCE, topics::INVENTORY_ADD];

    struct World {
        manager: EntityManager,
        quests: EntityId,
        ui: Seen,
        player: Seen,
    }

    fn world(book: QuestBook) -> World {
        let mut manager = EntityManager::new();
        let ui = Seen::default();
        let player = Seen::default();
        let ui_id = manager
            .add(Entity::new().with_component(Recorder { topics: UI_TOPICS, seen: ui.clone() }).unwrap(), Some("ui"))
            .unwrap();
        let player_id = manager
            .add(Entity::new().with_component(Recorder { topics: PLAYER_TOPICS, seen: player.clone() }).unwrap(), Some("player"))
            .unwrap();
        let quests = manager
            .add(Entity::new().with_component(QuestManager::new(book)).unwrap(), Some("quest-manager"))
            .unwrap();
        let services = manager.services_mut();
        services.register(Service::Ui, ui_id);
        services.register(Service::Player, player_id);
        services.register(Service::QuestManager, quests);
        World { manager, quests, ui, player }
    }

    fn offer(w: &mut World, id: &str) {
        w.manager.send(w.quests, Message::new(topics::QUEST_OFFER, QuestOffer { quest_id: id.to_string() }));
    }

    fn kill(w: &mut World, times: usize) {
        for _ in 0..times {
            let notice = KillNotice { enemy_type: "any".to_string(), level: 1 };
            w.manager.send(w.quests, Message::new(topics::QUEST_ENEMY_KILLED, notice));
        }
    }

    fn notices(seen: &Seen) -> Vec<QuestNotice> {
        seen.borrow().iter().filter_map(|m| m.payload::<QuestNotice>().cloned()).collect()
    }

    fn state(w: &World, id: &str) -> Option<QuestState> {
        w.manager.component::<QuestManager>(w.quests)?.book().state(id)
    }

    #[test]
    fn test_giver_offers_on_pick() {
        let mut w = world(QuestBook::default());
        let player = w.manager.get("player").unwrap();
        let npc = w
            .manager
            .add(Entity::new().with_component(QuestGiver::new("welcome_quest")).unwrap(), Some("girl"))
            .unwrap();
        w.manager.send(npc, Message::new(topics::INPUT_PICKED, Picked { by: player }));

        assert_eq!(state(&w, "welcome_quest"), Some(QuestState::Active));
        let journal: Vec<QuestSnapshot> =
            w.ui.borrow().iter().filter_map(|m| m.payload::<QuestSnapshot>().cloned()).collect();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].title, "Welcome to Honeywood");
    }

    #[test]
    fn test_offer_messages() {
        let mut w = world(QuestBook::default());
        offer(&mut w, "elite_slayer");
        offer(&mut w, "welcome_quest");
        offer(&mut w, "welcome_quest");
        kill(&mut w, 5);
        offer(&mut w, "welcome_quest");

        let titles: Vec<String> = notices(&w.ui).into_iter().map(|n| n.title).collect();
        assert_eq!(
            titles,
            ["Quest Unavailable", "Welcome to Honeywood", "Quest Complete!", "Quest Already Completed"]
        );
        assert_eq!(state(&w, "elite_slayer"), Some(QuestState::Locked));
    }

    #[test]
    fn test_rewards_paid_once() {
        let book = QuestBook::new(vec![Quest::new("rats", "Rats")
            .with_objective(crate::quest::Objective::kill(1))
            .with_experience(75)
            .with_item("sword")
            .with_item("axe")])
        .unwrap();
        let mut w = world(book);
        offer(&mut w, "rats");
        kill(&mut w, 3);

        let player = w.player.borrow();
        let xp: Vec<u32> = player.iter().filter_map(|m| m.payload::<ExperienceGain>().map(|g| g.amount)).collect();
        assert_eq!(xp, vec![75]);
        let items: Vec<String> = player.iter().filter_map(|m| m.payload::<ItemRef>().map(|i| i.name.clone())).collect();
        assert_eq!(items, vec!["sword".to_string(), "axe".to_string()]);
        // Experience is delivered before the items
        assert!(player[0].is(topics::HEALTH_ADD_EXPERIENCE));

        let finales = w.ui.borrow().iter().filter(|m| m.is(topics::UI_COMPLETION_SCREEN)).count();
        assert_eq!(finales, 1);
    }

    #[test]
    fn test_completion_screen_waits_for_every_quest() {
        let mut w = world(QuestBook::default());
        offer(&mut w, "welcome_quest");
        kill(&mut w, 5);
        offer(&mut w, "monster_hunter");
        kill(&mut w, 10);
        offer(&mut w, "elite_slayer");
        kill(&mut w, 20);

        let finales = |w: &World| w.ui.borrow().iter().filter(|m| m.is(topics::UI_COMPLETION_SCREEN)).count();
        assert_eq!(finales(&w), 0);

        w.manager.send(w.quests, Message::new(topics::QUEST_LEVEL_GAINED, LevelGained { level: 3 }));
        assert_eq!(state(&w, "elite_slayer"), Some(QuestState::Completed));
        assert_eq!(finales(&w), 1);

        w.manager.send(w.quests, Message::new(topics::QUEST_LEVEL_GAINED, LevelGained { level: 4 }));
        assert_eq!(finales(&w), 1);
    }
}
