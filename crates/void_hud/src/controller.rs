//! UI controller component

use crate::journal::QuestJournal;
use crate::notification::{MessagePanel, Notification};
use crate::panel::{Panel, PanelSet};
use void_ecs::prelude::*;
use void_quest::QuestSnapshot;

/// Presentation state for the HUD. The renderer reads it; nothing here draws.
///
/// Registered as [`Service::Ui`]; every `ui.*` topic lands here.
#[derive(Debug, Clone, Default)]
pub struct UiController {
    panels: PanelSet,
    journal: QuestJournal,
    messages: MessagePanel,
    stats: Option<StatsSnapshot>,
    interaction: Option<String>,
    death_screen: bool,
    completion_screen: bool,
}

impl UiController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panels(&self) -> &PanelSet {
        &self.panels
    }

    pub fn journal(&self) -> &QuestJournal {
        &self.journal
    }

    /// The quest text panel
    pub fn message(&self) -> Option<&Notification> {
        self.messages.current()
    }

    pub fn stats(&self) -> Option<&StatsSnapshot> {
        self.stats.as_ref()
    }

    pub fn interaction(&self) -> Option<&str> {
        self.interaction.as_deref()
    }

    pub fn death_screen(&self) -> bool {
        self.death_screen
    }

    pub fn completion_screen(&self) -> bool {
        self.completion_screen
    }

    /// Escape closes the end-game screen
    pub fn dismiss_completion_screen(&mut self) {
        self.completion_screen = false;
    }

    /// Open a journal entry in the quest panel
    pub fn select_quest(&mut self, id: &str) {
        if let Some(entry) = self.journal.select(id) {
            let notification = Notification::journal(entry.quest.title.clone(), entry.describe());
            self.messages.show(notification);
        }
    }

    fn on_journal(&mut self, quest: &QuestSnapshot) {
        let id = quest.id.clone();
        if self.journal.upsert(quest.clone()) {
            log::debug!("journal: added '{}'", id);
            self.select_quest(&id);
        }
    }
}

impl Component for UiController {
    fn capability(&self) -> Capability {
        Capability::Ui
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        for topic in [
            topics::UI_STATS,
            topics::UI_QUEST_MESSAGE,
            topics::UI_QUEST_JOURNAL,
            topics::UI_DEATH_SCREEN,
            topics::UI_COMPLETION_SCREEN,
            topics::UI_INTERACTION,
            topics::UI_TOGGLE_INVENTORY,
            topics::UI_TOGGLE_STATS,
            topics::UI_TOGGLE_QUESTS,
            topics::UI_HIDE_QUEST_PANEL,
        ] {
            ctx.subscribe(topic);
        }
        self.panels.hide_all();
    }

    fn on_message(&mut self, message: &Message, _ctx: &mut Context<'_>) {
        match message.topic() {
            topics::UI_STATS => self.stats = message.payload::<StatsSnapshot>().copied(),
            topics::UI_QUEST_MESSAGE => {
                if let Some(notice) = message.payload::<QuestNotice>() {
                    self.messages.show(Notification::quest(notice.title.clone(), notice.text.clone()));
                }
            }
            topics::UI_QUEST_JOURNAL => {
                if let Some(quest) = message.payload::<QuestSnapshot>() {
                    self.on_journal(quest);
                }
            }
            topics::UI_DEATH_SCREEN => self.death_screen = true,
            topics::UI_COMPLETION_SCREEN => self.completion_screen = true,
            topics::UI_INTERACTION => {
                self.interaction = message.payload::<InteractionPrompt>().and_then(|p| p.text.clone());
            }
            topics::UI_TOGGLE_INVENTORY => self.panels.toggle(Panel::Inventory),
            topics::UI_TOGGLE_STATS => self.panels.toggle(Panel::Stats),
            topics::UI_TOGGLE_QUESTS => self.panels.toggle(Panel::Quests),
            topics::UI_HIDE_QUEST_PANEL => self.messages.hide(),
            _ => {}
        }
    }

    fn has_update(&self) -> bool {
        true
    }

    fn update(&mut self, dt: f32, _ctx: &mut Context<'_>) {
        self.messages.update(dt);
    }
}
