//! Serializable view of the HUD for the renderer

use crate::controller::UiController;
use crate::notification::Notification;
use crate::panel::Panel;
use serde::Serialize;

/// One journal row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalLine {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsLine {
    pub health: f32,
    pub max_health: f32,
    pub strength: f32,
    pub wisdomness: f32,
    pub benchpress: f32,
    pub curl: f32,
    pub experience: u32,
    pub level: u32,
}

/// Everything the HUD draws this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudFrame {
    pub panel: Option<Panel>,
    pub message: Option<Notification>,
    pub journal: Vec<JournalLine>,
    pub stats: Option<StatsLine>,
    pub interaction: Option<String>,
    pub death_screen: bool,
    pub completion_screen: bool,
}

impl HudFrame {
    pub fn capture(ui: &UiController) -> Self {
        let selected = ui.journal().selected().map(|entry| entry.quest.id.clone());
        Self {
            panel: ui.panels().open(),
            message: ui.message().cloned(),
            journal: ui
                .journal()
                .entries()
                .iter()
                .map(|entry| JournalLine {
                    id: entry.quest.id.clone(),
                    label: entry.label(),
                    selected: selected.as_deref() == Some(entry.quest.id.as_str()),
                })
                .collect(),
            stats: ui.stats().map(|s| StatsLine {
                health: s.health,
                max_health: s.max_health,
                strength: s.strength,
                wisdomness: s.wisdomness,
                benchpress: s.benchpress,
                curl: s.curl,
                experience: s.experience,
                level: s.level,
            }),
            interaction: ui.interaction().map(str::to_string),
            death_screen: ui.death_screen(),
            completion_screen: ui.completion_screen(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl UiController {
    /// Snapshot of what the HUD shows right now
    pub fn frame(&self) -> HudFrame {
        HudFrame::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use void_ecs::prelude::*;
    use void_quest::QuestBook;

    #[test]
    fn test_frame_json() {
        let mut manager = EntityManager::new();
        let id = manager.add(Entity::new().with_component(UiController::new()).unwrap(), Some("ui")).unwrap();
        let mut book = QuestBook::default();
        book.offer("welcome_quest");
        let snapshot = book.get("welcome_quest").unwrap().snapshot();
        manager.send(id, Message::new(topics::UI_QUEST_JOURNAL, snapshot));
        manager.send(id, Message::signal(topics::UI_TOGGLE_QUESTS));

        let frame = manager.component::<UiController>(id).unwrap().frame();
        assert_eq!(frame.panel, Some(Panel::Quests));
        assert_eq!(frame.journal.len(), 1);
        assert!(frame.journal[0].selected);

        let json: serde_json::Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();
        assert_eq!(json["panel"], "Quests");
        assert_eq!(json["journal"][0]["id"], "welcome_quest");
        assert_eq!(json["message"]["title"], "Welcome to Honeywood");
        assert_eq!(json["death_screen"], false);
    }
}
