//! Quest journal

use void_quest::QuestSnapshot;

/// One line in the journal list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub quest: QuestSnapshot,
}

impl JournalEntry {
    /// List label: the title, ticked once completed
    pub fn label(&self) -> String {
        if self.quest.is_completed() {
            format!("{} ✓", self.quest.title)
        } else {
            self.quest.title.clone()
        }
    }

    /// Full text for the quest panel
    pub fn describe(&self) -> String {
        let quest = &self.quest;
        let mut text = format!("{}\n\n", quest.text);
        if quest.is_completed() {
            text.push_str("✓ QUEST COMPLETED!\n\nRewards Received:\n");
        } else {
            text.push_str("Objectives:\n");
            for objective in &quest.objectives {
                let status = if objective.current >= objective.required { '✓' } else { '○' };
                text.push_str(&format!(
                    "{} {} ({}/{})\n",
                    status, objective.description, objective.current, objective.required
                ));
            }
            text.push_str("\nRewards:\n");
        }
        if quest.rewards.experience > 0 {
            text.push_str(&format!("- {} XP\n", quest.rewards.experience));
        }
        if !quest.rewards.items.is_empty() {
            text.push_str(&format!("- Items: {}\n", quest.rewards.items.join(", ")));
        }
        text
    }
}

/// Quests the player has taken, in the order they arrived
#[derive(Debug, Clone, Default)]
pub struct QuestJournal {
    entries: Vec<JournalEntry>,
    selected: Option<String>,
}

impl QuestJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or refresh an entry. Returns true when the quest is new.
    pub fn upsert(&mut self, quest: QuestSnapshot) -> bool {
        match self.entries.iter_mut().find(|e| e.quest.id == quest.id) {
            Some(entry) => {
                entry.quest = quest;
                false
            }
            None => {
                self.entries.push(JournalEntry { quest });
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.quest.id == id)
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select an entry. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &str) -> Option<&JournalEntry> {
        let index = self.entries.iter().position(|e| e.quest.id == id)?;
        self.selected = Some(id.to_string());
        self.entries.get(index)
    }

    pub fn selected(&self) -> Option<&JournalEntry> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use void_quest::{default_quests, QuestBook};

    fn snapshot(id: &str) -> QuestSnapshot {
        let mut book = QuestBook::new(default_quests()).unwrap();
        book.offer(id);
        book.get(id).unwrap().snapshot()
    }

    #[test]
    fn test_upsert_keeps_order() {
        let mut journal = QuestJournal::new();
        assert!(journal.upsert(snapshot("welcome_quest")));
        assert!(!journal.upsert(snapshot("welcome_quest")));
        assert_eq!(journal.len(), 1);
        assert!(journal.select("missing").is_none());
        assert!(journal.selected().is_none());
    }

    #[test]
    fn test_describe_active_quest() {
        let entry = JournalEntry { quest: snapshot("welcome_quest") };
        assert_eq!(entry.label(), "Welcome to Honeywood");
        let text = entry.describe();
        assert!(text.contains("Objectives:\n○ Defeat 5 monsters (0/5)\n"));
        assert!(text.ends_with("\nRewards:\n- 500 XP\n"));
    }

    #[test]
    fn test_describe_completed_quest() {
        let mut book = QuestBook::new(default_quests()).unwrap();
        book.offer("welcome_quest");
        for _ in 0..5 {
            book.record_kill("any");
        }
        let entry = JournalEntry { quest: book.get("welcome_quest").unwrap().snapshot() };
        assert_eq!(entry.label(), "Welcome to Honeywood ✓");
        assert!(entry.describe().contains("✓ QUEST COMPLETED!\n\nRewards Received:\n- 500 XP\n"));
    }
}
