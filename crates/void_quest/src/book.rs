//! Quest registry and state transitions

use crate::error::QuestError;
use crate::quest::{default_quests, Quest, QuestState};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Result of offering a quest to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferOutcome {
    Activated,
    AlreadyActive,
    AlreadyCompleted,
    /// Prerequisite not completed
    Locked,
    Unknown,
}

/// What a kill or level notification changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    /// Some objective moved
    pub changed: bool,
    /// Quests that completed, in activation order
    pub completed: Vec<String>,
}

#[derive(Deserialize)]
struct Catalog {
    quests: Vec<Quest>,
}

/// Every known quest and its progress
#[derive(Debug, Clone)]
pub struct QuestBook {
    quests: Vec<Quest>,
    index: HashMap<String, usize>,
    /// Quests the player has taken, in the order they were taken
    taken: Vec<usize>,
}

impl QuestBook {
    /// Build a book, rejecting duplicate ids and dangling prerequisites
    pub fn new(quests: Vec<Quest>) -> Result<Self, QuestError> {
        let mut index = HashMap::with_capacity(quests.len());
        for (i, quest) in quests.iter().enumerate() {
            if index.insert(quest.id.clone(), i).is_some() {
                return Err(QuestError::DuplicateQuest(quest.id.clone()));
            }
        }

        let mut book = Self { quests, index, taken: Vec::new() };
        for i in 0..book.quests.len() {
            let state = match &book.quests[i].prerequisite {
                Some(prerequisite) if !book.index.contains_key(prerequisite) => {
                    return Err(QuestError::UnknownPrerequisite {
                        quest: book.quests[i].id.clone(),
                        prerequisite: prerequisite.clone(),
                    });
                }
                Some(_) => QuestState::Locked,
                None => QuestState::Available,
            };
            book.quests[i].state = state;
        }
        Ok(book)
    }

    /// Parse a catalog of `[[quests]]` tables
    pub fn from_toml_str(source: &str) -> Result<Self, QuestError> {
        let catalog: Catalog = toml::from_str(source)?;
        Self::new(catalog.quests)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuestError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Quest> {
        self.index.get(id).map(|&i| &self.quests[i])
    }

    pub fn state(&self, id: &str) -> Option<QuestState> {
        self.get(id).map(Quest::state)
    }

    pub fn quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    /// Taken quests (active or completed) in the order they were taken
    pub fn taken(&self) -> impl Iterator<Item = &Quest> {
        self.taken.iter().map(|&i| &self.quests[i])
    }

    pub fn all_completed(&self) -> bool {
        !self.quests.is_empty() && self.quests.iter().all(Quest::is_completed)
    }

    /// Try to activate a quest
    pub fn offer(&mut self, id: &str) -> OfferOutcome {
        let Some(&i) = self.index.get(id) else {
            return OfferOutcome::Unknown;
        };
        match self.quests[i].state {
            QuestState::Completed => OfferOutcome::AlreadyCompleted,
            QuestState::Active => OfferOutcome::AlreadyActive,
            QuestState::Locked => OfferOutcome::Locked,
            QuestState::Available => {
                self.quests[i].state = QuestState::Active;
                self.taken.push(i);
                OfferOutcome::Activated
            }
        }
    }

    /// Count a kill against every active quest
    pub fn record_kill(&mut self, enemy_type: &str) -> Progress {
        self.advance(|quest| {
            quest
                .objectives
                .iter_mut()
                .fold(false, |changed, objective| objective.record_kill(enemy_type) || changed)
        })
    }

    /// Mirror the player's level into every active quest
    pub fn record_level(&mut self, level: u32) -> Progress {
        self.advance(|quest| {
            quest
                .objectives
                .iter_mut()
                .fold(false, |changed, objective| objective.record_level(level) || changed)
        })
    }

    fn advance(&mut self, mut apply: impl FnMut(&mut Quest) -> bool) -> Progress {
        let mut progress = Progress::default();
        for position in 0..self.taken.len() {
            let i = self.taken[position];
            if !self.quests[i].is_active() {
                continue;
            }
            progress.changed |= apply(&mut self.quests[i]);
            if self.quests[i].objectives_met() {
                self.complete(i);
                progress.completed.push(self.quests[i].id.clone());
            }
        }
        progress
    }

    /// Completion is one-way; dependents become available
    fn complete(&mut self, i: usize) {
        self.quests[i].state = QuestState::Completed;
        let id = self.quests[i].id.clone();
        for quest in &mut self.quests {
            if quest.state == QuestState::Locked && quest.prerequisite.as_deref() == Some(id.as_str()) {
                quest.state = QuestState::Available;
            }
        }
    }
}

impl Default for QuestBook {
    fn default() -> Self {
        Self::new(default_quests()).unwrap_or_else(|_| Self {
            quests: Vec::new(),
            index: HashMap::new(),
            taken: Vec::new(),
        })
    }
}
