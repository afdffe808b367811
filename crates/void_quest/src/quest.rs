//! Quest definitions and objective progress

use serde::{Deserialize, Serialize};

/// Enemy type that matches every kill
pub const ANY_TARGET: &str = "any";

/// Lifecycle of a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestState {
    /// Prerequisite not completed yet
    Locked,
    #[default]
    Available,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveKind {
    /// Counts kills of `target`
    Kill,
    /// Tracks the player's level
    Level,
}

/// A measurable sub-goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub kind: ObjectiveKind,
    /// Enemy type filter for kill objectives
    #[serde(default = "any_target")]
    pub target: String,
    pub required: u32,
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub description: String,
}

fn any_target() -> String {
    ANY_TARGET.to_string()
}

impl Objective {
    /// Kill `required` enemies of any type
    pub fn kill(required: u32) -> Self {
        Self {
            kind: ObjectiveKind::Kill,
            target: any_target(),
            required,
            current: 0,
            description: format!("Defeat {} monsters", required),
        }
    }

    /// Reach `level`, starting from `current`
    pub fn level(required: u32, current: u32) -> Self {
        Self {
            kind: ObjectiveKind::Level,
            target: any_target(),
            required,
            current,
            description: format!("Reach level {}", required),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn is_satisfied(&self) -> bool {
        self.current >= self.required
    }

    /// Count one kill. Returns whether progress changed.
    pub fn record_kill(&mut self, enemy_type: &str) -> bool {
        let matches = self.target == ANY_TARGET || self.target == enemy_type;
        if self.kind != ObjectiveKind::Kill || !matches || self.is_satisfied() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Level objectives mirror the reported level
    pub fn record_level(&mut self, level: u32) -> bool {
        if self.kind != ObjectiveKind::Level {
            return false;
        }
        self.current = level;
        true
    }
}

/// Reward set granted on completion
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub experience: u32,
    /// Item entity names, added in order
    pub items: Vec<String>,
}

/// A quest and its progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    /// Narrative text shown by the journal
    #[serde(default)]
    pub text: String,
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub rewards: Rewards,
    #[serde(default)]
    pub prerequisite: Option<String>,
    #[serde(skip)]
    pub(crate) state: QuestState,
}

impl Quest {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: String::new(),
            objectives: Vec::new(),
            rewards: Rewards::default(),
            prerequisite: None,
            state: QuestState::Available,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objectives.push(objective);
        self
    }

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.rewards.experience = experience;
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.rewards.items.push(item.into());
        self
    }

    pub fn with_prerequisite(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisite = Some(prerequisite.into());
        self
    }

    pub fn state(&self) -> QuestState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == QuestState::Active
    }

    pub fn is_completed(&self) -> bool {
        self.state == QuestState::Completed
    }

    /// Every objective met. An empty objective list never completes.
    pub fn objectives_met(&self) -> bool {
        !self.objectives.is_empty() && self.objectives.iter().all(Objective::is_satisfied)
    }

    pub fn snapshot(&self) -> QuestSnapshot {
        QuestSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            text: self.text.clone(),
            state: self.state,
            objectives: self.objectives.clone(),
            rewards: self.rewards.clone(),
        }
    }
}

/// Quest state as shown by the journal. Payload of `ui.quest-journal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestSnapshot {
    pub id: String,
    pub title: String,
    pub text: String,
    pub state: QuestState,
    pub objectives: Vec<Objective>,
    pub rewards: Rewards,
}

impl QuestSnapshot {
    pub fn is_completed(&self) -> bool {
        self.state == QuestState::Completed
    }
}

/// The built-in Honeywood quest line
pub fn default_quests() -> Vec<Quest> {
    vec![
        Quest::new("welcome_quest", "Welcome to Honeywood")
            .with_text(
                "Welcome adventurer! I need your help. Strange creatures have been terrorizing our \
                 village. Please defeat 5 monsters to prove your strength.",
            )
            .with_objective(Objective::kill(5))
            .with_experience(500),
        Quest::new("monster_hunter", "The Monster Hunter")
            .with_text(
                "You have proven yourself capable! Now I need you to hunt down 10 more creatures. \
                 The village will be safer with you protecting it.",
            )
            .with_objective(Objective::kill(10))
            .with_experience(1000)
            .with_prerequisite("welcome_quest"),
        Quest::new("elite_slayer", "Elite Slayer")
            .with_text(
                "Your skills are impressive! For your final test, defeat 20 creatures and reach \
                 level 3. Only then will you be a true hero of Honeywood.",
            )
            .with_objective(Objective::kill(20))
            .with_objective(Objective::level(3, 1))
            .with_experience(2000)
            .with_prerequisite("monster_hunter"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_objective_caps_at_required() {
        let mut objective = Objective::kill(2);
        assert!(objective.record_kill("wolf"));
        assert!(objective.record_kill("any"));
        assert!(!objective.record_kill("wolf"));
        assert_eq!(objective.current, 2);
        assert!(objective.is_satisfied());
    }

    #[test]
    fn test_kill_target_filter() {
        let mut objective = Objective::kill(3).with_target("troll");
        assert!(!objective.record_kill("wolf"));
        assert!(objective.record_kill("troll"));
        assert_eq!(objective.current, 1);
    }

    #[test]
    fn test_level_objective_is_set_not_incremented() {
        let mut objective = Objective::level(3, 1);
        assert!(!objective.record_kill("any"));
        objective.record_level(2);
        objective.record_level(4);
        assert_eq!(objective.current, 4);
        assert!(objective.is_satisfied());
    }

    #[test]
    fn test_default_catalog() {
        let quests = default_quests();
        let ids: Vec<&str> = quests.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["welcome_quest", "monster_hunter", "elite_slayer"]);
        assert_eq!(quests[2].objectives.len(), 2);
        assert_eq!(quests[2].rewards.experience, 2000);
        assert!(!Quest::new("empty", "Empty").objectives_met());
    }
}
