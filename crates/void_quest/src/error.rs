//! Quest catalog errors

use thiserror::Error;
use void_core::{Classify, ErrorKind};

#[derive(Debug, Error)]
pub enum QuestError {
    #[error("failed to read quest catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse quest catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("quest '{0}' is defined twice")]
    DuplicateQuest(String),

    #[error("quest '{quest}' requires unknown quest '{prerequisite}'")]
    UnknownPrerequisite { quest: String, prerequisite: String },

    #[error("no quest with id '{0}'")]
    UnknownQuest(String),
}

impl Classify for QuestError {
    fn kind(&self) -> ErrorKind {
        match self {
            QuestError::Io(_) => ErrorKind::ExternalResource,
            QuestError::Parse(_) | QuestError::DuplicateQuest(_) | QuestError::UnknownPrerequisite { .. } => {
                ErrorKind::Configuration
            }
            QuestError::UnknownQuest(_) => ErrorKind::Lookup,
        }
    }
}
