//! Runtime error types

use crate::config::ConfigError;
use thiserror::Error;
use void_core::{Classify, ErrorKind};
use void_ecs::EcsError;
use void_quest::QuestError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("quest catalog: {0}")]
    Quest(#[from] QuestError),
    #[error("world assembly: {0}")]
    World(#[from] EcsError),
}

impl Classify for RuntimeError {
    fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::Config(e) => e.kind(),
            RuntimeError::Quest(e) => e.kind(),
            RuntimeError::World(e) => e.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
