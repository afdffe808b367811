//! Asynchronous completions
//!
//! Loaders run outside the simulation. When one finishes it posts a
//! completion through a [`CompletionSender`]; the manager delivers it as a
//! normal message at the start of the following tick, never synchronously
//! with the request.

use crate::entity::EntityId;
use crate::message::Topic;
use core::any::Any;
use crossbeam_channel::{Receiver, Sender};

pub(crate) struct Completion {
    pub(crate) target: EntityId,
    pub(crate) topic: Topic,
    pub(crate) payload: Box<dyn Any + Send>,
}

/// Cloneable, thread-safe handle for posting completions
#[derive(Clone)]
pub struct CompletionSender {
    tx: Sender<Completion>,
}

impl CompletionSender {
    /// Post a completion. Returns false if the runtime has shut down.
    pub fn complete<T: Any + Send>(&self, target: EntityId, topic: Topic, payload: T) -> bool {
        self.tx
            .send(Completion { target, topic, payload: Box::new(payload) })
            .is_ok()
    }
}

pub(crate) struct CompletionQueue {
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl CompletionQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> CompletionSender {
        CompletionSender { tx: self.tx.clone() }
    }

    /// Everything posted so far, oldest first
    pub(crate) fn drain(&self) -> Vec<Completion> {
        self.rx.try_iter().collect()
    }
}
