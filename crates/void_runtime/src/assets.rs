//! Background asset loading
//!
//! Requests go to a worker thread over a channel. The worker resolves each
//! one and posts the result back through the manager's completion channel,
//! so components see `model.loaded` / `audio.loaded` at the start of a later
//! tick and never during the call that asked for them.

use crossbeam_channel::{Receiver, Sender};
use std::thread::JoinHandle;
use void_ecs::prelude::*;

/// Clips bundled with the player model
pub const PLAYER_ANIMATIONS: &[&str] = &["idle", "walk", "run", "attack", "sit"];

/// What to load and for whom
#[derive(Debug, Clone, PartialEq)]
pub enum LoadRequest {
    Model {
        target: EntityId,
        resource: String,
        animations: Vec<String>,
    },
    Audio {
        target: EntityId,
        cue: AudioCue,
    },
}

/// Owns the loader thread. Dropping it closes the queue and joins the worker.
pub struct AssetLoader {
    tx: Option<Sender<LoadRequest>>,
    worker: Option<JoinHandle<usize>>,
}

impl AssetLoader {
    pub fn spawn(completions: CompletionSender) -> std::io::Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let worker = std::thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || Self::run(rx, completions))?;
        Ok(Self { tx: Some(tx), worker: Some(worker) })
    }

    /// Queue a load. Returns false once the worker has stopped.
    pub fn request(&self, request: LoadRequest) -> bool {
        match &self.tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        }
    }

    /// Queue the player's model and the ambient track
    pub fn request_player_assets(&self, player: EntityId) -> bool {
        let model = self.request(LoadRequest::Model {
            target: player,
            resource: "girl/peasant_girl.fbx".into(),
            animations: PLAYER_ANIMATIONS.iter().map(|clip| clip.to_string()).collect(),
        });
        let audio = self.request(LoadRequest::Audio { target: player, cue: AudioCue::AmbientMusic });
        model && audio
    }

    fn run(rx: Receiver<LoadRequest>, completions: CompletionSender) -> usize {
        let mut served = 0;
        for request in rx {
            let delivered = match request {
                LoadRequest::Model { target, resource, animations } => {
                    log::debug!("loaded model '{}' with {} clips", resource, animations.len());
                    completions.complete(target, topics::MODEL_LOADED, ModelLoaded { animations })
                }
                LoadRequest::Audio { target, cue } => {
                    log::debug!("loaded audio {:?}", cue);
                    completions.complete(target, topics::AUDIO_LOADED, cue)
                }
            };
            if !delivered {
                log::warn!("simulation stopped; asset loader exiting");
                break;
            }
            served += 1;
        }
        served
    }

    /// Close the queue and wait for outstanding loads. Returns how many were served.
    pub fn shutdown(&mut self) -> usize {
        self.tx.take();
        match self.worker.take().map(JoinHandle::join) {
            Some(Ok(served)) => served,
            Some(Err(_)) => {
                log::error!("asset loader panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_serves_queued_loads() {
        let mut manager = EntityManager::new();
        let target = manager.add(Entity::new(), Some("player")).unwrap();
        let mut loader = AssetLoader::spawn(manager.completion_sender()).unwrap();

        assert!(loader.request_player_assets(target));
        assert_eq!(loader.shutdown(), 2);
        assert!(!loader.request(LoadRequest::Audio { target, cue: AudioCue::Death }));
    }
}
