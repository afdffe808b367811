//! Quest-giving NPCs

use void_ecs::prelude::*;

/// Payload of `quest.offer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestOffer {
    pub quest_id: String,
}

/// Offers its quest to the quest manager when the player picks this NPC
#[derive(Debug, Clone)]
pub struct QuestGiver {
    quest_id: String,
}

impl QuestGiver {
    pub fn new(quest_id: impl Into<String>) -> Self {
        Self { quest_id: quest_id.into() }
    }

    pub fn quest_id(&self) -> &str {
        &self.quest_id
    }
}

impl Component for QuestGiver {
    fn capability(&self) -> Capability {
        Capability::QuestGiver
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        ctx.subscribe(topics::INPUT_PICKED);
    }

    fn on_message(&mut self, _message: &Message, ctx: &mut Context<'_>) {
        log::debug!("'{}' offers '{}'", ctx.name(), self.quest_id);
        let offer = QuestOffer { quest_id: self.quest_id.clone() };
        ctx.send_to_service(Service::QuestManager, Message::new(topics::QUEST_OFFER, offer));
    }
}
