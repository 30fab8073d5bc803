//! Typed publish-subscribe channel for game events.
//!
//! Observers subscribe for an id, drain their mailbox whenever they
//! like, and unsubscribe when their own lifetime ends. Everything runs
//! on the single logical engine thread; publish is a synchronous clone
//! into each live mailbox, so delivery order matches publish order.

use holdout_core::events::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u32);

#[derive(Debug, Default)]
pub struct EventBus {
    next_id: u32,
    mailboxes: Vec<(SubscriberId, Vec<GameEvent>)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.mailboxes.push((id, Vec::new()));
        id
    }

    /// Drop a subscriber and any events it never drained.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.mailboxes.retain(|(sid, _)| *sid != id);
    }

    /// Deliver an event to every live subscriber.
    pub fn publish(&mut self, event: &GameEvent) {
        for (_, mailbox) in &mut self.mailboxes {
            mailbox.push(event.clone());
        }
    }

    /// Take all pending events for a subscriber, in publish order.
    /// Unknown ids (already unsubscribed) yield nothing.
    pub fn drain(&mut self, id: SubscriberId) -> Vec<GameEvent> {
        self.mailboxes
            .iter_mut()
            .find(|(sid, _)| *sid == id)
            .map(|(_, mailbox)| std::mem::take(mailbox))
            .unwrap_or_default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.mailboxes.len()
    }
}
