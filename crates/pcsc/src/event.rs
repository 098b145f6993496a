//! Event types and channels for PC/SC operations

use crossbeam_channel::{Receiver, Sender, unbounded};

/// Events related to card insertion/removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    /// Card was placed on a reader
    Inserted {
        /// Reader name
        reader: String,
        /// ATR of the inserted card
        atr: Vec<u8>,
    },
    /// Card was removed from a reader
    Removed {
        /// Reader name
        reader: String,
    },
}

/// Events related to reader connection/disconnection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderEvent {
    /// Reader was connected to the system
    Added(String),
    /// Reader was disconnected from the system
    Removed(String),
}

/// Sender for card events
pub type CardEventSender = Sender<CardEvent>;
/// Receiver for card events
pub type CardEventReceiver = Receiver<CardEvent>;

/// Create an unbounded channel for card events
pub fn card_event_channel() -> (CardEventSender, CardEventReceiver) {
    unbounded()
}

/// Handler for card events
pub trait CardEventHandler: Send {
    /// Handle a single card event
    fn handle_event(&mut self, event: CardEvent);
}

impl<F> CardEventHandler for F
where
    F: FnMut(CardEvent) + Send,
{
    fn handle_event(&mut self, event: CardEvent) {
        self(event)
    }
}
