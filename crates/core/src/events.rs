//! Events module - synchronous publish/subscribe for game notifications
//!
//! Observers (score displays, sound triggers, banners) register with the bus and receive
//! every [`GameEvent`] exactly once, inside the call that produced it. Two kinds of
//! subscriber are supported:
//!
//! - anything implementing [`EventListener`], including plain `FnMut(&GameEvent)` closures
//! - a `crossbeam_channel::Sender<GameEvent>` for observers living on another thread
//!
//! A channel whose receiver has been dropped is removed on the next publish.

use std::fmt;

use crossbeam_channel::{Sender, TrySendError};

use crate::types::GameEvent;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiver of game notifications
pub trait EventListener {
    /// Handle one event. Returning `false` unsubscribes the listener.
    fn on_event(&mut self, event: &GameEvent) -> bool;
}

impl<F> EventListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) -> bool {
        self(event);
        true
    }
}

/// Forwards events into a channel; stays subscribed until the receiver is gone.
struct ChannelListener(Sender<GameEvent>);

impl EventListener for ChannelListener {
    fn on_event(&mut self, event: &GameEvent) -> bool {
        match self.0.try_send(*event) {
            Ok(()) => true,
            // Bounded and full: drop this event, keep the subscriber
            Err(TrySendError::Full(_)) => {
                log::warn!("event channel full, dropping {:?}", event);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Ordered registry of subscribers
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn EventListener>)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn subscribe<L>(&mut self, listener: L) -> SubscriptionId
    where
        L: EventListener + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Register a channel sender
    pub fn subscribe_channel(&mut self, sender: Sender<GameEvent>) -> SubscriptionId {
        self.subscribe(ChannelListener(sender))
    }

    /// Remove a subscriber; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every subscriber
    pub fn publish(&mut self, event: GameEvent) {
        log::trace!("publish {:?} to {} subscribers", event, self.listeners.len());
        self.listeners
            .retain_mut(|(_, listener)| listener.on_event(&event));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::types::Direction;

    #[test]
    fn test_every_subscriber_gets_each_event_once() {
        let mut bus = EventBus::new();
        let a = Rc::new(RefCell::new(Vec::new()));
        let b = Rc::new(RefCell::new(Vec::new()));

        let sink = a.clone();
        bus.subscribe(move |e: &GameEvent| sink.borrow_mut().push(*e));
        let sink = b.clone();
        bus.subscribe(move |e: &GameEvent| sink.borrow_mut().push(*e));

        bus.publish(GameEvent::Moved(Direction::Left));
        bus.publish(GameEvent::Dropped);

        let expected = vec![GameEvent::Moved(Direction::Left), GameEvent::Dropped];
        assert_eq!(*a.borrow(), expected);
        assert_eq!(*b.borrow(), expected);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let id = bus.subscribe(move |_: &GameEvent| *sink.borrow_mut() += 1);

        bus.publish(GameEvent::Dropped);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(GameEvent::Dropped);

        assert_eq!(*count.borrow(), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_disconnected_channel_is_pruned() {
        let mut bus = EventBus::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        bus.subscribe_channel(tx);

        bus.publish(GameEvent::GameOver);
        assert_eq!(rx.try_recv(), Ok(GameEvent::GameOver));

        drop(rx);
        bus.publish(GameEvent::GameOver);
        assert_eq!(bus.len(), 0);
    }

    struct OneShot(Rc<RefCell<u32>>);

    impl EventListener for OneShot {
        fn on_event(&mut self, _event: &GameEvent) -> bool {
            *self.0.borrow_mut() += 1;
            false
        }
    }

    #[test]
    fn test_listener_can_unsubscribe_itself() {
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(0));
        bus.subscribe(OneShot(hits.clone()));

        bus.publish(GameEvent::InvalidMove);
        bus.publish(GameEvent::InvalidMove);
        assert_eq!(*hits.borrow(), 1);
    }
}
