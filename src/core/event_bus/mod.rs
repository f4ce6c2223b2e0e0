//=========================================================================
// Event Bus
//=========================================================================
//
// Typed publish/subscribe bus used between the switcher and the rest of
// the application.
//
// Architecture:
//   publisher ─→ publish<E>() ─→ HashMap<TypeId, Vec<E>>
//                                      ↓
//   subscribers ←── events<E>() (shared, many readers)
//                                      ↓
//   owner ───────→ take<E>() / clear<E>() at frame boundary
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

//=== Module Declarations =================================================

mod topic;

//=== Internal Dependencies ===============================================

use topic::Topic;

//=== Public API ==========================================================

/// Marker trait for anything that can travel on the [`EventBus`].
pub trait Event: 'static {}

impl<T: 'static> Event for T {}

//=========================================================================

/// Per-type event queues with frame-scoped lifetime.
///
/// Events stay readable until their topic is taken or cleared, so several
/// subscribers can observe the same frame's events.
#[derive(Default)]
pub struct EventBus {
    topics: HashMap<TypeId, Box<dyn Topic>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
        }
    }

    //--- Publishing -------------------------------------------------------

    /// Appends an event to its topic.
    pub fn publish<E: Event>(&mut self, event: E) {
        self.queue_mut::<E>().push(event);
    }

    //--- Subscribing ------------------------------------------------------

    /// All pending events of type `E`, oldest first.
    pub fn events<E: Event>(&self) -> &[E] {
        self.queue::<E>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes and returns every pending event of type `E`.
    pub fn take<E: Event>(&mut self) -> Vec<E> {
        match self.topics.get_mut(&TypeId::of::<E>()) {
            Some(topic) => topic
                .as_any_mut()
                .downcast_mut::<Vec<E>>()
                .map(std::mem::take)
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn has_events<E: Event>(&self) -> bool {
        self.count::<E>() > 0
    }

    pub fn count<E: Event>(&self) -> usize {
        self.topics
            .get(&TypeId::of::<E>())
            .map(|topic| topic.pending())
            .unwrap_or(0)
    }

    //--- Frame Boundary ---------------------------------------------------

    /// Drops pending events of type `E`, keeping the allocation.
    pub fn clear<E: Event>(&mut self) {
        if let Some(topic) = self.topics.get_mut(&TypeId::of::<E>()) {
            topic.clear_events();
        }
    }

    /// Drops pending events on every topic.
    pub fn clear_all(&mut self) {
        for topic in self.topics.values_mut() {
            topic.clear_events();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue<E: Event>(&self) -> Option<&Vec<E>> {
        self.topics
            .get(&TypeId::of::<E>())
            .and_then(|topic| topic.as_any().downcast_ref::<Vec<E>>())
    }

    fn queue_mut<E: Event>(&mut self) -> &mut Vec<E> {
        self.topics
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<E>::new()))
            .as_any_mut()
            .downcast_mut::<Vec<E>>()
            .expect("Type mismatch in EventBus topic")
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Clone)]
    struct Opened {
        id: u32,
    }

    #[derive(Debug, PartialEq, Clone)]
    struct Closed;

    #[test]
    fn new_bus_has_no_events() {
        let bus = EventBus::new();
        assert!(!bus.has_events::<Opened>());
        assert_eq!(bus.count::<Opened>(), 0);
        assert!(bus.events::<Opened>().is_empty());
    }

    #[test]
    fn publish_keeps_order_per_topic() {
        let mut bus = EventBus::new();
        bus.publish(Opened { id: 1 });
        bus.publish(Closed);
        bus.publish(Opened { id: 2 });

        assert_eq!(bus.events::<Opened>(), &[Opened { id: 1 }, Opened { id: 2 }]);
        assert_eq!(bus.count::<Closed>(), 1);
    }

    #[test]
    fn events_are_readable_by_many_subscribers() {
        let mut bus = EventBus::new();
        bus.publish(Opened { id: 3 });

        let first = bus.events::<Opened>().len();
        let second = bus.events::<Opened>().len();
        assert_eq!(first, 1);
        assert_eq!(second, 1);
    }

    #[test]
    fn take_empties_only_its_topic() {
        let mut bus = EventBus::new();
        bus.publish(Opened { id: 1 });
        bus.publish(Closed);

        let taken = bus.take::<Opened>();
        assert_eq!(taken, vec![Opened { id: 1 }]);
        assert!(!bus.has_events::<Opened>());
        assert!(bus.has_events::<Closed>());
        assert!(bus.take::<u64>().is_empty());
    }

    #[test]
    fn clear_and_clear_all() {
        let mut bus = EventBus::new();
        bus.publish(Opened { id: 1 });
        bus.publish(Closed);

        bus.clear::<Opened>();
        assert_eq!(bus.count::<Opened>(), 0);
        assert_eq!(bus.count::<Closed>(), 1);

        bus.clear_all();
        assert_eq!(bus.count::<Closed>(), 0);

        bus.publish(Opened { id: 9 });
        assert_eq!(bus.count::<Opened>(), 1);
    }
}
