//=========================================================================
// Topic Storage
//=========================================================================
//
// Type-erased storage for one event topic, so the bus can hold queues of
// different event types in a single map.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::Event;

//=========================================================================

/// Type-erased queue of events published on one topic.
pub(super) trait Topic {
    /// Drops every pending event, keeping the allocation.
    fn clear_events(&mut self);

    /// Number of pending events.
    fn pending(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Event> Topic for Vec<E> {
    fn clear_events(&mut self) {
        self.clear();
    }

    fn pending(&self) -> usize {
        self.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Ping(u8);

    #[test]
    fn clear_events_keeps_capacity() {
        let mut topic: Vec<Ping> = Vec::with_capacity(16);
        topic.push(Ping(1));
        topic.push(Ping(2));
        let capacity = topic.capacity();

        let erased: &mut dyn Topic = &mut topic;
        assert_eq!(erased.pending(), 2);
        erased.clear_events();
        assert_eq!(erased.pending(), 0);

        assert_eq!(topic.capacity(), capacity);
    }

    #[test]
    fn downcast_recovers_concrete_queue() {
        let mut topic: Vec<Ping> = vec![Ping(7)];
        let erased: &mut dyn Topic = &mut topic;

        let queue = erased.as_any_mut().downcast_mut::<Vec<Ping>>();
        assert!(queue.is_some());
        if let Some(queue) = queue {
            queue.push(Ping(8));
        }

        assert_eq!(topic, vec![Ping(7), Ping(8)]);
    }
}
