use std::{cmp::Ordering, collections::BinaryHeap};

/// Events of the M/M/c queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueEvent {
    /// A new request reaches the queue.
    Arrival,
    /// One server finishes its current request.
    Departure,
}

/// An event scheduled for a point in virtual time.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    time: f64,
    event: QueueEvent,
    sequence: u64, // For deterministic ordering
}

impl ScheduledEvent {
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn event(&self) -> QueueEvent {
        self.event
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max heap, so both comparisons are reversed: earliest time first,
        // then earliest sequence number among events sharing a time.
        other.time.total_cmp(&self.time).then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority queue of pending events in virtual-time order.
///
/// Events scheduled for the same instant come out in the order they were scheduled.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<ScheduledEvent>,
    next_sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, time: f64, event: QueueEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(ScheduledEvent { time, event, sequence });
    }

    /// Removes and returns the earliest scheduled event.
    pub fn pop_earliest(&mut self) -> Option<ScheduledEvent> {
        self.heap.pop()
    }

    pub fn peek_earliest(&self) -> Option<&ScheduledEvent> {
        self.heap.peek()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
