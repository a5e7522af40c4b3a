//! DispatchQueue - priority ordered command queue with FIFO tie-breaking.
//!
//! Entries are kept as one fully ordered sequence rather than a heap:
//! - `VecDeque` so the head can be removed in O(1)
//! - Insertion places each entry after every entry of greater or equal
//!   priority, which keeps equal priorities in arrival order

use std::collections::VecDeque;
use std::iter::FusedIterator;

use tracing::trace;

use crate::error::{QueueError, Result};
use crate::priority::Priority;
use crate::record::CommandRecord;

/// A stored command with its normalized priority and arrival order.
#[derive(Debug, Clone)]
struct Entry<C> {
    command: C,
    priority: Priority,
    sequence: u64,
}

/// Single-owner priority queue of commands.
///
/// # Ordering Rules
///
/// 1. Higher priority comes first (10 > 9 > ... > 0)
/// 2. For the same priority, older entries come first (FIFO within priority)
///
/// # Concurrency
///
/// Mutation requires `&mut self` and there is no internal locking. Callers
/// that share a queue across threads wrap it themselves, e.g. in
/// `Mutex<DispatchQueue<C>>`.
///
/// # Example
///
/// ```
/// use dispatch_queue::{CommandRecord, DispatchQueue, QueueError};
///
/// let mut queue = DispatchQueue::new();
/// queue.push(CommandRecord::of("low", -3)).unwrap();
/// queue.push(CommandRecord::of("urgent", 42)).unwrap();
///
/// let missing = queue.push(CommandRecord::new().with_command("orphan"));
/// assert_eq!(missing, Err(QueueError::MissingField("priority")));
///
/// let order: Vec<_> = queue.drain().collect();
/// assert_eq!(order, vec!["urgent", "low"]);
/// ```
#[derive(Debug, Clone)]
pub struct DispatchQueue<C> {
    /// Entries ordered head to tail by dispatch order.
    entries: VecDeque<Entry<C>>,
    /// Sequence number handed to the next accepted entry.
    next_sequence: u64,
}

impl<C> DispatchQueue<C> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            next_sequence: 0,
        }
    }

    /// Adds a record to the queue.
    ///
    /// The priority is clamped to `[0, 10]`. The entry is placed after every
    /// entry with a greater or equal priority and before the first entry
    /// with a lower one.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::MissingField` if the record has no `command` or
    /// no `priority`. The queue is left untouched in that case.
    pub fn push(&mut self, record: CommandRecord<C>) -> Result<()> {
        let command = record.command.ok_or(QueueError::MissingField("command"))?;
        let priority = record.priority.ok_or(QueueError::MissingField("priority"))?;

        self.push_command(command, Priority::clamped(priority));
        Ok(())
    }

    /// Adds a command with the given priority.
    ///
    /// Same placement as [`push`](Self::push), for callers that already hold
    /// both fields.
    pub fn push_command(&mut self, command: C, priority: impl Into<Priority>) {
        let priority = priority.into();
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        // Entries are non-increasing by priority, so everything at or above
        // `priority` forms a prefix and the new entry goes right after it.
        let position = self.entries.partition_point(|entry| entry.priority >= priority);

        trace!(
            priority = priority.value(),
            sequence,
            position,
            len = self.entries.len() + 1,
            "Queued command"
        );

        self.entries.insert(
            position,
            Entry {
                command,
                priority,
                sequence,
            },
        );
    }

    /// Removes and returns the command at the head of the queue.
    ///
    /// # Returns
    ///
    /// `None` if the queue is empty. A stored command is always returned as
    /// `Some`, whatever its value.
    pub fn pop(&mut self) -> Option<C> {
        let entry = self.entries.pop_front()?;

        trace!(
            priority = entry.priority.value(),
            sequence = entry.sequence,
            remaining = self.entries.len(),
            "Dispatched command"
        );

        Some(entry.command)
    }

    /// Returns an iterator that pops commands until the queue is empty.
    pub fn drain(&mut self) -> Drain<'_, C> {
        Drain { queue: self }
    }

    /// Returns the number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the queue has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> Default for DispatchQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Draining iterator returned by [`DispatchQueue::drain`].
///
/// Entries not consumed stay in the queue.
#[derive(Debug)]
pub struct Drain<'a, C> {
    queue: &'a mut DispatchQueue<C>,
}

impl<C> Iterator for Drain<'_, C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        self.queue.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<C> ExactSizeIterator for Drain<'_, C> {}

impl<C> FusedIterator for Drain<'_, C> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_queue() -> DispatchQueue<&'static str> {
        DispatchQueue::new()
    }

    fn priorities<C>(queue: &DispatchQueue<C>) -> Vec<u8> {
        queue.entries.iter().map(|e| e.priority.value()).collect()
    }

    #[test]
    fn test_push_and_pop() {
        let mut queue = make_queue();

        queue.push(CommandRecord::of("Task", 5)).unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some("Task"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_empty() {
        let mut queue = make_queue();
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_pop_after_drained() {
        let mut queue = make_queue();
        queue.push_command("Only", 3);

        assert_eq!(queue.pop(), Some("Only"));
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_priority_ordering() {
        let mut queue = make_queue();

        // Push in ascending priority order
        queue.push_command("Low", 1);
        queue.push_command("Medium", 4);
        queue.push_command("High", 7);
        queue.push_command("Critical", 10);

        assert_eq!(queue.pop(), Some("Critical"));
        assert_eq!(queue.pop(), Some("High"));
        assert_eq!(queue.pop(), Some("Medium"));
        assert_eq!(queue.pop(), Some("Low"));
    }

    #[test]
    fn test_fifo_within_priority() {
        let mut queue = make_queue();

        queue.push_command("First", 5);
        queue.push_command("Second", 5);
        queue.push_command("Third", 5);

        assert_eq!(queue.pop(), Some("First"));
        assert_eq!(queue.pop(), Some("Second"));
        assert_eq!(queue.pop(), Some("Third"));
    }

    #[test]
    fn test_equal_run_stays_contiguous() {
        let mut queue = make_queue();

        queue.push_command("a", 5);
        queue.push_command("b", 8);
        queue.push_command("c", 5);
        queue.push_command("d", 3);
        queue.push_command("e", 5);

        assert_eq!(priorities(&queue), vec![8, 5, 5, 5, 3]);
        let sequences: Vec<u64> = queue.entries.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 0, 2, 4, 3]);
    }

    #[test]
    fn test_reference_scenario() {
        let mut queue = make_queue();

        queue.push(CommandRecord::of("commandA", 1)).unwrap();
        queue.push(CommandRecord::of("commandB", 5)).unwrap();
        queue.push(CommandRecord::of("commandC", 8)).unwrap();
        queue.push(CommandRecord::of("commandD", 5)).unwrap();
        queue.push(CommandRecord::of("commandE", 6)).unwrap();
        queue.push(CommandRecord::of("commandF", 5)).unwrap();
        queue.push(CommandRecord::of("commandG", 3)).unwrap();

        let order: Vec<_> = queue.drain().collect();
        assert_eq!(
            order,
            vec!["commandC", "commandE", "commandB", "commandD", "commandF", "commandG", "commandA"]
        );
    }

    #[test]
    fn test_clamping_matches_bounds() {
        let mut queue = make_queue();

        queue.push(CommandRecord::of("zero", 0)).unwrap();
        queue.push(CommandRecord::of("negative", -5)).unwrap();
        queue.push(CommandRecord::of("ten", 10)).unwrap();
        queue.push(CommandRecord::of("huge", 99)).unwrap();

        assert_eq!(priorities(&queue), vec![10, 10, 0, 0]);
        let order: Vec<_> = queue.drain().collect();
        assert_eq!(order, vec!["ten", "huge", "zero", "negative"]);
    }

    #[test]
    fn test_missing_command() {
        let mut queue = make_queue();
        queue.push_command("Existing", 2);

        let result = queue.push(CommandRecord::new().with_priority(9));

        assert_eq!(result, Err(QueueError::MissingField("command")));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some("Existing"));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_missing_priority() {
        let mut queue = make_queue();
        queue.push_command("Existing", 2);

        let result = queue.push(CommandRecord::new().with_command("Orphan"));

        assert_eq!(result, Err(QueueError::MissingField("priority")));
        assert_eq!(queue.drain().collect::<Vec<_>>(), vec!["Existing"]);
    }

    #[test]
    fn test_missing_both_reports_command() {
        let mut queue = make_queue();
        let result = queue.push(CommandRecord::new());
        assert_eq!(result, Err(QueueError::MissingField("command")));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_rejected_push_consumes_no_sequence() {
        let mut queue = make_queue();
        queue.push_command("a", 1);
        let _ = queue.push(CommandRecord::new().with_command("b"));
        queue.push_command("c", 1);

        let sequences: Vec<u64> = queue.entries.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
    }

    #[test]
    fn test_falsy_commands_are_not_sentinel() {
        let mut queue: DispatchQueue<Option<u32>> = DispatchQueue::new();
        queue.push_command(None, 5);
        queue.push_command(Some(0), 5);

        assert_eq!(queue.pop(), Some(None));
        assert_eq!(queue.pop(), Some(Some(0)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_interleaved_push_and_pop() {
        let mut queue = make_queue();

        queue.push_command("b1", 5);
        queue.push_command("a1", 8);
        assert_eq!(queue.pop(), Some("a1"));

        queue.push_command("b2", 5);
        queue.push_command("c1", 2);
        queue.push_command("a2", 8);
        assert_eq!(queue.pop(), Some("a2"));
        assert_eq!(queue.pop(), Some("b1"));

        queue.push_command("b3", 5);
        let order: Vec<_> = queue.drain().collect();
        assert_eq!(order, vec!["b2", "b3", "c1"]);
    }

    #[test]
    fn test_independent_instances() {
        let mut first = make_queue();
        let mut second = make_queue();

        first.push_command("first", 1);
        second.push_command("second", 9);

        assert_eq!(first.len(), 1);
        assert_eq!(second.pop(), Some("second"));
        assert_eq!(second.pop(), None);
        assert_eq!(first.pop(), Some("first"));
    }

    #[test]
    fn test_drain_size_hint_and_partial() {
        let mut queue = make_queue();
        queue.push_command("x", 1);
        queue.push_command("y", 2);
        queue.push_command("z", 3);

        let mut drain = queue.drain();
        assert_eq!(drain.len(), 3);
        assert_eq!(drain.next(), Some("z"));
        assert_eq!(drain.len(), 2);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some("y"));
    }

    #[test]
    fn test_default_is_empty() {
        let queue: DispatchQueue<String> = DispatchQueue::default();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }
}
