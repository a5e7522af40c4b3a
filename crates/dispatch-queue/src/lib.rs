//! Priority dispatch queue with FIFO ordering within each priority level.
//!
//! This crate provides the `DispatchQueue` for releasing commands in order:
//! - Higher priority first, priorities normalized to `[0, 10]`
//! - Within the same priority, oldest first (FIFO)
//! - Records missing `command` or `priority` are rejected without side effects
//!
//! # Example
//!
//! ```
//! use dispatch_queue::{CommandRecord, DispatchQueue};
//!
//! let mut queue = DispatchQueue::new();
//! queue.push(CommandRecord::of("commandA", 1)).unwrap();
//! queue.push(CommandRecord::of("commandC", 8)).unwrap();
//! queue.push(CommandRecord::of("commandB", 8)).unwrap();
//!
//! assert_eq!(queue.pop(), Some("commandC"));
//! assert_eq!(queue.pop(), Some("commandB"));
//! assert_eq!(queue.pop(), Some("commandA"));
//! assert_eq!(queue.pop(), None);
//! ```

pub mod error;
pub mod priority;
pub mod queue;
pub mod record;

pub use error::{QueueError, Result};
pub use priority::Priority;
pub use queue::{DispatchQueue, Drain};
pub use record::CommandRecord;
