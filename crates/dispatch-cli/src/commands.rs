//! Command handlers for CLI subcommands.

use dispatch_queue::{CommandRecord, DispatchQueue};
use serde_json::Value;
use tracing::{debug, info};

use crate::cli::{Commands, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sample sequence pushed by `dispatch demo`.
pub const DEMO_RECORDS: [(&str, i64); 7] = [
    ("commandA", 1),
    ("commandB", 5),
    ("commandC", 8),
    ("commandD", 5),
    ("commandE", 6),
    ("commandF", 5),
    ("commandG", 3),
];

/// Execute a CLI command.
pub fn execute(command: Commands, format: OutputFormat) -> Result<()> {
    let order = match command {
        Commands::Demo => run_demo()?,
        Commands::Drain { records } => drain_records(&records)?,
    };

    let output = render(&order, format)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Pushes the demo sequence and returns the dispatch order.
pub fn run_demo() -> Result<Vec<Value>> {
    let mut queue = DispatchQueue::new();
    for (command, priority) in DEMO_RECORDS {
        queue.push(CommandRecord::of(Value::from(command), priority))?;
    }

    info!(count = queue.len(), "Draining demo queue");
    Ok(queue.drain().collect())
}

/// Parses each JSON record, pushes them in order, and returns the dispatch order.
///
/// Every record is validated before anything is drained; the first bad
/// record aborts with its 1-based position.
pub fn drain_records(records: &[String]) -> Result<Vec<Value>> {
    let mut queue = DispatchQueue::new();

    for (index, raw) in records.iter().enumerate() {
        let record: CommandRecord<Value> = raw
            .parse()
            .map_err(|e| format!("record {}: {}", index + 1, e))?;
        queue
            .push(record)
            .map_err(|e| format!("record {}: {}", index + 1, e))?;
        debug!(position = index + 1, "Accepted record");
    }

    info!(count = queue.len(), "Draining queue");
    Ok(queue.drain().collect())
}

/// Formats drained commands for output.
pub fn render(order: &[Value], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(order
            .iter()
            .map(|command| match command {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string(order)?),
    }
}
