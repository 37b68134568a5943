//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a redirect notice.
pub fn redirected(from: &str, to: &str) {
    println!("{} {} {} {}", "↪".yellow(), from, "->".dimmed(), to);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a dimmed hint to stderr.
pub fn hint(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print each item as one JSON line, or a hint when there are none.
pub fn json_lines<T: Serialize>(items: &[T], empty: &str) -> Result<()> {
    if items.is_empty() {
        hint(empty);
        return Ok(());
    }
    for item in items {
        json(item)?;
    }
    Ok(())
}
