//! Printed to stdout once the terminal is restored.

use anyhow::Result;
use std::io::Write;
use tasktimer_core::{format_duration, CompletedTask, CompletedTaskLog};

pub fn write_summary<W: Write>(out: &mut W, log: &CompletedTaskLog, json: bool) -> Result<()> {
    if json {
        let entries: Vec<&CompletedTask> = log.iter().collect();
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
        return Ok(());
    }

    if log.is_empty() {
        writeln!(out, "No completed tasks this session.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{} tasks completed ({})",
        log.len(),
        format_duration(log.total_time())
    )?;
    for task in log.iter() {
        writeln!(
            out,
            "  {}  {:>7}  {}",
            task.completed_at.format("%Y-%m-%d %H:%M"),
            format_duration(task.duration),
            task.name
        )?;
    }
    Ok(())
}

/// Print the summary even when the session ended in error, then hand the error back
/// so the process exits non-zero.
pub fn finish<W: Write>(
    out: &mut W,
    log: &CompletedTaskLog,
    json: bool,
    outcome: Result<()>,
) -> Result<()> {
    write_summary(out, log, json)?;
    outcome
}
