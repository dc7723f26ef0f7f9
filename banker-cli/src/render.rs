//! Table rendering for banker state and outcomes

use banker_core::{BankerError, RequestOutcome, SafetyTrace, Snapshot, Units};
use colored::*;

const RULE_WIDTH: usize = 60;

/// Horizontal rule used between sections
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Header row: `Process  R0  R1 ...`
fn header(resource_types: usize) -> String {
    let mut line = format!("{:<9}", "Process");
    for j in 0..resource_types {
        line.push_str(&format!("{:>4}", format!("R{j}")));
    }
    line
}

/// One `P<i>` row per process
pub fn matrix(title: &str, rows: &[Vec<Units>], resource_types: usize) -> String {
    let mut out = format!("{}\n{}\n", title.bold(), header(resource_types));
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!("{:<9}", format!("P{i}")));
        for units in row {
            out.push_str(&format!("{units:>4}"));
        }
        out.push('\n');
    }
    out
}

/// Vector as `[3, 3, 2]`
pub fn vector(units: &[Units]) -> String {
    let items: Vec<String> = units.iter().map(Units::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Full state: available, maximum, allocation, need
pub fn state(snapshot: &Snapshot) -> String {
    let resource_types = snapshot.available.len();
    let mut out = String::new();
    out.push_str(&format!("{}\n", rule()));
    out.push_str(&format!("{}\n", "CURRENT SYSTEM STATE".bold()));
    out.push_str(&format!("{}\n\n", rule()));
    out.push_str(&format!("{} {}\n", "Available:".bold(), vector(&snapshot.available)));
    out.push_str(&format!("{} {}\n\n", "Totals:   ".bold(), vector(&snapshot.totals)));
    out.push_str(&matrix("Maximum", &snapshot.maximum, resource_types));
    out.push('\n');
    out.push_str(&matrix("Allocation", &snapshot.allocation, resource_types));
    out.push('\n');
    out.push_str(&matrix("Need", &snapshot.need, resource_types));
    out.push_str(&rule());
    out
}

/// Safety verdict with the work vector after each simulated completion
pub fn safety(trace: &SafetyTrace) -> String {
    if !trace.safe {
        return format!("System is in an {} state!", "UNSAFE".red().bold());
    }

    let mut out = format!(
        "System is in a {} state!\nSafe sequence: {}\n",
        "SAFE".green().bold(),
        trace.sequence.to_string().cyan()
    );
    for step in &trace.steps {
        out.push_str(&format!(
            "  P{:<3} work {} -> {}\n",
            step.process,
            vector(&step.work_before),
            vector(&step.work_after)
        ));
    }
    out
}

/// One line per request result
pub fn outcome(process: usize, request: &[Units], result: &Result<RequestOutcome, BankerError>) -> String {
    let head = format!("Process P{process} requests {}:", vector(request));
    match result {
        Ok(RequestOutcome::Granted(sequence)) => format!(
            "{head} {} (safe sequence: {})",
            "granted".green().bold(),
            sequence.to_string().cyan()
        ),
        Ok(RequestOutcome::Denied(_)) => format!(
            "{head} {} (system would be in an unsafe state)",
            "denied".red().bold()
        ),
        Err(err) if err.is_wait() => format!("{head} {} ({err})", "wait".yellow().bold()),
        Err(err) => format!("{head} {} ({err})", "rejected".red().bold()),
    }
}
