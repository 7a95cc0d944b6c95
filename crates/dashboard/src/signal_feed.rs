use common::models::SignalEvent;

use crate::surface::{SignalRow, Surface};

/// The condensed view keeps only this many of the newest signals.
const BRIEF_LIMIT: usize = 5;

/// Replaces both signal regions from the full feed. The wire order is
/// oldest first; both views render newest first.
pub fn apply_signals(surface: &mut dyn Surface, signals: &[SignalEvent]) {
    let rows = signals
        .iter()
        .rev()
        .map(|sig| SignalRow {
            time: cell(&sig.time),
            symbol: cell(&sig.symbol),
            action: cell(&sig.action),
            reason: cell(&sig.reason),
        })
        .collect();
    surface.set_signal_rows(rows);

    let brief = signals
        .iter()
        .rev()
        .take(BRIEF_LIMIT)
        .map(|sig| {
            format!(
                "{} • {} • {}",
                brief_cell(&sig.time),
                brief_cell(&sig.action),
                brief_cell(&sig.reason)
            )
        })
        .collect();
    surface.set_signal_brief(brief);
}

/// Table cells show a placeholder for anything missing.
fn cell(field: &Option<String>) -> String {
    match field.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

/// Brief lines leave gaps empty instead of dashing them.
fn brief_cell(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}
