use serde_json::Value;
use tracing::debug;

use crate::lookup;
use crate::surface::{CardKind, Surface, TextRegion};

/// One status snapshot resolved to concrete display values. Rebuilt fresh
/// on every poll; stale and new state are never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub symbol: String,
    pub timeframe_minutes: i64,
    pub dry_run: bool,
    pub mode: String,
    pub trading_enabled: bool,
    pub timestamp: Option<String>,
    pub technical_direction: String,
    pub technical_confidence: f64,
    pub sentiment_label: String,
    pub sentiment_confidence: f64,
}

impl StatusView {
    /// `None` only when the payload is not an object at all; individual
    /// missing or mistyped fields fall back per field.
    pub fn resolve(raw: &Value) -> Option<Self> {
        if !raw.is_object() {
            return None;
        }

        let timestamp = match lookup::str_or(raw, "timestamp", "") {
            s if s.is_empty() => None,
            s => Some(s),
        };

        Some(Self {
            symbol: lookup::str_or(raw, "symbol", "-"),
            timeframe_minutes: lookup::first_i64(raw, &["timeframe_minutes", "timeframe"], 0),
            dry_run: lookup::truthy(raw, "dry_run"),
            mode: lookup::str_or(raw, "mode", "SAFE").to_uppercase(),
            trading_enabled: lookup::flag_not_false(raw, "trading_enabled"),
            timestamp,
            technical_direction: lookup::str_or(raw, "technical.direction", "-"),
            technical_confidence: lookup::f64_or(raw, "technical.confidence", 0.0),
            sentiment_label: lookup::str_or(raw, "sentiment.sentiment", "-"),
            sentiment_confidence: lookup::f64_or(raw, "sentiment.confidence", 0.0),
        })
    }
}

/// Applies one status snapshot onto the display regions. Writes are
/// independent of each other; a region the markup never rendered is
/// absorbed by the surface without disturbing the rest.
pub fn apply_status(surface: &mut dyn Surface, raw: &Value) {
    let Some(view) = StatusView::resolve(raw) else {
        debug!("Ignoring malformed status payload");
        return;
    };

    surface.set_text(TextRegion::ModeBadge, &format!("MODE: {}", view.mode));
    surface.set_text(
        TextRegion::DryRunBadge,
        &format!("DRY RUN: {}", if view.dry_run { "ON" } else { "OFF" }),
    );

    let ts = view.timestamp.as_deref().unwrap_or("-");
    surface.set_text(TextRegion::SidebarUpdated, &format!("Updated: {}", ts));

    // Programmatic sync of the two controls; raises no new command.
    surface.set_trading_toggle(view.trading_enabled);
    surface.set_mode_choice(&view.mode);

    surface.set_text(TextRegion::SymbolCard, &view.symbol);

    surface.set_card(
        CardKind::TechnicalBias,
        &view.technical_direction.to_uppercase(),
        Some(&format!("Confidence: {:.2}", view.technical_confidence)),
    );
    surface.set_card(
        CardKind::Sentiment,
        &capitalize_first(&view.sentiment_label),
        Some(&format!("Confidence: {:.2}", view.sentiment_confidence)),
    );
    surface.set_card(CardKind::LastLoop, ts, None);

    debug!(
        "Status applied: symbol={} tf={}m mode={} enabled={}",
        view.symbol, view.timeframe_minutes, view.mode, view.trading_enabled
    );
}

/// Optimistic badge update for a mode change the backend just accepted,
/// ahead of the next poll tick.
pub fn apply_mode_badge(surface: &mut dyn Surface, mode: &str) {
    surface.set_text(TextRegion::ModeBadge, &format!("MODE: {}", mode.to_uppercase()));
}

/// The `"-"` placeholder passes through uncapitalized.
fn capitalize_first(s: &str) -> String {
    if s == "-" {
        return s.to_string();
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
