use std::collections::HashMap;

use tracing::info;

use dashboard::surface::{CardKind, SignalRow, Surface, TextRegion};

/// Headless stand-in for rendered markup: mirrors every region and logs a
/// line only when a value actually changes, so identical snapshots on
/// consecutive polls stay quiet.
#[derive(Default)]
pub struct LogSurface {
    texts: HashMap<TextRegion, String>,
    cards: HashMap<CardKind, (String, Option<String>)>,
    trading_toggle: Option<bool>,
    mode_choice: Option<String>,
    signal_rows: Vec<SignalRow>,
    signal_brief: Vec<String>,
}

impl Surface for LogSurface {
    fn set_text(&mut self, region: TextRegion, text: &str) {
        if self.texts.get(&region).map(String::as_str) == Some(text) {
            return;
        }
        info!("[{:?}] {}", region, text);
        self.texts.insert(region, text.to_string());
    }

    fn set_trading_toggle(&mut self, enabled: bool) {
        if self.trading_toggle == Some(enabled) {
            return;
        }
        info!("[Toggle] trading {}", if enabled { "enabled" } else { "disabled" });
        self.trading_toggle = Some(enabled);
    }

    fn set_mode_choice(&mut self, mode: &str) {
        if self.mode_choice.as_deref() == Some(mode) {
            return;
        }
        info!("[ModeSelect] {}", mode);
        self.mode_choice = Some(mode.to_string());
    }

    fn set_card(&mut self, card: CardKind, value: &str, note: Option<&str>) {
        let next = (value.to_string(), note.map(str::to_string));
        if self.cards.get(&card) == Some(&next) {
            return;
        }
        match note {
            Some(note) => info!("[{:?}] {} ({})", card, value, note),
            None => info!("[{:?}] {}", card, value),
        }
        self.cards.insert(card, next);
    }

    fn set_signal_rows(&mut self, rows: Vec<SignalRow>) {
        if rows.len() != self.signal_rows.len() {
            info!("[SignalTable] {} rows", rows.len());
        }
        self.signal_rows = rows;
    }

    fn set_signal_brief(&mut self, lines: Vec<String>) {
        if lines != self.signal_brief {
            for line in &lines {
                info!("[SignalBrief] {}", line);
            }
            self.signal_brief = lines;
        }
    }
}
