use std::collections::HashMap;

/// Fixed text regions of the dashboard chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRegion {
    ModeBadge,
    DryRunBadge,
    SidebarUpdated,
    SymbolCard,
}

/// Labeled metric cards, resolved from their rendered label once at
/// surface construction instead of re-matched by text every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    TechnicalBias,
    Sentiment,
    LastLoop,
}

impl CardKind {
    /// Case-insensitive, whitespace-trimmed label match. Unknown labels
    /// map to `None`; their cards are never written.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "technical bias" => Some(Self::TechnicalBias),
            "sentiment" => Some(Self::Sentiment),
            "last loop" => Some(Self::LastLoop),
            _ => None,
        }
    }
}

/// One row of the full signal table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRow {
    pub time: String,
    pub symbol: String,
    pub action: String,
    pub reason: String,
}

/// The named display regions the dashboard writes into. The markup behind
/// them is not this crate's concern; an implementation backed by real
/// markup silently drops writes to regions it does not render.
///
/// Writes through this trait are programmatic syncs and must never raise
/// a `ControlIntent`; only real user input does that.
pub trait Surface: Send {
    fn set_text(&mut self, region: TextRegion, text: &str);
    fn set_trading_toggle(&mut self, enabled: bool);
    fn set_mode_choice(&mut self, mode: &str);
    fn set_card(&mut self, card: CardKind, value: &str, note: Option<&str>);
    fn set_signal_rows(&mut self, rows: Vec<SignalRow>);
    fn set_signal_brief(&mut self, lines: Vec<String>);

    /// Whether any signal region is rendered at all. When false the
    /// poller skips the signal fetch instead of rendering into nothing.
    fn has_signal_regions(&self) -> bool {
        true
    }
}

/// In-memory surface: the view-model mirror used by tests and headless
/// frontends. Tracks the last applied value per region and skips
/// redundant writes; regions can be marked absent to mimic markup that
/// does not render them.
#[derive(Debug)]
pub struct MemorySurface {
    pub texts: HashMap<TextRegion, String>,
    pub cards: HashMap<CardKind, (String, Option<String>)>,
    pub trading_toggle: Option<bool>,
    pub mode_choice: Option<String>,
    pub signal_rows: Vec<SignalRow>,
    pub signal_brief: Vec<String>,
    /// Count of writes that actually changed a value.
    pub write_count: usize,
    missing_texts: Vec<TextRegion>,
    missing_cards: Vec<CardKind>,
    signal_regions: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            texts: HashMap::new(),
            cards: HashMap::new(),
            trading_toggle: None,
            mode_choice: None,
            signal_rows: Vec::new(),
            signal_brief: Vec::new(),
            write_count: 0,
            missing_texts: Vec::new(),
            missing_cards: Vec::new(),
            signal_regions: true,
        }
    }

    /// Marks a text region as absent from the markup.
    pub fn without_text(mut self, region: TextRegion) -> Self {
        self.missing_texts.push(region);
        self
    }

    /// Marks a card as absent from the markup.
    pub fn without_card(mut self, card: CardKind) -> Self {
        self.missing_cards.push(card);
        self
    }

    pub fn without_signal_regions(mut self) -> Self {
        self.signal_regions = false;
        self
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MemorySurface {
    fn set_text(&mut self, region: TextRegion, text: &str) {
        if self.missing_texts.contains(&region) {
            return;
        }
        if self.texts.get(&region).map(String::as_str) == Some(text) {
            return;
        }
        self.texts.insert(region, text.to_string());
        self.write_count += 1;
    }

    fn set_trading_toggle(&mut self, enabled: bool) {
        if self.trading_toggle == Some(enabled) {
            return;
        }
        self.trading_toggle = Some(enabled);
        self.write_count += 1;
    }

    fn set_mode_choice(&mut self, mode: &str) {
        if self.mode_choice.as_deref() == Some(mode) {
            return;
        }
        self.mode_choice = Some(mode.to_string());
        self.write_count += 1;
    }

    fn set_card(&mut self, card: CardKind, value: &str, note: Option<&str>) {
        if self.missing_cards.contains(&card) {
            return;
        }
        let next = (value.to_string(), note.map(str::to_string));
        if self.cards.get(&card) == Some(&next) {
            return;
        }
        self.cards.insert(card, next);
        self.write_count += 1;
    }

    fn set_signal_rows(&mut self, rows: Vec<SignalRow>) {
        if !self.signal_regions {
            return;
        }
        self.signal_rows = rows;
        self.write_count += 1;
    }

    fn set_signal_brief(&mut self, lines: Vec<String>) {
        if !self.signal_regions {
            return;
        }
        self.signal_brief = lines;
        self.write_count += 1;
    }

    fn has_signal_regions(&self) -> bool {
        self.signal_regions
    }
}
