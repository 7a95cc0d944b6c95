use serde::{Deserialize, Serialize};

/// One entry of the bot's signal history, oldest first on the wire.
/// Every field is optional; the dashboard fills in placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalEvent {
    pub time: Option<String>,
    pub symbol: Option<String>,
    pub action: Option<String>, // "BUY" or "SELL"
    pub reason: Option<String>, // "RSI_OVERSOLD_0.82"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_entries_deserialize_with_gaps() {
        let raw = r#"[{"time": "10:00", "action": "BUY"}, {}, {"reason": "news spike", "extra": 1}]"#;
        let signals: Vec<SignalEvent> = serde_json::from_str(raw).unwrap();

        assert_eq!(signals.len(), 3);
        assert_eq!(signals[0].time.as_deref(), Some("10:00"));
        assert!(signals[0].symbol.is_none());
        assert!(signals[1].action.is_none());
        assert_eq!(signals[2].reason.as_deref(), Some("news spike"));
    }
}
