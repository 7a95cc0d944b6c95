/// User-issued control commands relayed to the bot backend.
#[derive(Debug, Clone)]
pub enum ControlIntent {
    ToggleTrading(bool),
    SetMode(String),
}
