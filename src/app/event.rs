use crate::transform::TransformMode;

/// Application events
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    LoadFile(String),
    LoadClipboard,
    ReadText(String),
    Transform(TransformMode),
    Generate(String),
    SetWpm(u32),
    Resume,
    Quit,
    Help,
    InvalidCommand(String),
}
