pub mod ovp;
pub mod scheduler;
pub mod state;
pub mod timing;
pub mod token;
pub mod tokenizer;

pub use ovp::{calculate_anchor_position, resolve_pivot, PivotSplit};
pub use scheduler::{PlaybackScheduler, TickOutcome};
pub use state::{PlaybackPhase, PlaybackState};
pub use timing::{compute_duration, estimate_remaining_seconds, wpm_to_milliseconds};
pub use token::Token;
pub use tokenizer::tokenize_text;
