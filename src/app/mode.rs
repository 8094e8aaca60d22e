/// Which surface has the keyboard.
///
/// Play/pause/finished live in the scheduler; this only says whether keys
/// drive the reader or the command deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Command,
    Reading,
    Quit,
}
