use crate::filters::domain::filter_kind::FilterKind;

/// Operator request decoded from one key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Exit,
    ToggleRecording,
    SelectFilter(FilterKind),
}

impl KeyCommand {
    /// Decode a key name. `q`, `esc` and `escape` exit, `r` toggles
    /// recording and `1`-`8` select a filter; anything else is ignored.
    pub fn parse(key: &str) -> Option<KeyCommand> {
        let key = key.trim();
        match key.to_ascii_lowercase().as_str() {
            "q" | "esc" | "escape" | "\u{1b}" => Some(KeyCommand::Exit),
            "r" => Some(KeyCommand::ToggleRecording),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(FilterKind::from_index)
                .map(KeyCommand::SelectFilter),
        }
    }
}

/// Key bindings, one per line, as logged at start-up.
pub const CONTROLS_HELP: [&str; 5] = [
    "Use two hands to create filter region",
    "Point at buttons to select filters",
    "Press 'r' to start/stop recording",
    "Press 'q' or 'ESC' to exit",
    "Press '1-8' for direct filter selection",
];
