use super::key_command::KeyCommand;

/// Keyboard-like input polled once per processed frame.
///
/// Must not block: sources with nothing pending return an empty list.
pub trait KeySource: Send {
    fn poll(&mut self, frame_index: usize) -> Vec<KeyCommand>;
}

/// Never produces input.
pub struct NoKeys;

impl KeySource for NoKeys {
    fn poll(&mut self, _frame_index: usize) -> Vec<KeyCommand> {
        Vec::new()
    }
}
