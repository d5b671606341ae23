use std::collections::HashMap;
use std::path::Path;

use crate::input::domain::key_command::KeyCommand;
use crate::input::domain::key_source::KeySource;

/// Key presses bound to frame indices, for unattended runs.
///
/// File format: a JSON object mapping frame index to key names,
/// e.g. `{"0": ["5"], "40": ["r"], "120": ["r", "q"]}`. Keys for a frame
/// are delivered after that frame is processed.
pub struct ScriptedKeySource {
    by_frame: HashMap<usize, Vec<KeyCommand>>,
}

impl ScriptedKeySource {
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read key script {}: {e}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let raw: HashMap<usize, Vec<String>> = serde_json::from_str(text)?;
        let mut by_frame = HashMap::with_capacity(raw.len());
        for (frame, keys) in raw {
            let commands: Vec<KeyCommand> = keys
                .iter()
                .filter_map(|key| {
                    let cmd = KeyCommand::parse(key);
                    if cmd.is_none() {
                        log::warn!("Frame {frame}: ignoring unknown key {key:?}");
                    }
                    cmd
                })
                .collect();
            by_frame.insert(frame, commands);
        }
        Ok(Self { by_frame })
    }

    pub fn from_commands(by_frame: HashMap<usize, Vec<KeyCommand>>) -> Self {
        Self { by_frame }
    }
}

impl KeySource for ScriptedKeySource {
    fn poll(&mut self, frame_index: usize) -> Vec<KeyCommand> {
        self.by_frame.remove(&frame_index).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::domain::filter_kind::FilterKind;

    #[test]
    fn test_keys_are_delivered_once_per_frame() {
        let mut source = ScriptedKeySource::from_json(r#"{"0": ["5"], "2": ["r", "q"]}"#).unwrap();
        assert_eq!(
            source.poll(0),
            vec![KeyCommand::SelectFilter(FilterKind::Sepia)]
        );
        assert!(source.poll(1).is_empty());
        assert_eq!(
            source.poll(2),
            vec![KeyCommand::ToggleRecording, KeyCommand::Exit]
        );
        assert!(source.poll(2).is_empty());
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let mut source = ScriptedKeySource::from_json(r#"{"1": ["z", "8"]}"#).unwrap();
        assert_eq!(
            source.poll(1),
            vec![KeyCommand::SelectFilter(FilterKind::Glitch)]
        );
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(ScriptedKeySource::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");
        std::fs::write(&path, r#"{"3": ["esc"]}"#).unwrap();
        let mut source = ScriptedKeySource::from_path(&path).unwrap();
        assert_eq!(source.poll(3), vec![KeyCommand::Exit]);
    }

    #[test]
    fn test_from_missing_path_is_error() {
        assert!(ScriptedKeySource::from_path(Path::new("/nonexistent/keys.json")).is_err());
    }
}
