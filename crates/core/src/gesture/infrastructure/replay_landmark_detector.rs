use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::gesture::domain::hand_landmarks::{HandLandmarks, Landmark, LandmarkError};
use crate::gesture::domain::landmark_detector::LandmarkDetector;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("failed to read landmark file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid landmark JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("frame {frame}, hand {hand}: {source}")]
    Hand {
        frame: usize,
        hand: usize,
        #[source]
        source: LandmarkError,
    },
}

#[derive(Deserialize)]
struct FrameEntry {
    frame: usize,
    #[serde(default)]
    hands: Vec<Vec<[f32; 2]>>,
}

/// Replays pre-computed hand landmarks keyed by frame index.
///
/// File format: a JSON array of `{"frame": n, "hands": [[[x, y], ...]]}`
/// entries, 21 normalized points per hand. Frames without an entry yield
/// no hands.
pub struct ReplayLandmarkDetector {
    by_frame: HashMap<usize, Vec<HandLandmarks>>,
}

impl ReplayLandmarkDetector {
    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let detector = Self::from_json(&text)?;
        log::info!(
            "Loaded landmarks for {} frames from {}",
            detector.by_frame.len(),
            path.display()
        );
        Ok(detector)
    }

    pub fn from_json(text: &str) -> Result<Self, ReplayError> {
        let entries: Vec<FrameEntry> = serde_json::from_str(text)?;
        let mut by_frame = HashMap::with_capacity(entries.len());
        for entry in entries {
            let hands = entry
                .hands
                .iter()
                .enumerate()
                .map(|(hand, pts)| {
                    let landmarks: Vec<Landmark> =
                        pts.iter().map(|&[x, y]| Landmark::new(x, y)).collect();
                    HandLandmarks::from_slice(&landmarks).map_err(|source| ReplayError::Hand {
                        frame: entry.frame,
                        hand,
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            by_frame.insert(entry.frame, hands);
        }
        Ok(Self { by_frame })
    }

    pub fn from_frames(by_frame: HashMap<usize, Vec<HandLandmarks>>) -> Self {
        Self { by_frame }
    }
}

impl LandmarkDetector for ReplayLandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, Box<dyn std::error::Error>> {
        Ok(self
            .by_frame
            .get(&frame.index())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::LANDMARK_COUNT;

    fn hand_json(x: f32, y: f32) -> String {
        let pts: Vec<String> = (0..LANDMARK_COUNT).map(|_| format!("[{x}, {y}]")).collect();
        format!("[{}]", pts.join(","))
    }

    #[test]
    fn test_detect_returns_hands_for_listed_frame() {
        let json = format!(
            r#"[{{"frame": 2, "hands": [{}, {}]}}]"#,
            hand_json(0.1, 0.2),
            hand_json(0.3, 0.4)
        );
        let mut detector = ReplayLandmarkDetector::from_json(&json).unwrap();

        let hands = detector.detect(&Frame::blank(4, 4, 2)).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].get(0), Landmark::new(0.1, 0.2));
        assert_eq!(hands[1].get(20), Landmark::new(0.3, 0.4));
    }

    #[test]
    fn test_detect_unlisted_frame_yields_no_hands() {
        let json = format!(r#"[{{"frame": 0, "hands": [{}]}}]"#, hand_json(0.5, 0.5));
        let mut detector = ReplayLandmarkDetector::from_json(&json).unwrap();
        assert!(detector.detect(&Frame::blank(4, 4, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_missing_hands_field_means_empty() {
        let mut detector = ReplayLandmarkDetector::from_json(r#"[{"frame": 0}]"#).unwrap();
        assert!(detector.detect(&Frame::blank(4, 4, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_short_hand_is_rejected() {
        let json = r#"[{"frame": 3, "hands": [[[0.1, 0.1], [0.2, 0.2]]]}]"#;
        let err = ReplayLandmarkDetector::from_json(json).err().unwrap();
        assert!(matches!(
            err,
            ReplayError::Hand {
                frame: 3,
                hand: 0,
                source: LandmarkError::WrongCount(2)
            }
        ));
    }

    #[test]
    fn test_absurd_coordinate_is_rejected() {
        let json = format!(
            r#"[{{"frame": 1, "hands": [{}, {}]}}]"#,
            hand_json(0.5, 0.5),
            hand_json(1e12, 0.5)
        );
        let err = ReplayLandmarkDetector::from_json(&json).err().unwrap();
        assert!(matches!(
            err,
            ReplayError::Hand {
                frame: 1,
                hand: 1,
                source: LandmarkError::OutOfRange { index: 0, .. }
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ReplayLandmarkDetector::from_json("{not json").err().unwrap();
        assert!(matches!(err, ReplayError::Parse(_)));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hands.json");
        std::fs::write(
            &path,
            format!(r#"[{{"frame": 0, "hands": [{}]}}]"#, hand_json(0.2, 0.2)),
        )
        .unwrap();

        let mut detector = ReplayLandmarkDetector::from_path(&path).unwrap();
        assert_eq!(detector.detect(&Frame::blank(2, 2, 0)).unwrap().len(), 1);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = ReplayLandmarkDetector::from_path(Path::new("/nonexistent/hands.json"))
            .err()
            .unwrap();
        assert!(matches!(err, ReplayError::Read { .. }));
    }
}
