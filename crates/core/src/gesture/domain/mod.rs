pub mod gesture;
pub mod hand_landmarks;
pub mod landmark_detector;
