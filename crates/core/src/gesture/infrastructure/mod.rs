pub mod replay_landmark_detector;
