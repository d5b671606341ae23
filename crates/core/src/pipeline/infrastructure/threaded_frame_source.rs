use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;

use crate::shared::frame::Frame;
use crate::video::domain::video_reader::VideoReader;

pub type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Decodes frames on a dedicated thread and hands them over a bounded
/// channel, in source order.
///
/// The reader stops when the source is exhausted, the first read error
/// has been forwarded, the consumer drops the receiver, or `cancelled`
/// is set.
pub struct ThreadedFrameSource {
    frames: Option<Receiver<Result<Frame, SendError>>>,
    handle: Option<JoinHandle<Box<dyn VideoReader>>>,
}

impl ThreadedFrameSource {
    pub fn spawn(
        reader: Box<dyn VideoReader>,
        capacity: usize,
        cancelled: Arc<AtomicBool>,
    ) -> Self {
        let (frame_tx, frame_rx) = crossbeam_channel::bounded(capacity.max(1));
        let handle = spawn_reader(reader, frame_tx, cancelled);
        Self {
            frames: Some(frame_rx),
            handle: Some(handle),
        }
    }

    /// Block until the next frame arrives. `None` once the source is done.
    pub fn next_frame(&self) -> Option<Result<Frame, SendError>> {
        self.frames.as_ref()?.recv().ok()
    }

    /// Frames decoded but not yet taken.
    pub fn queued(&self) -> usize {
        self.frames.as_ref().map_or(0, |rx| rx.len())
    }

    /// Disconnect and wait for the reader thread, which closes the reader.
    pub fn finish(mut self) -> Result<Box<dyn VideoReader>, Box<dyn std::error::Error>> {
        // Dropping the receiver unblocks a reader waiting on a full channel.
        self.frames.take();
        let handle = self.handle.take().ok_or("Reader thread already joined")?;
        handle
            .join()
            .map_err(|_| -> Box<dyn std::error::Error> { "Reader thread panicked".into() })
    }
}

fn spawn_reader(
    mut reader: Box<dyn VideoReader>,
    frame_tx: crossbeam_channel::Sender<Result<Frame, SendError>>,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<Box<dyn VideoReader>> {
    std::thread::spawn(move || {
        for frame_result in reader.frames() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let failed = frame_result.is_err();
            let mapped = frame_result.map_err(|e| -> SendError { e.to_string().into() });
            if frame_tx.send(mapped).is_err() || failed {
                break;
            }
        }
        reader.close();
        reader
    })
}
