use std::io::BufRead;

use crossbeam_channel::Receiver;

use crate::input::domain::key_command::KeyCommand;
use crate::input::domain::key_source::KeySource;

/// Reads one key per line on a background thread.
///
/// The reader thread is detached: it blocks on input and ends at EOF.
/// Unrecognised lines are dropped.
pub struct StdinKeySource {
    rx: Receiver<KeyCommand>,
}

impl StdinKeySource {
    pub fn spawn() -> Self {
        Self::from_reader(std::io::BufReader::new(std::io::stdin()))
    }

    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        std::thread::spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else { break };
                match KeyCommand::parse(&line) {
                    Some(cmd) => {
                        if tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    None if !line.trim().is_empty() => {
                        log::debug!("Ignoring key {:?}", line.trim());
                    }
                    None => {}
                }
            }
        });
        Self { rx }
    }
}

impl KeySource for StdinKeySource {
    fn poll(&mut self, _frame_index: usize) -> Vec<KeyCommand> {
        self.rx.try_iter().collect()
    }
}
