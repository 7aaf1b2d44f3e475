//! Everything the main loop reacts to arrives through one channel.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

const INPUT_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// One second passed. Carries the generation of the tick source that sent it.
    Tick(u64),
    Key(KeyEvent),
    Resize,
}

/// Read terminal input on its own thread and forward it into the loop.
/// The thread exits once the receiving side is gone.
pub fn spawn_input_reader(tx: UnboundedSender<AppEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to read terminal event: {}", e);
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                warn!("Failed to poll terminal: {}", e);
                break;
            }
        }
    })
}
