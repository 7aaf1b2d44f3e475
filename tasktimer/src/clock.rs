//! Tokio-backed tick source

use crate::event::AppEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tasktimer_core::{Scheduler, TickHandle};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Spawns one interval task per schedule call. Ticks are tagged with a
/// generation so the loop can drop ticks that were queued before a cancel.
pub struct TokioClock {
    tx: UnboundedSender<AppEvent>,
    generation: Arc<AtomicU64>,
}

impl TokioClock {
    pub fn new(tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            tx,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

pub struct TickTask {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Scheduler for TokioClock {
    type Handle = TickTask;

    fn schedule_repeating(&mut self, interval: Duration) -> TickTask {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            // First tick one full interval from now, not immediately.
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(AppEvent::Tick(generation)).is_err() {
                    debug!("Tick receiver gone, stopping tick source {}", generation);
                    break;
                }
            }
        });
        TickTask { generation, handle }
    }
}

impl TickHandle for TickTask {
    fn cancel(self) {
        debug!("Aborting tick source {}", self.generation);
        self.handle.abort();
    }
}
