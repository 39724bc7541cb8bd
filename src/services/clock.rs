use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Wall clock for the live header; ticks locally, never touches the network.
pub struct WallClock {
    rx: watch::Receiver<DateTime<Local>>,
    handle: JoinHandle<()>,
}

impl WallClock {
    pub fn start(interval: Duration) -> Self {
        let (tx, rx) = watch::channel(Local::now());
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if tx.send(Local::now()).is_err() {
                    break;
                }
            }
        });
        Self { rx, handle }
    }

    pub fn now(&self) -> DateTime<Local> {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<DateTime<Local>> {
        self.rx.clone()
    }
}

impl Drop for WallClock {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
