use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent};

pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// No input arrived within one frame period.
    Tick,
}

/// Reads terminal input on a background thread and forwards it, with a
/// frame tick whenever the poll times out. Dropping the handler stops and
/// joins the thread.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(frame_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&shutdown);

        let worker = thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let forwarded = if event::poll(frame_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            tx.send(Event::Key(key))
                        }
                        Ok(event::Event::Mouse(mouse)) => tx.send(Event::Mouse(mouse)),
                        Ok(_) => Ok(()),
                        Err(err) => {
                            log::warn!("input read failed: {}", err);
                            Ok(())
                        }
                    }
                } else {
                    tx.send(Event::Tick)
                };
                if forwarded.is_err() {
                    break;
                }
            }
            log::debug!("input thread stopped");
        });

        Self {
            rx,
            shutdown,
            worker: Some(worker),
        }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("input thread panicked");
            }
        }
    }
}
