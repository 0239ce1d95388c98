use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use futures::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, interval_at};

use crate::metrics::collector::CollectorMessage;

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize,
    Collector(CollectorMessage),
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    collector_tx: mpsc::UnboundedSender<CollectorMessage>,
    tick_rate: watch::Sender<Duration>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let (collector_tx, mut collector_rx) = mpsc::unbounded_channel::<CollectorMessage>();
        let (rate_tx, mut rate_rx) = watch::channel(tick_rate);

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut period = *rate_rx.borrow_and_update();
            let mut tick_interval = interval_at(first_tick(period), period);

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                let mapped = match evt {
                                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                                    CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                                    _ => None,
                                };
                                if let Some(e) = mapped
                                    && tx.send(e).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                    _ = tick_interval.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    changed = rate_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        period = *rate_rx.borrow_and_update();
                        tick_interval = interval_at(first_tick(period), period);
                    }
                    Some(message) = collector_rx.recv() => {
                        if tx.send(Event::Collector(message)).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            rx,
            collector_tx,
            tick_rate: rate_tx,
            _task: task,
        }
    }

    /// Sender handed to the collector poller; its messages arrive as
    /// `Event::Collector`.
    pub fn collector_sender(&self) -> mpsc::UnboundedSender<CollectorMessage> {
        self.collector_tx.clone()
    }

    /// Restarts the tick interval with a new period.
    pub fn set_tick_rate(&self, rate: Duration) {
        self.tick_rate.send_replace(rate);
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// First tick one period from now, or now when the period cannot be added.
fn first_tick(period: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(period).unwrap_or(now)
}
