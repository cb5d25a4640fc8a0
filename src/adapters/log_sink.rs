//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: usize,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events logged since construction.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted += 1;
        match event {
            AppEvent::Started { page, gear } => {
                info!("START | page={:?} gear={}", page, gear);
            }
            AppEvent::PageChanged { from, to } => {
                info!("PAGE  | {:?} -> {:?}", from, to);
            }
            AppEvent::GearChanged { from, to } => {
                info!("GEAR  | {} -> {}", from, to);
            }
            AppEvent::GearLimit(advisory) => {
                info!("LIMIT | {}", advisory.text());
            }
            AppEvent::OutputToggled {
                gear,
                line,
                armed,
                live,
            } => {
                info!(
                    "ARM   | gear={} line={} {} {}",
                    gear,
                    line.get() + 1,
                    if *armed { "ON" } else { "OFF" },
                    if *live { "(live)" } else { "" },
                );
            }
            AppEvent::SelectionMoved { gear, from, to } => {
                info!("SEL   | gear={} {} -> {}", gear, from.get() + 1, to.get() + 1);
            }
            AppEvent::Persisted { writes } => {
                info!("SAVE  | {} cell(s) written", writes);
            }
            AppEvent::PersistFailed(e) => {
                warn!("SAVE  | failed: {}", e);
            }
        }
    }
}
