//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the configuration model, the input state machine,
//! the output applier, and the advisory timer.  It is the only writer of
//! all four.  All I/O flows through port traits injected at call sites,
//! making the entire service testable with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌──────────────────────────┐ ──▶ OutputBank
//! PositionSource ─▶│        AppService        │ ──▶ ConfigPort
//!                 │ Input FSM · Model · Apply │ ──▶ DrawSurface
//!                 └──────────────────────────┘ ──▶ EventSink
//! ```
//!
//! ## What each intent touches
//!
//! | Intent          | Model          | Persist | Outputs        | Redraw              |
//! |-----------------|----------------|---------|----------------|---------------------|
//! | ToggleCheckbox  | one matrix bit | yes     | if active gear | one checkbox        |
//! | Navigate        | selection      | no      | no             | old + new checkbox  |
//! | SwitchPage      | page           | yes     | no             | full page           |
//! | GearUp/GearDown | gear           | yes     | yes            | gear glyph (indicator only) |
//! | at gear limit   | —              | no      | no             | advisory banner     |

use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::input::InputStateMachine;
use crate::output::OutputApplier;

use super::commands::{Direction, Intent};
use super::events::{Advisory, AppEvent};
use super::model::{ConfigurationModel, Gear, OUTPUT_LINES, Page};
use super::ports::{
    ConfigPort, DrawSurface, EventSink, InputPort, OutputBank, PageView, PositionSource, Region,
};

#[derive(Debug, Clone, Copy)]
struct ShownAdvisory {
    kind: Advisory,
    since_ms: u32,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    model: ConfigurationModel,
    input: InputStateMachine,
    outputs: OutputApplier,
    advisory: Option<ShownAdvisory>,
    advisory_ms: u32,
}

impl AppService {
    /// Construct the service around a loaded model.
    ///
    /// Does **not** touch hardware — call [`start`](Self::start) next.
    pub fn new(config: &ControllerConfig, model: ConfigurationModel) -> Self {
        Self {
            model,
            input: InputStateMachine::new(config),
            outputs: OutputApplier::new(),
            advisory: None,
            advisory_ms: config.advisory_ms,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring the hardware in line with the loaded model: adopt the encoder's
    /// current count, drive the outputs, and paint the first page.
    pub fn start(
        &mut self,
        hw: &mut (impl PositionSource + OutputBank),
        display: &mut impl DrawSurface,
        sink: &mut impl EventSink,
    ) {
        self.input.sync_position(hw);
        self.outputs.apply(&self.model, hw);
        display.draw_full_page(&self.page_view());
        sink.emit(&AppEvent::Started {
            page: self.model.page(),
            gear: self.model.gear(),
        });
        info!(
            "AppService started on {:?}, gear {}",
            self.model.page(),
            self.model.gear()
        );
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one polling iteration: sample inputs, apply the resulting
    /// intents in order, then expire the advisory if its time is up.
    ///
    /// Returns the number of intents handled.
    pub fn poll(
        &mut self,
        now_ms: u32,
        hw: &mut (impl InputPort + PositionSource + OutputBank),
        store: &mut impl ConfigPort,
        display: &mut impl DrawSurface,
        sink: &mut impl EventSink,
    ) -> usize {
        let intents = self.input.poll(now_ms, hw);
        for &intent in &intents {
            self.handle_intent(intent, now_ms, hw, store, display, sink);
        }
        self.expire_advisory(now_ms, display);
        intents.len()
    }

    // ── Intent handling ───────────────────────────────────────

    /// Apply one intent to the model and fan out to the ports.
    pub fn handle_intent(
        &mut self,
        intent: Intent,
        now_ms: u32,
        bank: &mut impl OutputBank,
        store: &mut impl ConfigPort,
        display: &mut impl DrawSurface,
        sink: &mut impl EventSink,
    ) {
        match intent {
            Intent::ToggleCheckbox => self.toggle_selected(bank, store, display, sink),
            Intent::Navigate(dir) => self.navigate(dir, display, sink),
            Intent::SwitchPage => self.switch_page(store, display, sink),
            Intent::GearUp => {
                let target = self.model.gear().up();
                self.shift(target, Advisory::MaxGear, now_ms, bank, store, display, sink);
            }
            Intent::GearDown => {
                let target = self.model.gear().down();
                self.shift(target, Advisory::MinGear, now_ms, bank, store, display, sink);
            }
        }
    }

    fn toggle_selected(
        &mut self,
        bank: &mut impl OutputBank,
        store: &mut impl ConfigPort,
        display: &mut impl DrawSurface,
        sink: &mut impl EventSink,
    ) {
        let Some(gear) = self.model.page().config_gear() else {
            debug!("toggle ignored on indicator page");
            return;
        };
        let line = self.model.selection(gear);
        let armed = self.model.toggle(gear, line);
        self.persist(store, sink);

        let live = gear == self.model.gear();
        if live {
            self.outputs.apply(&self.model, bank);
        }
        display.draw_partial(Region::Checkbox {
            index: line,
            armed,
            highlighted: true,
        });
        sink.emit(&AppEvent::OutputToggled {
            gear,
            line,
            armed,
            live,
        });
    }

    fn navigate(
        &mut self,
        dir: Direction,
        display: &mut impl DrawSurface,
        sink: &mut impl EventSink,
    ) {
        let Some(gear) = self.model.page().config_gear() else {
            return;
        };
        let from = self.model.selection(gear);
        let to = match dir {
            Direction::Clockwise => from.next(),
            Direction::CounterClockwise => from.prev(),
        };
        self.model.select(gear, to);

        display.draw_partial(Region::Checkbox {
            index: from,
            armed: self.model.is_armed(gear, from),
            highlighted: false,
        });
        display.draw_partial(Region::Checkbox {
            index: to,
            armed: self.model.is_armed(gear, to),
            highlighted: true,
        });
        sink.emit(&AppEvent::SelectionMoved { gear, from, to });
    }

    fn switch_page(
        &mut self,
        store: &mut impl ConfigPort,
        display: &mut impl DrawSurface,
        sink: &mut impl EventSink,
    ) {
        let from = self.model.page();
        let to = from.next();
        self.model.show_page(to);
        self.persist(store, sink);
        display.draw_full_page(&self.page_view());
        sink.emit(&AppEvent::PageChanged { from, to });
    }

    #[allow(clippy::too_many_arguments)]
    fn shift(
        &mut self,
        target: Option<Gear>,
        limit: Advisory,
        now_ms: u32,
        bank: &mut impl OutputBank,
        store: &mut impl ConfigPort,
        display: &mut impl DrawSurface,
        sink: &mut impl EventSink,
    ) {
        let Some(to) = target else {
            self.advisory = Some(ShownAdvisory {
                kind: limit,
                since_ms: now_ms,
            });
            display.draw_partial(Region::Advisory(Some(limit)));
            sink.emit(&AppEvent::GearLimit(limit));
            return;
        };

        let from = self.model.gear();
        self.model.shift_to(to);
        self.persist(store, sink);
        self.outputs.apply(&self.model, bank);
        if self.model.page() == Page::Indicator {
            display.draw_partial(Region::GearGlyph(to));
        }
        sink.emit(&AppEvent::GearChanged { from, to });
    }

    // ── Advisory timer ────────────────────────────────────────

    fn expire_advisory(&mut self, now_ms: u32, display: &mut impl DrawSurface) {
        let expired = self
            .advisory
            .is_some_and(|shown| now_ms.wrapping_sub(shown.since_ms) >= self.advisory_ms);
        if expired {
            self.advisory = None;
            display.draw_partial(Region::Advisory(None));
        }
    }

    // ── Persistence ───────────────────────────────────────────

    /// Flush the full snapshot now.  A failed flush keeps the in-memory
    /// state authoritative; the next persisted action retries every cell.
    fn persist(&self, store: &mut impl ConfigPort, sink: &mut impl EventSink) {
        match store.save(&self.model) {
            Ok(writes) => sink.emit(&AppEvent::Persisted { writes }),
            Err(e) => {
                warn!("persist failed: {}", e);
                sink.emit(&AppEvent::PersistFailed(e));
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn model(&self) -> &ConfigurationModel {
        &self.model
    }

    /// The pattern currently driven onto the output lines.
    pub fn live_outputs(&self) -> [bool; OUTPUT_LINES] {
        self.outputs.live()
    }

    /// Advisory currently on screen, if any.
    pub fn advisory(&self) -> Option<Advisory> {
        self.advisory.map(|a| a.kind)
    }

    /// Snapshot for a full-page redraw.
    pub fn page_view(&self) -> PageView {
        let page = self.model.page();
        let shown_gear = page.config_gear().unwrap_or(self.model.gear());
        PageView {
            page,
            gear: self.model.gear(),
            selection: page.config_gear().map(|g| self.model.selection(g)),
            checkboxes: self.model.outputs_for(shown_gear),
            advisory: self.advisory(),
        }
    }
}
