//! Browser bindings
//!
//! The JS presentation layer owns one `WebRegatta`, calls `advance` from
//! `requestAnimationFrame`, forwards taps to `submit_answer`, and re-renders
//! from `snapshot()`. Snapshots and events cross the boundary as JSON.

use wasm_bindgen::prelude::*;

use crate::catalog::CosmeticKind;
use crate::persistence::LocalStore;
use crate::platform::SessionClock;
use crate::progress::{Progress, today};
use crate::sim::{self, Session, SubmitResult};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Infinite Regatta (web) starting...");
}

#[wasm_bindgen]
pub struct WebRegatta {
    session: Session,
    clock: SessionClock,
    progress: Progress,
    store: LocalStore,
    /// Whether the current session's outcome has reached the ledger
    recorded: bool,
}

#[wasm_bindgen]
impl WebRegatta {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let store = LocalStore;
        Self {
            session: Session::new(rand::random()),
            clock: SessionClock::new(),
            progress: Progress::load(&store),
            store,
            recorded: false,
        }
    }

    pub fn start(&mut self, level: i32) {
        sim::start(&mut self.session, level);
        self.clock.attach();
        self.recorded = false;
    }

    pub fn reset(&mut self, level: Option<i32>) {
        sim::reset(&mut self.session, level);
        self.clock.attach();
        self.recorded = false;
    }

    /// Returns false when the answer was ignored (no live question)
    pub fn submit_answer(&mut self, value: i32) -> bool {
        let result = sim::submit_answer(&mut self.session, value);
        self.settle();
        result != SubmitResult::Ignored
    }

    /// Feed elapsed frame time in seconds
    pub fn advance(&mut self, elapsed: f32) {
        self.clock.advance(&mut self.session, elapsed);
        self.settle();
    }

    /// Current session state as JSON
    pub fn snapshot(&self) -> String {
        to_json(&self.session.snapshot())
    }

    /// Events since the last call, as a JSON array
    pub fn take_events(&mut self) -> String {
        to_json(&self.session.drain_events())
    }

    /// Ledger as JSON
    pub fn progress(&self) -> String {
        to_json(&self.progress)
    }

    /// Shipyard tap: buy if needed, then equip
    pub fn buy_or_select(&mut self, kind: &str, id: &str) -> Result<(), JsValue> {
        let kind = CosmeticKind::from_str(kind)
            .ok_or_else(|| JsValue::from_str(&format!("unknown cosmetic kind '{kind}'")))?;
        self.progress
            .buy_or_select(kind, id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.persist();
        Ok(())
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.progress.settings.set_volume(volume);
        self.persist();
    }
}

impl WebRegatta {
    /// Report a finished session to the ledger exactly once
    fn settle(&mut self) {
        if self.recorded {
            return;
        }
        if let Some(outcome) = self.session.outcome() {
            self.clock.detach();
            self.progress.record_session(&outcome, today());
            self.recorded = true;
            self.persist();
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.progress.save(&mut self.store) {
            log::error!("Failed to save progress: {e}");
        }
    }
}

impl Default for WebRegatta {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize for JS: {e}");
        "null".to_string()
    })
}
