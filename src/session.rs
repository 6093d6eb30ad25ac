//! Session: the single dispatch loop tying input, grid, surface and sync.
//!
//! DESIGN
//! ======
//! Everything runs on one task: a `tokio::select!` over recorded or live
//! input events, the initial load, outbox completions, and a frame ticker
//! that only runs while an edge-autoscroll animation is in flight. The grid
//! has exactly two writers (input dispatch and load completion) and both
//! run inside this loop, so no locking is needed.
//!
//! LIFECYCLE
//! =========
//! 1. Render the blank surface and start the load.
//! 2. Dispatch events as they arrive. Each event renders at most once.
//! 3. When the load resolves (success or failure), apply it and render once.
//! 4. When input closes, wait for an outstanding load, then drain the outbox.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::time::Duration;

use canvas::engine::{Action, EngineCore};
use canvas::grid::Pixel;
use canvas::input::InputEvent;
use canvas::render::{self, Surface};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace};

use crate::sync::{LoadOutcome, PixelStore, SyncClient, SyncError, SyncEvent};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Counters collected over a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub renders: usize,
    pub paints: usize,
    pub persisted: usize,
    pub failed: usize,
    pub load: Option<LoadOutcome>,
}

impl SessionReport {
    fn record(&mut self, event: &SyncEvent) {
        if event.is_failure() {
            self.failed += 1;
        } else {
            self.persisted += 1;
        }
    }
}

/// Final state handed back when a session ends.
pub struct SessionOutcome<S> {
    pub engine: EngineCore,
    pub surface: S,
    pub report: SessionReport,
}

pub struct Session<S> {
    engine: EngineCore,
    surface: S,
    sync: SyncClient,
    sync_events: mpsc::UnboundedReceiver<SyncEvent>,
    report: SessionReport,
}

impl<S: Surface> Session<S> {
    /// Create a session and start its outbox worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(engine: EngineCore, surface: S, store: Arc<dyn PixelStore>) -> Self {
        let (sync, sync_events) = SyncClient::new(store);
        Self { engine, surface, sync, sync_events, report: SessionReport::default() }
    }

    /// Run until `input` closes and the initial load has resolved.
    pub async fn run(mut self, mut input: mpsc::Receiver<InputEvent>) -> SessionOutcome<S> {
        self.render();

        self.sync.begin_load();
        let store = self.sync.store();
        let load = async move { store.fetch_all().await };
        tokio::pin!(load);

        let mut ticker = tokio::time::interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut loading = true;
        let mut input_open = true;
        while loading || input_open {
            tokio::select! {
                result = &mut load, if loading => {
                    loading = false;
                    self.finish_load(result);
                }
                event = input.recv(), if input_open => match event {
                    Some(event) => self.dispatch(&event),
                    None => {
                        input_open = false;
                        debug!(loading, "input closed");
                    }
                },
                Some(event) = self.sync_events.recv() => self.settle(&event),
                _ = ticker.tick(), if self.engine.is_animating() => self.dispatch(&InputEvent::Frame),
            }
        }

        self.finish().await
    }

    fn dispatch(&mut self, event: &InputEvent) {
        let mut repaint = false;
        for action in self.engine.handle(event) {
            match action {
                Action::PixelPainted(pixel) => self.persist(pixel),
                Action::RenderNeeded => repaint = true,
                Action::ScrollTo(scroll) => trace!(x = scroll.x, y = scroll.y, "scroll"),
                Action::ZoomChanged(zoom) => debug!(zoom, "zoom changed"),
                Action::ConsumeWheel => trace!("wheel consumed"),
                Action::WheelCapture(enabled) => trace!(enabled, "wheel capture"),
            }
        }
        if repaint {
            self.render();
        }
    }

    fn persist(&mut self, pixel: Pixel) {
        self.report.paints += 1;
        self.sync.persist(pixel);
    }

    fn settle(&mut self, event: &SyncEvent) {
        self.sync.complete(event);
        self.report.record(event);
    }

    fn finish_load(&mut self, result: Result<Vec<Pixel>, SyncError>) {
        let outcome = self.sync.resolve_load(&mut self.engine.grid, result);
        self.render();
        self.report.load = Some(outcome);
    }

    fn render(&mut self) {
        let filled = render::render(&mut self.surface, &self.engine.grid, self.engine.viewport.cell_size);
        self.report.renders += 1;
        trace!(filled, renders = self.report.renders, "rendered");
    }

    async fn finish(self) -> SessionOutcome<S> {
        let Self { engine, surface, sync, mut sync_events, mut report } = self;
        sync.shutdown().await;
        while let Some(event) = sync_events.recv().await {
            report.record(&event);
        }
        info!(
            renders = report.renders,
            paints = report.paints,
            persisted = report.persisted,
            failed = report.failed,
            "session finished"
        );
        SessionOutcome { engine, surface, report }
    }
}
