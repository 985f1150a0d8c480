//! Interaction-thread state of the control panel
//!
//! Owns the parameter model and the status text. The GUI feeds edits and
//! reset clicks in here and calls [`Panel::drain_updates`] every frame; all
//! writes coming back from background work happen inside that call.

use std::sync::mpsc::Receiver;

use tracing::{debug, info};

use crate::constants::status;
use crate::controller::{Controller, Phase, Timings, UiQueue, UiUpdate, UpdateKind, Waker};
use crate::params::{ParamKind, ParameterModel};
use crate::tool::Tool;

pub struct Panel {
    model: ParameterModel,
    status: String,
    controller: Controller,
    updates: Receiver<UiUpdate>,
}

impl Panel {
    pub fn new(runtime: tokio::runtime::Handle, tool: Tool, timings: Timings, waker: Waker) -> Self {
        let status = match tool.locate() {
            Ok(_) => status::READY.to_string(),
            Err(err) => err.to_string(),
        };

        let (queue, updates) = UiQueue::new(waker);
        let controller = Controller::new(runtime, tool, timings, queue);

        let mut model = ParameterModel::new();
        let listener = controller.clone();
        model.subscribe(Box::new(move |change| listener.on_parameter_changed(change)));

        Self {
            model,
            status,
            controller,
            updates,
        }
    }

    pub fn model(&self) -> &ParameterModel {
        &self.model
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.controller.phase() != Phase::Idle
    }

    /// User moved a slider
    pub fn edit(&mut self, kind: ParamKind, value: f64) {
        self.model.set(kind, value);
    }

    /// User pressed the reset button
    pub fn request_reset(&mut self) {
        self.controller.reset();
    }

    /// Apply queued results from background work. Returns true if anything changed.
    pub fn drain_updates(&mut self) -> bool {
        let mut changed = false;
        while let Ok(update) = self.updates.try_recv() {
            if !self.controller.is_current(update.generation) {
                debug!(generation = update.generation, "Dropping stale update");
                continue;
            }
            match update.kind {
                UpdateKind::Status(text) => self.status = text,
                UpdateKind::ResetCompleted(text) => {
                    self.model.restore_defaults();
                    info!(status = %text, "Restored default parameters");
                    self.status = text;
                }
            }
            changed = true;
        }
        changed
    }

    pub fn shutdown(&self) {
        self.controller.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Snapshot;
    use crate::test_support::MockTool;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    const TEST_TIMINGS: Timings = Timings {
        debounce: Duration::from_millis(50),
        deadline: Duration::from_secs(2),
    };

    fn panel(tool: Tool) -> Panel {
        Panel::new(tokio::runtime::Handle::current(), tool, TEST_TIMINGS, Arc::new(|| {}))
    }

    /// Drain repeatedly until `done` holds or `limit` passes
    fn pump(panel: &mut Panel, limit: Duration, done: impl Fn(&Panel) -> bool) {
        let until = Instant::now() + limit;
        while Instant::now() < until {
            panel.drain_updates();
            if done(panel) {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_missing_tool_status_before_interaction() {
        let panel = panel(Tool::new("screen-dimmer-missing-tool", "randr"));
        assert_eq!(
            panel.status(),
            "Error: 'screen-dimmer-missing-tool' not found in PATH. \
             Install it (e.g., sudo apt install screen-dimmer-missing-tool)."
        );
        assert!(!panel.is_busy());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_ready_when_tool_found() {
        let mock = MockTool::recording();
        let panel = panel(mock.tool());
        assert_eq!(panel.status(), "Ready.");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_slider_drag_applies_last_value() {
        let mock = MockTool::recording();
        let mut panel = panel(mock.tool());

        for value in [0.9, 0.8, 0.7, 0.6] {
            panel.edit(ParamKind::Brightness, value);
        }
        assert!(panel.is_busy());
        pump(&mut panel, Duration::from_secs(1), |p| p.status() == "Applied");

        assert_eq!(panel.status(), "Applied");
        assert_eq!(mock.calls(), ["-m randr -P -O 6500 -g 1.00:1.00:1.00 -b 0.60"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_reset_restores_defaults_without_apply() {
        let mock = MockTool::recording();
        let mut panel = panel(mock.tool());

        panel.edit(ParamKind::Temperature, 2500.0);
        panel.edit(ParamKind::Gamma, 2.0);
        pump(&mut panel, Duration::from_secs(1), |p| p.status() == "Applied");

        panel.request_reset();
        pump(&mut panel, Duration::from_secs(1), |p| p.status() == "Reset to defaults");
        assert_eq!(panel.model().snapshot(), Snapshot::defaults());

        // restoration must not have scheduled another apply
        std::thread::sleep(Duration::from_millis(300));
        panel.drain_updates();
        assert!(!panel.is_busy());
        assert_eq!(panel.status(), "Reset to defaults");
        assert_eq!(
            mock.calls(),
            ["-m randr -P -O 2500 -g 2.00:2.00:2.00 -b 1.00", "-x"]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_failed_reset_still_restores_defaults() {
        let mock = MockTool::new("echo 'randr unavailable' >&2; exit 1");
        let mut panel = panel(mock.tool());
        panel.edit(ParamKind::Brightness, 0.2);

        panel.request_reset();
        pump(&mut panel, Duration::from_secs(1), |p| p.status().starts_with("reset error"));

        assert_eq!(panel.status(), "reset error: randr unavailable");
        assert_eq!(panel.model().value(ParamKind::Brightness), 1.0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_shutdown_cancels_pending_apply() {
        let mock = MockTool::recording();
        let mut panel = panel(mock.tool());

        panel.edit(ParamKind::Gamma, 1.3);
        panel.shutdown();
        std::thread::sleep(Duration::from_millis(200));

        assert!(!panel.drain_updates());
        assert!(mock.calls().is_empty());
    }
}
