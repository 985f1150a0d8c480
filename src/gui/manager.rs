//! Control panel window implemented with egui/eframe

use std::sync::Arc;

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::info;

use super::components::labeled_slider;
use super::constants::*;
use crate::controller::Timings;
use crate::panel::Panel;
use crate::params::ParamKind;
use crate::tool::Tool;

struct ControlPanelApp {
    panel: Panel,
}

impl ControlPanelApp {
    fn new(cc: &CreationContext<'_>, runtime: tokio::runtime::Handle, tool: Tool, timings: Timings) -> Self {
        info!("Initializing control panel");

        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        cc.egui_ctx.style_mut(|style| {
            style.visuals.panel_fill = APP_BACKGROUND;
            style.visuals.window_fill = APP_BACKGROUND;
        });

        // Background tasks wake the UI thread so queued results get drained promptly
        let repaint_ctx = cc.egui_ctx.clone();
        let waker = Arc::new(move || repaint_ctx.request_repaint());

        Self {
            panel: Panel::new(runtime, tool, timings, waker),
        }
    }

    fn header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(HEADER_BACKGROUND).inner_margin(PADDING))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("\u{1F504} Reset to defaults").clicked() {
                        self.panel.request_reset();
                    }
                });
            });
    }

    fn settings(&mut self, ui: &mut egui::Ui) {
        egui::Frame::new()
            .fill(PANEL_FILL)
            .stroke(egui::Stroke::new(PANEL_STROKE_WIDTH, PANEL_STROKE))
            .corner_radius(PANEL_CORNER_RADIUS)
            .inner_margin(PADDING)
            .show(ui, |ui| {
                for (index, kind) in ParamKind::PANEL_ORDER.into_iter().enumerate() {
                    if index > 0 {
                        divider(ui);
                    }
                    let mut value = self.panel.model().value(kind);
                    if labeled_slider::ui(ui, kind.spec(), &mut value) {
                        self.panel.edit(kind, value);
                    }
                }
            });
    }
}

impl eframe::App for ControlPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.panel.drain_updates();

        self.header(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(APP_BACKGROUND).inner_margin(PADDING))
            .show(ctx, |ui| {
                self.settings(ui);
                ui.add_space(ITEM_SPACING);
                ui.horizontal(|ui| {
                    if self.panel.is_busy() {
                        ui.spinner();
                    }
                    ui.label(self.panel.status());
                });
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.panel.shutdown();
        info!("Control panel exiting");
    }
}

/// Full-width thin horizontal line
fn divider(ui: &mut egui::Ui) {
    ui.add_space(ITEM_SPACING);
    let size = egui::vec2(ui.available_width(), DIVIDER_WIDTH);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter().rect_filled(rect, 0.0, DIVIDER_COLOR);
    ui.add_space(ITEM_SPACING);
}

pub fn run_gui(runtime: tokio::runtime::Handle, tool: Tool, timings: Timings) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(ControlPanelApp::new(cc, runtime, tool, timings)))),
    )
    .map_err(|err| anyhow!("Failed to launch control panel: {err}"))
}
