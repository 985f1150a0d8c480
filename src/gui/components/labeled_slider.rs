//! Slider with a title, the current value, and min/max labels on either side

use eframe::egui;

use crate::gui::constants::VALUE_LABEL_GAP;
use crate::params::ParamSpec;

/// Renders one parameter and returns true if the user moved the slider
pub fn ui(ui: &mut egui::Ui, spec: &ParamSpec, value: &mut f64) -> bool {
    let mut changed = false;

    // Header: title on the left, current value on the right
    ui.horizontal(|ui| {
        ui.label(spec.title);
        ui.add_space(VALUE_LABEL_GAP);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(spec.format(*value));
        });
    });

    // Slider row: min on the left, max on the right, slider fills the middle
    ui.horizontal(|ui| {
        ui.label(spec.format(spec.min));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(spec.format(spec.max));
            let width = ui.available_width();
            ui.spacing_mut().slider_width = width;
            let slider = egui::Slider::new(value, spec.min..=spec.max)
                .step_by(spec.step)
                .show_value(false);
            if ui.add(slider).changed() {
                changed = true;
            }
        });
    });

    changed
}
