//! GUI-specific constants for layout and colors

use egui;

/// Window dimensions
pub const WINDOW_WIDTH: f32 = 400.0;
pub const WINDOW_HEIGHT: f32 = 320.0;
pub const WINDOW_MIN_WIDTH: f32 = 320.0;
pub const WINDOW_MIN_HEIGHT: f32 = 280.0;

pub const WINDOW_TITLE: &str = "Screen Dimmer";

/// Layout spacing
pub const PADDING: f32 = 8.0;
pub const ITEM_SPACING: f32 = 6.0;
pub const VALUE_LABEL_GAP: f32 = 2.0;

/// Settings panel frame
pub const PANEL_CORNER_RADIUS: u8 = 10;
pub const PANEL_STROKE_WIDTH: f32 = 1.0;
pub const DIVIDER_WIDTH: f32 = 1.0;

/// Colors
pub const APP_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x31, 0x31, 0x31);
pub const HEADER_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x49, 0x49, 0x49);
pub const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(0x41, 0x41, 0x41);
pub const PANEL_STROKE: egui::Color32 = egui::Color32::from_rgb(0x37, 0x37, 0x37);
pub const DIVIDER_COLOR: egui::Color32 = egui::Color32::WHITE;
