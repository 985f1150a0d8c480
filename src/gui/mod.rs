//! egui front end for the control panel

mod components;
mod constants;
mod manager;

pub use manager::run_gui;
