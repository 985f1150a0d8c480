pub mod labeled_slider;
