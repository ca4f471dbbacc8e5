mod percent_slider;
mod toggle_button;

pub use percent_slider::PercentSlider;
pub use toggle_button::ToggleButton;
