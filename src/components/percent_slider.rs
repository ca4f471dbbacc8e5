/// A slider over a setting's percentage position, a fraction in `0..=1`.
///
/// The slider never edits the setting directly; [`PercentSlider::show`]
/// returns the new percentage and the caller maps it back to a value.
pub struct PercentSlider<'a> {
    label: &'a str,
    percentage: f32,
    value_text: Option<String>,
}

impl<'a> PercentSlider<'a> {
    pub fn new(label: &'a str, percentage: f32) -> Self {
        Self {
            label,
            percentage,
            value_text: None,
        }
    }

    /// Text shown next to the slider instead of the percentage.
    pub fn value_text(mut self, text: impl Into<String>) -> Self {
        self.value_text = Some(text.into());
        self
    }

    /// Returns the new percentage if the user moved the slider.
    pub fn show(self, ui: &mut egui::Ui) -> Option<f32> {
        let mut percentage = self.percentage;
        let response = ui
            .horizontal(|ui| {
                ui.label(self.label);
                let response = ui.add(egui::Slider::new(&mut percentage, 0.0..=1.0).show_value(false));
                match &self.value_text {
                    Some(text) => ui.label(text),
                    None => ui.label(format!("{:.0}%", percentage * 100.0)),
                };
                response
            })
            .inner;

        response.changed().then_some(percentage)
    }
}
