//! Brush and symmetry configuration, and the slider percentages derived from it.

use egui::Color32;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::color;

pub const MIN_ROTATIONS: u32 = 0;
pub const MAX_ROTATIONS: u32 = 32;
pub const MIN_BRUSH_SIZE: f32 = 0.2;
pub const MAX_BRUSH_SIZE: f32 = 15.0;

pub const DEFAULT_ROTATIONS: u32 = 8;
pub const DEFAULT_BRUSH_SIZE: f32 = 1.0;
pub const DEFAULT_BRUSH_COLOR: Color32 = Color32::from_rgb(0xFF, 0x00, 0x00);
pub const DEFAULT_BACKGROUND_COLOR: Color32 = Color32::WHITE;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// The persisted configuration record.
///
/// Serialized with the camelCase field names other tools expect
/// (`mirror`, `simplify`, `rotations`, `brushSize`, `brushColor`,
/// `backgroundColor`).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrushSettings {
    mirror: bool,
    simplify: bool,
    rotations: u32,
    brush_size: f32,
    #[serde(with = "color::serde_hex")]
    brush_color: Color32,
    #[serde(with = "color::serde_hex")]
    background_color: Color32,

    // Slider positions, derived from the values above
    #[serde(skip)]
    rotations_percentage: f32,
    #[serde(skip)]
    brush_size_percentage: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            mirror: true,
            simplify: true,
            rotations: DEFAULT_ROTATIONS,
            brush_size: DEFAULT_BRUSH_SIZE,
            brush_color: DEFAULT_BRUSH_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            rotations_percentage: rotations_to_percentage(DEFAULT_ROTATIONS),
            brush_size_percentage: brush_size_to_percentage(DEFAULT_BRUSH_SIZE),
        }
    }
}

impl BrushSettings {
    /// Load a record, falling back to the default for every field that is
    /// missing or malformed. Never fails.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => Self::from_map(&map),
            Ok(_) => {
                log::warn!("Brush settings are not an object, using defaults");
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not parse brush settings, using defaults: {}", err);
                Self::default()
            }
        }
    }

    /// Pick the known fields out of an already parsed object.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut settings = Self::default();

        if let Some(mirror) = map.get("mirror").and_then(Value::as_bool) {
            settings.mirror = mirror;
        }
        if let Some(simplify) = map.get("simplify").and_then(Value::as_bool) {
            settings.simplify = simplify;
        }
        if let Some(rotations) = map.get("rotations").and_then(lenient_number) {
            settings.set_rotations_value(rotations);
        }
        if let Some(size) = map.get("brushSize").and_then(lenient_number) {
            settings.set_brush_size(size as f32);
        }
        if let Some(c) = map.get("brushColor").and_then(Value::as_str).and_then(color::parse_hex) {
            settings.brush_color = c;
        }
        if let Some(c) = map
            .get("backgroundColor")
            .and_then(Value::as_str)
            .and_then(color::parse_hex)
        {
            settings.background_color = c;
        }

        settings
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// The record as a JSON object, for embedding in a wrapper.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    pub fn mirror(&self) -> bool {
        self.mirror
    }

    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
    }

    pub fn simplify(&self) -> bool {
        self.simplify
    }

    pub fn set_simplify(&mut self, simplify: bool) {
        self.simplify = simplify;
    }

    pub fn rotations(&self) -> u32 {
        self.rotations
    }

    pub fn rotations_percentage(&self) -> f32 {
        self.rotations_percentage
    }

    /// Set the number of additional rotated copies, clamped to
    /// `MIN_ROTATIONS..=MAX_ROTATIONS`.
    pub fn set_rotations(&mut self, rotations: u32) {
        self.rotations = rotations.clamp(MIN_ROTATIONS, MAX_ROTATIONS);
        self.rotations_percentage = rotations_to_percentage(self.rotations);
    }

    /// Like [`Self::set_rotations`] for untyped input: rounded, clamped,
    /// and `NaN` becomes the minimum.
    pub fn set_rotations_value(&mut self, rotations: f64) {
        let rotations = if rotations.is_nan() {
            MIN_ROTATIONS as f64
        } else {
            rotations.round().clamp(MIN_ROTATIONS as f64, MAX_ROTATIONS as f64)
        };
        self.set_rotations(rotations as u32);
    }

    pub fn set_rotations_percentage(&mut self, percentage: f32) {
        let percentage = clamp_percentage(percentage);
        self.rotations = percentage_to_rotations(percentage);
        self.rotations_percentage = percentage;
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn brush_size_percentage(&self) -> f32 {
        self.brush_size_percentage
    }

    /// Set the brush width, clamped to `MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE` and
    /// rounded to one decimal. `NaN` becomes the minimum.
    pub fn set_brush_size(&mut self, size: f32) {
        let size = if size.is_nan() {
            MIN_BRUSH_SIZE
        } else {
            round_one_decimal(size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE))
        };
        self.brush_size = size;
        self.brush_size_percentage = brush_size_to_percentage(size);
    }

    pub fn set_brush_size_percentage(&mut self, percentage: f32) {
        let percentage = clamp_percentage(percentage);
        self.brush_size = percentage_to_brush_size(percentage);
        self.brush_size_percentage = percentage;
    }

    pub fn brush_color(&self) -> Color32 {
        self.brush_color
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        self.brush_color = color;
    }

    pub fn set_brush_color_hex(&mut self, hex: &str) -> SettingsResult<()> {
        self.brush_color = color::parse_hex(hex).ok_or_else(|| SettingsError::InvalidColor(hex.to_owned()))?;
        Ok(())
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.background_color = color;
    }

    pub fn set_background_color_hex(&mut self, hex: &str) -> SettingsResult<()> {
        self.background_color =
            color::parse_hex(hex).ok_or_else(|| SettingsError::InvalidColor(hex.to_owned()))?;
        Ok(())
    }
}

/// Numbers may arrive as JSON numbers or as the text of an input field.
fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Clamp into `0..=1`; `NaN` becomes 0.
pub fn clamp_percentage(percentage: f32) -> f32 {
    if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 1.0)
    }
}

pub fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

pub fn percentage_to_rotations(percentage: f32) -> u32 {
    let percentage = clamp_percentage(percentage);
    let span = (MAX_ROTATIONS - MIN_ROTATIONS) as f32;
    (MIN_ROTATIONS as f32 + span * percentage).round() as u32
}

pub fn rotations_to_percentage(rotations: u32) -> f32 {
    let span = (MAX_ROTATIONS - MIN_ROTATIONS) as f32;
    clamp_percentage((rotations as f32 - MIN_ROTATIONS as f32) / span)
}

pub fn percentage_to_brush_size(percentage: f32) -> f32 {
    let percentage = clamp_percentage(percentage);
    round_one_decimal(MIN_BRUSH_SIZE + (MAX_BRUSH_SIZE - MIN_BRUSH_SIZE) * percentage)
}

pub fn brush_size_to_percentage(size: f32) -> f32 {
    clamp_percentage((size - MIN_BRUSH_SIZE) / (MAX_BRUSH_SIZE - MIN_BRUSH_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_size_percentage_endpoints() {
        assert_eq!(percentage_to_brush_size(0.0), MIN_BRUSH_SIZE);
        assert_eq!(percentage_to_brush_size(1.0), MAX_BRUSH_SIZE);
        assert_eq!(brush_size_to_percentage(MIN_BRUSH_SIZE), 0.0);
        assert_eq!(brush_size_to_percentage(MAX_BRUSH_SIZE), 1.0);
    }

    #[test]
    fn rotations_percentage_endpoints() {
        assert_eq!(percentage_to_rotations(0.0), MIN_ROTATIONS);
        assert_eq!(percentage_to_rotations(1.0), MAX_ROTATIONS);
        assert_eq!(rotations_to_percentage(MIN_ROTATIONS), 0.0);
        assert_eq!(rotations_to_percentage(MAX_ROTATIONS), 1.0);
    }

    #[test]
    fn brush_size_rounds_to_one_decimal() {
        let size = percentage_to_brush_size(0.333);
        assert_eq!(size, round_one_decimal(size));
        assert!((size - 5.1).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_and_nan_percentages() {
        assert_eq!(percentage_to_rotations(f32::NAN), MIN_ROTATIONS);
        assert_eq!(percentage_to_rotations(-3.0), MIN_ROTATIONS);
        assert_eq!(percentage_to_rotations(7.0), MAX_ROTATIONS);
        assert_eq!(percentage_to_brush_size(f32::NAN), MIN_BRUSH_SIZE);
        assert_eq!(percentage_to_brush_size(2.0), MAX_BRUSH_SIZE);
    }

    #[test]
    fn percentage_setter_keeps_clamped_percentage() {
        let mut settings = BrushSettings::default();
        settings.set_brush_size_percentage(1.5);
        assert_eq!(settings.brush_size(), MAX_BRUSH_SIZE);
        assert_eq!(settings.brush_size_percentage(), 1.0);

        settings.set_rotations_percentage(0.5);
        assert_eq!(settings.rotations(), 16);
        assert_eq!(settings.rotations_percentage(), 0.5);
    }

    #[test]
    fn value_setters_clamp() {
        let mut settings = BrushSettings::default();
        settings.set_rotations(99);
        assert_eq!(settings.rotations(), MAX_ROTATIONS);
        assert_eq!(settings.rotations_percentage(), 1.0);

        settings.set_brush_size(0.0);
        assert_eq!(settings.brush_size(), MIN_BRUSH_SIZE);
        settings.set_brush_size(f32::NAN);
        assert_eq!(settings.brush_size(), MIN_BRUSH_SIZE);
        settings.set_brush_size(3.26);
        assert!((settings.brush_size() - 3.3).abs() < 1e-6);

        settings.set_rotations_value(4.6);
        assert_eq!(settings.rotations(), 5);
        settings.set_rotations_value(f64::NAN);
        assert_eq!(settings.rotations(), MIN_ROTATIONS);
    }

    #[test]
    fn invalid_color_is_rejected() {
        let mut settings = BrushSettings::default();
        assert_eq!(
            settings.set_brush_color_hex("not a color"),
            Err(SettingsError::InvalidColor("not a color".to_owned()))
        );
        assert_eq!(settings.brush_color(), DEFAULT_BRUSH_COLOR);
        assert!(settings.set_background_color_hex("#000").is_ok());
        assert_eq!(settings.background_color(), Color32::BLACK);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings = BrushSettings::from_json(r#"{"rotations": 12}"#);
        assert_eq!(settings.rotations(), 12);
        assert!(settings.mirror());
        assert!(settings.simplify());
        assert_eq!(settings.brush_size(), DEFAULT_BRUSH_SIZE);
        assert_eq!(settings.brush_color(), DEFAULT_BRUSH_COLOR);
        assert_eq!(settings.background_color(), DEFAULT_BACKGROUND_COLOR);
    }

    #[test]
    fn malformed_fields_fall_back_independently() {
        let settings = BrushSettings::from_json(
            r##"{"mirror": "yes", "simplify": false, "rotations": "6", "brushSize": null, "brushColor": "#00F"}"##,
        );
        assert!(settings.mirror());
        assert!(!settings.simplify());
        assert_eq!(settings.rotations(), 6);
        assert_eq!(settings.brush_size(), DEFAULT_BRUSH_SIZE);
        assert_eq!(settings.brush_color(), Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn garbage_gives_defaults() {
        assert_eq!(BrushSettings::from_json("{{{"), BrushSettings::default());
        assert_eq!(BrushSettings::from_json("[1, 2]"), BrushSettings::default());
    }

    #[test]
    fn serializes_camel_case_fields() {
        let json = BrushSettings::default().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["brushColor"], "#FF0000");
        assert_eq!(value["backgroundColor"], "#FFFFFF");
        assert_eq!(value["rotations"], 8);
        assert_eq!(value["mirror"], true);
        assert!(value.get("rotationsPercentage").is_none());
    }

    #[test]
    fn loaded_settings_have_matching_percentages() {
        let settings = BrushSettings::from_json(r#"{"rotations": 32, "brushSize": 15}"#);
        assert_eq!(settings.rotations_percentage(), 1.0);
        assert_eq!(settings.brush_size_percentage(), 1.0);
    }
}
