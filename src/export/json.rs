use crate::drawing::Drawing;

use super::{ExportResult, ImportResult};

/// Full scene dump: every group with every stroke.
pub fn export_json(drawing: &Drawing) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(drawing)?)
}

pub fn import_json(json: &str) -> ImportResult<Drawing> {
    Ok(Drawing::try_from_json(json)?)
}

#[cfg(test)]
mod tests {
    use egui::{Color32, Pos2};

    use super::*;
    use crate::drawing::StrokeGroup;
    use crate::stroke::Stroke;

    #[test]
    fn json_dump_reads_back() {
        let mut drawing = Drawing::new();
        drawing.push(StrokeGroup::new(vec![Stroke::with_points(
            Color32::BLUE,
            2.0,
            vec![Pos2::new(0.0, 0.0), Pos2::new(5.0, 5.0)],
        )]));

        let json = export_json(&drawing).unwrap();
        assert!(json.contains("#0000FF"));
        assert_eq!(import_json(&json).unwrap(), drawing);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(import_json("{ not json").is_err());
    }
}
