use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stroke::Stroke;

/// All strokes produced by one gesture. Committed, undone and persisted as a
/// single unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeGroup {
    id: Uuid,
    strokes: Vec<Stroke>,
}

impl StrokeGroup {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self {
            id: Uuid::new_v4(),
            strokes,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub(crate) fn strokes_mut(&mut self) -> &mut [Stroke] {
        &mut self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// True when every stroke holds the same number of points.
    pub fn is_balanced(&self) -> bool {
        match self.strokes.first() {
            Some(first) => self.strokes.iter().all(|s| s.len() == first.len()),
            None => true,
        }
    }
}

/// The picture: committed stroke groups in the order they were drawn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    #[serde(default)]
    groups: Vec<StrokeGroup>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: StrokeGroup) {
        self.groups.push(group);
    }

    /// Remove the most recently added group.
    pub fn pop(&mut self) -> Option<StrokeGroup> {
        self.groups.pop()
    }

    pub fn last(&self) -> Option<&StrokeGroup> {
        self.groups.last()
    }

    pub fn groups(&self) -> &[StrokeGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.groups.iter().flat_map(|g| g.strokes.iter())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn try_from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse a stored drawing; anything unreadable gives an empty drawing.
    pub fn from_json_or_empty(json: &str) -> Self {
        match Self::try_from_json(json) {
            Ok(drawing) => drawing,
            Err(err) => {
                log::warn!("Discarding unreadable drawing: {}", err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Pos2};

    fn group(points: &[(f32, f32)]) -> StrokeGroup {
        let pts = points.iter().map(|&(x, y)| Pos2::new(x, y)).collect();
        StrokeGroup::new(vec![Stroke::with_points(Color32::RED, 1.0, pts)])
    }

    #[test]
    fn pop_is_lifo() {
        let mut drawing = Drawing::new();
        let first = group(&[(0.0, 0.0), (1.0, 1.0)]);
        let second = group(&[(2.0, 2.0), (3.0, 3.0)]);
        drawing.push(first.clone());
        drawing.push(second.clone());

        assert_eq!(drawing.pop(), Some(second));
        assert_eq!(drawing.pop(), Some(first));
        assert_eq!(drawing.pop(), None);
    }

    #[test]
    fn json_keeps_groups_and_strokes() {
        let mut drawing = Drawing::new();
        drawing.push(group(&[(0.0, 0.0), (10.0, 5.0)]));
        let json = drawing.to_json().unwrap();
        assert_eq!(Drawing::try_from_json(&json).unwrap(), drawing);
    }

    #[test]
    fn unreadable_json_gives_empty_drawing() {
        assert!(Drawing::from_json_or_empty("not json").is_empty());
        assert!(Drawing::from_json_or_empty(r#"{"groups": 3}"#).is_empty());
        assert!(Drawing::from_json_or_empty("{}").is_empty());
    }

    #[test]
    fn balance_check() {
        let balanced = StrokeGroup::new(vec![
            Stroke::with_points(Color32::RED, 1.0, vec![Pos2::ZERO, Pos2::ZERO]),
            Stroke::with_points(Color32::RED, 1.0, vec![Pos2::ZERO, Pos2::ZERO]),
        ]);
        assert!(balanced.is_balanced());

        let unbalanced = StrokeGroup::new(vec![
            Stroke::with_points(Color32::RED, 1.0, vec![Pos2::ZERO]),
            Stroke::with_points(Color32::RED, 1.0, vec![Pos2::ZERO, Pos2::ZERO]),
        ]);
        assert!(!unbalanced.is_balanced());
    }
}
