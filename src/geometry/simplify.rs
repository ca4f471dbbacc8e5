use egui::Pos2;

use super::distance_sq_to_segment;

/// Tolerance used when a finished stroke is simplified.
///
/// Compared against squared distances, so points closer than roughly
/// `sqrt(10)` units to the simplified polyline are dropped.
pub const SIMPLIFY_TOLERANCE: f32 = 10.0;

/// Reduce the control points of a polyline with Ramer-Douglas-Peucker.
///
/// The first and last points always survive. Polylines with fewer than
/// three points are returned unchanged.
pub fn simplify_points(points: &[Pos2], tolerance: f32) -> Vec<Pos2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    mark_kept(points, 0, points.len() - 1, tolerance, &mut keep);

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}

fn mark_kept(points: &[Pos2], first: usize, last: usize, tolerance: f32, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }

    let (start, end) = (points[first], points[last]);
    let mut max_dist = 0.0;
    let mut max_idx = first;

    for (i, point) in points.iter().enumerate().take(last).skip(first + 1) {
        let dist = distance_sq_to_segment(*point, start, end);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        keep[max_idx] = true;
        mark_kept(points, first, max_idx, tolerance, keep);
        mark_kept(points, max_idx, last, tolerance, keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_polylines_are_untouched() {
        let pts = vec![Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)];
        assert_eq!(simplify_points(&pts, SIMPLIFY_TOLERANCE), pts);
    }

    #[test]
    fn collinear_points_collapse_to_endpoints() {
        let pts: Vec<Pos2> = (0..20).map(|i| Pos2::new(i as f32, 0.0)).collect();
        let simplified = simplify_points(&pts, SIMPLIFY_TOLERANCE);
        assert_eq!(simplified, vec![Pos2::new(0.0, 0.0), Pos2::new(19.0, 0.0)]);
    }

    #[test]
    fn sharp_corner_survives() {
        let pts = vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(25.0, 0.5),
            Pos2::new(50.0, 0.0),
            Pos2::new(50.0, 25.0),
            Pos2::new(50.0, 50.0),
        ];
        let simplified = simplify_points(&pts, SIMPLIFY_TOLERANCE);
        assert_eq!(
            simplified,
            vec![Pos2::new(0.0, 0.0), Pos2::new(50.0, 0.0), Pos2::new(50.0, 50.0)]
        );
    }

    #[test]
    fn small_jitter_is_removed() {
        let pts = vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 1.0),
            Pos2::new(20.0, -1.0),
            Pos2::new(30.0, 0.0),
        ];
        assert_eq!(simplify_points(&pts, SIMPLIFY_TOLERANCE).len(), 2);
    }
}
