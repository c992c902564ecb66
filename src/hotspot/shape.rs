//! Hotspot shapes and point containment

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Outline of a clickable region, in scene units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HotspotShape {
    Poly { points: Vec<Vec2> },
    Rect { x: f32, y: f32, width: f32, height: f32 },
    Circle { cx: f32, cy: f32, r: f32 },
}

impl HotspotShape {
    /// Check whether a scene point falls inside the shape
    ///
    /// Rectangles and circles include their boundary. Polygons use the
    /// even-odd rule, so points exactly on an edge may land either way.
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            HotspotShape::Poly { points } => polygon_contains(points, point),
            HotspotShape::Rect { x, y, width, height } => {
                point.x >= *x && point.x <= x + width && point.y >= *y && point.y <= y + height
            }
            HotspotShape::Circle { cx, cy, r } => point.distance(Vec2::new(*cx, *cy)) <= *r,
        }
    }

    /// A shape that can never be hit
    pub fn is_degenerate(&self) -> bool {
        match self {
            HotspotShape::Poly { points } => points.len() < 3,
            HotspotShape::Rect { width, height, .. } => *width <= 0.0 || *height <= 0.0,
            HotspotShape::Circle { r, .. } => *r <= 0.0,
        }
    }
}

/// Even-odd ray cast towards +x
fn polygon_contains(points: &[Vec2], point: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[j];
        if (a.y > point.y) != (b.y > point.y) {
            let crossing_x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery_outline() -> HotspotShape {
        HotspotShape::Poly {
            points: vec![
                Vec2::new(462.0, 236.0),
                Vec2::new(569.0, 236.0),
                Vec2::new(578.0, 286.0),
                Vec2::new(575.0, 300.0),
                Vec2::new(466.0, 300.0),
                Vec2::new(458.0, 286.0),
            ],
        }
    }

    #[test]
    fn test_polygon_contains_interior_point() {
        assert!(battery_outline().contains(Vec2::new(515.0, 270.0)));
    }

    #[test]
    fn test_polygon_excludes_outside_points() {
        let shape = battery_outline();
        assert!(!shape.contains(Vec2::new(300.0, 270.0)));
        assert!(!shape.contains(Vec2::new(515.0, 320.0)));
        // Left of the slanted corner between (458,286) and (466,300)
        assert!(!shape.contains(Vec2::new(459.0, 299.0)));
    }

    #[test]
    fn test_rect_includes_boundary() {
        let shape = HotspotShape::Rect { x: 10.0, y: 10.0, width: 20.0, height: 5.0 };
        assert!(shape.contains(Vec2::new(10.0, 10.0)));
        assert!(shape.contains(Vec2::new(30.0, 15.0)));
        assert!(!shape.contains(Vec2::new(30.1, 15.0)));
    }

    #[test]
    fn test_circle_includes_boundary() {
        let shape = HotspotShape::Circle { cx: 0.0, cy: 0.0, r: 5.0 };
        assert!(shape.contains(Vec2::new(3.0, 4.0)));
        assert!(!shape.contains(Vec2::new(4.0, 4.0)));
    }

    #[test]
    fn test_degenerate_shapes() {
        assert!(HotspotShape::Poly { points: vec![Vec2::ZERO, Vec2::ONE] }.is_degenerate());
        assert!(HotspotShape::Circle { cx: 1.0, cy: 1.0, r: 0.0 }.is_degenerate());
        assert!(!battery_outline().is_degenerate());
    }

    #[test]
    fn test_shape_tagged_by_kind() {
        let json = r#"{"kind": "circle", "cx": 1.0, "cy": 2.0, "r": 3.0}"#;
        let shape: HotspotShape = serde_json::from_str(json).unwrap();
        assert_eq!(shape, HotspotShape::Circle { cx: 1.0, cy: 2.0, r: 3.0 });
    }
}
