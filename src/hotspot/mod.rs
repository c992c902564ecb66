//! Hotspot layer - clickable regions over the scene image
//!
//! The rendering layer reports clicks in scene coordinates; the layer turns
//! them into target identifiers that the progression machine validates.

pub mod shape;

pub use shape::HotspotShape;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A named clickable region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub shape: HotspotShape,
}

impl Hotspot {
    /// Label for display, falling back to the id
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// All hotspots of one scene image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotLayer {
    /// Scene width in scene units
    pub width: f32,
    /// Scene height in scene units
    pub height: f32,
    pub hotspots: Vec<Hotspot>,
}

impl HotspotLayer {
    pub fn get(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    /// Find the topmost hotspot under a scene point
    ///
    /// Later hotspots are drawn over earlier ones, so they win overlaps.
    pub fn hit_test(&self, point: Vec2) -> Option<&Hotspot> {
        if point.x < 0.0 || point.y < 0.0 || point.x > self.width || point.y > self.height {
            return None;
        }
        self.hotspots.iter().rev().find(|h| h.shape.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> HotspotLayer {
        HotspotLayer {
            width: 100.0,
            height: 100.0,
            hotspots: vec![
                Hotspot {
                    id: "big".into(),
                    label: Some("Big box".into()),
                    shape: HotspotShape::Rect { x: 0.0, y: 0.0, width: 60.0, height: 60.0 },
                },
                Hotspot {
                    id: "small".into(),
                    label: None,
                    shape: HotspotShape::Circle { cx: 50.0, cy: 50.0, r: 10.0 },
                },
            ],
        }
    }

    #[test]
    fn test_later_hotspot_wins_overlap() {
        let layer = layer();
        assert_eq!(layer.hit_test(Vec2::new(52.0, 52.0)).map(|h| h.id.as_str()), Some("small"));
        assert_eq!(layer.hit_test(Vec2::new(10.0, 10.0)).map(|h| h.id.as_str()), Some("big"));
    }

    #[test]
    fn test_miss_and_out_of_scene() {
        let layer = layer();
        assert!(layer.hit_test(Vec2::new(90.0, 90.0)).is_none());
        assert!(layer.hit_test(Vec2::new(-1.0, 10.0)).is_none());
    }

    #[test]
    fn test_display_label_falls_back_to_id() {
        let layer = layer();
        assert_eq!(layer.get("big").unwrap().display_label(), "Big box");
        assert_eq!(layer.get("small").unwrap().display_label(), "small");
    }
}
