// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape data structures.
//!
//! This module defines the clickable regions drawn over the image:
//! rectangles, circles and polygons, together with their control handles
//! and the editing operations applied while dragging.

use crate::util::geometry;
use serde::{Deserialize, Serialize};

/// Unique shape identifier, assigned at creation.
pub type ShapeId = u64;

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Kind of region, matching the HTML `<area shape>` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
    Poly,
}

impl ShapeKind {
    /// Value used for the `shape` attribute.
    pub fn html_name(self) -> &'static str {
        match self {
            ShapeKind::Rect => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Poly => "poly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rect => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Poly => "Polygon",
        }
    }
}

/// Region geometry in image pixel space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    /// Two opposite corners, not necessarily ordered until normalized
    Rect { x1: i32, y1: i32, x2: i32, y2: i32 },
    Circle { cx: i32, cy: i32, r: i32 },
    Polygon { vertices: Vec<Point> },
}

impl Geometry {
    /// Rectangle spanned by two corners.
    pub fn rect(a: Point, b: Point) -> Self {
        Geometry::Rect {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
        }
    }

    /// Circle centred on `center` passing through `edge`.
    pub fn circle(center: Point, edge: Point) -> Self {
        Geometry::Circle {
            cx: center.x,
            cy: center.y,
            r: geometry::distance(center, edge).round() as i32,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Rect { .. } => ShapeKind::Rect,
            Geometry::Circle { .. } => ShapeKind::Circle,
            Geometry::Polygon { .. } => ShapeKind::Poly,
        }
    }

    /// Flat coordinate list as written to `<area coords>`.
    pub fn coords(&self) -> Vec<i32> {
        match self {
            Geometry::Rect { x1, y1, x2, y2 } => vec![*x1, *y1, *x2, *y2],
            Geometry::Circle { cx, cy, r } => vec![*cx, *cy, *r],
            Geometry::Polygon { vertices } => {
                vertices.iter().flat_map(|v| [v.x, v.y]).collect()
            }
        }
    }

    /// Check whether a point lies inside the region.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Geometry::Rect { x1, y1, x2, y2 } => {
                geometry::rect_contains(Point::new(*x1, *y1), Point::new(*x2, *y2), p)
            }
            Geometry::Circle { cx, cy, r } => geometry::circle_contains(Point::new(*cx, *cy), *r, p),
            Geometry::Polygon { vertices } => geometry::polygon_contains(vertices, p),
        }
    }

    /// Control points, in handle index order.
    ///
    /// Rect: the four corners starting at `(x1, y1)` going clockwise.
    /// Circle: the centre, then the radius handle on the right.
    /// Polygon: every vertex.
    pub fn handles(&self) -> Vec<Point> {
        match self {
            Geometry::Rect { x1, y1, x2, y2 } => vec![
                Point::new(*x1, *y1),
                Point::new(*x2, *y1),
                Point::new(*x2, *y2),
                Point::new(*x1, *y2),
            ],
            Geometry::Circle { cx, cy, r } => {
                vec![Point::new(*cx, *cy), Point::new(cx + r, *cy)]
            }
            Geometry::Polygon { vertices } => vertices.clone(),
        }
    }

    /// Index of the first handle within `radius` of `p`.
    pub fn handle_at(&self, p: Point, radius: f64) -> Option<usize> {
        self.handles()
            .iter()
            .position(|h| geometry::distance(*h, p) <= radius)
    }

    /// Copy of this geometry with one handle moved to `p`.
    pub fn with_handle_moved(&self, handle: usize, p: Point) -> Self {
        let mut moved = self.clone();
        match &mut moved {
            Geometry::Rect { x1, y1, x2, y2 } => match handle {
                0 => (*x1, *y1) = (p.x, p.y),
                1 => (*x2, *y1) = (p.x, p.y),
                2 => (*x2, *y2) = (p.x, p.y),
                3 => (*x1, *y2) = (p.x, p.y),
                _ => {}
            },
            Geometry::Circle { cx, cy, r } => match handle {
                0 => (*cx, *cy) = (p.x, p.y),
                1 => *r = geometry::distance(Point::new(*cx, *cy), p).round() as i32,
                _ => {}
            },
            Geometry::Polygon { vertices } => {
                if let Some(vertex) = vertices.get_mut(handle) {
                    *vertex = p;
                }
            }
        }
        moved
    }

    /// Point kept at a fixed offset from the pointer while dragging.
    pub fn reference_point(&self) -> Point {
        match self {
            Geometry::Rect { x1, y1, x2, y2 } => Point::new((x1 + x2) / 2, (y1 + y2) / 2),
            Geometry::Circle { cx, cy, .. } => Point::new(*cx, *cy),
            Geometry::Polygon { vertices } => vertices.first().copied().unwrap_or_default(),
        }
    }

    /// Copy of this geometry shifted by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        match self {
            Geometry::Rect { x1, y1, x2, y2 } => Geometry::Rect {
                x1: x1 + dx,
                y1: y1 + dy,
                x2: x2 + dx,
                y2: y2 + dy,
            },
            Geometry::Circle { cx, cy, r } => Geometry::Circle {
                cx: cx + dx,
                cy: cy + dy,
                r: *r,
            },
            Geometry::Polygon { vertices } => Geometry::Polygon {
                vertices: vertices.iter().map(|v| v.offset(dx, dy)).collect(),
            },
        }
    }

    /// Copy of this geometry moved so its reference point lands on `target`.
    pub fn moved_to(&self, target: Point) -> Self {
        let reference = self.reference_point();
        self.translated(target.x - reference.x, target.y - reference.y)
    }

    /// Canonical form applied on commit: ordered rectangle corners and a
    /// non-negative radius.
    pub fn normalized(self) -> Self {
        match self {
            Geometry::Rect { x1, y1, x2, y2 } => Geometry::Rect {
                x1: x1.min(x2),
                y1: y1.min(y2),
                x2: x1.max(x2),
                y2: y1.max(y2),
            },
            Geometry::Circle { cx, cy, r } => Geometry::Circle { cx, cy, r: r.max(0) },
            polygon => polygon,
        }
    }
}

/// A clickable region with its link metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub geometry: Geometry,
    pub color: [u8; 3],
    #[serde(default = "default_href")]
    pub href: String,
    #[serde(default)]
    pub title: String,
}

fn default_href() -> String {
    "#".to_string()
}

impl Shape {
    /// Create a new shape with default link metadata.
    pub fn new(id: ShapeId, geometry: Geometry, color: [u8; 3]) -> Self {
        Self {
            id,
            geometry,
            color,
            href: default_href(),
            title: String::new(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn coords(&self) -> Vec<i32> {
        self.geometry.coords()
    }

    /// Title if set, otherwise a generic label for the list view.
    pub fn display_name(&self) -> String {
        if self.title.is_empty() {
            format!("{} {}", self.kind().label(), self.id)
        } else {
            self.title.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Geometry {
        Geometry::Polygon {
            vertices: vec![Point::new(0, 0), Point::new(100, 0), Point::new(50, 80)],
        }
    }

    #[test]
    fn test_coords_arity_matches_kind() {
        assert_eq!(Geometry::rect(Point::new(1, 2), Point::new(3, 4)).coords().len(), 4);
        assert_eq!(Geometry::circle(Point::new(0, 0), Point::new(3, 4)).coords().len(), 3);
        assert_eq!(triangle().coords().len(), 6);
    }

    #[test]
    fn test_circle_radius_is_rounded_distance() {
        let circle = Geometry::circle(Point::new(200, 200), Point::new(230, 240));
        assert_eq!(circle.coords(), vec![200, 200, 50]);

        let circle = Geometry::circle(Point::new(0, 0), Point::new(1, 1));
        assert_eq!(circle.coords(), vec![0, 0, 1]);
    }

    #[test]
    fn test_rect_handle_moves_one_corner() {
        let rect = Geometry::rect(Point::new(50, 50), Point::new(150, 150));
        let moved = rect.with_handle_moved(0, Point::new(30, 30));
        assert_eq!(moved.coords(), vec![30, 30, 150, 150]);

        let moved = rect.with_handle_moved(1, Point::new(160, 40));
        assert_eq!(moved.coords(), vec![50, 40, 160, 150]);

        let moved = rect.with_handle_moved(3, Point::new(45, 170));
        assert_eq!(moved.coords(), vec![45, 50, 150, 170]);
    }

    #[test]
    fn test_circle_handles() {
        let circle = Geometry::Circle { cx: 10, cy: 10, r: 5 };
        assert_eq!(circle.handles(), vec![Point::new(10, 10), Point::new(15, 10)]);

        let resized = circle.with_handle_moved(1, Point::new(10, 30));
        assert_eq!(resized.coords(), vec![10, 10, 20]);

        let recentred = circle.with_handle_moved(0, Point::new(40, 40));
        assert_eq!(recentred.coords(), vec![40, 40, 5]);
    }

    #[test]
    fn test_handle_at_respects_radius() {
        let poly = triangle();
        assert_eq!(poly.handle_at(Point::new(98, 4), 10.0), Some(1));
        assert_eq!(poly.handle_at(Point::new(50, 40), 10.0), None);
    }

    #[test]
    fn test_moved_to_keeps_shape() {
        let rect = Geometry::rect(Point::new(0, 0), Point::new(10, 20));
        let moved = rect.moved_to(Point::new(105, 110));
        assert_eq!(moved.coords(), vec![100, 100, 110, 120]);

        let poly = triangle().moved_to(Point::new(10, 10));
        assert_eq!(poly.coords(), vec![10, 10, 110, 10, 60, 90]);
    }

    #[test]
    fn test_normalized_orders_rect_and_clamps_radius() {
        let rect = Geometry::rect(Point::new(150, 20), Point::new(50, 80)).normalized();
        assert_eq!(rect.coords(), vec![50, 20, 150, 80]);

        let circle = Geometry::Circle { cx: 5, cy: 5, r: -3 }.normalized();
        assert_eq!(circle.coords(), vec![5, 5, 0]);
    }

    #[test]
    fn test_shape_defaults() {
        let shape = Shape::new(7, triangle(), [255, 0, 0]);
        assert_eq!(shape.href, "#");
        assert!(shape.title.is_empty());
        assert_eq!(shape.display_name(), "Polygon 7");
    }
}
