// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the transform between screen coordinates and image
//! pixel coordinates, plus the containment tests used for hit testing and
//! the triangulation used to fill polygons.

use crate::models::shape::Point;

/// Mapping between the displayed image rectangle and image pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Top-left corner of the displayed image in screen coordinates
    pub origin: (f32, f32),
    /// Displayed size in screen coordinates
    pub display_size: (f32, f32),
    /// Natural image size in pixels
    pub image_size: (u32, u32),
}

impl ViewTransform {
    pub fn new(origin: (f32, f32), display_size: (f32, f32), image_size: (u32, u32)) -> Self {
        Self {
            origin,
            display_size,
            image_size,
        }
    }

    fn scale(&self) -> (f64, f64) {
        let sx = self.image_size.0 as f64 / self.display_size.0.max(f32::EPSILON) as f64;
        let sy = self.image_size.1 as f64 / self.display_size.1.max(f32::EPSILON) as f64;
        (sx, sy)
    }

    /// Convert a screen position to rounded image pixel coordinates.
    pub fn to_image(&self, screen_x: f32, screen_y: f32) -> Point {
        let (sx, sy) = self.scale();
        let x = (screen_x - self.origin.0) as f64 * sx;
        let y = (screen_y - self.origin.1) as f64 * sy;
        Point::new(x.round() as i32, y.round() as i32)
    }

    /// Convert image pixel coordinates to a screen position.
    pub fn to_screen(&self, point: Point) -> (f32, f32) {
        let (sx, sy) = self.scale();
        (
            self.origin.0 + (point.x as f64 / sx) as f32,
            self.origin.1 + (point.y as f64 / sy) as f32,
        )
    }

    /// Convert a length in image pixels to screen units (horizontal scale).
    pub fn length_to_screen(&self, length: f64) -> f32 {
        let (sx, _) = self.scale();
        (length / sx) as f32
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Inclusive test against the box spanned by two opposite corners.
pub fn rect_contains(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Points at exactly `radius` from the centre count as inside.
pub fn circle_contains(center: Point, radius: i32, p: Point) -> bool {
    distance(center, p) <= radius as f64
}

/// Even-odd ray casting.
///
/// Points on left/top edges count as inside, points on right/bottom edges as
/// outside.
pub fn polygon_contains(vertices: &[Point], p: Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let (px, py) = (p.x as f64, p.y as f64);
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].x as f64, vertices[i].y as f64);
        let (xj, yj) = (vertices[j].x as f64, vertices[j].y as f64);
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Split a simple polygon into triangles of vertex indices.
///
/// Works for concave outlines. Returns nothing for fewer than three
/// vertices or an outline the triangulator rejects.
pub fn triangulate(vertices: &[Point]) -> Vec<[usize; 3]> {
    if vertices.len() < 3 {
        return Vec::new();
    }

    let flat: Vec<f64> = vertices
        .iter()
        .flat_map(|v| [v.x as f64, v.y as f64])
        .collect();
    match earcutr::earcut(&flat, &[], 2) {
        Ok(indices) => indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect(),
        Err(_) => {
            log::warn!("Could not triangulate polygon with {} vertices", vertices.len());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]
    }

    #[test]
    fn test_to_image_scales_and_rounds() {
        // 800x600 image shown at half size, offset by (100, 50)
        let view = ViewTransform::new((100.0, 50.0), (400.0, 300.0), (800, 600));
        assert_eq!(view.to_image(100.0, 50.0), Point::new(0, 0));
        assert_eq!(view.to_image(300.0, 200.0), Point::new(400, 300));
        assert_eq!(view.to_image(100.3, 50.8), Point::new(1, 2));
    }

    #[test]
    fn test_to_screen_inverts_to_image() {
        let view = ViewTransform::new((10.0, 20.0), (200.0, 150.0), (400, 300));
        let point = Point::new(120, 90);
        let (sx, sy) = view.to_screen(point);
        assert_eq!(view.to_image(sx, sy), point);
    }

    #[test]
    fn test_rect_contains_with_inverted_corners() {
        let a = Point::new(150, 150);
        let b = Point::new(50, 50);
        assert!(rect_contains(a, b, Point::new(100, 100)));
        assert!(rect_contains(a, b, Point::new(50, 150)));
        assert!(!rect_contains(a, b, Point::new(151, 100)));
        assert!(!rect_contains(a, b, Point::new(100, 49)));
    }

    #[test]
    fn test_circle_boundary() {
        let center = Point::new(0, 0);
        assert!(circle_contains(center, 5, Point::new(3, 4)));
        assert!(circle_contains(center, 5, Point::new(5, 0)));
        assert!(!circle_contains(center, 5, Point::new(6, 0)));
    }

    #[test]
    fn test_polygon_square() {
        let vertices = square();
        assert!(polygon_contains(&vertices, Point::new(5, 5)));
        assert!(!polygon_contains(&vertices, Point::new(15, 15)));
        assert!(!polygon_contains(&vertices, Point::new(-1, 5)));
    }

    #[test]
    fn test_polygon_edges_are_half_open() {
        let vertices = square();
        assert!(polygon_contains(&vertices, Point::new(0, 5)));
        assert!(!polygon_contains(&vertices, Point::new(10, 5)));
    }

    #[test]
    fn test_polygon_concave() {
        // U shape: the notch between the arms is outside
        let vertices = vec![
            Point::new(0, 0),
            Point::new(30, 0),
            Point::new(30, 30),
            Point::new(20, 30),
            Point::new(20, 10),
            Point::new(10, 10),
            Point::new(10, 30),
            Point::new(0, 30),
        ];
        assert!(polygon_contains(&vertices, Point::new(5, 20)));
        assert!(polygon_contains(&vertices, Point::new(25, 20)));
        assert!(!polygon_contains(&vertices, Point::new(15, 20)));
    }

    #[test]
    fn test_degenerate_polygon_contains_nothing() {
        let vertices = vec![Point::new(0, 0), Point::new(10, 10)];
        assert!(!polygon_contains(&vertices, Point::new(5, 5)));
    }

    fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
        (((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) as f64).abs() / 2.0
    }

    #[test]
    fn test_triangulate_concave_covers_area() {
        let vertices = vec![
            Point::new(0, 0),
            Point::new(30, 0),
            Point::new(30, 30),
            Point::new(20, 30),
            Point::new(20, 10),
            Point::new(10, 10),
            Point::new(10, 30),
            Point::new(0, 30),
        ];
        let triangles = triangulate(&vertices);
        assert_eq!(triangles.len(), vertices.len() - 2);

        let area: f64 = triangles
            .iter()
            .map(|[a, b, c]| triangle_area(vertices[*a], vertices[*b], vertices[*c]))
            .sum();
        assert_eq!(area, 700.0);

        // No triangle bridges the notch
        for [a, b, c] in &triangles {
            let (va, vb, vc) = (vertices[*a], vertices[*b], vertices[*c]);
            let cx = (va.x + vb.x + vc.x) as f64 / 3.0;
            let cy = (va.y + vb.y + vc.y) as f64 / 3.0;
            assert!(!(cx > 10.0 && cx < 20.0 && cy > 10.0));
        }
    }

    #[test]
    fn test_triangulate_too_few_vertices() {
        assert!(triangulate(&[Point::new(0, 0), Point::new(5, 5)]).is_empty());
    }
}
