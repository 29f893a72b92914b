// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state management.
//!
//! A project ties the drawn shapes to the image they were drawn over so a
//! session can be saved and resumed later.

use super::shape::{Geometry, Shape, ShapeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Reasons a project's shapes cannot be loaded.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ProjectError {
    #[error("Polygon {id} has {count} vertices, at least 3 are required")]
    TooFewVertices { id: ShapeId, count: usize },

    #[error("Shape id {0} is used more than once")]
    DuplicateId(ShapeId),
}

/// Complete project data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub image_file: String,
    pub image_width: u32,
    pub image_height: u32,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl ProjectData {
    /// Create a new project for the given image file and dimensions.
    pub fn new(image_file: String, image_width: u32, image_height: u32) -> Self {
        Self {
            image_file,
            image_width,
            image_height,
            shapes: Vec::new(),
        }
    }

    /// Check the shapes and bring their geometry into canonical form.
    ///
    /// Polygons need at least 3 vertices and ids must be unique. Rectangle
    /// corners are reordered and negative radii clamped, as on commit.
    pub fn validated(mut self) -> Result<Self, ProjectError> {
        let mut seen = HashSet::new();
        for shape in &mut self.shapes {
            if !seen.insert(shape.id) {
                return Err(ProjectError::DuplicateId(shape.id));
            }
            if let Geometry::Polygon { vertices } = &shape.geometry {
                if vertices.len() < 3 {
                    return Err(ProjectError::TooFewVertices {
                        id: shape.id,
                        count: vertices.len(),
                    });
                }
            }
            shape.geometry = shape.geometry.clone().normalized();
        }
        Ok(self)
    }

    /// Smallest id not used by any shape.
    pub fn next_shape_id(&self) -> u64 {
        self.shapes.iter().map(|s| s.id + 1).max().unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shape::{Geometry, Point};

    #[test]
    fn test_next_shape_id() {
        let mut project = ProjectData::new("a.png".to_string(), 10, 10);
        assert_eq!(project.next_shape_id(), 1);

        let geometry = Geometry::rect(Point::new(0, 0), Point::new(1, 1));
        project.shapes.push(Shape::new(4, geometry.clone(), [0, 0, 0]));
        project.shapes.push(Shape::new(2, geometry, [0, 0, 0]));
        assert_eq!(project.next_shape_id(), 5);
    }

    fn with_shapes(shapes: Vec<Shape>) -> ProjectData {
        let mut project = ProjectData::new("a.png".to_string(), 100, 100);
        project.shapes = shapes;
        project
    }

    #[test]
    fn test_validated_normalizes_geometry() {
        let project = with_shapes(vec![
            Shape::new(1, Geometry::rect(Point::new(90, 90), Point::new(10, 10)), [0, 0, 0]),
            Shape::new(2, Geometry::Circle { cx: 5, cy: 5, r: -7 }, [0, 0, 0]),
        ])
        .validated()
        .unwrap();

        assert_eq!(project.shapes[0].coords(), vec![10, 10, 90, 90]);
        assert_eq!(project.shapes[1].coords(), vec![5, 5, 0]);
    }

    #[test]
    fn test_validated_rejects_short_polygon() {
        let polygon = Geometry::Polygon {
            vertices: vec![Point::new(0, 0), Point::new(5, 5)],
        };
        let err = with_shapes(vec![Shape::new(3, polygon, [0, 0, 0])])
            .validated()
            .unwrap_err();
        assert_eq!(err, ProjectError::TooFewVertices { id: 3, count: 2 });
    }

    #[test]
    fn test_validated_rejects_duplicate_ids() {
        let geometry = Geometry::rect(Point::new(0, 0), Point::new(1, 1));
        let err = with_shapes(vec![
            Shape::new(1, geometry.clone(), [0, 0, 0]),
            Shape::new(1, geometry, [0, 0, 0]),
        ])
        .validated()
        .unwrap_err();
        assert_eq!(err, ProjectError::DuplicateId(1));
    }
}
