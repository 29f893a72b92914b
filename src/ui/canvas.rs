// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and region editing.
//!
//! This module paints the image, the committed shapes and any edit in
//! progress, and translates pointer input into [`CanvasEvent`]s in image
//! pixel coordinates for the session to apply.

use crate::editor::{
    session::{Draft, Interaction},
    EditorSession,
};
use crate::models::shape::{Geometry, Point, ShapeKind};
use crate::util::geometry::{self, ViewTransform};

/// Stroke for the selected shape.
const SELECTED_COLOR: egui::Color32 = egui::Color32::YELLOW;
/// Stroke for the shape being drawn.
const DRAFT_COLOR: egui::Color32 = egui::Color32::LIGHT_BLUE;
const FILL_ALPHA: u8 = 50;
const HANDLE_SIZE: f32 = 4.0;

/// Pointer input in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    DoubleClick(Point),
    FinishPolygon,
}

/// Fit the image inside `available`, preserving aspect ratio, centred.
fn fit_image_rect(ui: &egui::Ui, image_size: (u32, u32)) -> egui::Rect {
    let available = ui.available_size();
    let (img_width, img_height) = image_size;
    let img_aspect = img_width as f32 / img_height.max(1) as f32;
    let available_aspect = available.x / available.y.max(1.0);

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        (available.x, available.x / img_aspect)
    } else {
        // Image is taller - fit to height
        (available.y * img_aspect, available.y)
    };

    let x_offset = (available.x - display_width) / 2.0;
    let y_offset = (available.y - display_height) / 2.0;

    egui::Rect::from_min_size(
        ui.min_rect().min + egui::vec2(x_offset, y_offset),
        egui::vec2(display_width, display_height),
    )
}

/// Display the canvas and collect pointer events for this frame.
pub fn show(
    ui: &mut egui::Ui,
    session: &EditorSession,
    image_texture: &Option<egui::TextureHandle>,
) -> Vec<CanvasEvent> {
    let mut events = Vec::new();
    let mut hover: Option<Point> = None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size() - egui::vec2(0.0, 24.0);

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(texture), Some(image_size)) = (image_texture, session.image_size()) else {
            welcome(ui);
            return;
        };

        let image_rect = fit_image_rect(ui, image_size);
        let view = ViewTransform::new(
            (image_rect.min.x, image_rect.min.y),
            (image_rect.width(), image_rect.height()),
            image_size,
        );

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());
        collect_events(ui, &response, &view, &mut events);
        hover = response.hover_pos().map(|pos| view.to_image(pos.x, pos.y));

        let painter = ui.painter_at(image_rect);
        draw_shapes(&painter, session, &view);
        if let Some(draft) = session.draft() {
            draw_draft(&painter, draft, &view);
        }
    });

    // Status line
    ui.horizontal(|ui| {
        ui.label(format!("Tool: {:?}", session.tool()));
        ui.separator();
        match session.image_size() {
            Some((w, h)) => ui.label(format!("{}x{} px", w, h)),
            None => ui.label("No image loaded"),
        };
        ui.separator();
        ui.label(format!("{} shapes", session.shapes().len()));
        let activity = match session.interaction() {
            Interaction::Idle => None,
            Interaction::Drawing(_) => Some("Drawing"),
            Interaction::DraggingShape { .. } => Some("Moving shape"),
            Interaction::DraggingVertex { .. } => Some("Moving handle"),
        };
        if let Some(activity) = activity {
            ui.separator();
            ui.label(activity);
        }
        if let Some(point) = hover {
            ui.separator();
            ui.label(format!("({}, {})", point.x, point.y));
        }
    });

    events
}

/// Pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PointerInput {
    pressed: bool,
    moved: bool,
    released: bool,
    double_clicked: bool,
    secondary_clicked: bool,
}

/// Events for one frame of pointer input at `point`. A still pointer
/// produces no move event, so idle frames leave the session clean.
fn pointer_events(point: Point, input: PointerInput) -> Vec<CanvasEvent> {
    let mut events = Vec::new();
    if input.pressed {
        events.push(CanvasEvent::PointerDown(point));
    }
    if input.moved {
        events.push(CanvasEvent::PointerMove(point));
    }
    if input.released {
        events.push(CanvasEvent::PointerUp(point));
    }
    if input.double_clicked {
        events.push(CanvasEvent::DoubleClick(point));
    }
    if input.secondary_clicked {
        events.push(CanvasEvent::FinishPolygon);
    }
    events
}

fn collect_events(
    ui: &egui::Ui,
    response: &egui::Response,
    view: &ViewTransform,
    events: &mut Vec<CanvasEvent>,
) {
    let (latest, pressed, moved, released) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_pressed(),
            i.pointer.delta() != egui::Vec2::ZERO,
            i.pointer.primary_released(),
        )
    });
    let Some(pos) = latest else {
        return;
    };

    let input = PointerInput {
        pressed: pressed && response.hovered(),
        moved,
        released,
        double_clicked: response.double_clicked(),
        secondary_clicked: response.secondary_clicked(),
    };
    events.extend(pointer_events(view.to_image(pos.x, pos.y), input));
}

fn to_pos(view: &ViewTransform, point: Point) -> egui::Pos2 {
    let (x, y) = view.to_screen(point);
    egui::pos2(x, y)
}

fn draw_shapes(painter: &egui::Painter, session: &EditorSession, view: &ViewTransform) {
    for shape in session.shapes() {
        let geometry = session.display_geometry(shape);
        let [r, g, b] = shape.color;
        let is_selected = session.selected() == Some(shape.id);

        let stroke = if is_selected {
            egui::Stroke::new(3.0, SELECTED_COLOR)
        } else {
            egui::Stroke::new(2.0, egui::Color32::from_rgb(r, g, b))
        };
        let fill = egui::Color32::from_rgba_unmultiplied(r, g, b, FILL_ALPHA);
        draw_geometry(painter, geometry, view, fill, stroke);

        if is_selected {
            for handle in geometry.handles() {
                let pos = to_pos(view, handle);
                painter.circle_filled(pos, HANDLE_SIZE, egui::Color32::WHITE);
                painter.circle_stroke(pos, HANDLE_SIZE, egui::Stroke::new(1.0, egui::Color32::BLACK));
            }
        }
    }
}

fn draw_geometry(
    painter: &egui::Painter,
    geometry: &Geometry,
    view: &ViewTransform,
    fill: egui::Color32,
    stroke: egui::Stroke,
) {
    match geometry {
        Geometry::Rect { x1, y1, x2, y2 } => {
            let rect = egui::Rect::from_two_pos(
                to_pos(view, Point::new(*x1, *y1)),
                to_pos(view, Point::new(*x2, *y2)),
            );
            painter.rect(rect, 0.0, fill, stroke);
        }
        Geometry::Circle { cx, cy, r } => {
            let center = to_pos(view, Point::new(*cx, *cy));
            let radius = view.length_to_screen((*r).max(0) as f64);
            painter.circle(center, radius, fill, stroke);
        }
        Geometry::Polygon { vertices } => {
            let points: Vec<egui::Pos2> = vertices.iter().map(|v| to_pos(view, *v)).collect();
            if fill != egui::Color32::TRANSPARENT {
                painter.add(egui::Shape::mesh(polygon_mesh(vertices, &points, fill)));
            }
            painter.add(egui::Shape::closed_line(points, stroke));
        }
    }
}

/// Filled mesh for a polygon outline, concave shapes included.
fn polygon_mesh(vertices: &[Point], points: &[egui::Pos2], fill: egui::Color32) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    for pos in points {
        mesh.colored_vertex(*pos, fill);
    }
    for [a, b, c] in geometry::triangulate(vertices) {
        mesh.add_triangle(a as u32, b as u32, c as u32);
    }
    mesh
}

fn draw_draft(painter: &egui::Painter, draft: &Draft, view: &ViewTransform) {
    let stroke = egui::Stroke::new(2.0, DRAFT_COLOR);

    if draft.kind != ShapeKind::Poly {
        draw_geometry(painter, &draft.preview(), view, egui::Color32::TRANSPARENT, stroke);
        return;
    }

    // Recorded edges plus the rubber band to the pointer
    let mut points: Vec<egui::Pos2> = draft.points.iter().map(|p| to_pos(view, *p)).collect();
    let vertex_count = points.len();
    points.push(to_pos(view, draft.cursor));
    painter.add(egui::Shape::line(points.clone(), stroke));

    for point in &points[..vertex_count] {
        painter.circle_filled(*point, HANDLE_SIZE, egui::Color32::WHITE);
        painter.circle_stroke(*point, HANDLE_SIZE, egui::Stroke::new(1.0, egui::Color32::BLACK));
    }
}

fn welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("AREAMAP")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Image map region editor")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Open an image to start drawing clickable areas")
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → Open Image...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_pointer_emits_nothing() {
        assert!(pointer_events(Point::new(5, 5), PointerInput::default()).is_empty());
    }

    #[test]
    fn test_moved_pointer_emits_move() {
        let input = PointerInput {
            moved: true,
            ..Default::default()
        };
        assert_eq!(
            pointer_events(Point::new(5, 6), input),
            vec![CanvasEvent::PointerMove(Point::new(5, 6))]
        );
    }

    #[test]
    fn test_click_emits_down_then_up() {
        let input = PointerInput {
            pressed: true,
            released: true,
            ..Default::default()
        };
        assert_eq!(
            pointer_events(Point::new(1, 2), input),
            vec![
                CanvasEvent::PointerDown(Point::new(1, 2)),
                CanvasEvent::PointerUp(Point::new(1, 2)),
            ]
        );
    }

    #[test]
    fn test_right_click_finishes_polygon() {
        let input = PointerInput {
            secondary_clicked: true,
            ..Default::default()
        };
        assert_eq!(
            pointer_events(Point::new(0, 0), input),
            vec![CanvasEvent::FinishPolygon]
        );
    }
}
