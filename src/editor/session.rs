// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape editing session.
//!
//! [`EditorSession`] owns the shapes drawn over the current image and turns
//! pointer events into drawing, selection and drag operations. All
//! coordinates it receives are already in image pixel space; the canvas is
//! responsible for the screen transform.
//!
//! Edits in flight are held as a [`PendingEdit`] next to the shape instead of
//! inside it, so the committed collection only changes on pointer release and
//! cancelling an edit is just dropping the pending value.

use super::history::History;
use crate::config::EditorConfig;
use crate::io::markup;
use crate::util::geometry;
use crate::models::{
    palette::Palette,
    project::{ProjectData, ProjectError},
    shape::{Geometry, Point, Shape, ShapeId, ShapeKind},
};

/// Current drawing tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Rectangle,
    Circle,
    Polygon,
}

impl Tool {
    /// Kind of shape this tool draws, if any.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Select => None,
            Tool::Rectangle => Some(ShapeKind::Rect),
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Polygon => Some(ShapeKind::Poly),
        }
    }
}

/// A shape being drawn that has not been committed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub kind: ShapeKind,
    /// Anchor for rectangles and circles, recorded vertices for polygons
    pub points: Vec<Point>,
    /// Latest pointer position
    pub cursor: Point,
}

impl Draft {
    fn new(kind: ShapeKind, start: Point) -> Self {
        Self {
            kind,
            points: vec![start],
            cursor: start,
        }
    }

    /// Append a polygon vertex. A point within `min_spacing` of the last
    /// vertex is ignored so both presses of a double click add a single
    /// vertex even when the pointer jitters between them.
    fn push_vertex(&mut self, p: Point, min_spacing: f64) -> bool {
        self.cursor = p;
        if self
            .points
            .last()
            .is_some_and(|last| geometry::distance(*last, p) <= min_spacing)
        {
            return false;
        }
        self.points.push(p);
        true
    }

    /// Geometry the draft would commit to with the pointer at `cursor`.
    pub fn preview(&self) -> Geometry {
        let anchor = self.points.first().copied().unwrap_or(self.cursor);
        match self.kind {
            ShapeKind::Rect => Geometry::rect(anchor, self.cursor),
            ShapeKind::Circle => Geometry::circle(anchor, self.cursor),
            ShapeKind::Poly => Geometry::Polygon {
                vertices: self.points.clone(),
            },
        }
    }
}

/// Pointer interaction in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Idle,
    Drawing(Draft),
    /// Whole-shape drag; `offset` is pointer minus reference point at grab time
    DraggingShape { id: ShapeId, offset: (i32, i32) },
    DraggingVertex { id: ShapeId, handle: usize },
}

/// Working copy of a shape's geometry during a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    pub id: ShapeId,
    pub geometry: Geometry,
}

/// Editor state for one image.
pub struct EditorSession {
    image_size: Option<(u32, u32)>,
    shapes: Vec<Shape>,
    selected: Option<ShapeId>,
    tool: Tool,
    interaction: Interaction,
    pending: Option<PendingEdit>,
    /// Set on every visible change, cleared by the renderer
    dirty: bool,
    next_id: ShapeId,
    palette: Palette,
    history: History,
    handle_radius: f64,
}

impl EditorSession {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            image_size: None,
            shapes: Vec::new(),
            selected: None,
            tool: Tool::Rectangle,
            interaction: Interaction::Idle,
            pending: None,
            dirty: true,
            next_id: 1,
            palette: Palette::new(),
            history: History::new(config.history_limit),
            handle_radius: config.handle_radius,
        }
    }

    /// Start over on a freshly loaded image. All shapes are discarded.
    pub fn load_image(&mut self, width: u32, height: u32) {
        self.image_size = Some((width, height));
        self.shapes.clear();
        self.selected = None;
        self.interaction = Interaction::Idle;
        self.pending = None;
        self.next_id = 1;
        self.palette.reset();
        self.history.clear();
        self.dirty = true;
        log::info!("Session reset for {}x{} image", width, height);
    }

    /// Replace the session with the contents of a saved project. The session
    /// is left untouched if the project's shapes are invalid.
    pub fn load_project(&mut self, project: ProjectData) -> Result<(), ProjectError> {
        let project = project.validated()?;
        self.load_image(project.image_width, project.image_height);
        self.next_id = project.next_shape_id();
        self.shapes = project.shapes;
        log::info!("Loaded {} shapes from project", self.shapes.len());
        Ok(())
    }

    /// Snapshot of the session as a saveable project.
    pub fn to_project(&self, image_file: String) -> Option<ProjectData> {
        let (width, height) = self.image_size?;
        let mut project = ProjectData::new(image_file, width, height);
        project.shapes = self.shapes.clone();
        Some(project)
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.shape(id))
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn pending(&self) -> Option<&PendingEdit> {
        self.pending.as_ref()
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.interaction {
            Interaction::Drawing(draft) => Some(draft),
            _ => None,
        }
    }

    /// Geometry to show for a shape: the pending edit if one targets it,
    /// otherwise the committed geometry.
    pub fn display_geometry<'a>(&'a self, shape: &'a Shape) -> &'a Geometry {
        match &self.pending {
            Some(pending) if pending.id == shape.id => &pending.geometry,
            _ => &shape.geometry,
        }
    }

    /// Return whether anything changed since the last call and clear the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool == tool {
            return;
        }
        if matches!(self.interaction, Interaction::Drawing(_)) {
            self.interaction = Interaction::Idle;
        }
        self.tool = tool;
        self.dirty = true;
    }

    /// Change the selection. Any interaction in progress is cancelled.
    pub fn select(&mut self, id: Option<ShapeId>) {
        self.cancel();
        if self.selected != id {
            self.selected = id;
            self.dirty = true;
        }
    }

    /// Topmost shape containing `p`.
    pub fn shape_at(&self, p: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| self.display_geometry(s).contains(p))
            .map(|s| s.id)
    }

    fn committed_geometry(&self, id: ShapeId) -> Option<&Geometry> {
        self.shape(id).map(|s| &s.geometry)
    }

    fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    pub fn pointer_down(&mut self, p: Point) {
        if self.image_size.is_none() {
            return;
        }

        match &mut self.interaction {
            Interaction::Idle => {}
            Interaction::Drawing(draft) => {
                if draft.kind == ShapeKind::Poly && draft.push_vertex(p, self.handle_radius) {
                    self.dirty = true;
                }
                return;
            }
            _ => return,
        }

        // Handles of the selected shape win over any shape body
        let selected = self
            .selected_shape()
            .map(|s| (s.id, s.geometry.clone()));
        if let Some((id, geometry)) = selected {
            if let Some(handle) = geometry.handle_at(p, self.handle_radius) {
                log::debug!("Grabbed handle {} of shape {}", handle, id);
                self.pending = Some(PendingEdit { id, geometry });
                self.interaction = Interaction::DraggingVertex { id, handle };
                self.dirty = true;
                return;
            }
            if geometry.contains(p) {
                let reference = geometry.reference_point();
                let offset = (p.x - reference.x, p.y - reference.y);
                log::debug!("Grabbed shape {}", id);
                self.pending = Some(PendingEdit { id, geometry });
                self.interaction = Interaction::DraggingShape { id, offset };
                self.dirty = true;
                return;
            }
        }

        if let Some(id) = self.shape_at(p) {
            self.select(Some(id));
            return;
        }

        match self.tool.shape_kind() {
            Some(kind) => {
                self.selected = None;
                self.interaction = Interaction::Drawing(Draft::new(kind, p));
                self.dirty = true;
            }
            None => self.select(None),
        }
    }

    pub fn pointer_move(&mut self, p: Point) {
        if let Interaction::Drawing(draft) = &mut self.interaction {
            if draft.cursor != p {
                draft.cursor = p;
                self.dirty = true;
            }
            return;
        }

        let edit = match &self.interaction {
            Interaction::DraggingVertex { id, handle } => self
                .committed_geometry(*id)
                .map(|g| (*id, g.with_handle_moved(*handle, p))),
            Interaction::DraggingShape { id, offset } => self
                .committed_geometry(*id)
                .map(|g| (*id, g.moved_to(p.offset(-offset.0, -offset.1)))),
            _ => None,
        };

        if let Some((id, geometry)) = edit {
            let pending = Some(PendingEdit { id, geometry });
            if self.pending != pending {
                self.pending = pending;
                self.dirty = true;
            }
        }
    }

    pub fn pointer_up(&mut self, p: Point) {
        self.pointer_move(p);

        match std::mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::Idle => {}
            Interaction::Drawing(draft) if draft.kind == ShapeKind::Poly => {
                self.interaction = Interaction::Drawing(draft);
            }
            Interaction::Drawing(draft) => {
                self.commit_new(draft.preview());
            }
            Interaction::DraggingShape { .. } | Interaction::DraggingVertex { .. } => {
                self.commit_pending();
            }
        }
    }

    /// Double click adds the clicked point to a polygon draft and finishes it.
    pub fn double_click(&mut self, p: Point) {
        if let Interaction::Drawing(draft) = &mut self.interaction {
            if draft.kind == ShapeKind::Poly && draft.push_vertex(p, self.handle_radius) {
                self.dirty = true;
            }
        }
        self.finish_polygon();
    }

    /// Commit the polygon draft if it has at least three vertices.
    pub fn finish_polygon(&mut self) {
        match std::mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::Drawing(draft)
                if draft.kind == ShapeKind::Poly && draft.points.len() >= 3 =>
            {
                self.commit_new(Geometry::Polygon {
                    vertices: draft.points,
                });
            }
            other => {
                if let Interaction::Drawing(draft) = &other {
                    if draft.kind == ShapeKind::Poly {
                        log::warn!(
                            "Polygon needs at least 3 vertices, have {}",
                            draft.points.len()
                        );
                    }
                }
                self.interaction = other;
            }
        }
    }

    /// Drop the draft or pending edit. Returns false if nothing was in progress.
    pub fn cancel(&mut self) -> bool {
        if self.interaction == Interaction::Idle && self.pending.is_none() {
            return false;
        }
        self.interaction = Interaction::Idle;
        self.pending = None;
        self.dirty = true;
        true
    }

    fn commit_new(&mut self, geometry: Geometry) {
        self.history.push(self.shapes.clone());

        let id = self.next_id;
        self.next_id += 1;
        let shape = Shape::new(id, geometry.normalized(), self.palette.next_color());
        log::info!(
            "Added {} shape {} {:?}, total: {}",
            shape.kind().html_name(),
            id,
            shape.coords(),
            self.shapes.len() + 1
        );
        self.shapes.push(shape);
        self.selected = Some(id);
        self.dirty = true;
    }

    fn commit_pending(&mut self) {
        let Some(PendingEdit { id, geometry }) = self.pending.take() else {
            return;
        };
        self.dirty = true;

        let geometry = geometry.normalized();
        let Some(index) = self.index_of(id) else {
            return;
        };
        if self.shapes[index].geometry == geometry {
            return;
        }

        self.history.push(self.shapes.clone());
        self.shapes[index].geometry = geometry;
        log::info!("Updated shape {} {:?}", id, self.shapes[index].coords());
    }

    /// Remove a shape. Returns false if no shape has that id.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.pending.as_ref().is_some_and(|p| p.id == id) {
            self.cancel();
        }

        self.history.push(self.shapes.clone());
        self.shapes.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.dirty = true;
        log::info!("Deleted shape {}, total: {}", id, self.shapes.len());
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.delete_shape(id),
            None => false,
        }
    }

    pub fn set_href(&mut self, id: ShapeId, href: &str) {
        if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) {
            if shape.href != href {
                shape.href = href.to_string();
                self.dirty = true;
            }
        }
    }

    pub fn set_title(&mut self, id: ShapeId, title: &str) {
        if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) {
            if shape.title != title {
                shape.title = title.to_string();
                self.dirty = true;
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.cancel();
        match self.history.undo(self.shapes.clone()) {
            Some(previous) => {
                self.shapes = previous;
                self.selected = None;
                self.dirty = true;
                log::info!("Undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.cancel();
        match self.history.redo(self.shapes.clone()) {
            Some(next) => {
                self.shapes = next;
                self.selected = None;
                self.dirty = true;
                log::info!("Redo");
                true
            }
            None => false,
        }
    }

    /// Image map markup for the committed shapes.
    pub fn markup(&self, map_name: &str) -> String {
        markup::render(map_name, &self.shapes)
    }
}
