// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape properties panel.
//!
//! Lists every shape and lets the user edit the link target and title of
//! the selected one.

use crate::editor::EditorSession;
use crate::models::shape::ShapeId;

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    Select(ShapeId),
    Delete(ShapeId),
    SetHref(ShapeId, String),
    SetTitle(ShapeId, String),
}

/// Display the shape list and the selected shape's fields.
pub fn show(ui: &mut egui::Ui, session: &EditorSession) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Shapes");
    ui.separator();

    if session.shapes().is_empty() {
        ui.label(egui::RichText::new("No shapes yet").weak());
    }

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() * 0.5)
        .show(ui, |ui| {
            for shape in session.shapes() {
                let [r, g, b] = shape.color;
                let is_selected = session.selected() == Some(shape.id);

                ui.horizontal(|ui| {
                    let (swatch, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 2.0, egui::Color32::from_rgb(r, g, b));

                    let label = format!("{} ({})", shape.display_name(), shape.kind().html_name());
                    if ui.selectable_label(is_selected, label).clicked() {
                        action = PropertiesAction::Select(shape.id);
                    }
                });
            }
        });

    let Some(shape) = session.selected_shape() else {
        return action;
    };

    ui.separator();
    ui.heading(format!("{} {}", shape.kind().label(), shape.id));

    egui::Grid::new("shape_properties")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Link:");
            let mut href = shape.href.clone();
            if ui.text_edit_singleline(&mut href).changed() {
                action = PropertiesAction::SetHref(shape.id, href);
            }
            ui.end_row();

            ui.label("Title:");
            let mut title = shape.title.clone();
            if ui.text_edit_singleline(&mut title).changed() {
                action = PropertiesAction::SetTitle(shape.id, title);
            }
            ui.end_row();

            ui.label("Coords:");
            let coords = shape
                .coords()
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            ui.label(egui::RichText::new(coords).monospace());
            ui.end_row();
        });

    ui.add_space(8.0);
    if ui.button("🗑 Delete shape").clicked() {
        action = PropertiesAction::Delete(shape.id);
    }

    action
}
