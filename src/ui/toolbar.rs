// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.

use crate::editor::Tool;

const TOOLS: &[(Tool, &str)] = &[
    (Tool::Select, "⬆ Select"),
    (Tool::Rectangle, "▭ Rectangle"),
    (Tool::Circle, "◯ Circle"),
    (Tool::Polygon, "▱ Polygon"),
];

/// Display the toolbar. Returns the newly chosen tool, if any.
pub fn show(ui: &mut egui::Ui, current_tool: Tool) -> Option<Tool> {
    let mut chosen = None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");
        ui.separator();

        for (tool, label) in TOOLS {
            if ui.selectable_label(current_tool == *tool, *label).clicked() {
                chosen = Some(*tool);
            }
        }

        ui.separator();

        let tool_text = match current_tool {
            Tool::Select => "Click a shape to select it, drag it or its handles to edit",
            Tool::Rectangle => "Drag to draw a rectangle",
            Tool::Circle => "Drag from the centre outwards to draw a circle",
            Tool::Polygon => "Click to add vertices, double-click or right-click to close",
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });

    chosen.filter(|tool| *tool != current_tool)
}
