// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Read-only view of the generated image map markup.

/// Display the markup with a copy button.
pub fn show(ui: &mut egui::Ui, markup: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Image map HTML").strong());
        if ui.button("📋 Copy").clicked() {
            ui.output_mut(|o| o.copied_text = markup.to_string());
            log::info!("Copied markup to clipboard");
        }
    });

    egui::ScrollArea::vertical().show(ui, |ui| {
        let mut text = markup;
        ui.add(
            egui::TextEdit::multiline(&mut text)
                .code_editor()
                .desired_width(f32::INFINITY),
        );
    });
}
