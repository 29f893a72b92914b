// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the editor session, loads images in the
//! background and routes panel and canvas actions to the session.

use crate::config::EditorConfig;
use crate::editor::{EditorSession, Tool};
use crate::io::{markup, media, serialization};
use crate::models::project::ProjectData;
use crate::ui::{canvas, canvas::CanvasEvent, properties, toolbar};
use anyhow::{anyhow, Context as _, Result};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Result of background image loading operation.
struct LoadedImageData {
    path: PathBuf,
    image: media::LoadedImage,
    project: Option<ProjectData>,
}

/// Non-blocking read of a background result. A loader thread that exits
/// without reporting back surfaces as an error instead of waiting forever.
fn take_loaded<T>(receiver: &Receiver<Result<T>>) -> Option<Result<T>> {
    match receiver.try_recv() {
        Ok(result) => Some(result),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(Err(anyhow!("Image loader stopped unexpectedly"))),
    }
}

/// Main application state.
pub struct AreaMapApp {
    config: EditorConfig,

    session: EditorSession,

    /// Path of the image being edited
    image_path: Option<PathBuf>,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Markup for the current shapes, refreshed when the session changes
    markup: String,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Error shown in a blocking dialog until dismissed
    error_message: Option<String>,
}

impl AreaMapApp {
    /// Create a new application instance.
    pub fn new(config: EditorConfig) -> Self {
        let session = EditorSession::new(&config);
        let markup = session.markup(&config.map_name);
        Self {
            config,
            session,
            image_path: None,
            image_texture: None,
            markup,
            image_loader: None,
            loading_message: None,
            error_message: None,
        }
    }

    fn show_error(&mut self, message: String) {
        log::error!("{}", message);
        self.error_message = Some(message);
    }

    /// Decode an image file on a background thread.
    fn load_image_file(&mut self, path: PathBuf) {
        let max_bytes = self.config.max_upload_bytes;
        self.spawn_loader("Loading image...", move || {
            let image = media::load_image(&path, max_bytes)?;
            log::info!("Loaded image: {} ({}x{})", path.display(), image.width, image.height);
            Ok(LoadedImageData {
                path,
                image,
                project: None,
            })
        });
    }

    /// Read a project file and decode the image it refers to.
    fn open_project(&mut self, path: PathBuf) {
        let max_bytes = self.config.max_upload_bytes;
        self.spawn_loader("Loading project and image...", move || {
            let project = serialization::load_project(&path)
                .with_context(|| format!("Failed to load project {}", path.display()))?;
            log::info!("Read {} shapes from {}", project.shapes.len(), path.display());

            let image_path = PathBuf::from(&project.image_file);
            let image = media::load_image(&image_path, max_bytes)
                .with_context(|| format!("Failed to load image {}", image_path.display()))?;
            Ok(LoadedImageData {
                path: image_path,
                image,
                project: Some(project),
            })
        });
    }

    fn spawn_loader<F>(&mut self, message: &str, load: F)
    where
        F: FnOnce() -> Result<LoadedImageData> + Send + 'static,
    {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some(message.to_string());

        std::thread::spawn(move || {
            let _ = sender.send(load());
        });
    }

    /// Pick up a finished background load, if any.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.image_loader else {
            return;
        };
        let Some(result) = take_loaded(receiver) else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => {
                let LoadedImageData {
                    path,
                    image,
                    project,
                } = loaded;
                match project {
                    Some(mut project) => {
                        // The decoded image is authoritative for the size
                        project.image_width = image.width;
                        project.image_height = image.height;
                        if let Err(e) = self.session.load_project(project) {
                            self.show_error(format!("Failed to open project: {}", e));
                            return;
                        }
                    }
                    None => self.session.load_image(image.width, image.height),
                }

                let size = [image.width as usize, image.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
                self.image_texture =
                    Some(ctx.load_texture("loaded_image", color_image, egui::TextureOptions::LINEAR));
                self.image_path = Some(path);
            }
            Err(e) => self.show_error(format!("{:#}", e)),
        }
    }

    fn save_project(&mut self, path: PathBuf) {
        let image_file = self
            .image_path
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        let Some(project) = self.session.to_project(image_file) else {
            return;
        };

        match serialization::save_project(&project, &path) {
            Ok(()) => log::info!("Saved project to {}", path.display()),
            Err(e) => self.show_error(format!("Failed to save project: {:#}", e)),
        }
    }

    fn export_markup(&mut self, path: PathBuf) {
        match markup::export_html(&self.config.map_name, self.session.shapes(), &path) {
            Ok(()) => log::info!("Exported markup to {}", path.display()),
            Err(e) => self.show_error(format!("Failed to export markup: {:#}", e)),
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Image...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Images", media::IMAGE_EXTENSIONS)
                        .pick_file()
                    {
                        self.load_image_file(path);
                    }
                    ui.close_menu();
                }
                if ui.button("Open Project...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Projects", &["yaml", "yml", "json"])
                        .pick_file()
                    {
                        self.open_project(path);
                    }
                    ui.close_menu();
                }

                let has_image = self.session.image_size().is_some();
                if ui
                    .add_enabled(has_image, egui::Button::new("Save Project..."))
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("YAML", &["yaml", "yml"])
                        .add_filter("JSON", &["json"])
                        .set_file_name("areamap.yaml")
                        .save_file()
                    {
                        self.save_project(path);
                    }
                    ui.close_menu();
                }

                ui.separator();
                if ui.button("Export Markup...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("HTML", &["html", "htm"])
                        .set_file_name("image-map.html")
                        .save_file()
                    {
                        self.export_markup(path);
                    }
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui
                    .add_enabled(self.session.can_undo(), egui::Button::new("Undo (Ctrl+Z)"))
                    .clicked()
                {
                    self.session.undo();
                    ui.close_menu();
                }
                if ui
                    .add_enabled(
                        self.session.can_redo(),
                        egui::Button::new("Redo (Ctrl+Shift+Z)"),
                    )
                    .clicked()
                {
                    self.session.redo();
                    ui.close_menu();
                }

                ui.separator();

                let has_selection = self.session.selected().is_some();
                if ui
                    .add_enabled(has_selection, egui::Button::new("Delete Selected"))
                    .clicked()
                {
                    self.session.delete_selected();
                    ui.close_menu();
                }
            });
        });
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && !self.session.cancel() {
            self.session.select(None);
        }

        // Leave keys alone while a text field has focus
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            self.session.delete_selected();
        }

        if ctx.input(|i| i.modifiers.command && !i.modifiers.shift && i.key_pressed(egui::Key::Z)) {
            self.session.undo();
        }
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            self.session.redo();
        }

        let tool = ctx.input(|i| {
            if i.modifiers.command {
                None
            } else if i.key_pressed(egui::Key::S) {
                Some(Tool::Select)
            } else if i.key_pressed(egui::Key::R) {
                Some(Tool::Rectangle)
            } else if i.key_pressed(egui::Key::C) {
                Some(Tool::Circle)
            } else if i.key_pressed(egui::Key::P) {
                Some(Tool::Polygon)
            } else {
                None
            }
        });
        if let Some(tool) = tool {
            self.session.set_tool(tool);
        }
    }

    fn apply_canvas_events(&mut self, events: Vec<CanvasEvent>) {
        for event in events {
            match event {
                CanvasEvent::PointerDown(p) => self.session.pointer_down(p),
                CanvasEvent::PointerMove(p) => self.session.pointer_move(p),
                CanvasEvent::PointerUp(p) => self.session.pointer_up(p),
                CanvasEvent::DoubleClick(p) => self.session.double_click(p),
                CanvasEvent::FinishPolygon => self.session.finish_polygon(),
            }
        }
    }

    fn apply_properties_action(&mut self, action: properties::PropertiesAction) {
        match action {
            properties::PropertiesAction::Select(id) => self.session.select(Some(id)),
            properties::PropertiesAction::Delete(id) => {
                self.session.delete_shape(id);
            }
            properties::PropertiesAction::SetHref(id, href) => self.session.set_href(id, &href),
            properties::PropertiesAction::SetTitle(id, title) => {
                self.session.set_title(id, &title)
            }
            properties::PropertiesAction::None => {}
        }
    }

    fn error_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };

        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.error_message = None;
                }
            });
    }
}

impl eframe::App for AreaMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        // Keep polling until the loader thread reports back
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ui, ctx);
        });

        let chosen_tool = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, self.session.tool()))
            .inner;
        if let Some(tool) = chosen_tool {
            self.session.set_tool(tool);
        }

        egui::TopBottomPanel::bottom("markup")
            .resizable(true)
            .default_height(160.0)
            .show(ctx, |ui| crate::ui::markup::show(ui, &self.markup));

        let properties_action = egui::SidePanel::right("properties")
            .default_width(260.0)
            .show(ctx, |ui| properties::show(ui, &self.session))
            .inner;
        self.apply_properties_action(properties_action);

        // The error dialog blocks editing until dismissed
        if self.error_message.is_none() {
            self.handle_keyboard(ctx);
        }

        let canvas_events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    Vec::new()
                } else {
                    canvas::show(ui, &self.session, &self.image_texture)
                }
            })
            .inner;
        if self.error_message.is_none() {
            self.apply_canvas_events(canvas_events);
        }

        self.error_dialog(ctx);

        // Repaint only when the session actually changed
        if self.session.take_dirty() {
            self.markup = self.session.markup(&self.config.map_name);
            ctx.request_repaint();
        }
    }
}
