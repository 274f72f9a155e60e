//! Application shell: toolbar, status bar, dialogs and input routing.

use std::path::Path;

use egui::{Color32, FontFamily, FontId, Key, Modifiers, Pos2, RichText};
use log::{error, warn};
use pypad_core::{EditorSession, FontConfig, Theme};

use crate::dialogs;
use crate::launcher;
use crate::view::{self, color32};

const RUN_BUTTON_FILL: Color32 = Color32::from_rgb(0x28, 0xa7, 0x45);

/// The eframe application. Owns the session and all transient UI state.
pub struct EditorApp {
    session: EditorSession,
    theme: Theme,
    completion_index: usize,
    last_prefix: Option<String>,
    popup_pos: Pos2,
    request_scroll: bool,
    font_dialog_open: bool,
    font_family_input: String,
    font_size_input: String,
    about_open: bool,
    last_title: String,
}

impl EditorApp {
    pub fn new() -> Self {
        let session = EditorSession::new();
        let font = session.font().clone();
        Self {
            session,
            theme: Theme::dark(),
            completion_index: 0,
            last_prefix: None,
            popup_pos: Pos2::ZERO,
            request_scroll: false,
            font_dialog_open: false,
            font_family_input: font.family,
            font_size_input: font.size.to_string(),
            about_open: false,
            last_title: String::new(),
        }
    }

    /// Opens a file at startup, typically from a command-line argument.
    pub fn open_path(&mut self, path: &Path) {
        if let Err(e) = self.session.open_file(path) {
            error!("failed to open {}: {e}", path.display());
            dialogs::error_dialog("Error", &format!("Could not open file:\n{e}"));
        }
    }

    /// The egui font matching the session's font config. egui only ships
    /// its builtin families, so any concrete family name maps to the
    /// builtin monospace face.
    fn font_id(&self) -> FontId {
        let family = if self.session.font().family == "Proportional" {
            FontFamily::Proportional
        } else {
            FontFamily::Monospace
        };
        FontId::new(self.session.font().size as f32, family)
    }

    // ==================== Input ====================

    fn handle_editor_input(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::Text(t) => {
                    for ch in t.chars().filter(|c| !c.is_control()) {
                        if let Err(e) = self.session.type_char(ch) {
                            error!("insert failed: {e}");
                        }
                    }
                    self.request_scroll = true;
                }
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => self.handle_key(key, modifiers),
                _ => {}
            }
        }
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        if modifiers.command {
            match key {
                Key::N => self.new_file(),
                Key::O => self.open(),
                Key::S => self.save(),
                _ => {}
            }
            return;
        }
        let suggesting = self.session.completer().is_suggesting();
        match key {
            Key::Enter => {
                if suggesting {
                    self.accept_selected_completion();
                } else if let Err(e) = self.session.insert_newline() {
                    error!("newline failed: {e}");
                }
                self.request_scroll = true;
            }
            Key::Tab => {
                if let Err(e) = self.session.insert_tab() {
                    error!("tab failed: {e}");
                }
                self.request_scroll = true;
            }
            Key::Backspace => {
                self.session.delete_backward();
                self.request_scroll = true;
            }
            Key::Delete => {
                self.session.delete_forward();
                self.request_scroll = true;
            }
            Key::ArrowUp => {
                if suggesting {
                    self.completion_index = self.completion_index.saturating_sub(1);
                } else {
                    self.session.move_up();
                    self.request_scroll = true;
                }
            }
            Key::ArrowDown => {
                if suggesting {
                    self.completion_index += 1;
                } else {
                    self.session.move_down();
                    self.request_scroll = true;
                }
            }
            Key::ArrowLeft => {
                self.session.move_left();
                self.request_scroll = true;
            }
            Key::ArrowRight => {
                self.session.move_right();
                self.request_scroll = true;
            }
            Key::Escape => self.session.cancel_completion(),
            _ => {}
        }
    }

    fn accept_selected_completion(&mut self) {
        let candidates = self.session.completer().candidates();
        if candidates.is_empty() {
            return;
        }
        let candidate = candidates[self.completion_index.min(candidates.len() - 1)].clone();
        if let Err(e) = self.session.apply_completion(&candidate) {
            error!("completion failed: {e}");
        }
    }

    /// Keeps the popup selection valid as the candidate set changes.
    fn sync_completion_selection(&mut self) {
        let prefix = self.session.completer().prefix().map(str::to_string);
        if prefix != self.last_prefix {
            self.completion_index = 0;
            self.last_prefix = prefix;
        }
        let count = self.session.completer().candidates().len();
        if count > 0 {
            self.completion_index = self.completion_index.min(count - 1);
        }
    }

    // ==================== Toolbar actions ====================

    fn new_file(&mut self) {
        self.session.new_file();
    }

    fn open(&mut self) {
        if let Some(path) = dialogs::open_file_dialog() {
            self.open_path(&path);
        }
    }

    fn save(&mut self) {
        let result = if self.session.file_path().is_some() {
            self.session.save()
        } else if let Some(path) = dialogs::save_file_dialog() {
            self.session.save_as(&path)
        } else {
            return;
        };
        if let Err(e) = result {
            error!("save failed: {e}");
            dialogs::error_dialog("Error", &format!("Could not save file:\n{e}"));
        }
    }

    fn save_as(&mut self) {
        if let Some(path) = dialogs::save_file_dialog() {
            if let Err(e) = self.session.save_as(&path) {
                error!("save failed: {e}");
                dialogs::error_dialog("Error", &format!("Could not save file:\n{e}"));
            }
        }
    }

    fn run(&mut self) {
        match self.session.prepare_run() {
            Ok(path) => {
                if let Err(e) = launcher::spawn_detached_terminal(&path) {
                    error!("launch failed: {e}");
                    dialogs::error_dialog("Error", &format!("Could not launch terminal:\n{e}"));
                }
            }
            Err(e) => {
                error!("run failed: {e}");
                dialogs::error_dialog("Error", &format!("Could not save before running:\n{e}"));
            }
        }
    }

    // ==================== Panels ====================

    fn sync_title(&mut self, ctx: &egui::Context) {
        let name = self
            .session
            .file_path()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());
        let title = format!("PyPad - {name}");
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }
    }

    fn toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::default()
                    .fill(color32(self.theme.background))
                    .inner_margin(6.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("New").clicked() {
                        self.new_file();
                    }
                    if ui.button("Open").clicked() {
                        self.open();
                    }
                    if ui.button("Save").clicked() {
                        self.save();
                    }
                    if ui.button("Save As").clicked() {
                        self.save_as();
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("About").clicked() {
                            self.about_open = true;
                        }
                        if ui.button("Font").clicked() {
                            self.font_dialog_open = true;
                        }
                        let run = egui::Button::new(RichText::new("Run").color(Color32::WHITE))
                            .fill(RUN_BUTTON_FILL);
                        if ui.add(run).clicked() {
                            self.run();
                        }
                    });
                });
            });
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .frame(
                egui::Frame::default()
                    .fill(color32(self.theme.status_background))
                    .inner_margin(4.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(self.session.status_line())
                            .color(color32(self.theme.status_foreground)),
                    );
                    if self.session.is_modified() {
                        ui.label(
                            RichText::new("modified")
                                .color(color32(self.theme.status_foreground)),
                        );
                    }
                });
            });
    }

    fn completion_popup(&mut self, ctx: &egui::Context) {
        if !self.session.completer().is_suggesting() {
            return;
        }
        let candidates: Vec<String> = self.session.completer().candidates().to_vec();
        let selected = self.completion_index.min(candidates.len() - 1);
        egui::Area::new(egui::Id::new("completion_popup"))
            .fixed_pos(self.popup_pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    for (i, candidate) in candidates.iter().enumerate() {
                        if ui.selectable_label(i == selected, candidate).clicked() {
                            if let Err(e) = self.session.apply_completion(candidate) {
                                error!("completion failed: {e}");
                            }
                            self.request_scroll = true;
                        }
                    }
                });
            });
    }

    fn font_dialog(&mut self, ctx: &egui::Context) {
        if !self.font_dialog_open {
            return;
        }
        let mut open = true;
        egui::Window::new("Font Settings")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Font Family:");
                    ui.text_edit_singleline(&mut self.font_family_input);
                });
                ui.horizontal(|ui| {
                    ui.label("Font Size:");
                    ui.text_edit_singleline(&mut self.font_size_input);
                });
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        match FontConfig::parse_size(
                            &self.font_family_input,
                            &self.font_size_input,
                        ) {
                            Ok(font) => {
                                self.session.set_font(font);
                                self.font_dialog_open = false;
                            }
                            Err(e) => {
                                // The previous font stays in effect.
                                warn!("{e}");
                                dialogs::error_dialog("Error", "Invalid font size");
                            }
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        self.font_dialog_open = false;
                    }
                });
            });
        if !open {
            self.font_dialog_open = false;
        }
    }

    fn about_dialog(&mut self, ctx: &egui::Context) {
        if !self.about_open {
            return;
        }
        let mut open = true;
        egui::Window::new("About PyPad")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("PyPad");
                ui.label("A small Python code editor.");
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
            });
        if !open {
            self.about_open = false;
        }
    }
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_title(ctx);

        // Modal-ish windows swallow keyboard input for the document and
        // take focus, which ends any open suggestion.
        let dialog_open = self.font_dialog_open || self.about_open;
        if dialog_open {
            self.session.cancel_completion();
        } else {
            self.handle_editor_input(ctx);
        }
        self.sync_completion_selection();

        self.toolbar(ctx);
        self.status_bar(ctx);

        let font_id = self.font_id();
        let ensure_visible = std::mem::take(&mut self.request_scroll);
        let text_background = color32(self.theme.text_background);
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(text_background))
            .show(ctx, |ui| {
                let response =
                    view::show(ui, &mut self.session, &self.theme, &font_id, ensure_visible);
                self.popup_pos = response.caret_bottom;
            });

        self.completion_popup(ctx);
        self.font_dialog(ctx);
        self.about_dialog(ctx);
    }
}
