//! UI using egui framework

use crate::shell;
use crate::state::{AppState, StateMachine};
use dispatch::CaptureResult;
use eframe::egui;
use export::CaptureStore;
use parking_lot::Mutex;
use recognize::link_target;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Callback type for button actions
pub type ActionCallback = Arc<dyn Fn() + Send + Sync>;

/// How often the cursor position label refreshes
const CURSOR_REFRESH: Duration = Duration::from_millis(100);

pub const COMPACT_SIZE: [f32; 2] = [420.0, 150.0];

/// UI State shared between threads
pub struct UiState {
    pub state_machine: StateMachine,
    pub store: CaptureStore,
    pub main_hwnd: isize,
    pub on_draw: Option<ActionCallback>,
    pub on_folder: Option<ActionCallback>,
}

impl UiState {
    pub fn new(store: CaptureStore) -> Self {
        Self {
            state_machine: StateMachine::new(),
            store,
            main_hwnd: 0,
            on_draw: None,
            on_folder: None,
        }
    }
}

/// Texture of the capture on display
struct ShownCapture {
    path: PathBuf,
    texture: Option<egui::TextureHandle>,
}

/// Main application using egui
pub struct ChoppingApp {
    state: Arc<Mutex<UiState>>,
    shown: Option<ShownCapture>,
    last_state: AppState,
}

impl ChoppingApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, state: Arc<Mutex<UiState>>) -> Self {
        Self {
            state,
            shown: None,
            last_state: AppState::Idle,
        }
    }

    fn load_texture(ctx: &egui::Context, path: &Path) -> Option<egui::TextureHandle> {
        let image = match image::open(path) {
            Ok(image) => image.to_rgba8(),
            Err(e) => {
                log::warn!("Cannot load {}: {}", path.display(), e);
                return None;
            }
        };

        let size = [image.width() as usize, image.height() as usize];
        let color = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        Some(ctx.load_texture("capture", color, egui::TextureOptions::default()))
    }

    /// Resize the window when the displayed state changes
    fn on_state_changed(&mut self, ctx: &egui::Context, app_state: &AppState) {
        match app_state.capture().and_then(CaptureResult::image_path) {
            Some(path) => {
                let texture = Self::load_texture(ctx, path);
                let (w, h) = texture
                    .as_ref()
                    .map(|t| (t.size()[0] as f32, t.size()[1] as f32))
                    .unwrap_or((0.0, 0.0));

                let width = w.max(COMPACT_SIZE[0]) + 20.0;
                let height = h + 320.0;
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(width, height)));

                self.shown = Some(ShownCapture {
                    path: path.to_path_buf(),
                    texture,
                });
            }
            None if !matches!(app_state, AppState::Selecting) => {
                self.shown = None;
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(COMPACT_SIZE.into()));
            }
            None => {}
        }
    }

    fn show_capture(&self, ui: &mut egui::Ui, result: &CaptureResult) {
        if let Some(texture) = self.shown.as_ref().and_then(|s| s.texture.as_ref()) {
            let size = texture.size_vec2();
            let scale = (ui.available_width() / size.x).min(1.0);
            ui.add(egui::Image::new(egui::load::SizedTexture::new(
                texture.id(),
                size * scale,
            )));
        }

        ui.add_space(5.0);

        if let Some(region) = result.region() {
            let mut location = format!("Location {}", region);
            ui.add(
                egui::TextEdit::singleline(&mut location)
                    .interactive(false)
                    .desired_width(f32::INFINITY),
            );
        }

        if let Some(path) = self.shown.as_ref().map(|s| &s.path) {
            ui.label(
                egui::RichText::new(path.display().to_string())
                    .size(11.0)
                    .color(egui::Color32::from_rgb(136, 136, 136)),
            );
        }
    }

    fn show_text(ui: &mut egui::Ui, text: &str) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                match link_target(text) {
                    Some(url) => {
                        ui.hyperlink_to(text, url);
                    }
                    None => {
                        let mut text = text;
                        ui.add(
                            egui::TextEdit::multiline(&mut text)
                                .desired_width(f32::INFINITY)
                                .desired_rows(4),
                        );
                    }
                }
            });
    }
}

impl eframe::App for ChoppingApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        {
            use raw_window_handle::{HasWindowHandle, RawWindowHandle};
            let mut state = self.state.lock();
            if state.main_hwnd == 0 {
                if let Ok(handle) = frame.window_handle() {
                    if let RawWindowHandle::Win32(win32) = handle.as_raw() {
                        state.main_hwnd = win32.hwnd.get();
                    }
                }
            }
        }

        // Clone necessary data to avoid holding lock during UI rendering
        let (app_state, on_draw, on_folder) = {
            let state = self.state.lock();
            (
                state.state_machine.state().clone(),
                state.on_draw.clone(),
                state.on_folder.clone(),
            )
        };

        if app_state != self.last_state {
            self.on_state_changed(ctx, &app_state);
            self.last_state = app_state.clone();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);

                // Buttons row
                ui.horizontal(|ui| {
                    let draw_btn = egui::Button::new(
                        egui::RichText::new("✂ Draw")
                            .size(16.0)
                            .color(egui::Color32::WHITE),
                    )
                    .fill(if app_state.can_draw() {
                        egui::Color32::from_rgb(220, 53, 69) // Red
                    } else {
                        egui::Color32::from_rgb(108, 117, 125) // Gray
                    })
                    .min_size(egui::vec2(147.0, 45.0))
                    .rounding(8.0);

                    if ui.add_enabled(app_state.can_draw(), draw_btn).clicked() {
                        if let Some(ref callback) = on_draw {
                            callback();
                        }
                    }

                    ui.add_space(10.0);

                    let folder_btn = egui::Button::new(egui::RichText::new("📁").size(20.0))
                        .min_size(egui::vec2(45.0, 45.0))
                        .rounding(8.0);

                    if ui.add(folder_btn).on_hover_text("Open captures folder").clicked() {
                        if let Some(ref callback) = on_folder {
                            callback();
                        }
                    }
                });

                if let Some((x, y)) = shell::cursor_position() {
                    ui.label(format!("X: {} Y: {}", x, y));
                }

                ui.add_space(5.0);

                if let Some(result) = app_state.capture() {
                    self.show_capture(ui, result);
                }

                let status_color = match app_state {
                    AppState::Captured(_) => egui::Color32::from_rgb(40, 167, 69), // Green
                    AppState::Failed(_) => egui::Color32::from_rgb(220, 53, 69),   // Red
                    _ => egui::Color32::from_rgb(102, 102, 102),                   // Gray
                };

                ui.label(
                    egui::RichText::new(app_state.display_text())
                        .size(14.0)
                        .color(status_color),
                );

                if let Some(text) = app_state.capture().and_then(CaptureResult::text) {
                    ui.add_space(5.0);
                    Self::show_text(ui, text);
                }
            });
        });

        ctx.request_repaint_after(CURSOR_REFRESH);
    }
}
