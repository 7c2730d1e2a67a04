use eframe::egui;
use crate::data::loader::{self, ImageSource, LoadError};
use crate::state::actions::{ActionOutcome, ViewerAction};
use crate::state::app_state::{ViewerState, VERSION};
use crate::state::theme::Theme;
use crate::ui::{image_view, info_panel};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Pending async image load result.
struct PendingLoad {
    path: PathBuf,
    result: Arc<Mutex<Option<Result<ImageSource, LoadError>>>>,
}

/// The main HSV viewer application.
pub struct HsvViewerApp {
    pub state: ViewerState,
    /// An error message to display in the footer until dismissed.
    pub error_message: Option<String>,
    /// GPU copy of the current image, rebuilt when the image changes.
    texture: Option<egui::TextureHandle>,
    pending_load: Option<PendingLoad>,
}

impl HsvViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, theme: Theme, initial: Option<PathBuf>) -> Self {
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            egui::FontId::monospace(13.5),
        );
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);
        ctx.set_visuals(theme.visuals());

        let mut app = Self {
            state: ViewerState::new(theme),
            error_message: None,
            texture: None,
            pending_load: None,
        };
        if let Some(path) = initial {
            app.load_image(&path);
        }
        app
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", loader::IMAGE_EXTENSIONS)
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.load_image(&path);
        }
    }

    /// Decode on a worker thread so the UI stays responsive.
    fn load_image(&mut self, path: &Path) {
        let path_buf = path.to_path_buf();
        let result: Arc<Mutex<Option<Result<ImageSource, LoadError>>>> =
            Arc::new(Mutex::new(None));
        let result_clone = Arc::clone(&result);

        std::thread::spawn(move || {
            let loaded = ImageSource::open(&path_buf);
            if let Ok(mut slot) = result_clone.lock() {
                *slot = Some(loaded);
            }
        });

        tracing::debug!("Loading image {:?}", path);
        self.pending_load = Some(PendingLoad { path: path.to_path_buf(), result });
    }

    fn poll_pending_load(&mut self, ctx: &egui::Context) {
        let Some(pending) = &self.pending_load else {
            return;
        };
        let finished = match pending.result.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(result) = finished else {
            return;
        };
        self.pending_load = None;

        match result {
            Ok(image) => {
                let max_side = ctx.input(|i| i.max_texture_side);
                let color_image = image_view::display_image(image.rgb(), max_side);
                self.texture = Some(ctx.load_texture("hsv_viewer_image", color_image, egui::TextureOptions::NEAREST));
                self.error_message = None;
                self.state.set_image(image);
            }
            Err(e) => {
                tracing::error!("{e}");
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, action: ViewerAction) {
        match self.state.apply(action) {
            ActionOutcome::CopyRequested(json) => self.copy_to_clipboard(json),
            ActionOutcome::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            _ => {}
        }
    }

    fn copy_to_clipboard(&mut self, text: String) {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    self.error_message = Some(format!("Failed to copy to clipboard: {e}"));
                } else {
                    tracing::info!("Copied statistics to clipboard");
                    self.state.status = Some("Statistics copied to clipboard".to_string());
                }
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to access clipboard: {e}"));
            }
        }
    }
}

impl eframe::App for HsvViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.state.theme.visuals());

        // ------------------------------------------------------------------
        // 1. Dropped files and keyboard
        // ------------------------------------------------------------------
        let dropped: Option<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .find(|p| loader::has_image_extension(p))
        });
        if let Some(path) = dropped {
            self.load_image(&path);
        }

        let mut actions = ctx.input(|i| ViewerAction::from_keys(|k| i.key_pressed(k)));

        self.poll_pending_load(ctx);

        // ------------------------------------------------------------------
        // 2. Panels
        // ------------------------------------------------------------------
        let mut open_dialog = false;
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 8)))
            .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("HSV Image Viewer");
                ui.separator();

                if ui.button("Open Image").clicked() {
                    open_dialog = true;
                }
                if ui.button("Save").clicked() {
                    actions.push(ViewerAction::Save);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(self.state.theme.toggle_label()).clicked() {
                        self.state.theme = self.state.theme.toggle();
                    }
                    ui.separator();
                    ui.small(format!("v{VERSION}"));
                });
            });
        });

        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 6)))
            .show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.state.image {
                    Some(image) => {
                        let (w, h) = image.dimensions();
                        ui.label(egui::RichText::new(format!("{} ({w}x{h})", image.display_name())).weak());
                    }
                    None => {
                        ui.label(egui::RichText::new("No image").weak());
                    }
                }
                ui.separator();
                ui.small("Click: sample   U: undo   R: reset   C: copy   S: save   Q/Esc: quit");

                if let Some(msg) = &self.error_message {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(255, 80, 80), msg);
                    if ui.small_button("dismiss").clicked() {
                        self.error_message = None;
                    }
                } else if let Some(status) = &self.state.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        egui::SidePanel::right("hsv_info")
            .resizable(true)
            .default_width(320.0)
            .min_width(260.0)
            .show(ctx, |ui| {
                if let Some(action) = info_panel::show_info_panel(ui, &self.state) {
                    actions.push(action);
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                if let Some(action) = image_view::show_image_view(ui, &self.state, self.texture.as_ref()) {
                    actions.push(action);
                }
            });

        if open_dialog {
            self.open_file_dialog();
        }

        // ------------------------------------------------------------------
        // 3. Apply actions in the order they arrived
        // ------------------------------------------------------------------
        for action in actions {
            self.dispatch(ctx, action);
        }

        if let Some(pending) = &self.pending_load {
            egui::Window::new("Loading")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Loading {}...", pending.path.display()));
                    });
                });
            ctx.request_repaint();
        }
    }
}
