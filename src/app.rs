use crate::brush;
use crate::canvas::DrawingCanvas;
use crate::config::CanvasConfig;
use crate::input::InputHandler;
use crate::panels;
use crate::surface::RasterSurface;
use crate::texture::SurfaceTexture;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
///
/// Only the configuration (brush included) survives a restart; pixels and
/// history are in-memory.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintApp {
    config: CanvasConfig,
    // The surface appears on the first frame, once the panel has a size
    #[serde(skip)]
    pub(crate) canvas: DrawingCanvas<RasterSurface>,
    #[serde(skip)]
    pub(crate) input: InputHandler,
    #[serde(skip)]
    pub(crate) texture: SurfaceTexture,
    /// Contents of the color text field
    #[serde(skip)]
    pub(crate) color_text: String,
    #[serde(skip)]
    pub(crate) color_error: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(CanvasConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, fallback: CanvasConfig) -> Self {
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<PaintApp>(storage, eframe::APP_KEY))
            .map_or(fallback, |stored| stored.config);
        Self::with_config(config)
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        let canvas = DrawingCanvas::detached(config.clone());
        let color_text = brush::to_hex(canvas.brush().color);
        Self {
            config,
            canvas,
            input: InputHandler::new(),
            texture: SurfaceTexture::new(),
            color_text,
            color_error: None,
        }
    }

    /// Creates the surface if the canvas has none yet
    pub(crate) fn ensure_surface(&mut self, available: egui::Vec2) {
        if self.canvas.is_attached() {
            return;
        }
        let size = self.canvas.surface_size_for(available);
        self.canvas
            .attach(RasterSurface::new(size, self.config.background));
        self.texture.invalidate();
    }

    /// Keeps the surface within the backend's texture limit, since it is
    /// uploaded as a single texture
    pub(crate) fn fit_texture_limit(&mut self, ctx: &egui::Context) {
        let max_side = ctx.input(|i| i.max_texture_side);
        if self.canvas.max_surface_side() != max_side {
            self.canvas.set_max_surface_side(max_side);
        }
    }

    /// Runs one frame of the UI
    pub fn ui(&mut self, ctx: &egui::Context) {
        // Shortcuts go first so no panel widget sees them.
        for event in self.input.consume_shortcuts(ctx) {
            self.canvas.handle_event(&event);
        }

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.config.brush = self.canvas.brush();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
