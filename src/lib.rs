#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod canvas;
pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod stroke;
pub mod surface;
pub mod texture;

pub use app::PaintApp;
pub use brush::Brush;
pub use canvas::DrawingCanvas;
pub use command::{Command, SnapshotHistory};
pub use config::CanvasConfig;
pub use error::{CanvasError, CanvasResult};
pub use input::{EventResponse, InputEvent, InputHandler, StrokeSignal};
pub use renderer::StrokeRenderer;
pub use stroke::StrokeSession;
pub use surface::{RasterSurface, RecordingSurface, Surface};
