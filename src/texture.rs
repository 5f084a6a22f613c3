use egui::{Context, TextureHandle, TextureOptions};

use crate::surface::RasterSurface;

/// Keeps an egui texture in sync with a [`RasterSurface`].
///
/// The surface version is compared every frame and pixels are only
/// re-uploaded when it moved.
#[derive(Default)]
pub struct SurfaceTexture {
    handle: Option<TextureHandle>,
    uploaded_version: Option<u64>,
}

impl SurfaceTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `surface` if it changed since the last call and returns the texture
    pub fn update(&mut self, ctx: &Context, surface: &RasterSurface) -> &TextureHandle {
        let version = surface.version();
        let stale = self.uploaded_version != Some(version);

        let handle = match self.handle.take() {
            Some(mut handle) => {
                if stale {
                    handle.set(surface.to_color_image(), TextureOptions::LINEAR);
                }
                handle
            }
            None => ctx.load_texture(
                "sketch_surface",
                surface.to_color_image(),
                TextureOptions::LINEAR,
            ),
        };
        self.uploaded_version = Some(version);
        self.handle.insert(handle)
    }

    /// Forgets the texture so the next update re-creates it
    pub fn invalidate(&mut self) {
        self.handle = None;
        self.uploaded_version = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }
}
