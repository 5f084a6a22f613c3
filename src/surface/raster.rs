use egui::{Color32, ColorImage, Pos2, Vec2};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::{PathBuilder, Surface};
use crate::brush::Brush;

/// Full copy of a [`RasterSurface`] buffer
#[derive(Clone, PartialEq)]
pub struct RasterSnapshot {
    image: RgbaImage,
}

impl RasterSnapshot {
    pub fn size(&self) -> [usize; 2] {
        [self.image.width() as usize, self.image.height() as usize]
    }
}

impl std::fmt::Debug for RasterSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSnapshot")
            .field("size", &self.size())
            .finish()
    }
}

/// RGBA8 pixel buffer with anti-aliased round-capped strokes.
pub struct RasterSurface {
    pixels: RgbaImage,
    path: PathBuilder,
    /// Bumped on every pixel change, so hosts know when to re-upload
    version: u64,
}

impl RasterSurface {
    /// Creates a surface filled with `background`. Zero dimensions are clamped to 1.
    pub fn new(size: [usize; 2], background: Color32) -> Self {
        let [width, height] = clamp_size(size);
        Self {
            pixels: RgbaImage::from_pixel(width, height, to_rgba(background)),
            path: PathBuilder::default(),
            version: 0,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Color at pixel `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
    }

    /// Straight-alpha RGBA8 bytes, row major
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Converts the buffer for upload as an egui texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(self.size(), self.pixels.as_raw())
    }

    fn stroke_segments(&mut self, segments: &[(Pos2, Pos2)], brush: &Brush) {
        let radius = brush.radius();
        // Coverage falls off over one pixel around the edge.
        let reach = radius + 0.5;

        let (mut min, mut max) = (Pos2::new(f32::MAX, f32::MAX), Pos2::new(f32::MIN, f32::MIN));
        for &(a, b) in segments {
            min = min.min(a.min(b));
            max = max.max(a.max(b));
        }

        let width = self.pixels.width() as f32;
        let height = self.pixels.height() as f32;
        let x0 = (min.x - reach).floor().max(0.0);
        let y0 = (min.y - reach).floor().max(0.0);
        let x1 = (max.x + reach).ceil().min(width);
        let y1 = (max.y + reach).ceil().min(height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let src = brush.color.to_srgba_unmultiplied();
        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                // Max over segments so joints are not painted twice.
                let coverage = segments
                    .iter()
                    .map(|&(a, b)| (reach - distance_to_segment(center, a, b)).clamp(0.0, 1.0))
                    .fold(0.0_f32, f32::max);
                if coverage > 0.0 {
                    blend(self.pixels.get_pixel_mut(x, y), src, coverage);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    type Snapshot = RasterSnapshot;

    fn size(&self) -> [usize; 2] {
        [self.pixels.width() as usize, self.pixels.height() as usize]
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, pos: Pos2) {
        self.path.move_to(pos);
    }

    fn line_to(&mut self, pos: Pos2) {
        self.path.line_to(pos);
    }

    fn stroke(&mut self, brush: &Brush) {
        let segments: Vec<(Pos2, Pos2)> = self.path.segments().collect();
        if segments.is_empty() {
            return;
        }
        self.stroke_segments(&segments, brush);
        self.version += 1;
    }

    fn snapshot(&self) -> RasterSnapshot {
        RasterSnapshot {
            image: self.pixels.clone(),
        }
    }

    fn restore(&mut self, snapshot: &RasterSnapshot) {
        if snapshot.size() == self.size() {
            self.pixels.clone_from(&snapshot.image);
        } else {
            log::debug!(
                "Scaling {:?} snapshot into {:?} surface",
                snapshot.size(),
                self.size()
            );
            self.pixels = imageops::resize(
                &snapshot.image,
                self.pixels.width(),
                self.pixels.height(),
                FilterType::Triangle,
            );
        }
        self.version += 1;
    }

    fn resize(&mut self, size: [usize; 2]) {
        let [width, height] = clamp_size(size);
        if width == self.pixels.width() && height == self.pixels.height() {
            return;
        }
        let scratch = std::mem::take(&mut self.pixels);
        self.pixels = imageops::resize(&scratch, width, height, FilterType::Triangle);
        self.version += 1;
    }
}

fn clamp_size([width, height]: [usize; 2]) -> [u32; 2] {
    let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX).max(1);
    [clamp(width), clamp(height)]
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab: Vec2 = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Source-over compositing on straight-alpha pixels
fn blend(dst: &mut Rgba<u8>, src: [u8; 4], coverage: f32) {
    let src_a = f32::from(src[3]) / 255.0 * coverage;
    if src_a <= 0.0 {
        return;
    }
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    for i in 0..3 {
        let c = (f32::from(src[i]) * src_a + f32::from(dst[i]) * dst_a * (1.0 - src_a)) / out_a;
        dst[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
