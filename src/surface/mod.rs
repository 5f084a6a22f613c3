use egui::Pos2;

use crate::brush::Brush;

mod raster;
mod recording;

pub use raster::{RasterSnapshot, RasterSurface};
pub use recording::{DrawCall, RecordingSurface, Segment};

/// A fixed-size raster the canvas draws into.
///
/// The path API mirrors a 2D context: `move_to` opens a sub-path,
/// `line_to` extends it, `stroke` paints every sub-path with round caps and
/// `begin_path` discards them. Snapshots are full copies of the pixel content.
pub trait Surface {
    type Snapshot;

    /// Width and height in pixels
    fn size(&self) -> [usize; 2];

    fn begin_path(&mut self);

    fn move_to(&mut self, pos: Pos2);

    /// Extends the current sub-path. Without one, behaves like `move_to`.
    fn line_to(&mut self, pos: Pos2);

    fn stroke(&mut self, brush: &Brush);

    fn snapshot(&self) -> Self::Snapshot;

    /// Overwrites the whole buffer with `snapshot`, never blending.
    fn restore(&mut self, snapshot: &Self::Snapshot);

    /// Changes the buffer dimensions, keeping the old content scaled to fit.
    fn resize(&mut self, size: [usize; 2]);
}

/// Path state shared by the surface implementations
#[derive(Debug, Clone, Default)]
pub(crate) struct PathBuilder {
    subpaths: Vec<Vec<Pos2>>,
}

impl PathBuilder {
    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    pub fn move_to(&mut self, pos: Pos2) {
        self.subpaths.push(vec![pos]);
    }

    pub fn line_to(&mut self, pos: Pos2) {
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(pos),
            None => self.move_to(pos),
        }
    }

    /// Every segment of every sub-path, in drawing order
    pub fn segments(&self) -> impl Iterator<Item = (Pos2, Pos2)> + '_ {
        self.subpaths
            .iter()
            .flat_map(|subpath| subpath.windows(2).map(|pair| (pair[0], pair[1])))
    }
}
