use crate::error::{CoreError, CoreResult};
use crate::match_store::MatchStore;

/// Dense `width * height` raster of saturating match-density counts.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

impl Grid {
    fn new(width: u32, height: u32) -> Self {
        Grid {
            width,
            height,
            cells: vec![0u32; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.cells[self.index(x, y)]
    }

    #[inline]
    fn bump(&mut self, x: u32, y: u32) {
        let i = self.index(x, y);
        self.cells[i] = self.cells[i].saturating_add(1);
    }

    /// Rasterizes the sub-rectangle `[x1, x2) x [y1, y2)` of `store`'s
    /// coordinate space at the given downsample `scale`, thickening
    /// each plotted diagonal run by a neighborhood of
    /// `radius = ceil(window / scale)` cells on either side along X.
    ///
    /// `width = ceil((x2 - x1) / scale)`, `height = ceil((y2 - y1) /
    /// scale)`. Every stepped-over source position always takes one
    /// unconditional base increment; the smoothing loop only covers
    /// `delta` in `1..radius`, since `delta == 0` would just be the
    /// base increment counted twice. With `window == 0` (so `radius ==
    /// 0`) the smoothing loop is empty and cells receive exactly one
    /// increment per covered source step.
    pub fn calculate(
        store: &MatchStore,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        scale: u32,
        window: u32,
    ) -> CoreResult<Grid> {
        if scale == 0 {
            return Err(CoreError::Parameter("scale must be >= 1".into()));
        }
        if x2 < x1 || y2 < y1 {
            return Err(CoreError::Bounds(format!(
                "degenerate rectangle [{x1},{x2}) x [{y1},{y2})"
            )));
        }
        let width = ((x2 - x1) as u32).div_ceil(scale);
        let height = ((y2 - y1) as u32).div_ceil(scale);
        let mut grid = Grid::new(width, height);
        let radius = window.div_ceil(scale);

        for m in store.iter() {
            if m.length < 0 {
                return Err(CoreError::Bounds(format!(
                    "negative match length {}",
                    m.length
                )));
            }
            for s in 0..m.length as u32 {
                let sx = m.x + s as i32 - x1;
                let sy = m.y + s as i32 - y1;
                if sx < 0 || sy < 0 {
                    continue;
                }
                let gx = sx as u32 / scale;
                let gy = sy as u32 / scale;
                if gx >= width || gy >= height {
                    continue;
                }
                grid.bump(gx, gy);
                for delta in 1..radius {
                    if gx + delta < width {
                        grid.bump(gx + delta, gy);
                    }
                    if gx >= delta {
                        grid.bump(gx - delta, gy);
                    }
                }
            }
        }

        Ok(grid)
    }

    /// Adds `other` into `self` cell-wise with saturating arithmetic.
    /// Both grids must share the same dimensions.
    pub fn add_inplace(&mut self, other: &Grid) -> CoreResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(CoreError::Bounds(format!(
                "grid dimension mismatch: {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        for (a, b) in self.cells.iter_mut().zip(other.cells.iter()) {
            *a = a.saturating_add(*b);
        }
        Ok(())
    }

    /// Reverses row order in place (flips the Y axis for display).
    pub fn flip_inplace(&mut self) {
        let (w, h) = (self.width as usize, self.height as usize);
        for row in 0..h / 2 {
            let (top, bottom) = (row, h - 1 - row);
            for col in 0..w {
                self.cells.swap(top * w + col, bottom * w + col);
            }
        }
    }

    /// Linearly scales counts to `[0, 255]`; an all-uniform grid
    /// (`max == min`, including the all-zero grid) maps to all zero.
    pub fn to_luminance(&self) -> Vec<u8> {
        let max = self.cells.iter().copied().max().unwrap_or(0);
        let min = self.cells.iter().copied().min().unwrap_or(0);
        if max == min {
            return vec![0u8; self.cells.len()];
        }
        let range = (max - min) as f64;
        self.cells
            .iter()
            .map(|&c| (((c - min) as f64 / range) * 255.0).round() as u8)
            .collect()
    }
}
