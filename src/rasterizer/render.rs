//! Core rendering functions
//! Palette-indexed framebuffer plus point, line, rectangle and polygon rasterizers

use std::path::Path;

use super::math::round_coord;
use super::palette::Palette;
use super::types::{ColorIndex, Coordinates, Line, Point, Polygon, Rectangle, TRANSPARENT};
use super::{HEIGHT, WIDTH};
use crate::error::RasterError;

/// Off-screen buffer: one palette index per pixel, row-major
pub struct Framebuffer {
    pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    /// Allocate a cleared buffer. Allocation failure is reported, not aborted on.
    pub fn try_new(width: usize, height: usize) -> Result<Self, RasterError> {
        let bytes = width.saturating_mul(height);
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|_| RasterError::BufferUnavailable { bytes })?;
        pixels.resize(bytes, 0);
        Ok(Self { pixels, width, height })
    }

    /// 320x200 buffer
    pub fn screen() -> Result<Self, RasterError> {
        Self::try_new(WIDTH, HEIGHT)
    }

    pub fn clear(&mut self, color: ColorIndex) {
        self.pixels.fill(color);
    }

    /// Buffer offset of (x, y), or None outside the buffer.
    /// All pixel addressing goes through here.
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Write one pixel; out-of-bounds writes are dropped
    pub fn set_pixel(&mut self, x: i64, y: i64, color: ColorIndex) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.pixels[idx] = color;
                true
            }
            None => false,
        }
    }

    pub fn get_pixel(&self, x: i64, y: i64) -> Option<ColorIndex> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Fill `x0..=x1` on row `y`, clipped to the buffer
    pub fn fill_span(&mut self, y: i64, x0: i64, x1: i64, color: ColorIndex) {
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i64 - 1);
        if x0 > x1 {
            return;
        }
        if let (Some(start), Some(end)) = (self.index(x0, y), self.index(x1, y)) {
            self.pixels[start..=end].fill(color);
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Expand to RGBA through `palette` (4 bytes per pixel)
    pub fn to_rgba(&self, palette: &Palette) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &index in &self.pixels {
            out.extend_from_slice(&palette.rgba(index));
        }
        out
    }

    /// Save the current contents as an image (format from the extension)
    pub fn save_png<P: AsRef<Path>>(&self, path: P, palette: &Palette) -> Result<(), RasterError> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgba(palette),
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|source| RasterError::Png { path: path.to_path_buf(), source })
    }
}

/// Plot a single point
pub fn draw_point(fb: &mut Framebuffer, point: Point) {
    if point.color == TRANSPARENT {
        return;
    }
    fb.set_pixel(point.coordinates.x as i64, point.coordinates.y as i64, point.color);
}

/// Draw a line from `a` to `b` (Bresenham).
///
/// Steps one pixel per unit along the major axis, always in increasing
/// order, so a line and its reverse cover the same pixels. The error term
/// is kept scaled by `2 * major` so the half-pixel threshold is exact.
pub fn draw_line(fb: &mut Framebuffer, line: Line) {
    let Line { a, b, color } = line;
    if color == TRANSPARENT {
        return;
    }

    let (ax, ay, bx, by) = (a.x as i64, a.y as i64, b.x as i64, b.y as i64);
    let dx = bx - ax;
    let dy = by - ay;
    let steep = dy.abs() > dx.abs();

    if (steep && by < ay) || (!steep && bx < ax) {
        return draw_line(fb, line.reversed());
    }

    let (w, h) = (fb.width as i64, fb.height as i64);
    if (ax >= w && bx >= w) || (ay >= h && by >= h) || (ax < 0 && bx < 0) || (ay < 0 && by < 0) {
        log::trace!("line {:?} -> {:?} is off-screen", a, b);
        return;
    }

    // Swap into (major, minor) space
    let (major_start, major_end, minor_start, minor_delta, major_limit, minor_limit) = if steep {
        (ay, by, ax, dx, h, w)
    } else {
        (ax, bx, ay, dy, w, h)
    };
    let major_len = major_end - major_start;
    let step = minor_delta.signum();
    let rise = 2 * minor_delta.abs() as i128;
    let run = 2 * major_len as i128;

    // Skip the stretch left of the buffer without touching pixels
    let skip = (-major_start).max(0).min(major_len);
    let mut minor = minor_start;
    let mut error: i128 = 0;
    if skip > 0 && run > 0 {
        let total = skip as i128 * rise;
        let advances = (total + major_len as i128) / run;
        minor += step * advances as i64;
        error = total - advances * run;
    }

    for major in (major_start + skip)..=major_end {
        if major >= major_limit {
            break;
        }
        if (step > 0 && minor >= minor_limit) || (step < 0 && minor < 0) {
            break;
        }

        if steep {
            fb.set_pixel(minor, major, color);
        } else {
            fb.set_pixel(major, minor, color);
        }

        error += rise;
        if 2 * error >= run {
            minor += step;
            error -= run;
        }
    }
}

/// Draw an axis-aligned rectangle, border and fill separately (0 = skip).
pub fn draw_rectangle(fb: &mut Framebuffer, rect: Rectangle) {
    let r = rect.normalized();
    let (w, h) = (fb.width as i64, fb.height as i64);
    let (ox, oy) = (r.offset.x as i64, r.offset.y as i64);
    let (dw, dh) = (r.dimensions.x as i64, r.dimensions.y as i64);

    if ox >= w || oy >= h || dw <= 0 || dh <= 0 {
        log::trace!("rectangle at {:?} rejected", r.offset);
        return;
    }

    let underflow_x = (-ox).max(0);
    let underflow_y = (-oy).max(0);
    let overflow_x = (ox + dw - w).max(0);
    let overflow_y = (oy + dh - h).max(0);

    let left = ox + underflow_x;
    let right = ox + dw - 1 - overflow_x;
    if left > right {
        return;
    }

    for row in underflow_y..(dh - overflow_y) {
        let y = oy + row;
        let line_color = if row == 0 || row == dh - 1 {
            r.border_color
        } else {
            r.fill_color
        };

        if line_color != TRANSPARENT {
            fb.fill_span(y, left, right, line_color);
        }

        // Vertical borders, one pixel each side
        if r.border_color != TRANSPARENT {
            for x in [ox, ox + dw - 1] {
                if x >= 0 && x < w {
                    fb.set_pixel(x, y, r.border_color);
                }
            }
        }
    }
}

/// Draw a polygon: transformed outline, then scanline fill.
pub fn draw_polygon(fb: &mut Framebuffer, polygon: &Polygon) {
    if !polygon.is_drawable() {
        log::trace!("polygon with {} vertices skipped", polygon.len());
        return;
    }

    // Outline and fill must see the same transformed positions
    let vertices = polygon.transformed_vertices();
    let n = vertices.len();
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;

    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        if polygon.border_color != TRANSPARENT {
            draw_line(fb, Line::new(a, b, polygon.border_color));
        }
        min_y = min_y.min(a.y).min(b.y);
        max_y = max_y.max(a.y).max(b.y);
    }

    if polygon.fill_color != TRANSPARENT {
        fill_scanlines(fb, &vertices, min_y, max_y, polygon.fill_color);
    }
}

/// X where edge `p0 -> p1` crosses row `y`, if it does.
///
/// Edges are half-open in y: they cover `(min_y, max_y]`, so a row through
/// a shared vertex is counted once by the edge arriving from above.
fn edge_crossing(p0: Coordinates, p1: Coordinates, y: i64) -> Option<i32> {
    let (y0, y1) = (p0.y as i64, p1.y as i64);
    if (y0 < y) == (y1 < y) {
        return None;
    }
    let x = p0.x as f64 + (y - y0) as f64 * (p1.x as f64 - p0.x as f64) / (y1 - y0) as f64;
    Some(round_coord(x))
}

fn fill_scanlines(fb: &mut Framebuffer, vertices: &[Coordinates], min_y: i32, max_y: i32, color: ColorIndex) {
    let w = fb.width as i64;
    let top = (min_y as i64).max(0);
    let bottom = (max_y as i64).min(fb.height as i64 - 1);
    let n = vertices.len();
    let mut crossings: Vec<i32> = Vec::with_capacity(n);

    for y in top..=bottom {
        crossings.clear();
        for i in 0..n {
            if let Some(x) = edge_crossing(vertices[i], vertices[(i + 1) % n], y) {
                // insertion sort; vertex counts are small
                let at = crossings.partition_point(|&c| c <= x);
                crossings.insert(at, x);
            }
        }

        // odd trailing crossing is dropped
        for pair in crossings.chunks_exact(2) {
            let (start, end) = (pair[0] as i64, pair[1] as i64);
            if start >= w {
                break;
            }
            fb.fill_span(y, start, end, color);
        }
    }
}
