//! Window-backed display (macroquad)
//!
//! Presented frames are expanded through the palette into a texture and
//! drawn scaled to the window with nearest filtering.

use macroquad::prelude::{
    clear_background, draw_texture_ex, screen_height, screen_width, vec2, DrawTextureParams,
    FilterMode, Texture2D, BLACK, WHITE,
};

use super::{Display, DisplayMode, MODE_13H, MODE_TEXT};
use crate::rasterizer::{Framebuffer, Palette};

pub struct WindowDisplay {
    mode: u8,
    palette: Palette,
    texture: Option<Texture2D>,
    width: usize,
    height: usize,
}

impl WindowDisplay {
    /// Must be created inside the macroquad window
    pub fn new(palette: Palette) -> Self {
        Self {
            mode: MODE_TEXT,
            palette,
            texture: None,
            width: 0,
            height: 0,
        }
    }

    /// Draw the last presented frame, letterboxed
    pub fn draw(&self) {
        clear_background(BLACK);

        if self.mode != MODE_13H {
            return;
        }
        let Some(texture) = &self.texture else {
            return;
        };

        let (sw, sh) = (screen_width(), screen_height());
        let scale = (sw / self.width as f32).min(sh / self.height as f32);
        let (dw, dh) = (self.width as f32 * scale, self.height as f32 * scale);

        draw_texture_ex(
            texture,
            (sw - dw) * 0.5,
            (sh - dh) * 0.5,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dw, dh)),
                ..Default::default()
            },
        );
    }
}

impl DisplayMode for WindowDisplay {
    fn get_mode(&self) -> u8 {
        self.mode
    }

    fn set_mode(&mut self, mode: u8) {
        log::debug!("display mode {:#04x} -> {:#04x}", self.mode, mode);
        self.mode = mode;
    }
}

impl Display for WindowDisplay {
    fn present(&mut self, frame: &Framebuffer) {
        let rgba = frame.to_rgba(&self.palette);

        let same_size = self.width == frame.width && self.height == frame.height;
        if let Some(texture) = self.texture.as_ref().filter(|_| same_size) {
            texture.update_from_bytes(frame.width as u32, frame.height as u32, &rgba);
            return;
        }

        let texture = Texture2D::from_rgba8(frame.width as u16, frame.height as u16, &rgba);
        texture.set_filter(FilterMode::Nearest);
        self.texture = Some(texture);
        self.width = frame.width;
        self.height = frame.height;
    }

    fn blank(&mut self) {
        self.texture = None;
    }
}
