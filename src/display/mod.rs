//! Display collaborators
//!
//! The rasterizer never touches a real screen. A session talks to two
//! services: a mode switcher (text mode vs. 320x200 pixel mode) and a
//! surface that receives finished frames.

mod window;

pub use window::WindowDisplay;

use crate::rasterizer::Framebuffer;

/// 80x25 color text mode
pub const MODE_TEXT: u8 = 0x03;
/// 320x200, 256 colors
pub const MODE_13H: u8 = 0x13;

/// Query and switch the display mode
pub trait DisplayMode {
    fn get_mode(&self) -> u8;
    fn set_mode(&mut self, mode: u8);
}

/// A surface that shows finished frames
pub trait Display {
    /// Copy a fully drawn frame to the surface.
    /// Any vertical-blank wait belongs to the implementation.
    fn present(&mut self, frame: &Framebuffer);

    /// Clear the surface
    fn blank(&mut self);
}

/// Display kept entirely in memory (headless runs and tests)
#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    mode: u8,
    /// Every mode passed to `set_mode`, in order
    pub mode_history: Vec<u8>,
    last_frame: Option<Vec<u8>>,
    pub presents: usize,
    pub blanks: usize,
}

impl MemoryDisplay {
    pub fn new(mode: u8) -> Self {
        Self {
            mode,
            mode_history: Vec::new(),
            last_frame: None,
            presents: 0,
            blanks: 0,
        }
    }

    /// Pixels of the most recent `present`, if the surface is not blank
    pub fn last_frame(&self) -> Option<&[u8]> {
        self.last_frame.as_deref()
    }
}

impl Default for MemoryDisplay {
    fn default() -> Self {
        Self::new(MODE_TEXT)
    }
}

impl DisplayMode for MemoryDisplay {
    fn get_mode(&self) -> u8 {
        self.mode
    }

    fn set_mode(&mut self, mode: u8) {
        self.mode = mode;
        self.mode_history.push(mode);
    }
}

impl Display for MemoryDisplay {
    fn present(&mut self, frame: &Framebuffer) {
        match &mut self.last_frame {
            Some(pixels) => {
                pixels.clear();
                pixels.extend_from_slice(frame.pixels());
            }
            None => self.last_frame = Some(frame.pixels().to_vec()),
        }
        self.presents += 1;
    }

    fn blank(&mut self) {
        self.last_frame = None;
        self.blanks += 1;
    }
}
