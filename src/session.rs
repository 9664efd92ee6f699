//! Render session: mode switch, buffer lifetime, presentation
//!
//! A session owns the display for its whole lifetime. Starting it records
//! the current mode and enters mode 13h; ending it blanks the surface,
//! frees the buffer and puts the old mode back.

use std::fmt;
use thiserror::Error;

use crate::display::{Display, DisplayMode, MODE_13H};
use crate::error::RasterError;
use crate::rasterizer::{Framebuffer, HEIGHT, WIDTH};

/// Session start failure. The display is handed back with its
/// original mode already restored.
#[derive(Error)]
#[error("could not start render session: {source}")]
pub struct StartError<D> {
    pub display: D,
    pub source: RasterError,
}

impl<D> fmt::Debug for StartError<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartError").field("source", &self.source).finish_non_exhaustive()
    }
}

pub struct RenderSession<D: Display + DisplayMode> {
    display: D,
    previous_mode: u8,
    frame: Framebuffer,
}

impl<D: Display + DisplayMode> RenderSession<D> {
    /// Enter mode 13h with a 320x200 buffer
    pub fn start(display: D) -> Result<Self, StartError<D>> {
        Self::start_with_size(display, WIDTH, HEIGHT)
    }

    pub fn start_with_size(mut display: D, width: usize, height: usize) -> Result<Self, StartError<D>> {
        let previous_mode = display.get_mode();
        display.set_mode(MODE_13H);

        match Framebuffer::try_new(width, height) {
            Ok(frame) => {
                log::info!("render session started ({}x{}, previous mode {:#04x})", width, height, previous_mode);
                Ok(Self { display, previous_mode, frame })
            }
            Err(source) => {
                log::error!("{}", source);
                display.set_mode(previous_mode);
                Err(StartError { display, source })
            }
        }
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Framebuffer {
        &mut self.frame
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn previous_mode(&self) -> u8 {
        self.previous_mode
    }

    /// Hand the finished buffer to the display
    pub fn present(&mut self) {
        self.display.present(&self.frame);
    }

    /// Blank the surface, free the buffer and restore the old mode
    pub fn end(self) -> D {
        let RenderSession { mut display, previous_mode, frame } = self;
        display.blank();
        drop(frame);
        display.set_mode(previous_mode);
        log::info!("render session ended, mode {:#04x} restored", previous_mode);
        display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{MemoryDisplay, MODE_TEXT};

    #[test]
    fn test_session_lifecycle() {
        let mut session = RenderSession::start(MemoryDisplay::new(MODE_TEXT)).unwrap();
        assert_eq!(session.display().get_mode(), MODE_13H);
        assert_eq!(session.previous_mode(), MODE_TEXT);
        assert!(session.frame().pixels().iter().all(|&p| p == 0));

        session.frame_mut().set_pixel(1, 1, 42);
        session.present();
        let frame = session.display().last_frame().unwrap();
        assert_eq!(frame.len(), WIDTH * HEIGHT);
        assert_eq!(frame[WIDTH + 1], 42);

        let display = session.end();
        assert_eq!(display.get_mode(), MODE_TEXT);
        assert_eq!(display.mode_history, vec![MODE_13H, MODE_TEXT]);
        assert!(display.last_frame().is_none());
        assert_eq!(display.blanks, 1);
    }

    #[test]
    fn test_failed_start_restores_mode() {
        let Err(err) = RenderSession::start_with_size(MemoryDisplay::new(MODE_TEXT), usize::MAX / 2, 4) else {
            panic!("allocation should fail");
        };
        assert!(matches!(err.source, RasterError::BufferUnavailable { .. }));
        assert_eq!(err.display.get_mode(), MODE_TEXT);
        assert_eq!(err.display.mode_history, vec![MODE_13H, MODE_TEXT]);
        assert!(err.to_string().starts_with("could not start render session: could not allocate"));
    }
}
