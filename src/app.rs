//! Application state and render loop
//!
//! Renders a scene once, optionally runs its highlight sequence, and keeps
//! presenting until the user quits. Keys: Esc/Q quit, R redraw, S screenshot.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::time::get_frame_time;
use macroquad::window::{next_frame, Conf};

use crate::config::Config;
use crate::display::{Display, DisplayMode, MemoryDisplay, WindowDisplay};
use crate::rasterizer::{Framebuffer, Palette, HEIGHT, WIDTH};
use crate::scene::{Highlight, Scene};
use crate::session::RenderSession;

/// Which colors the highlighted shape is redrawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkStep {
    Highlighted,
    Normal,
}

/// Timer for a scene's highlight sequence
#[derive(Debug, Clone)]
pub struct Blink {
    highlight: Highlight,
    period: f32,
    elapsed: f32,
    step: u32,
}

impl Blink {
    pub fn new(highlight: Highlight, period: f32) -> Self {
        Self {
            highlight,
            period: period.max(0.01),
            elapsed: 0.0,
            step: 0,
        }
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.highlight.cycles * 2
    }

    /// Advance the timer; returns the next redraw once a period has passed
    pub fn advance(&mut self, dt: f32) -> Option<BlinkStep> {
        if self.is_finished() {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed < self.period {
            return None;
        }
        self.elapsed -= self.period;
        self.step += 1;
        Some(if self.step % 2 == 1 { BlinkStep::Highlighted } else { BlinkStep::Normal })
    }
}

pub struct App {
    pub scene: Scene,
    blink: Option<Blink>,
    blink_enabled: bool,
    blink_period: f32,
    screenshot_dir: PathBuf,
    screenshots: u32,
    palette: Palette,
}

impl App {
    pub fn new(scene: Scene, config: &Config) -> Self {
        let mut app = Self {
            scene,
            blink: None,
            blink_enabled: config.blink,
            blink_period: config.blink_period_secs,
            screenshot_dir: config.screenshot_dir.clone(),
            screenshots: 0,
            palette: Palette::vga(),
        };
        app.reset_blink();
        app
    }

    fn reset_blink(&mut self) {
        self.blink = match (&self.scene.highlight, self.blink_enabled) {
            (Some(h), true) => Some(Blink::new(h.clone(), self.blink_period)),
            _ => None,
        };
    }

    /// Draw the whole scene from scratch and restart the highlight sequence
    pub fn restart(&mut self, fb: &mut Framebuffer) {
        self.scene.render(fb);
        self.reset_blink();
    }

    /// Advance timers; true when the buffer changed and needs presenting
    pub fn update(&mut self, dt: f32, fb: &mut Framebuffer) -> bool {
        let Some(blink) = &mut self.blink else {
            return false;
        };
        let Some(step) = blink.advance(dt) else {
            return false;
        };

        let h = blink.highlight();
        let colors = match step {
            BlinkStep::Highlighted => Some((h.border_color, h.fill_color)),
            BlinkStep::Normal => None,
        };
        self.scene.draw_shape(h.shape, colors, fb);
        log::debug!("highlight step {:?} on shape {}", step, h.shape);
        true
    }

    /// Write the current buffer to the screenshot directory
    pub fn screenshot(&mut self, fb: &Framebuffer) -> Result<PathBuf> {
        fs::create_dir_all(&self.screenshot_dir)
            .with_context(|| format!("creating {}", self.screenshot_dir.display()))?;
        self.screenshots += 1;
        let path = self
            .screenshot_dir
            .join(format!("{}-{:03}.png", self.scene.name, self.screenshots));
        fb.save_png(&path, &self.palette)?;
        Ok(path)
    }
}

/// Render one frame without a window and save it as an image
pub fn render_headless(scene: &Scene, path: &Path) -> Result<()> {
    let (_, result) = render_to_png(MemoryDisplay::default(), scene, path);
    result?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Render and save through `display`, which is handed back released
/// whether or not the write succeeded.
fn render_to_png<D: Display + DisplayMode>(display: D, scene: &Scene, path: &Path) -> (D, Result<()>) {
    let mut session = match RenderSession::start(display) {
        Ok(session) => session,
        Err(err) => {
            return (err.display, Err(anyhow::Error::new(err.source).context("could not start render session")));
        }
    };
    scene.render(session.frame_mut());
    session.present();
    let saved = session
        .frame()
        .save_png(path, &Palette::vga())
        .with_context(|| format!("rendering scene '{}'", scene.name));
    (session.end(), saved)
}

pub fn window_conf(config: &Config) -> Conf {
    Conf {
        window_title: format!("mode13 v{}", crate::VERSION),
        window_width: WIDTH as i32 * config.window_scale as i32,
        window_height: HEIGHT as i32 * config.window_scale as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Window main loop
pub async fn run(config: Config, scene: Scene) {
    let mut session = match RenderSession::start(WindowDisplay::new(Palette::vga())) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    let mut app = App::new(scene, &config);
    app.restart(session.frame_mut());
    session.present();

    loop {
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            break;
        }

        if is_key_pressed(KeyCode::R) {
            app.restart(session.frame_mut());
            session.present();
        }

        if is_key_pressed(KeyCode::S) {
            match app.screenshot(session.frame()) {
                Ok(path) => log::info!("screenshot saved to {}", path.display()),
                Err(e) => log::warn!("screenshot failed: {:#}", e),
            }
        }

        if app.update(get_frame_time(), session.frame_mut()) {
            session.present();
        }

        session.display().draw();
        next_frame().await;
    }

    session.end();
}
