//! Canvas 2D renderer
//!
//! Draws one `Snapshot` per frame. Platform gradients are created on first use
//! and cached per platform index, since the platform list never changes.

use std::cell::Cell;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlImageElement};

use super::{Snapshot, adjust_color};
use crate::consts::{DEATH_ZONE_Y, WORLD_HEIGHT};
use crate::settings::Settings;
use crate::sim::Platform;

const BACKGROUND_URL: &str =
    "https://images.unsplash.com/photo-1579546929662-711aa81148cf?w=800&q=80";
const PLAYER_COLOR: &str = "#FF3366";
const SPAWN_COLOR: &str = "#00ff00";
/// Radians per second for the orbiting spawn dots
const SPAWN_SPIN: f32 = 2.0;

/// Renderer-side switches taken from `Settings`
#[derive(Debug, Clone, Copy)]
struct Overlay {
    hud: bool,
    death_zone: bool,
    spawn_marker: bool,
    animate: bool,
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    background: HtmlImageElement,
    /// Set by the image's onload handler, polled every frame
    background_ready: Rc<Cell<bool>>,
    /// Lazily built fill per platform, indexed like the level
    platform_fills: Vec<Option<CanvasGradient>>,
    spawn_angle: f32,
    overlay: Overlay,
}

impl CanvasRenderer {
    /// Start loading the background and prepare an empty gradient cache
    pub fn new(ctx: CanvasRenderingContext2d, settings: &Settings) -> Result<Self, JsValue> {
        let background = HtmlImageElement::new()?;
        let background_ready = Rc::new(Cell::new(false));
        {
            let ready = Rc::clone(&background_ready);
            let onload = Closure::<dyn FnMut()>::new(move || {
                ready.set(true);
                log::info!("Background image loaded");
            });
            background.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
        }
        background.set_cross_origin(Some("anonymous"));
        background.set_src(BACKGROUND_URL);

        Ok(Self {
            ctx,
            background,
            background_ready,
            platform_fills: Vec::new(),
            spawn_angle: 0.0,
            overlay: Overlay {
                hud: settings.show_hud,
                death_zone: settings.show_death_zone,
                spawn_marker: settings.show_spawn_marker,
                animate: !settings.reduced_motion,
            },
        })
    }

    /// Draw a full frame
    pub fn render(&mut self, snap: &Snapshot<'_>) -> Result<(), JsValue> {
        if self.overlay.animate {
            self.spawn_angle += snap.dt * SPAWN_SPIN;
        }

        let (width, height) = self.canvas_size();
        self.draw_background(width, height)?;
        if self.overlay.death_zone {
            self.ctx.set_fill_style_str("rgba(255, 0, 0, 0.2)");
            self.ctx.fill_rect(
                0.0,
                WORLD_HEIGHT as f64,
                width,
                (DEATH_ZONE_Y - WORLD_HEIGHT) as f64,
            );
        }
        self.draw_decorations(width, height);

        if self.platform_fills.len() != snap.platforms.len() {
            self.platform_fills = vec![None; snap.platforms.len()];
        }
        for (i, platform) in snap.platforms.iter().enumerate() {
            self.draw_platform(i, platform)?;
        }

        self.draw_player(snap)?;
        if self.overlay.spawn_marker {
            self.draw_spawn_marker(snap)?;
        }
        self.draw_level_arrow();
        if self.overlay.hud {
            self.draw_hud(snap.jumps_left)?;
        }
        Ok(())
    }

    fn canvas_size(&self) -> (f64, f64) {
        match self.ctx.canvas() {
            Some(canvas) => (canvas.width() as f64, canvas.height() as f64),
            None => (crate::consts::WORLD_WIDTH as f64, WORLD_HEIGHT as f64),
        }
    }

    fn draw_background(&self, width: f64, height: f64) -> Result<(), JsValue> {
        if self.background_ready.get() {
            self.ctx.set_global_alpha(0.3);
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    &self.background,
                    0.0,
                    0.0,
                    width,
                    height,
                )?;
            self.ctx.set_global_alpha(1.0);
        } else {
            let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
            gradient.add_color_stop(0.0, "#1a1a2e")?;
            gradient.add_color_stop(1.0, "#16213e")?;
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.fill_rect(0.0, 0.0, width, height);
        }
        Ok(())
    }

    fn draw_decorations(&self, width: f64, height: f64) {
        self.ctx.set_global_alpha(0.1);
        self.ctx.set_stroke_style_str("#ffffff");
        let mut x = 0.0;
        while x < width + 200.0 {
            self.ctx.begin_path();
            self.ctx.move_to(x, 0.0);
            self.ctx.line_to(x + 100.0, height);
            self.ctx.stroke();
            x += 200.0;
        }
        self.ctx.set_global_alpha(1.0);
    }

    /// Fill for platform `index`, built on first request
    fn platform_fill(&mut self, index: usize, platform: &Platform) -> Result<CanvasGradient, JsValue> {
        if let Some(Some(fill)) = self.platform_fills.get(index) {
            return Ok(fill.clone());
        }
        let (x, y) = (platform.x() as f64, platform.y() as f64);
        let gradient = self
            .ctx
            .create_linear_gradient(x, y, x, y + platform.height() as f64);
        gradient.add_color_stop(0.0, platform.color())?;
        gradient.add_color_stop(1.0, &adjust_color(platform.color(), -20))?;
        if let Some(slot) = self.platform_fills.get_mut(index) {
            *slot = Some(gradient.clone());
        }
        Ok(gradient)
    }

    fn draw_platform(&mut self, index: usize, platform: &Platform) -> Result<(), JsValue> {
        let (x, y) = (platform.x() as f64, platform.y() as f64);
        let (w, h) = (platform.width() as f64, platform.height() as f64);

        // Drop shadow
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.2)");
        self.ctx.fill_rect(x + 4.0, y + 4.0, w, h);

        let fill = self.platform_fill(index, platform)?;
        self.ctx.set_fill_style_canvas_gradient(&fill);
        self.ctx.fill_rect(x, y, w, h);

        // Shine on the top quarter
        self.ctx.set_fill_style_str("rgba(255, 255, 255, 0.1)");
        self.ctx.fill_rect(x, y, w, h / 4.0);

        self.ctx
            .set_stroke_style_str(&adjust_color(platform.color(), 20));
        self.ctx.set_line_width(2.0);
        self.ctx.stroke_rect(x, y, w, h);
        Ok(())
    }

    fn draw_player(&self, snap: &Snapshot<'_>) -> Result<(), JsValue> {
        let pose = snap.player;
        let center = pose.center();
        let (w, h) = (pose.size.x as f64, pose.size.y as f64);

        self.ctx.save();
        self.ctx.translate(center.x as f64, center.y as f64)?;
        self.ctx.rotate(pose.rotation as f64)?;

        self.ctx.set_shadow_color("rgba(0, 0, 0, 0.3)");
        self.ctx.set_shadow_blur(10.0);
        self.ctx.set_shadow_offset_y(5.0);
        self.ctx.set_fill_style_str(PLAYER_COLOR);
        self.ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
        self.ctx.set_shadow_color("transparent");

        // Shine
        self.ctx.set_fill_style_str("rgba(255, 255, 255, 0.3)");
        self.ctx.fill_rect(-w / 4.0, -h / 4.0, w / 4.0, h / 4.0);

        // Eye
        self.ctx.set_fill_style_str("#ffffff");
        self.ctx.fill_rect(w / 8.0, -h / 8.0, w / 4.0, h / 4.0);

        self.ctx.restore();
        Ok(())
    }

    fn draw_spawn_marker(&self, snap: &Snapshot<'_>) -> Result<(), JsValue> {
        let (sx, sy) = (snap.spawn.x as f64, snap.spawn.y as f64);
        self.ctx.save();

        // Outer glow
        self.ctx.set_global_alpha(0.3);
        let glow = self.ctx.create_radial_gradient(sx, sy, 0.0, sx, sy, 30.0)?;
        glow.add_color_stop(0.0, SPAWN_COLOR)?;
        glow.add_color_stop(1.0, "transparent")?;
        self.ctx.set_fill_style_canvas_gradient(&glow);
        self.ctx.begin_path();
        self.ctx.arc(sx, sy, 30.0, 0.0, TAU)?;
        self.ctx.fill();

        // Four orbiting dots
        self.ctx.set_global_alpha(0.5);
        self.ctx.set_fill_style_str(SPAWN_COLOR);
        for i in 0..4 {
            let angle = self.spawn_angle as f64 + i as f64 * FRAC_PI_2;
            let x = sx + angle.cos() * 15.0;
            let y = sy + angle.sin() * 15.0;
            self.ctx.begin_path();
            self.ctx.arc(x, y, 3.0, 0.0, TAU)?;
            self.ctx.fill();
        }

        self.ctx.set_global_alpha(1.0);
        self.ctx.begin_path();
        self.ctx.arc(sx, sy, 5.0, 0.0, TAU)?;
        self.ctx.fill();

        self.ctx.restore();
        Ok(())
    }

    /// Arrow in the top-right corner pointing at the level's end
    fn draw_level_arrow(&self) {
        self.ctx.save();
        self.ctx.set_global_alpha(0.5);
        self.ctx.set_fill_style_str("#ffffff");
        self.ctx.begin_path();
        self.ctx.move_to(750.0, 50.0);
        self.ctx.line_to(770.0, 70.0);
        self.ctx.line_to(750.0, 90.0);
        self.ctx.close_path();
        self.ctx.fill();
        self.ctx.restore();
    }

    fn draw_hud(&self, jumps_left: u8) -> Result<(), JsValue> {
        let (_, height) = self.canvas_size();
        let top = height - 76.0;

        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
        self.ctx.fill_rect(16.0, top, 220.0, 60.0);

        self.ctx.set_fill_style_str("#ffffff");
        self.ctx.set_font("14px sans-serif");
        self.ctx.fill_text("Use \u{2190} \u{2192} to move", 24.0, top + 18.0)?;
        self.ctx.fill_text("Press Space to double jump!", 24.0, top + 36.0)?;
        self.ctx
            .fill_text(&format!("Jumps left: {}", jumps_left), 24.0, top + 54.0)?;
        Ok(())
    }
}
