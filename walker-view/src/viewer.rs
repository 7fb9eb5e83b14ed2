//! Interactive lattice walker viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the walker pool, forwards
//! one tick per rendered frame to it and paints the resulting segment
//! transforms with a fixed, slowly orbiting orthographic projection.

use eframe::App;
use glam::{Quat, Vec3};
use walker_core::{
    config::{Config, ConfigError},
    guides::guide_lines,
    pool::WalkerPool,
    types::WalkerId,
};

/// Cross-section of every drawn bar, in lattice units. Bars are also
/// lengthened by this much so neighbouring bars overlap at the joints.
const THICKNESS: f32 = 0.08;

/// Longest frame step forwarded to the pool, in seconds.
const MAX_DT: f32 = 0.1;

/// Main application state for the viewer.
///
/// ### Fields
/// - `cfg` - Configuration the pool was built from; reused on reset.
/// - `pool` - The walkers being animated.
/// - `guides` - Pre-computed lattice guide lines for the current bound.
///
/// - `running` - Whether frame ticks are forwarded to the pool.
/// - `show_guides` - Whether the guide grid is drawn.
///
/// - `zoom` - Pixels per lattice unit.
/// - `yaw` - Current orbit angle around the vertical axis (radians).
/// - `pitch` - Fixed tilt of the view (radians).
/// - `spin` - Orbit speed (radians per second).
///
/// - `last_dt` - Last frame step forwarded to the pool (for display only).
pub struct Viewer {
    cfg: Config,
    pool: WalkerPool,
    guides: Vec<(Vec3, Vec3)>,

    running: bool,
    show_guides: bool,

    zoom: f32,
    yaw: f32,
    pitch: f32,
    spin: f32,

    last_dt: f32,
}

impl Viewer {
    /// Creates a running viewer for the given configuration.
    ///
    /// ### Returns
    /// - `Ok(viewer)` with a freshly built pool.
    /// - `Err` if `cfg` is rejected by [`WalkerPool::new`].
    pub fn new(cfg: Config) -> Result<Self, ConfigError> {
        let pool = WalkerPool::new(&cfg)?;
        let guides = guide_lines(cfg.bound);

        Ok(Self {
            cfg,
            pool,
            guides,
            running: true,
            show_guides: false,
            zoom: 40.0,
            yaw: 0.0,
            pitch: 0.35,
            spin: 0.15,
            last_dt: 0.0,
        })
    }

    /// Tears down the current pool and starts over from the seed segments.
    fn reset(&mut self) {
        match WalkerPool::new(&self.cfg) {
            Ok(pool) => {
                self.pool.dispose();
                self.pool = pool;
                self.yaw = 0.0;
            }
            Err(e) => tracing::error!("reset failed: {e}"),
        }
    }

    /// Forwards one frame of `dt` seconds to the pool and advances the orbit.
    fn step_once(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_DT);
        self.pool.tick(dt);
        self.yaw = (self.yaw + self.spin * dt) % std::f32::consts::TAU;
        self.last_dt = dt;
    }

    fn view_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(self.yaw)
    }

    /// Projects a world-space point into the drawing area.
    ///
    /// ### Returns
    /// The screen position and a depth value; larger depth is closer to
    /// the viewer.
    fn project(&self, p: Vec3, rect: egui::Rect) -> (egui::Pos2, f32) {
        let v = self.view_rotation() * p;
        let center = rect.center();
        (
            egui::pos2(center.x + v.x * self.zoom, center.y - v.y * self.zoom),
            v.z,
        )
    }

    /// Bars to draw this frame, far to near: `(a, b, depth, walker)`.
    fn bars(&self, rect: egui::Rect) -> Vec<(egui::Pos2, egui::Pos2, f32, WalkerId)> {
        let mut bars: Vec<_> = self
            .pool
            .transforms()
            .map(|(id, t)| {
                let (a, b) = t.endpoints();
                let pad = (b - a).normalize_or_zero() * (THICKNESS * 0.5);
                let (pa, da) = self.project(a - pad, rect);
                let (pb, db) = self.project(b + pad, rect);
                (pa, pb, (da + db) * 0.5, id)
            })
            .collect();
        bars.sort_by(|x, y| x.2.total_cmp(&y.2));
        bars
    }

    /// Builds the top panel UI (run controls, stepping, display toggles).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.step_once(1.0 / 60.0);
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.checkbox(&mut self.show_guides, "guide lines");
                ui.add(egui::Slider::new(&mut self.zoom, 5.0..=120.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (walkers, segments, fallbacks, dt).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt = {:.3} s", self.last_dt));
                ui.separator();
                ui.label(format!("fallbacks = {}", self.pool.fallbacks()));
                ui.label(format!("segments = {}", self.pool.segment_count()));
                ui.label(format!("walkers = {}", self.pool.len()));
            });
        });
    }

    /// Builds the central panel where guides and walkers are drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_rgb(0xfa, 0xfa, 0xfa)))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                if self.show_guides {
                    let stroke = egui::Stroke::new(
                        1.0,
                        egui::Color32::from_rgba_unmultiplied(0, 0, 0, 25),
                    );
                    for &(a, b) in &self.guides {
                        let (pa, _) = self.project(a, rect);
                        let (pb, _) = self.project(b, rect);
                        painter.line_segment([pa, pb], stroke);
                    }
                }

                // Shade by depth: nearer bars are brighter.
                let reach = (self.cfg.bound as f32 * 3f32.sqrt()).max(1.0);
                let width = (THICKNESS * self.zoom).max(1.0);
                for (a, b, depth, id) in self.bars(rect) {
                    let t = ((depth / reach) * 0.5 + 0.5).clamp(0.0, 1.0);
                    let base = 70.0 + 120.0 * t;
                    let tint = (id % 3) as f32 * 12.0;
                    let color = egui::Color32::from_rgb(
                        base as u8,
                        (base + tint * 0.5) as u8,
                        (base + tint) as u8,
                    );
                    painter.line_segment([a, b], egui::Stroke::new(width, color));
                }

                if self.running {
                    let dt = ctx.input(|i| i.stable_dt);
                    self.step_once(dt);
                    ctx.request_repaint();
                }
            });
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.pool.dispose();
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    fn viewer() -> Viewer {
        let cfg = Config {
            seed: Some(11),
            ..Config::default()
        };
        Viewer::new(cfg).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = Config {
            capacity: 0,
            ..Config::default()
        };
        assert!(Viewer::new(cfg).is_err());
    }

    #[test]
    fn project_without_rotation_is_a_plain_scale() {
        let mut viewer = viewer();
        viewer.yaw = 0.0;
        viewer.pitch = 0.0;
        viewer.zoom = 10.0;
        let rect = test_rect();

        let (p, depth) = viewer.project(Vec3::new(1.0, 2.0, 3.0), rect);
        assert!((p.x - 410.0).abs() < 1e-4);
        // Screen y grows downward.
        assert!((p.y - 280.0).abs() < 1e-4);
        assert!((depth - 3.0).abs() < 1e-5);
    }

    #[test]
    fn quarter_yaw_turns_x_into_depth() {
        let mut viewer = viewer();
        viewer.yaw = std::f32::consts::FRAC_PI_2;
        viewer.pitch = 0.0;
        let rect = test_rect();

        let (p, depth) = viewer.project(Vec3::X, rect);
        assert!((p.x - rect.center().x).abs() < 1e-3);
        assert!((depth + 1.0).abs() < 1e-5);
    }

    #[test]
    fn bars_are_sorted_far_to_near() {
        let mut viewer = viewer();
        for _ in 0..200 {
            viewer.step_once(1.0 / 30.0);
        }

        let bars = viewer.bars(test_rect());
        assert_eq!(bars.len(), viewer.pool.segment_count());
        assert!(bars.windows(2).all(|w| w[0].2 <= w[1].2));
    }

    #[test]
    fn step_once_clamps_large_frames() {
        let mut viewer = viewer();
        viewer.step_once(5.0);
        assert_eq!(viewer.last_dt, MAX_DT);
        viewer.step_once(-1.0);
        assert_eq!(viewer.last_dt, 0.0);
    }

    #[test]
    fn reset_restores_seed_segments() {
        let mut viewer = viewer();
        for _ in 0..300 {
            viewer.step_once(1.0 / 30.0);
        }
        assert!(viewer.pool.segment_count() > viewer.pool.len());

        viewer.reset();

        // One seed segment per walker, nobody mid-cycle.
        assert_eq!(viewer.pool.segment_count(), viewer.pool.len());
        assert!(viewer.pool.walkers().iter().all(|w| !w.is_busy()));
        assert_eq!(viewer.yaw, 0.0);
    }

    #[test]
    fn guides_follow_the_configured_bound() {
        let cfg = Config {
            bound: 2,
            seed: Some(1),
            ..Config::default()
        };
        let viewer = Viewer::new(cfg).unwrap();
        assert_eq!(viewer.guides.len(), 3 * 5 * 5);
    }
}
