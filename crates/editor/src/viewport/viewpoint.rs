//! Named camera presets and the animated transition between them.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::camera::{OrbitCamera, OrbitLimits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewPreset {
    Isometric,
    Top,
    /// South
    Front,
    /// North
    Back,
    /// East
    Right,
    /// West
    Left,
}

impl ViewPreset {
    pub fn all() -> &'static [ViewPreset] {
        &[
            ViewPreset::Isometric,
            ViewPreset::Top,
            ViewPreset::Front,
            ViewPreset::Back,
            ViewPreset::Right,
            ViewPreset::Left,
        ]
    }

    pub fn position(&self) -> Vec3 {
        match self {
            ViewPreset::Isometric => Vec3::new(10.0, 8.0, 10.0),
            ViewPreset::Top => Vec3::new(0.0, 15.0, 0.0),
            ViewPreset::Front => Vec3::new(0.0, 5.0, 15.0),
            ViewPreset::Back => Vec3::new(0.0, 5.0, -15.0),
            ViewPreset::Right => Vec3::new(15.0, 5.0, 0.0),
            ViewPreset::Left => Vec3::new(-15.0, 5.0, 0.0),
        }
    }

    /// No preset lets the camera dip below the floor
    pub fn limits(&self) -> OrbitLimits {
        let (min_polar, max_polar) = match self {
            ViewPreset::Isometric => (0.0, PI * 0.49),
            ViewPreset::Top => (0.0, PI / 12.0),
            _ => (PI / 6.0, PI * 0.45),
        };
        OrbitLimits {
            min_polar,
            max_polar,
            ..OrbitLimits::default()
        }
    }

    /// i18n key of the preset name
    pub fn notice_key(&self) -> &'static str {
        match self {
            ViewPreset::Isometric => "view.isometric",
            ViewPreset::Top => "view.top",
            ViewPreset::Front => "view.front",
            ViewPreset::Back => "view.back",
            ViewPreset::Right => "view.right",
            ViewPreset::Left => "view.left",
        }
    }
}

/// Ease-out quadratic
fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[derive(Debug, Clone, PartialEq)]
struct Transition {
    from: Vec3,
    to: Vec3,
    elapsed: f32,
    duration: f32,
}

/// Owns the camera; orbit input is only applied while controls are enabled
/// and no transition is running.
#[derive(Debug, Clone)]
pub struct ViewpointController {
    camera: OrbitCamera,
    preset: ViewPreset,
    transition: Option<Transition>,
    controls_enabled: bool,
    duration: f32,
}

impl ViewpointController {
    pub fn new(duration: f32) -> Self {
        let preset = ViewPreset::Isometric;
        let mut camera = OrbitCamera::new();
        camera.position = preset.position();
        camera.limits = preset.limits();
        Self {
            camera,
            preset,
            transition: None,
            controls_enabled: true,
            duration,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn preset(&self) -> ViewPreset {
        self.preset
    }

    /// Start animating towards a preset; its clamps apply at once
    pub fn set_preset(&mut self, preset: ViewPreset) {
        self.preset = preset;
        self.camera.limits = preset.limits();
        self.camera.target = Vec3::ZERO;
        if self.duration <= 0.0 {
            self.camera.position = preset.position();
            self.transition = None;
            return;
        }
        self.transition = Some(Transition {
            from: self.camera.position,
            to: preset.position(),
            elapsed: 0.0,
            duration: self.duration,
        });
        tracing::debug!(?preset, "camera transition started");
    }

    /// Jump to a preset without animation
    pub fn snap_to(&mut self, preset: ViewPreset) {
        self.preset = preset;
        self.camera.limits = preset.limits();
        self.camera.target = Vec3::ZERO;
        self.camera.position = preset.position();
        self.transition = None;
    }

    /// Advance the running transition by `dt` seconds. Returns true while
    /// still animating.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(tr) = self.transition.as_mut() else {
            return false;
        };
        tr.elapsed += dt.max(0.0);
        let t = (tr.elapsed / tr.duration).min(1.0);
        self.camera.position = tr.from.lerp(tr.to, ease_out(t));
        self.camera.target = Vec3::ZERO;
        if t >= 1.0 {
            self.transition = None;
            return false;
        }
        true
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    fn accepts_input(&self) -> bool {
        self.controls_enabled && self.transition.is_none()
    }

    /// Apply orbit input; ignored while a drag or transition owns the camera
    pub fn orbit(&mut self, d_azimuth: f32, d_polar: f32) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.camera.orbit(d_azimuth, d_polar);
        true
    }

    pub fn zoom(&mut self, factor: f32) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.camera.zoom(factor);
        true
    }
}
