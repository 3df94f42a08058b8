use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::picking::Ray;

/// Size of the render target in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero-sized or non-finite viewports cannot be rendered into
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    fn center(&self) -> ScreenPos {
        ScreenPos::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Pixel position, origin at the top-left of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: ScreenPos) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Orbit constraints. Polar angle is measured from +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 30.0,
            min_polar: 0.0,
            max_polar: std::f32::consts::PI * 0.49,
        }
    }
}

/// Camera orbiting a fixed target
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view (degrees)
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub limits: OrbitLimits,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(10.0, 8.0, 10.0),
            target: Vec3::ZERO,
            fov: 65.0,
            near: 0.1,
            far: 1000.0,
            limits: OrbitLimits::default(),
        }
    }

    /// (distance, polar, azimuth) of the eye around the target
    pub fn spherical(&self) -> (f32, f32, f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius < f32::EPSILON {
            return (0.0, 0.0, 0.0);
        }
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);
        (radius, polar, azimuth)
    }

    fn set_spherical(&mut self, radius: f32, polar: f32, azimuth: f32) {
        let radius = radius.clamp(self.limits.min_distance, self.limits.max_distance);
        let polar = polar.clamp(self.limits.min_polar, self.limits.max_polar);
        let s = polar.sin();
        self.position = self.target
            + Vec3::new(radius * s * azimuth.sin(), radius * polar.cos(), radius * s * azimuth.cos());
    }

    /// Rotate around the target by angle deltas (radians)
    pub fn orbit(&mut self, d_azimuth: f32, d_polar: f32) {
        let (r, polar, azimuth) = self.spherical();
        self.set_spherical(r, polar + d_polar, azimuth + d_azimuth);
    }

    /// Scale the distance to the target (`factor < 1` moves closer)
    pub fn zoom(&mut self, factor: f32) {
        let (r, polar, azimuth) = self.spherical();
        self.set_spherical(r * factor, polar, azimuth);
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        self.position
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        let forward = (self.target - self.position).normalize_or_zero();
        // Straight down: +Y is degenerate as up vector
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Project a 3D point to 2D screen coords
    pub fn project(&self, point: Vec3, viewport: Viewport) -> Option<ScreenPos> {
        let vp = self.view_projection(viewport.aspect());
        let p = vp * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let c = viewport.center();
        Some(ScreenPos::new(
            c.x + ndc.x * viewport.width * 0.5,
            c.y - ndc.y * viewport.height * 0.5,
        ))
    }

    /// Cast a ray from a screen position into the 3D scene
    pub fn screen_ray(&self, screen_pos: ScreenPos, viewport: Viewport) -> Ray {
        let c = viewport.center();

        // Screen → NDC
        let ndc_x = (screen_pos.x - c.x) / (viewport.width * 0.5);
        let ndc_y = -(screen_pos.y - c.y) / (viewport.height * 0.5);

        // Inverse view-projection
        let vp_inv = self.view_projection(viewport.aspect()).inverse();

        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray {
            origin: self.position,
            direction: (far - near).normalize_or_zero(),
        }
    }
}
