//! Orbit Camera
//!
//! A spherical-coordinate orbit camera with inertial damping. Input
//! gestures move a set of goal coordinates; the rendered coordinates
//! chase the goals with an exponential approach each frame, giving the
//! glide-to-rest feel of damped orbit controls.
//!
//! Controls:
//! - Left mouse drag: Orbit (rotate around the focus point)
//! - Right mouse drag: Pan (translate the focus point)
//! - Scroll wheel: Zoom (change distance from the focus)
//!
//! # Coordinate System
//! - Azimuth: horizontal angle in degrees (wraps)
//! - Elevation: vertical angle in degrees, clamped so the polar angle
//!   never exceeds 120 degrees (no diving far under the model)
//! - Distance: zoom distance, clamped to [10, 150]
//! - Y is up

use glam::{Mat4, Vec3};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default horizontal angle in degrees (matches an eye at (25, 20, 35)).
const DEFAULT_AZIMUTH: f32 = 35.5;
/// Default vertical angle in degrees.
const DEFAULT_ELEVATION: f32 = 24.9;
/// Default distance from the focus point.
const DEFAULT_DISTANCE: f32 = 47.4;
/// Default field of view in degrees.
const DEFAULT_FOV: f32 = 60.0;
/// Near clip plane.
const DEFAULT_NEAR: f32 = 0.1;
/// Far clip plane.
const DEFAULT_FAR: f32 = 1000.0;

/// Minimum zoom distance.
const MIN_DISTANCE: f32 = 10.0;
/// Maximum zoom distance.
const MAX_DISTANCE: f32 = 150.0;

/// Maximum elevation angle in degrees (prevent gimbal lock).
const MAX_ELEVATION: f32 = 89.0;
/// Minimum elevation angle: polar angle capped at 120 degrees.
const MIN_ELEVATION: f32 = -30.0;

/// Orbit sensitivity: degrees per pixel of mouse movement.
const ORBIT_SENSITIVITY: f32 = 0.3;
/// Pan sensitivity factor: multiplied by distance for depth-proportional panning.
const PAN_SENSITIVITY: f32 = 0.002;
/// Scroll zoom factor: how much each scroll tick affects distance.
const SCROLL_FACTOR: f32 = 0.1;

/// Inertial damping rate: higher settles faster. The applied per-frame
/// blend is `1 - exp(-dt * rate)`, so settling is frame-rate
/// independent.
const DAMPING_RATE: f32 = 12.0;
/// Below this goal/current gap the camera counts as settled.
const SETTLE_EPSILON: f32 = 1e-3;

// ============================================================================
// MOUSE BUTTON ENUM
// ============================================================================

/// Mouse buttons relevant to the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitMouseButton {
    /// Left mouse button -- used for orbiting.
    Left,
    /// Right mouse button -- used for panning.
    Right,
}

// ============================================================================
// ORBIT CAMERA
// ============================================================================

/// A damped spherical-coordinate orbit camera.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Rendered horizontal angle in degrees (chases `goal_azimuth`).
    pub azimuth: f32,
    /// Rendered vertical angle in degrees.
    pub elevation: f32,
    /// Rendered distance from the focus point.
    pub distance: f32,
    /// Rendered focus point.
    pub focus: Vec3,

    // -- Goal coordinates the damping chases --
    goal_azimuth: f32,
    goal_elevation: f32,
    goal_distance: f32,
    goal_focus: Vec3,

    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,

    // -- Mouse interaction state --
    is_orbiting: bool,
    is_panning: bool,
    last_mouse: [f32; 2],
}

impl OrbitCamera {
    /// Create a camera at the default overview position.
    pub fn new(aspect: f32) -> Self {
        Self {
            azimuth: DEFAULT_AZIMUTH,
            elevation: DEFAULT_ELEVATION,
            distance: DEFAULT_DISTANCE,
            focus: Vec3::ZERO,
            goal_azimuth: DEFAULT_AZIMUTH,
            goal_elevation: DEFAULT_ELEVATION,
            goal_distance: DEFAULT_DISTANCE,
            goal_focus: Vec3::ZERO,
            aspect,
            fov: DEFAULT_FOV,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            is_orbiting: false,
            is_panning: false,
            last_mouse: [0.0, 0.0],
        }
    }

    /// Restore saved spherical coordinates (skips the damped approach).
    pub fn restore(&mut self, azimuth: f32, elevation: f32, distance: f32, focus: Vec3) {
        self.azimuth = azimuth;
        self.elevation = elevation.clamp(MIN_ELEVATION, MAX_ELEVATION);
        self.distance = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.focus = focus;
        self.goal_azimuth = self.azimuth;
        self.goal_elevation = self.elevation;
        self.goal_distance = self.distance;
        self.goal_focus = self.focus;
    }

    // ========================================================================
    // MATRIX COMPUTATION
    // ========================================================================

    /// Eye position from the rendered spherical coordinates.
    pub fn eye_position(&self) -> Vec3 {
        let azim_rad = self.azimuth.to_radians();
        let elev_rad = self.elevation.to_radians();

        let cos_elev = elev_rad.cos();
        let offset = Vec3::new(
            self.distance * cos_elev * azim_rad.sin(),
            self.distance * elev_rad.sin(),
            self.distance * cos_elev * azim_rad.cos(),
        );

        self.focus + offset
    }

    /// View (look-at) matrix for the current frame.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.focus, Vec3::Y)
    }

    /// Perspective projection matrix (wgpu depth convention).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined `projection * view`.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    // ========================================================================
    // DAMPING
    // ========================================================================

    /// Advance the damped coordinates by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let k = 1.0 - (-dt * DAMPING_RATE).exp();
        self.azimuth += (self.goal_azimuth - self.azimuth) * k;
        self.elevation += (self.goal_elevation - self.elevation) * k;
        self.distance += (self.goal_distance - self.distance) * k;
        self.focus += (self.goal_focus - self.focus) * k;
    }

    /// Whether the rendered coordinates have caught up with the goals.
    pub fn is_settled(&self) -> bool {
        (self.goal_azimuth - self.azimuth).abs() < SETTLE_EPSILON
            && (self.goal_elevation - self.elevation).abs() < SETTLE_EPSILON
            && (self.goal_distance - self.distance).abs() < SETTLE_EPSILON
            && (self.goal_focus - self.focus).length() < SETTLE_EPSILON
    }

    // ========================================================================
    // INPUT HANDLING
    // ========================================================================

    /// Handle a mouse button press or release.
    ///
    /// Returns `true` on a release that ends a gesture, which is the
    /// moment the caller persists the view state.
    pub fn handle_mouse_button(&mut self, button: OrbitMouseButton, pressed: bool) -> bool {
        let was_active = self.is_orbiting || self.is_panning;
        match button {
            OrbitMouseButton::Left => self.is_orbiting = pressed,
            OrbitMouseButton::Right => self.is_panning = pressed,
        }
        was_active && !(self.is_orbiting || self.is_panning)
    }

    /// Handle mouse movement. Call on every cursor-moved event.
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        let dx = x - self.last_mouse[0];
        let dy = y - self.last_mouse[1];

        if self.is_orbiting {
            self.goal_azimuth -= dx * ORBIT_SENSITIVITY;
            self.goal_elevation =
                (self.goal_elevation + dy * ORBIT_SENSITIVITY).clamp(MIN_ELEVATION, MAX_ELEVATION);
        }

        if self.is_panning {
            self.pan(
                -dx * PAN_SENSITIVITY * self.goal_distance,
                dy * PAN_SENSITIVITY * self.goal_distance,
            );
        }

        self.last_mouse = [x, y];
    }

    /// Handle scroll wheel zoom. Multiplicative so zooming feels the
    /// same at every distance; clamped to [`MIN_DISTANCE`],
    /// [`MAX_DISTANCE`].
    pub fn handle_scroll(&mut self, delta: f32) {
        self.goal_distance =
            (self.goal_distance * (1.0 - delta * SCROLL_FACTOR)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Pan the focus point in camera-local right/up directions.
    fn pan(&mut self, dx: f32, dy: f32) {
        let azim_rad = self.goal_azimuth.to_radians();
        let elev_rad = self.goal_elevation.to_radians();

        let cos_elev = elev_rad.cos();
        let toward_eye = Vec3::new(
            cos_elev * azim_rad.sin(),
            elev_rad.sin(),
            cos_elev * azim_rad.cos(),
        );

        let right = toward_eye.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(toward_eye).normalize_or_zero();

        self.goal_focus += right * dx + up * dy;
    }

    /// Update the viewport aspect ratio after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// `true` while a drag gesture is active.
    pub fn is_active(&self) -> bool {
        self.is_orbiting || self.is_panning
    }

    /// The pose the damping is settling toward: (azimuth, elevation,
    /// distance, focus). This is what gets persisted, so a save right
    /// after a gesture records the user's intent rather than wherever
    /// the damped glide happened to be.
    pub fn goal_pose(&self) -> (f32, f32, f32, Vec3) {
        (
            self.goal_azimuth,
            self.goal_elevation,
            self.goal_distance,
            self.goal_focus,
        )
    }

    /// Reset to the default overview (goals included).
    pub fn reset(&mut self) {
        let aspect = self.aspect;
        let last_mouse = self.last_mouse;
        *self = Self::new(aspect);
        self.last_mouse = last_mouse;
    }
}

// ============================================================================
// TESTS
// ============================================================================
