use glam::{Mat4, Quat, Vec3};
use menger_core::config::ViewerConfig;

/// Where the camera starts and returns to on reset: just above the
/// sponge, looking straight down, +x as the screen-up direction.
const HOME_POS: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const HOME_TARGET: Vec3 = Vec3::ZERO;
const HOME_UP: Vec3 = Vec3::X;

const FOV_Y_DEG: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;

/// Orbit/fly camera driven by the GUI bindings: left-drag rotates
/// about the target, WASD dollies and strafes, arrows roll and pan,
/// R resets. All step sizes come from the immutable `ViewerConfig`.
pub struct Camera {
    pos: Vec3,
    target: Vec3,
    up: Vec3,
    config: ViewerConfig,
}

impl Camera {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            pos: HOME_POS,
            target: HOME_TARGET,
            up: HOME_UP,
            config,
        }
    }

    /// Return to the home pose. Config is untouched.
    pub fn reset(&mut self) {
        self.pos = HOME_POS;
        self.target = HOME_TARGET;
        self.up = HOME_UP;
    }

    /// Unit view direction (camera toward target).
    fn forward(&self) -> Vec3 {
        (self.target - self.pos).normalize()
    }

    /// Unit screen-right direction.
    fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    /// Left-drag orbit: rotate the camera about the target, around
    /// the axis perpendicular to the drag direction in view space.
    /// `dx`/`dy` are raw screen-pixel deltas (screen y grows down).
    pub fn drag_rotate(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        // Screen-up is -dy in pixel coordinates.
        let world_vec = (self.up * -dy + self.right() * dx).normalize();
        let axis = self.forward().cross(world_vec);
        if axis.length_squared() < 1e-12 {
            return;
        }
        let rot = Quat::from_axis_angle(axis.normalize(), -self.config.rotation_speed);
        self.pos = self.target + rot * (self.pos - self.target);
        self.up = rot * self.up;
    }

    /// W/S: move along the view direction. Positive `steps` closes in
    /// on the target.
    pub fn dolly(&mut self, steps: f32) {
        self.pos += self.forward() * (self.config.zoom_speed * steps);
    }

    /// A/D: slide along the screen-right direction.
    pub fn strafe(&mut self, steps: f32) {
        self.pos += self.right() * (self.config.pan_speed * steps);
    }

    /// Arrow up/down: slide along the screen-up direction.
    pub fn pan_vertical(&mut self, steps: f32) {
        self.pos += self.up * (self.config.pan_speed * steps);
    }

    /// Arrow left/right: roll about the view direction.
    pub fn roll(&mut self, steps: f32) {
        let rot = Quat::from_axis_angle(self.forward(), self.config.roll_speed * steps);
        self.up = rot * self.up;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.pos, self.target, self.up)
    }

    pub fn proj_matrix(&self, width: f32, height: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEG.to_radians(), width / height, Z_NEAR, Z_FAR)
    }

    pub fn view_proj(&self, width: f32, height: f32) -> Mat4 {
        self.proj_matrix(width, height) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(ViewerConfig::default())
    }

    #[test]
    fn test_dolly_moves_toward_target() {
        let mut cam = camera();
        let before = (cam.pos - cam.target).length();
        cam.dolly(1.0);
        let after = (cam.pos - cam.target).length();
        assert!(after < before);
    }

    #[test]
    fn test_drag_preserves_orbit_distance() {
        let mut cam = camera();
        let before = (cam.pos - cam.target).length();
        cam.drag_rotate(12.0, -7.0);
        let after = (cam.pos - cam.target).length();
        assert!((after - before).abs() < 1e-5);
    }

    #[test]
    fn test_roll_keeps_position() {
        let mut cam = camera();
        let pos = cam.pos;
        cam.roll(1.0);
        assert_eq!(cam.pos, pos);
        // Up stays unit length and perpendicular to the view direction.
        assert!((cam.up.length() - 1.0).abs() < 1e-5);
        assert!(cam.up.dot(cam.forward()).abs() < 1e-5);
    }

    #[test]
    fn test_reset_restores_home_pose() {
        let mut cam = camera();
        cam.drag_rotate(30.0, 10.0);
        cam.dolly(3.0);
        cam.roll(-2.0);
        cam.reset();
        assert_eq!(cam.pos, HOME_POS);
        assert_eq!(cam.target, HOME_TARGET);
        assert_eq!(cam.up, HOME_UP);
    }

    #[test]
    fn test_view_proj_is_finite() {
        let cam = camera();
        let vp = cam.view_proj(800.0, 600.0);
        assert!(vp.to_cols_array().iter().all(|c| c.is_finite()));
    }
}
