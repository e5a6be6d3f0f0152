/// Orthographic camera and pointer-parallax rig for the viewports.
use nalgebra::{Matrix4, Point3, Vector3};

/// Vertical extent of the orthographic frustum in scene units.
pub const FRUSTUM_HEIGHT: f32 = 1.8;
/// The near plane sits behind the eye so geometry at the origin never clips.
pub const NEAR_PLANE: f32 = -1.0;
pub const FAR_PLANE: f32 = 3.0;
/// Fraction of the remaining distance the eye covers per animation tick.
pub const EASING: f32 = 0.03;
/// Orbit radius of the parallax target sphere.
const PARALLAX_RADIUS: f32 = 1.0;

/// Fixed-frustum orthographic camera aimed at the origin.
pub struct OrthoCamera {
    pub eye: Point3<f32>,
    pub aspect: f32,
}

impl OrthoCamera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            eye: Point3::new(1.0, 0.7, 1.0),
            aspect: width / height,
        }
    }

    /// Keep the frustum matched to the canvas on resize.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye, &Point3::origin(), &Vector3::y())
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let half_h = FRUSTUM_HEIGHT / 2.0;
        let half_w = half_h * self.aspect;
        Matrix4::new_orthographic(-half_w, half_w, -half_h, half_h, NEAR_PLANE, FAR_PLANE)
    }

    /// Project a world-space point to 2D screen space.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let ndc = (self.projection_matrix() * self.view_matrix()).transform_point(point);

        // Clip test
        if ndc.x < -1.0 || ndc.x > 1.0 || ndc.y < -1.0 || ndc.y > 1.0 {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

/// Eases the eye toward a pointer-derived orbit point, one lerp per tick.
pub struct CameraRig {
    pub camera: OrthoCamera,
    pub easing: f32,
    target: Point3<f32>,
}

impl CameraRig {
    pub fn new(width: f32, height: f32) -> Self {
        let camera = OrthoCamera::new(width, height);
        // Until the first pointer event the target is the eye itself,
        // so the camera holds still.
        Self {
            target: camera.eye,
            easing: EASING,
            camera,
        }
    }

    /// Pointer position normalized to [-1, 1] on both axes, +y up.
    /// Each axis maps to an angle in [-pi, pi] on the unit sphere.
    pub fn pointer_moved(&mut self, nx: f32, ny: f32) {
        let angle_x = -nx * std::f32::consts::PI;
        let angle_y = -ny * std::f32::consts::PI;
        self.target = Point3::new(
            PARALLAX_RADIUS * angle_y.cos() * angle_x.sin(),
            PARALLAX_RADIUS * angle_y.sin(),
            PARALLAX_RADIUS * angle_y.cos() * angle_x.cos(),
        );
    }

    /// One animation tick. The view matrix re-aims at the origin on its own,
    /// so easing the eye is the whole update.
    pub fn tick(&mut self) {
        self.camera.eye += (self.target - self.camera.eye) * self.easing;
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn distance_to_target(&self) -> f32 {
        (self.target - self.camera.eye).norm()
    }
}
