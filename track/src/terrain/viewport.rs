// src/terrain/viewport.rs

/// Camera projection supplied by the engine.
///
/// The camera looks toward -Z; `depth` is measured from the camera along
/// that direction.
pub trait Viewport {
    fn camera_x(&self) -> f64;

    fn camera_z(&self) -> f64;

    /// World X of the left and right viewport edges, `depth` in front of the
    /// camera.
    fn edges_at_depth(&self, depth: f64) -> (f64, f64);
}

/// Fixed-width view, independent of depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthographicViewport {
    pub camera_x: f64,
    pub camera_z: f64,
    pub half_width: f64,
}

impl OrthographicViewport {
    pub fn new(camera_x: f64, width: f64) -> Self {
        Self {
            camera_x,
            camera_z: 10.0,
            half_width: width / 2.0,
        }
    }

    pub fn with_camera_x(self, camera_x: f64) -> Self {
        Self { camera_x, ..self }
    }

    pub fn with_width(self, width: f64) -> Self {
        Self {
            half_width: width / 2.0,
            ..self
        }
    }
}

impl Viewport for OrthographicViewport {
    fn camera_x(&self) -> f64 {
        self.camera_x
    }

    fn camera_z(&self) -> f64 {
        self.camera_z
    }

    fn edges_at_depth(&self, _depth: f64) -> (f64, f64) {
        (self.camera_x - self.half_width, self.camera_x + self.half_width)
    }
}

/// Pinhole camera looking straight down -Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveViewport {
    pub camera_x: f64,
    pub camera_z: f64,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Width over height.
    pub aspect_ratio: f64,
}

impl Viewport for PerspectiveViewport {
    fn camera_x(&self) -> f64 {
        self.camera_x
    }

    fn camera_z(&self) -> f64 {
        self.camera_z
    }

    fn edges_at_depth(&self, depth: f64) -> (f64, f64) {
        let half_width = depth.max(0.0) * (self.fov_y / 2.0).tan() * self.aspect_ratio;
        (self.camera_x - half_width, self.camera_x + half_width)
    }
}
