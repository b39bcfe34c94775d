//! Pinhole camera for ray generation.

use lumen_math::{Mat3, Ray, Vec2, Vec3};

/// Pinhole camera: image dimensions, vertical field of view, position and
/// an optional world rotation.
///
/// Rays leave the configured position through a virtual image plane at
/// unit distance along local +z.
#[derive(Debug, Clone)]
pub struct Camera {
    width: u32,
    height: u32,
    fov: f32,
    position: Vec3,
    rotation: Mat3,

    // Derived image-plane values
    pixel_size: f32,
    x0: f32,
    y0: f32,
}

impl Camera {
    /// Create a camera with the given resolution and vertical field of
    /// view in radians.
    pub fn new(width: u32, height: u32, fov: f32) -> Self {
        let mut camera = Self {
            width,
            height,
            fov,
            position: Vec3::ZERO,
            rotation: Mat3::IDENTITY,
            pixel_size: 0.0,
            x0: 0.0,
            y0: 0.0,
        };
        camera.update_image_plane();
        camera
    }

    /// Set the image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self.update_image_plane();
        self
    }

    /// Set the vertical field of view in radians.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self.update_image_plane();
        self
    }

    /// Set the camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the camera-to-world rotation.
    pub fn with_rotation(mut self, rotation: Mat3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn update_image_plane(&mut self) {
        // World-space size of one pixel on the plane at z = 1.
        self.pixel_size = 2.0 * (self.fov / 2.0).tan() / self.width as f32;
        self.x0 = -self.pixel_size * self.width as f32 / 2.0;
        self.y0 = self.pixel_size * self.height as f32 / 2.0;
    }

    /// Generate the primary ray for pixel (i, j) with a sub-pixel jitter
    /// offset in [-1, 1] pixel units.
    pub fn primary_ray(&self, i: u32, j: u32, jitter: Vec2) -> Ray {
        let direction = Vec3::new(
            self.x0 + (i as f32 + jitter.x + 0.5) * self.pixel_size,
            self.y0 - (j as f32 + jitter.y + 0.5) * self.pixel_size,
            1.0,
        )
        .normalize();

        Ray::new(self.position, self.rotation * direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1024, 768, std::f32::consts::FRAC_PI_2)
    }
}
