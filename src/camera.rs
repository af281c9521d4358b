/*
 * Camera Module
 *
 * This module defines a fixed perspective camera and the transformation
 * from world space to window space. Window coordinates follow nannou:
 * the origin is the window centre and y points up.
 */

use nannou::prelude::*;

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

// A world point after projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    // Distance in front of the eye along the view axis
    pub depth: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            eye: vec3(20.0, 40.0, 110.0),
            target: vec3(20.0, 30.0, 0.0),
            up: Vec3::Y,
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 200.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }

    // Convert a point from world space to window space.
    // Returns None for points outside the near/far range.
    pub fn world_to_screen(&self, point: Vec3, window_rect: Rect) -> Option<Projected> {
        let view = self.view_matrix() * point.extend(1.0);
        let depth = -view.z;
        if depth < self.near || depth > self.far {
            return None;
        }

        let aspect = window_rect.w() / window_rect.h();
        let clip = self.projection_matrix(aspect) * view;
        let ndc = clip.truncate() / clip.w;

        Some(Projected {
            screen: vec2(ndc.x * window_rect.w() / 2.0, ndc.y * window_rect.h() / 2.0)
                + window_rect.xy(),
            depth,
        })
    }

    // On-screen sprite size. With attenuation the size shrinks with depth
    // the way a point sprite does, scaled to half the viewport height.
    pub fn point_size(&self, size: f32, depth: f32, viewport_height: f32, attenuation: bool) -> f32 {
        if attenuation {
            size * (viewport_height / 2.0) / depth
        } else {
            size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Rect {
        Rect::from_w_h(1600.0, 900.0)
    }

    #[test]
    fn target_projects_to_centre() {
        let camera = Camera::new();
        let projected = camera.world_to_screen(camera.target, window()).unwrap();
        assert!(projected.screen.x.abs() < 1e-3);
        assert!(projected.screen.y.abs() < 1e-3);
        assert!((projected.depth - camera.eye.distance(camera.target)).abs() < 1e-3);
    }

    #[test]
    fn higher_points_appear_higher() {
        let camera = Camera::new();
        let low = camera.world_to_screen(vec3(20.0, 10.0, 0.0), window()).unwrap();
        let high = camera.world_to_screen(vec3(20.0, 50.0, 0.0), window()).unwrap();
        assert!(high.screen.y > low.screen.y);
    }

    #[test]
    fn points_behind_or_too_far_are_culled() {
        let camera = Camera::new();
        assert!(camera.world_to_screen(vec3(20.0, 40.0, 150.0), window()).is_none());
        assert!(camera.world_to_screen(vec3(20.0, 30.0, -150.0), window()).is_none());
    }

    #[test]
    fn attenuation_shrinks_with_depth() {
        let camera = Camera::new();
        let near = camera.point_size(10.0, 50.0, 900.0, true);
        let far = camera.point_size(10.0, 150.0, 900.0, true);
        assert!(near > far);
        assert_eq!(camera.point_size(10.0, 450.0, 900.0, true), 10.0);
        assert_eq!(camera.point_size(10.0, 150.0, 900.0, false), 10.0);
    }
}
