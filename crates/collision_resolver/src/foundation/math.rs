//! Math utilities and types
//!
//! Provides the fundamental math types for world-space placement queries.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Round a value to the nearest multiple of `unit`.
    pub fn snap(value: f32, unit: f32) -> f32 {
        (value / unit).round() * unit
    }

    /// Round each coordinate of a position to the nearest multiple of `unit`.
    pub fn snap_vec(position: Vec3, unit: f32) -> Vec3 {
        Vec3::new(
            snap(position.x, unit),
            snap(position.y, unit),
            snap(position.z, unit),
        )
    }

    /// Distance between two points in the horizontal (x, z) plane.
    pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
        let dx = a.x - b.x;
        let dz = a.z - b.z;
        (dx * dx + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::utils::{horizontal_distance, snap, snap_vec};
    use super::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn test_snap_rounds_to_nearest_multiple() {
        assert_relative_eq!(snap(1.3, 0.5), 1.5);
        assert_relative_eq!(snap(1.2, 0.5), 1.0);
        assert_relative_eq!(snap(-0.7, 0.5), -0.5);
        assert_relative_eq!(snap(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_snap_vec_snaps_every_coordinate() {
        let snapped = snap_vec(Vec3::new(0.3, 1.74, -0.26), 0.5);
        assert_relative_eq!(snapped.x, 0.5);
        assert_relative_eq!(snapped.y, 1.5);
        assert_relative_eq!(snapped.z, -0.5);
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 10.0, 0.0);
        let b = Vec3::new(3.0, -4.0, 4.0);
        assert_relative_eq!(horizontal_distance(a, b), 5.0);
    }
}
