use nalgebra::{Matrix3, Vector3};
use uom::si::{
    acceleration::{foot_per_second_squared, meter_per_second_squared},
    f64::*,
    velocity::{foot_per_second, meter_per_second},
};

/// Converts a vector of velocities in ft/s into m/s.
pub(crate) fn to_meters_per_second(velocity: Vector3<f64>) -> Vector3<f64> {
    velocity.map(|x| Velocity::new::<foot_per_second>(x).get::<meter_per_second>())
}

/// Rotates a body frame acceleration in ft/s² into the local frame and converts it into m/s².
pub(crate) fn to_local_acceleration(
    body_to_local: &Matrix3<f64>,
    body_acceleration: Vector3<f64>,
) -> Vector3<f64> {
    (body_to_local * body_acceleration).map(|x| {
        Acceleration::new::<foot_per_second_squared>(x).get::<meter_per_second_squared>()
    })
}
