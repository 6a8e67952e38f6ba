use nalgebra::Vector3;
use serde::Serialize;
use uom::si::{
    angle::radian,
    f64::*,
    length::meter,
    mass::pound,
    velocity::knot,
};

use crate::{
    propulsion::PropulsionState,
    shared::{to_local_acceleration, to_meters_per_second},
    simulation::{FlightDynamicsReader, SimulationElement},
};

/// A snapshot of the simulated aircraft, refreshed after every step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AircraftState {
    /// Geodetic latitude (degrees), longitude (degrees) and the
    /// altitude above sea level as a negative down component (meters).
    pub position_ned: Vector3<f64>,
    /// North, east and down velocity in m/s.
    pub velocity_ned: Vector3<f64>,
    /// North, east and down acceleration in m/s².
    pub acceleration_ned: Vector3<f64>,
    pub altitude: Length,

    pub roll: Angle,
    pub pitch: Angle,
    pub yaw: Angle,
    /// Body axis roll, pitch and yaw rates (p, q, r) in rad/s.
    pub angular_velocity: Vector3<f64>,

    pub load_factor: f64,
    pub mach: f64,
    pub alpha: Angle,
    pub beta: Angle,
    pub flight_path_angle: Angle,
    pub calibrated_airspeed: Velocity,

    pub total_weight: Mass,
    pub fuel_weight: Mass,
    pub on_ground: bool,

    pub num_engines: usize,
    pub propulsion: Vec<PropulsionState>,
}
impl AircraftState {
    const LATITUDE_KEY: &'static str = "position/lat-geod-deg";
    const LONGITUDE_KEY: &'static str = "position/long-gc-deg";
    const ALTITUDE_KEY: &'static str = "position/h-sl-meters";
    const VELOCITY_NORTH_KEY: &'static str = "velocities/v-north-fps";
    const VELOCITY_EAST_KEY: &'static str = "velocities/v-east-fps";
    const VELOCITY_DOWN_KEY: &'static str = "velocities/v-down-fps";
    const U_DOT_KEY: &'static str = "accelerations/udot-ft_sec2";
    const V_DOT_KEY: &'static str = "accelerations/vdot-ft_sec2";
    const W_DOT_KEY: &'static str = "accelerations/wdot-ft_sec2";
    const ROLL_KEY: &'static str = "attitude/phi-rad";
    const PITCH_KEY: &'static str = "attitude/theta-rad";
    const YAW_KEY: &'static str = "attitude/psi-rad";
    const P_KEY: &'static str = "velocities/p-rad_sec";
    const Q_KEY: &'static str = "velocities/q-rad_sec";
    const R_KEY: &'static str = "velocities/r-rad_sec";
    const LOAD_FACTOR_KEY: &'static str = "forces/load-factor";
    const MACH_KEY: &'static str = "velocities/mach";
    const ALPHA_KEY: &'static str = "aero/alpha-rad";
    const BETA_KEY: &'static str = "aero/beta-rad";
    const FLIGHT_PATH_ANGLE_KEY: &'static str = "flight-path/gamma-rad";
    const CALIBRATED_AIRSPEED_KEY: &'static str = "velocities/vc-kts";
    const TOTAL_WEIGHT_KEY: &'static str = "inertia/weight-lbs";
    const FUEL_WEIGHT_KEY: &'static str = "propulsion/total-fuel-lbs";
    const ON_GROUND_KEY: &'static str = "gear/wow";

    /// Creates a state for an aircraft with the given number of engines.
    pub fn new(num_engines: usize) -> Self {
        Self {
            position_ned: Vector3::zeros(),
            velocity_ned: Vector3::zeros(),
            acceleration_ned: Vector3::zeros(),
            altitude: Length::new::<meter>(0.),
            roll: Angle::new::<radian>(0.),
            pitch: Angle::new::<radian>(0.),
            yaw: Angle::new::<radian>(0.),
            angular_velocity: Vector3::zeros(),
            load_factor: 1.,
            mach: 0.,
            alpha: Angle::new::<radian>(0.),
            beta: Angle::new::<radian>(0.),
            flight_path_angle: Angle::new::<radian>(0.),
            calibrated_airspeed: Velocity::new::<knot>(0.),
            total_weight: Mass::new::<pound>(0.),
            fuel_weight: Mass::new::<pound>(0.),
            on_ground: false,
            num_engines,
            propulsion: vec![PropulsionState::default(); num_engines],
        }
    }

    fn read_vector(reader: &mut FlightDynamicsReader, keys: [&str; 3]) -> Vector3<f64> {
        Vector3::new(
            reader.read_f64(keys[0]),
            reader.read_f64(keys[1]),
            reader.read_f64(keys[2]),
        )
    }

    fn read_angle(reader: &mut FlightDynamicsReader, key: &str) -> Angle {
        Angle::new::<radian>(reader.read_f64(key))
    }
}
impl Default for AircraftState {
    fn default() -> Self {
        Self::new(0)
    }
}
impl SimulationElement for AircraftState {
    fn read(&mut self, reader: &mut FlightDynamicsReader) {
        self.altitude = Length::new::<meter>(reader.read_f64(Self::ALTITUDE_KEY));
        self.position_ned = Vector3::new(
            reader.read_f64(Self::LATITUDE_KEY),
            reader.read_f64(Self::LONGITUDE_KEY),
            -self.altitude.get::<meter>(),
        );
        self.velocity_ned = to_meters_per_second(Self::read_vector(
            reader,
            [
                Self::VELOCITY_NORTH_KEY,
                Self::VELOCITY_EAST_KEY,
                Self::VELOCITY_DOWN_KEY,
            ],
        ));

        // The body axis accelerations are more precise than the engine's local frame ones.
        let body_acceleration =
            Self::read_vector(reader, [Self::U_DOT_KEY, Self::V_DOT_KEY, Self::W_DOT_KEY]);
        self.acceleration_ned = to_local_acceleration(&reader.body_to_local(), body_acceleration);

        self.roll = Self::read_angle(reader, Self::ROLL_KEY);
        self.pitch = Self::read_angle(reader, Self::PITCH_KEY);
        self.yaw = Self::read_angle(reader, Self::YAW_KEY);
        self.angular_velocity =
            Self::read_vector(reader, [Self::P_KEY, Self::Q_KEY, Self::R_KEY]);

        self.load_factor = reader.read_f64(Self::LOAD_FACTOR_KEY);
        self.mach = reader.read_f64(Self::MACH_KEY);
        self.alpha = Self::read_angle(reader, Self::ALPHA_KEY);
        self.beta = Self::read_angle(reader, Self::BETA_KEY);
        self.flight_path_angle = Self::read_angle(reader, Self::FLIGHT_PATH_ANGLE_KEY);
        self.calibrated_airspeed =
            Velocity::new::<knot>(reader.read_f64(Self::CALIBRATED_AIRSPEED_KEY));

        self.total_weight = Mass::new::<pound>(reader.read_f64(Self::TOTAL_WEIGHT_KEY));
        self.fuel_weight = Mass::new::<pound>(reader.read_f64(Self::FUEL_WEIGHT_KEY));
        self.on_ground = reader.read_bool(Self::ON_GROUND_KEY);

        for (engine, propulsion) in self.propulsion.iter_mut().enumerate() {
            propulsion.read(engine, reader);
        }
    }
}
