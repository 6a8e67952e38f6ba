use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uom::si::{angle::degree, f64::*, length::foot, velocity::knot};

use crate::simulation::{FlightDynamics, FlightDynamicsWriter, SimulationElement};

/// The directories in which the engine looks for its aircraft, engine
/// and systems definitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchPaths {
    pub root: PathBuf,
    pub aircraft: PathBuf,
    pub engine: PathBuf,
    pub systems: PathBuf,
}
impl SearchPaths {
    /// Creates search paths for the conventional layout below `root`.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            root: root.to_owned(),
            aircraft: root.join("aircraft"),
            engine: root.join("engine"),
            systems: root.join("systems"),
        }
    }

    pub(crate) fn configure(&self, flight_dynamics: &mut dyn FlightDynamics) {
        flight_dynamics.set_root_dir(&self.root);
        flight_dynamics.set_aircraft_path(&self.aircraft);
        flight_dynamics.set_engine_path(&self.engine);
        flight_dynamics.set_systems_path(&self.systems);
    }
}

/// The position, heading and speed the engine trims the aircraft to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitialConditions {
    pub latitude: Angle,
    pub longitude: Angle,
    pub altitude: Length,
    pub heading: Angle,
    pub true_airspeed: Velocity,
}
impl InitialConditions {
    const LATITUDE_KEY: &'static str = "ic/lat-geod-deg";
    const LONGITUDE_KEY: &'static str = "ic/long-gc-deg";
    const ALTITUDE_KEY: &'static str = "ic/h-sl-ft";
    const HEADING_KEY: &'static str = "ic/psi-true-deg";
    const TRUE_AIRSPEED_KEY: &'static str = "ic/vt-kts";

    pub fn new(
        latitude: Angle,
        longitude: Angle,
        altitude: Length,
        heading: Angle,
        true_airspeed: Velocity,
    ) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            heading,
            true_airspeed,
        }
    }
}
impl Default for InitialConditions {
    fn default() -> Self {
        Self::new(
            Angle::new::<degree>(0.),
            Angle::new::<degree>(0.),
            Length::new::<foot>(0.),
            Angle::new::<degree>(0.),
            Velocity::new::<knot>(0.),
        )
    }
}
impl SimulationElement for InitialConditions {
    fn write(&self, writer: &mut FlightDynamicsWriter) {
        writer.write_f64(Self::LATITUDE_KEY, self.latitude.get::<degree>());
        writer.write_f64(Self::LONGITUDE_KEY, self.longitude.get::<degree>());
        writer.write_f64(Self::ALTITUDE_KEY, self.altitude.get::<foot>());
        writer.write_f64(Self::HEADING_KEY, self.heading.get::<degree>());
        writer.write_f64(Self::TRUE_AIRSPEED_KEY, self.true_airspeed.get::<knot>());
    }
}

/// Trim movement per second of holding a trim switch, as a
/// fraction of the full -1 to 1 trim range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimRates {
    pub pitch: f64,
    pub roll: f64,
}
impl TrimRates {
    pub const DEFAULT_RATE: f64 = 0.1;

    pub fn new(pitch: f64, roll: f64) -> Self {
        Self { pitch, roll }
    }
}
impl Default for TrimRates {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE, Self::DEFAULT_RATE)
    }
}
