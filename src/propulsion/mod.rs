use serde::Serialize;
use uom::si::{
    angular_velocity::revolution_per_minute, f64::*, force::pound_force,
    mass_rate::pound_per_second, ratio::percent,
};

use crate::simulation::{FlightDynamicsReader, FlightDynamicsWriter};

pub const ALL_ENGINES_RUNNING_KEY: &str = "propulsion/set-running";

pub fn engine_key(engine: usize, name: &str) -> String {
    format!("propulsion/engine[{}]/{}", engine, name)
}

pub fn throttle_command_key(engine: usize) -> String {
    format!("fcs/throttle-cmd-norm[{}]", engine)
}

pub fn throttle_position_key(engine: usize) -> String {
    format!("fcs/throttle-pos-norm[{}]", engine)
}

/// Marks every engine as running with its throttle at full, then has the
/// engine initialize all of them as running. The throttle has to be
/// commanded before the running state takes effect on some engine models.
pub(crate) fn start_engines(writer: &mut FlightDynamicsWriter, number_of_engines: usize) {
    for engine in 0..number_of_engines {
        writer.write_bool(&engine_key(engine, "set-running"), true);
        writer.write_f64(&throttle_command_key(engine), 1.);
    }

    writer.write_f64(ALL_ENGINES_RUNNING_KEY, -1.);
}

/// The range of throttle positions an engine accepts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrottleLimits {
    min: f64,
    max: f64,
}
impl ThrottleLimits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The power lever angle for the given throttle position, 0% at the
    /// minimum and 100% at the maximum. There is none when the range is empty.
    pub fn power_lever(&self, position: f64) -> Option<Ratio> {
        if self.max > self.min {
            Some(Ratio::new::<percent>(
                (position - self.min) / (self.max - self.min) * 100.,
            ))
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PropulsionState {
    pub thrust: Force,
    pub rpm: AngularVelocity,
    pub fuel_flow: MassRate,
    pub power_lever: Ratio,
}
impl PropulsionState {
    pub(crate) fn read(&mut self, engine: usize, reader: &mut FlightDynamicsReader) {
        self.thrust = Force::new::<pound_force>(reader.read_f64(&engine_key(engine, "thrust-lbs")));
        self.rpm = AngularVelocity::new::<revolution_per_minute>(
            reader.read_f64(&engine_key(engine, "engine-rpm")),
        );
        self.fuel_flow = MassRate::new::<pound_per_second>(
            reader.read_f64(&engine_key(engine, "fuel-flow-rate-pps")),
        );

        let position = reader.read_f64(&throttle_position_key(engine));
        if let Some(power_lever) = reader.throttle_limits(engine).power_lever(position) {
            self.power_lever = power_lever;
        }
    }
}
