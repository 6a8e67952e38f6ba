//! Provides all the necessary types for driving an external
//! flight dynamics engine and mirroring its state.
use std::{path::Path, time::Duration};

use log::{debug, error, info, warn};
use nalgebra::Matrix3;

mod error;
pub use error::SimulationError;


use crate::{
    config::{InitialConditions, SearchPaths, TrimRates},
    controls,
    propulsion::{self, ThrottleLimits},
    state::AircraftState,
    trim::PitchRollTrim,
};

/// Trait for the external flight dynamics engine.
///
/// Scalar quantities are exchanged through the engine's property tree using
/// the engine's own names and native units, e.g. `position/h-sl-meters` or
/// `fcs/elevator-cmd-norm`. Reading a property the engine doesn't know
/// returns `0.`.
pub trait FlightDynamics {
    fn version(&self) -> String;

    fn set_root_dir(&mut self, path: &Path);
    fn set_aircraft_path(&mut self, path: &Path);
    fn set_engine_path(&mut self, path: &Path);
    fn set_systems_path(&mut self, path: &Path);
    fn set_debug_level(&mut self, level: u32);

    /// Loads the named aircraft model from the aircraft path.
    /// Returns `false` when the model couldn't be loaded.
    fn load_model(&mut self, model: &str) -> bool;

    /// The number of engines (powerplants) in the loaded model.
    fn number_of_engines(&self) -> usize;

    /// The throttle range of the given engine.
    fn throttle_limits(&self, engine: usize) -> ThrottleLimits;

    /// The rotation matrix from the body frame to the local (north, east, down) frame.
    fn body_to_local(&self) -> Matrix3<f64>;

    /// Trims the model to the configured initial conditions.
    fn run_initial_conditions(&mut self) -> bool;

    fn set_delta(&mut self, delta: Duration);

    /// Advances the model by a single step.
    fn run(&mut self) -> bool;

    fn read(&mut self, name: &str) -> f64;
    fn write(&mut self, name: &str, value: f64);
}

/// Trait for a part of the adapter which exchanges data with the engine.
pub trait SimulationElement {
    /// Reads data representing the current state of the engine into the element.
    fn read(&mut self, _reader: &mut FlightDynamicsReader) {}

    /// Writes data from the element to the engine.
    fn write(&self, _writer: &mut FlightDynamicsWriter) {}
}

pub struct FlightDynamicsReader<'a> {
    flight_dynamics: &'a mut dyn FlightDynamics,
}
impl<'a> FlightDynamicsReader<'a> {
    pub fn new(flight_dynamics: &'a mut dyn FlightDynamics) -> Self {
        Self { flight_dynamics }
    }

    pub fn read_f64(&mut self, name: &str) -> f64 {
        self.flight_dynamics.read(name)
    }

    pub fn read_bool(&mut self, name: &str) -> bool {
        to_bool(self.read_f64(name))
    }

    pub fn body_to_local(&self) -> Matrix3<f64> {
        self.flight_dynamics.body_to_local()
    }

    pub fn throttle_limits(&self, engine: usize) -> ThrottleLimits {
        self.flight_dynamics.throttle_limits(engine)
    }
}

pub struct FlightDynamicsWriter<'a> {
    flight_dynamics: &'a mut dyn FlightDynamics,
}
impl<'a> FlightDynamicsWriter<'a> {
    pub fn new(flight_dynamics: &'a mut dyn FlightDynamics) -> Self {
        Self { flight_dynamics }
    }

    pub fn write_f64(&mut self, name: &str, value: f64) {
        self.flight_dynamics.write(name, value);
    }

    pub fn write_bool(&mut self, name: &str, value: bool) {
        self.write_f64(name, from_bool(value));
    }
}

/// Converts a given `f64` representing a boolean value in the engine into an actual `bool` value.
pub fn to_bool(value: f64) -> bool {
    value.abs() > f64::EPSILON
}

/// Converts a given `bool` value into an `f64` representing that boolean value in the engine.
pub fn from_bool(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Orchestrates the:
/// 1. Creation and configuration of the engine.
/// 2. Forwarding of control inputs to the engine.
/// 3. Stepping of the engine, including trim integration.
/// 4. Reading of the engine's state into the [`AircraftState`].
///
/// Until [`init`] succeeds there is no engine, and all other
/// operations do nothing.
///
/// [`AircraftState`]: ../state/struct.AircraftState.html
/// [`init`]: #method.init
pub struct Simulation<T: FlightDynamics> {
    flight_dynamics_fn: Box<dyn FnMut() -> T>,
    flight_dynamics: Option<T>,
    state: AircraftState,
    trim: PitchRollTrim,
}
impl<T: FlightDynamics> Simulation<T> {
    pub fn new<U: FnMut() -> T + 'static>(flight_dynamics_fn: U) -> Self {
        Self::new_with_trim_rates(flight_dynamics_fn, TrimRates::default())
    }

    pub fn new_with_trim_rates<U: FnMut() -> T + 'static>(
        flight_dynamics_fn: U,
        trim_rates: TrimRates,
    ) -> Self {
        Self {
            flight_dynamics_fn: Box::new(flight_dynamics_fn),
            flight_dynamics: None,
            state: AircraftState::default(),
            trim: PitchRollTrim::new(trim_rates),
        }
    }

    /// Creates a new engine and loads the given aircraft model from below `root_dir`.
    /// On failure the simulation is left without an engine and `init` may be retried.
    pub fn init<P: AsRef<Path>>(
        &mut self,
        root_dir: P,
        model: &str,
        debug_level: u32,
    ) -> Result<(), SimulationError> {
        self.init_with_paths(&SearchPaths::from_root(root_dir), model, debug_level)
    }

    pub fn init_with_paths(
        &mut self,
        paths: &SearchPaths,
        model: &str,
        debug_level: u32,
    ) -> Result<(), SimulationError> {
        self.flight_dynamics = None;

        let mut flight_dynamics = (self.flight_dynamics_fn)();
        info!(
            "Using flight dynamics engine version {}",
            flight_dynamics.version()
        );

        paths.configure(&mut flight_dynamics);
        flight_dynamics.set_debug_level(debug_level);

        info!("Loading aircraft model: {}", model);
        if !flight_dynamics.load_model(model) {
            error!(
                "Failed to load aircraft model '{}' from {}",
                model,
                paths.aircraft.display()
            );
            return Err(SimulationError::ModelLoad {
                model: model.to_owned(),
                root_dir: paths.root.clone(),
            });
        }

        let number_of_engines = flight_dynamics.number_of_engines();
        debug!("Aircraft model '{}' has {} engine(s)", model, number_of_engines);

        self.state = AircraftState::new(number_of_engines);
        self.trim.reset();
        self.flight_dynamics = Some(flight_dynamics);

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.flight_dynamics.is_some()
    }

    pub fn set_initial_conditions(&mut self, conditions: &InitialConditions) {
        self.with_writer(|writer| conditions.write(writer));
    }

    /// Starts all engines and trims the model to the initial conditions.
    /// The aircraft state is refreshed when trimming succeeds.
    pub fn run_initial_conditions(&mut self) -> Result<(), SimulationError> {
        let number_of_engines = self.state.num_engines;
        let flight_dynamics = self
            .flight_dynamics
            .as_mut()
            .ok_or(SimulationError::NotInitialized)?;

        propulsion::start_engines(
            &mut FlightDynamicsWriter::new(flight_dynamics),
            number_of_engines,
        );

        if !flight_dynamics.run_initial_conditions() {
            warn!("Failed to run initial conditions");
            return Err(SimulationError::InitialConditions);
        }

        self.state
            .read(&mut FlightDynamicsReader::new(flight_dynamics));

        Ok(())
    }

    /// Advances the simulation by `delta`. A failing engine step is logged and
    /// the aircraft state is refreshed regardless.
    pub fn update(&mut self, delta: Duration) {
        if let Some(flight_dynamics) = &mut self.flight_dynamics {
            self.trim.update(delta);
            self.trim
                .write(&mut FlightDynamicsWriter::new(flight_dynamics));

            flight_dynamics.set_delta(delta);
            if !flight_dynamics.run() {
                warn!("Flight dynamics step of {:?} failed", delta);
            }

            self.state
                .read(&mut FlightDynamicsReader::new(flight_dynamics));
        }
    }

    pub fn state(&self) -> &AircraftState {
        &self.state
    }

    pub fn flight_dynamics(&self) -> Option<&T> {
        self.flight_dynamics.as_ref()
    }

    pub fn flight_dynamics_mut(&mut self) -> Option<&mut T> {
        self.flight_dynamics.as_mut()
    }

    /// Roll stick, -1 (left) to 1 (right).
    pub fn set_roll(&mut self, value: f64) {
        self.with_writer(|writer| controls::write_roll(writer, value));
    }

    /// Pitch stick, -1 (push) to 1 (pull).
    pub fn set_pitch(&mut self, value: f64) {
        self.with_writer(|writer| controls::write_pitch(writer, value));
    }

    /// Rudder pedals, -1 (left) to 1 (right).
    pub fn set_rudder(&mut self, value: f64) {
        self.with_writer(|writer| controls::write_rudder(writer, value));
    }

    /// Throttle of a single engine, 0 to 1. Unknown engines are ignored.
    pub fn set_throttle(&mut self, engine: usize, value: f64) {
        if engine < self.state.num_engines {
            self.with_writer(|writer| controls::write_throttle(writer, engine, value));
        }
    }

    /// Throttle of all engines, 0 to 1.
    pub fn set_throttles(&mut self, value: f64) {
        let number_of_engines = self.state.num_engines;
        self.with_writer(|writer| {
            (0..number_of_engines).for_each(|engine| controls::write_throttle(writer, engine, value))
        });
    }

    pub fn set_gear_down(&mut self, down: bool) {
        self.with_writer(|writer| controls::write_gear(writer, down));
    }

    pub fn set_brakes(&mut self, left: f64, right: f64) {
        self.with_writer(|writer| controls::write_brakes(writer, left, right));
    }

    /// Positive values extend, negative values retract and zero holds the speed brake.
    pub fn set_speed_brake(&mut self, value: f64) {
        self.with_writer(|writer| controls::write_speed_brake(writer, value.into()));
    }

    /// Roll trim switch, -1 (left), 0 (hold) or 1 (right).
    pub fn set_roll_trim_switch(&mut self, value: f64) {
        self.trim.set_roll_switch(value);
    }

    /// Pitch trim switch, -1 (nose down), 0 (hold) or 1 (nose up).
    pub fn set_pitch_trim_switch(&mut self, value: f64) {
        self.trim.set_pitch_switch(value);
    }

    pub fn pitch_trim_position(&self) -> f64 {
        self.trim.pitch_position()
    }

    pub fn roll_trim_position(&self) -> f64 {
        self.trim.roll_position()
    }

    fn with_writer<U: FnOnce(&mut FlightDynamicsWriter)>(&mut self, write_fn: U) {
        if let Some(flight_dynamics) = &mut self.flight_dynamics {
            write_fn(&mut FlightDynamicsWriter::new(flight_dynamics));
        }
    }
}
