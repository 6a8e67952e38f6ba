//! Maps the adapter's control inputs onto the engine's flight control commands.
//!
//! The engine deflects the elevator and rudder in the opposite direction of
//! the adapter's convention, so pitch and rudder inputs are inverted.
use crate::{propulsion::throttle_command_key, simulation::FlightDynamicsWriter};

pub const AILERON_CMD_KEY: &str = "fcs/aileron-cmd-norm";
pub const ELEVATOR_CMD_KEY: &str = "fcs/elevator-cmd-norm";
pub const RUDDER_CMD_KEY: &str = "fcs/rudder-cmd-norm";
pub const GEAR_CMD_KEY: &str = "gear/gear-cmd-norm";
pub const LEFT_BRAKE_CMD_KEY: &str = "fcs/left-brake-cmd-norm";
pub const RIGHT_BRAKE_CMD_KEY: &str = "fcs/right-brake-cmd-norm";
pub const SPEED_BRAKE_CMD_KEY: &str = "fcs/speedbrake-cmd-norm";

/// What to do with the speed brake, derived from a signed input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpeedBrakeCommand {
    Extend,
    Retract,
    Hold,
}
impl SpeedBrakeCommand {
    /// The command to send to the engine. Holding sends nothing.
    pub fn command(&self) -> Option<f64> {
        match self {
            SpeedBrakeCommand::Extend => Some(1.),
            SpeedBrakeCommand::Retract => Some(0.),
            SpeedBrakeCommand::Hold => None,
        }
    }
}
impl From<f64> for SpeedBrakeCommand {
    fn from(value: f64) -> Self {
        if value > 0. {
            SpeedBrakeCommand::Extend
        } else if value < 0. {
            SpeedBrakeCommand::Retract
        } else {
            SpeedBrakeCommand::Hold
        }
    }
}

pub(crate) fn write_roll(writer: &mut FlightDynamicsWriter, value: f64) {
    writer.write_f64(AILERON_CMD_KEY, value);
}

pub(crate) fn write_pitch(writer: &mut FlightDynamicsWriter, value: f64) {
    writer.write_f64(ELEVATOR_CMD_KEY, -value);
}

pub(crate) fn write_rudder(writer: &mut FlightDynamicsWriter, value: f64) {
    writer.write_f64(RUDDER_CMD_KEY, -value);
}

pub(crate) fn write_throttle(writer: &mut FlightDynamicsWriter, engine: usize, value: f64) {
    writer.write_f64(&throttle_command_key(engine), value);
}

pub(crate) fn write_gear(writer: &mut FlightDynamicsWriter, down: bool) {
    writer.write_bool(GEAR_CMD_KEY, down);
}

pub(crate) fn write_brakes(writer: &mut FlightDynamicsWriter, left: f64, right: f64) {
    writer.write_f64(LEFT_BRAKE_CMD_KEY, left);
    writer.write_f64(RIGHT_BRAKE_CMD_KEY, right);
}

pub(crate) fn write_speed_brake(writer: &mut FlightDynamicsWriter, command: SpeedBrakeCommand) {
    if let Some(value) = command.command() {
        writer.write_f64(SPEED_BRAKE_CMD_KEY, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::test::TestFlightDynamics;

    #[test]
    fn positive_input_extends_the_speed_brake() {
        assert_eq!(SpeedBrakeCommand::from(0.01), SpeedBrakeCommand::Extend);
        assert_eq!(SpeedBrakeCommand::from(1.), SpeedBrakeCommand::Extend);
    }

    #[test]
    fn negative_input_retracts_the_speed_brake() {
        assert_eq!(SpeedBrakeCommand::from(-0.01), SpeedBrakeCommand::Retract);
        assert_eq!(SpeedBrakeCommand::from(-1.), SpeedBrakeCommand::Retract);
    }

    #[test]
    fn zero_input_holds_the_speed_brake() {
        assert_eq!(SpeedBrakeCommand::from(0.), SpeedBrakeCommand::Hold);
        assert_eq!(SpeedBrakeCommand::from(-0.), SpeedBrakeCommand::Hold);
    }

    #[test]
    fn holding_the_speed_brake_has_no_command() {
        assert_eq!(SpeedBrakeCommand::Hold.command(), None);
        assert_eq!(SpeedBrakeCommand::Extend.command(), Some(1.));
        assert_eq!(SpeedBrakeCommand::Retract.command(), Some(0.));
    }

    #[test]
    fn holding_the_speed_brake_writes_nothing() {
        let mut flight_dynamics = TestFlightDynamics::new();

        write_speed_brake(
            &mut FlightDynamicsWriter::new(&mut flight_dynamics),
            SpeedBrakeCommand::Hold,
        );

        assert!(!flight_dynamics.contains_key(SPEED_BRAKE_CMD_KEY));
    }

    #[test]
    fn gear_down_is_written_as_one() {
        let mut flight_dynamics = TestFlightDynamics::new();

        write_gear(&mut FlightDynamicsWriter::new(&mut flight_dynamics), true);

        assert!(flight_dynamics.contains_f64(GEAR_CMD_KEY, 1.));
    }
}
