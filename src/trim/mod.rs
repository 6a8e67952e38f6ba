use std::time::Duration;

use crate::{
    config::TrimRates,
    simulation::{FlightDynamicsWriter, SimulationElement},
};

pub const PITCH_TRIM_CMD_KEY: &str = "fcs/pitch-trim-cmd-norm";
pub const ROLL_TRIM_CMD_KEY: &str = "fcs/roll-trim-cmd-norm";

/// Moves a trim position at a fixed rate for as long as the trim switch is held,
/// until the position reaches either end of its -1 to 1 range.
#[derive(Debug)]
pub struct TrimIntegrator {
    position: f64,
    rate: f64,
    switch: f64,
}
impl TrimIntegrator {
    pub fn new(rate: f64) -> Self {
        Self {
            position: 0.,
            rate,
            switch: 0.,
        }
    }

    /// -1 moves the trim towards -1, 0 holds it and 1 moves it towards 1.
    pub fn set_switch(&mut self, value: f64) {
        self.switch = value;
    }

    pub fn update(&mut self, delta: Duration) {
        self.position = (self.position + self.rate * self.switch * delta.as_secs_f64())
            .max(-1.)
            .min(1.);
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Centers the trim. A held switch stays held.
    pub fn reset(&mut self) {
        self.position = 0.;
    }
}

/// The pitch and roll trim. The trim positions are commanded every update,
/// whether they moved or not.
pub struct PitchRollTrim {
    pitch: TrimIntegrator,
    roll: TrimIntegrator,
}
impl PitchRollTrim {
    pub fn new(rates: TrimRates) -> Self {
        Self {
            pitch: TrimIntegrator::new(rates.pitch),
            roll: TrimIntegrator::new(rates.roll),
        }
    }

    /// The pitch switch moves the trim opposite to the switch, in line
    /// with the inverted pitch input.
    pub fn set_pitch_switch(&mut self, value: f64) {
        self.pitch.set_switch(-value);
    }

    pub fn set_roll_switch(&mut self, value: f64) {
        self.roll.set_switch(value);
    }

    pub fn update(&mut self, delta: Duration) {
        self.pitch.update(delta);
        self.roll.update(delta);
    }

    pub fn pitch_position(&self) -> f64 {
        self.pitch.position()
    }

    pub fn roll_position(&self) -> f64 {
        self.roll.position()
    }

    pub fn reset(&mut self) {
        self.pitch.reset();
        self.roll.reset();
    }
}
impl SimulationElement for PitchRollTrim {
    fn write(&self, writer: &mut FlightDynamicsWriter) {
        writer.write_f64(PITCH_TRIM_CMD_KEY, self.pitch.position());
        writer.write_f64(ROLL_TRIM_CMD_KEY, self.roll.position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::test::TestFlightDynamics;
    use ntest::assert_about_eq;

    fn update_for(trim: &mut TrimIntegrator, steps: usize, delta: Duration) {
        for _ in 0..steps {
            trim.update(delta);
        }
    }

    #[test]
    fn starts_centered() {
        assert_about_eq!(TrimIntegrator::new(0.1).position(), 0.);
    }

    #[test]
    fn holding_the_switch_up_moves_the_trim_at_the_rate() {
        let mut trim = TrimIntegrator::new(0.1);
        trim.set_switch(1.);

        update_for(&mut trim, 50, Duration::from_millis(100));

        assert_about_eq!(trim.position(), 0.5);
    }

    #[test]
    fn holding_the_switch_down_moves_the_trim_at_the_rate() {
        let mut trim = TrimIntegrator::new(0.1);
        trim.set_switch(-1.);

        update_for(&mut trim, 30, Duration::from_millis(100));

        assert_about_eq!(trim.position(), -0.3);
    }

    #[test]
    fn holding_the_switch_up_saturates_at_one() {
        let mut trim = TrimIntegrator::new(0.1);
        trim.set_switch(1.);

        update_for(&mut trim, 200, Duration::from_millis(100));

        assert_about_eq!(trim.position(), 1.);
    }

    #[test]
    fn holding_the_switch_down_saturates_at_minus_one() {
        let mut trim = TrimIntegrator::new(0.1);
        trim.set_switch(-1.);

        update_for(&mut trim, 200, Duration::from_millis(100));

        assert_about_eq!(trim.position(), -1.);
    }

    #[test]
    fn trim_position_follows_the_number_of_steps_until_saturated() {
        let rate = 0.25;
        let delta = Duration::from_millis(250);

        for steps in 0..40 {
            let mut up = TrimIntegrator::new(rate);
            up.set_switch(1.);
            let mut down = TrimIntegrator::new(rate);
            down.set_switch(-1.);

            update_for(&mut up, steps, delta);
            update_for(&mut down, steps, delta);

            let expected = steps as f64 * rate * delta.as_secs_f64();
            assert_about_eq!(up.position(), expected.min(1.));
            assert_about_eq!(down.position(), (-expected).max(-1.));
        }
    }

    #[test]
    fn switch_in_the_middle_holds_the_trim() {
        let mut trim = TrimIntegrator::new(0.1);
        trim.set_switch(1.);
        update_for(&mut trim, 3, Duration::from_secs(1));

        trim.set_switch(0.);
        update_for(&mut trim, 10, Duration::from_secs(1));

        assert_about_eq!(trim.position(), 0.3);
    }

    #[test]
    fn reset_centers_the_trim() {
        let mut trim = TrimIntegrator::new(0.1);
        trim.set_switch(1.);
        update_for(&mut trim, 3, Duration::from_secs(1));

        trim.reset();

        assert_about_eq!(trim.position(), 0.);
    }

    #[test]
    fn reset_keeps_a_held_switch() {
        let mut trim = TrimIntegrator::new(0.1);
        trim.set_switch(1.);

        trim.reset();
        trim.update(Duration::from_secs(1));

        assert_about_eq!(trim.position(), 0.1);
    }

    #[test]
    fn pitch_switch_is_inverted() {
        let mut trim = PitchRollTrim::new(TrimRates::default());
        trim.set_pitch_switch(1.);
        trim.set_roll_switch(1.);

        trim.update(Duration::from_secs(2));

        assert_about_eq!(trim.pitch_position(), -0.2);
        assert_about_eq!(trim.roll_position(), 0.2);
    }

    #[test]
    fn writes_both_trim_positions() {
        let mut flight_dynamics = TestFlightDynamics::new();
        let mut trim = PitchRollTrim::new(TrimRates::default());
        trim.set_pitch_switch(-1.);
        trim.update(Duration::from_secs(1));

        trim.write(&mut FlightDynamicsWriter::new(&mut flight_dynamics));

        assert_about_eq!(flight_dynamics.read_variable(PITCH_TRIM_CMD_KEY), 0.1);
        assert_about_eq!(flight_dynamics.read_variable(ROLL_TRIM_CMD_KEY), 0.);
    }
}
