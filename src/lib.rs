//! A thin adapter around an external flight dynamics engine.
//!
//! The engine is driven through the [`FlightDynamics`] trait. [`Simulation`]
//! owns one engine instance, forwards control inputs to it, steps it and
//! mirrors its state into an [`AircraftState`] expressed in typed units.
//!
//! [`FlightDynamics`]: simulation/trait.FlightDynamics.html
//! [`Simulation`]: simulation/struct.Simulation.html
//! [`AircraftState`]: state/struct.AircraftState.html
pub mod config;
pub mod controls;
pub mod propulsion;
mod shared;
pub mod simulation;
pub mod state;
pub mod trim;

pub use config::{InitialConditions, SearchPaths, TrimRates};
pub use simulation::{FlightDynamics, Simulation, SimulationError};
pub use state::AircraftState;
