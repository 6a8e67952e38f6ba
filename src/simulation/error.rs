use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("The flight dynamics engine is not initialized")]
    NotInitialized,

    #[error("Failed to load aircraft model '{model}' from {root_dir:?}")]
    ModelLoad { model: String, root_dir: PathBuf },

    #[error("Failed to trim to the initial conditions")]
    InitialConditions,
}
