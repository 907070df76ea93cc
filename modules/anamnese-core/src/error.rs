use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No active simulation is configured")]
    NoActiveSimulation,

    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
