use thiserror::Error;

/// Errors surfaced by the grid-world simulator
///
/// Every operation either fully succeeds or fails with one of these variants.
/// No retries happen internally; recovery is always the caller's decision.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Bad constructor input (non-positive dimensions, malformed initial body).
    /// Fatal: the simulator cannot be built from this configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Action index outside the discrete action space. Recoverable: retry
    /// with a valid action.
    #[error("invalid action index {0} (expected 0..4)")]
    InvalidAction(usize),

    /// Step called on a terminated simulator. Recoverable: call `reset` first.
    #[error("simulator is terminated; call reset() before stepping again")]
    InvalidState,
}
