use thiserror::Error;

/// Fatal conditions raised by the core domain model.
///
/// These all indicate a scheduler bug, not a recoverable business outcome —
/// `UnsatisfiedDemand` is deliberately not here; it is a recorded result, not
/// an error (see `scheduler::SimOutcome`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("attempted to take a layer from an empty source pallet {0}")]
    PalletEmpty(u64),

    #[error("attempted to add a layer to a complete destination pallet {0}")]
    PalletComplete(u64),

    #[error("composer row shape not recognised: {0}")]
    TypeMismatch(String),
}
