//! Domain model for the palletizing simulator: the pallet state machine and
//! the per-day order book it is built against.
//!
//! This crate has no I/O and no concurrency primitives — a simulation day is
//! a single-threaded, owned value graph (see `ids::IdGen`).

pub mod error;
pub mod ids;
pub mod model;

/// Layers per full pallet.
pub const LAYERS_PER_PALLET: usize = 15;
/// Trays that make up one layer.
pub const TRAYS_PER_LAYER: u64 = 4;

/// Stock-keeping unit identifier.
pub type Sku = u32;
/// Customer destination identifier.
pub type Destination = String;

pub use error::SimError;
pub use ids::IdGen;
pub use model::{DayDemand, DestPallet, Layer, SkuAllocation, SourcePallet};
