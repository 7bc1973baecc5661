use palletizing_core::{Destination, Sku};

/// One destination's demand for one SKU, as fed to the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandRow {
    pub sku: Sku,
    pub layers_needed: u64,
}

/// One row of a composed output pallet spec: `layers` of `sku` assigned to
/// pallet number `pallet_ordinal` (1-based, per destination) of `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedRow {
    pub destination: Destination,
    pub pallet_ordinal: usize,
    pub sku: Sku,
    pub layers: u64,
}

/// A batch's required source pallets for one SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPlanRow {
    pub group: usize,
    pub sku: Sku,
    pub pallets_count: u64,
}

/// A composed row assigned to a batch group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitPlanRow {
    pub group: usize,
    pub destination: Destination,
    pub pallet_ordinal: usize,
    pub sku: Sku,
    pub layers: u64,
}
