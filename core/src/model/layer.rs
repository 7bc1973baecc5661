use crate::Sku;

/// One movable unit: a single layer of a single SKU.
///
/// `layer_no` records the layer's ordinal position within its *current*
/// pallet and is reassigned by `DestPallet::add` — it is not a stable
/// identity, just bookkeeping for where the layer ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub sku: Sku,
    pub layer_no: usize,
}

impl Layer {
    pub(crate) fn new(sku: Sku, layer_no: usize) -> Self {
        Self { sku, layer_no }
    }
}
