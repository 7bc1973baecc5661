use crate::{IdGen, LAYERS_PER_PALLET, SimError, Sku};

use super::layer::Layer;

/// Full, single-SKU inbound pallet, modeled as a LIFO stack of layers.
///
/// `empty` is derived from `layers`, never set directly — there is no path
/// that can desynchronize the two.
#[derive(Debug, Clone)]
pub struct SourcePallet {
    pub id: u64,
    pub sku: Sku,
    layers: Vec<Layer>,
}

impl SourcePallet {
    /// Creates a full pallet of `LAYERS_PER_PALLET` layers, all of `sku`.
    pub fn new(sku: Sku, ids: &mut IdGen) -> Self {
        let layers = (0..LAYERS_PER_PALLET).map(|i| Layer::new(sku, i)).collect();
        Self {
            id: ids.next_source_pallet_id(),
            sku,
            layers,
        }
    }

    pub fn empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.layers.len()
    }

    /// Removes and returns the top layer. Fails on an empty pallet.
    pub fn take_top(&mut self) -> Result<Layer, SimError> {
        self.layers.pop().ok_or(SimError::PalletEmpty(self.id))
    }
}
