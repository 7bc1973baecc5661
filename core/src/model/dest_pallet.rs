use crate::{Destination, IdGen, LAYERS_PER_PALLET, SimError};

use super::layer::Layer;

/// Partial, possibly multi-SKU outbound pallet bound to one destination for
/// its entire life.
#[derive(Debug, Clone)]
pub struct DestPallet {
    pub id: u64,
    pub destination: Destination,
    layers: Vec<Layer>,
}

impl DestPallet {
    pub fn new(destination: Destination, ids: &mut IdGen) -> Self {
        Self {
            id: ids.next_dest_pallet_id(),
            destination,
            layers: Vec::with_capacity(LAYERS_PER_PALLET),
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn complete(&self) -> bool {
        self.layers.len() == LAYERS_PER_PALLET
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Appends `layer`, renumbering it to its position in this pallet.
    /// Fails if the pallet is already complete.
    pub fn add(&mut self, mut layer: Layer) -> Result<(), SimError> {
        if self.complete() {
            return Err(SimError::PalletComplete(self.id));
        }
        layer.layer_no = self.layers.len() + 1;
        self.layers.push(layer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(sku: u32) -> Layer {
        Layer { sku, layer_no: 0 }
    }

    #[test]
    fn add_renumbers_and_marks_complete_at_fifteen() {
        let mut ids = IdGen::new();
        let mut p = DestPallet::new("D1".to_string(), &mut ids);
        for i in 0..LAYERS_PER_PALLET {
            p.add(layer(1)).unwrap();
            assert_eq!(p.layers()[i].layer_no, i + 1);
        }
        assert!(p.complete());
        assert_eq!(p.len(), LAYERS_PER_PALLET);
    }

    #[test]
    fn add_on_complete_pallet_fails() {
        let mut ids = IdGen::new();
        let mut p = DestPallet::new("D1".to_string(), &mut ids);
        for _ in 0..LAYERS_PER_PALLET {
            p.add(layer(1)).unwrap();
        }
        assert!(matches!(p.add(layer(1)), Err(SimError::PalletComplete(_))));
    }
}
