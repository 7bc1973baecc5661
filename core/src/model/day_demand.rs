use std::collections::BTreeMap;

use crate::{Destination, Sku, TRAYS_PER_LAYER};

/// Mutable order book for one simulation day.
///
/// Rows are keyed by `(destination, sku)` in a `BTreeMap` rather than a
/// hash map so that iteration order — and therefore the order destinations
/// are offered to the scheduler — is deterministic given the same input.
#[derive(Debug, Clone, Default)]
pub struct DayDemand {
    rows: BTreeMap<(Destination, Sku), u64>,
}

impl DayDemand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one input record into the order book, converting trays to
    /// layers by truncating division. A row that converts to zero layers
    /// contributes nothing.
    pub fn add_tray_row(&mut self, destination: Destination, sku: Sku, trays: u64) {
        let layers = trays / TRAYS_PER_LAYER;
        if layers == 0 {
            return;
        }
        *self.rows.entry((destination, sku)).or_insert(0) += layers;
    }

    /// Destinations still wanting `sku`, in key order, skipping rows that
    /// have already reached zero.
    pub fn destinations_for_sku(&self, sku: Sku) -> Vec<Destination> {
        self.rows
            .iter()
            .filter(|((_, row_sku), remaining)| *row_sku == sku && **remaining > 0)
            .map(|((dest, _), _)| dest.clone())
            .collect()
    }

    pub fn layers_needed(&self, destination: &str, sku: Sku) -> u64 {
        self.rows
            .get(&(destination.to_string(), sku))
            .copied()
            .unwrap_or(0)
    }

    /// Decrements the row by one layer, removing it once it reaches zero.
    /// A no-op if the row is already absent or zero.
    pub fn decrement(&mut self, destination: &str, sku: Sku) {
        let key = (destination.to_string(), sku);
        if let Some(remaining) = self.rows.get_mut(&key) {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.rows.remove(&key);
            }
        }
    }

    pub fn total_remaining(&self) -> u64 {
        self.rows.values().sum()
    }

    /// All `(destination, sku, remaining)` rows, in key order.
    pub fn rows(&self) -> impl Iterator<Item = (&Destination, Sku, u64)> {
        self.rows.iter().map(|((dest, sku), remaining)| (dest, *sku, *remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tray_rows_convert_by_truncating_division() {
        let mut d = DayDemand::new();
        d.add_tray_row("D1".to_string(), 1, 61);
        assert_eq!(d.layers_needed("D1", 1), 15);
    }

    #[test]
    fn zero_layer_rows_are_dropped() {
        let mut d = DayDemand::new();
        d.add_tray_row("D1".to_string(), 1, 3);
        assert_eq!(d.total_remaining(), 0);
        assert_eq!(d.destinations_for_sku(1), Vec::<String>::new());
    }

    #[test]
    fn decrement_removes_row_at_zero() {
        let mut d = DayDemand::new();
        d.add_tray_row("D1".to_string(), 1, 4);
        assert_eq!(d.layers_needed("D1", 1), 1);
        d.decrement("D1", 1);
        assert_eq!(d.layers_needed("D1", 1), 0);
        assert_eq!(d.destinations_for_sku(1), Vec::<String>::new());
    }

    #[test]
    fn destinations_for_sku_skips_other_skus() {
        let mut d = DayDemand::new();
        d.add_tray_row("D1".to_string(), 1, 8);
        d.add_tray_row("D2".to_string(), 2, 8);
        assert_eq!(d.destinations_for_sku(1), vec!["D1".to_string()]);
    }
}
