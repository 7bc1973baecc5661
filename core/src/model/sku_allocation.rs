use std::collections::{BTreeMap, HashSet};

use rand::Rng;

use crate::{DayDemand, LAYERS_PER_PALLET, Sku};

/// Per-day table of pallets-remaining per SKU, used to drive source-pallet
/// swaps. `partial_pallets` only ever decreases over the life of a day.
#[derive(Debug, Clone, Default)]
pub struct SkuAllocation {
    partial_pallets: BTreeMap<Sku, u64>,
}

impl SkuAllocation {
    /// Aggregates `demand`'s remaining layers per SKU and takes
    /// `ceil(total / LAYERS_PER_PALLET)` as that SKU's partial-pallet count.
    pub fn from_day_demand(demand: &DayDemand) -> Self {
        let mut totals: BTreeMap<Sku, u64> = BTreeMap::new();
        for (_dest, sku, remaining) in demand.rows() {
            *totals.entry(sku).or_insert(0) += remaining;
        }
        let partial_pallets = totals
            .into_iter()
            .map(|(sku, total)| (sku, total.div_ceil(LAYERS_PER_PALLET as u64)))
            .collect();
        Self { partial_pallets }
    }

    pub fn remaining(&self, sku: Sku) -> u64 {
        self.partial_pallets.get(&sku).copied().unwrap_or(0)
    }

    /// Consumes one partial pallet for `sku`. A no-op if already at zero or
    /// absent.
    pub fn decrement(&mut self, sku: Sku) {
        if let Some(count) = self.partial_pallets.get_mut(&sku) {
            *count = count.saturating_sub(1);
        }
    }

    pub fn total_remaining(&self) -> u64 {
        self.partial_pallets.values().sum()
    }

    /// The `n` SKUs with the highest `partial_pallets`, ties broken by SKU
    /// ascending for determinism. Fewer than `n` are returned if fewer SKUs
    /// have any pallets remaining.
    pub fn top_skus(&self, n: usize) -> Vec<Sku> {
        let mut candidates: Vec<(Sku, u64)> = self
            .partial_pallets
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(sku, count)| (*sku, *count))
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        candidates.into_iter().take(n).map(|(sku, _)| sku).collect()
    }

    /// Uniformly samples a SKU with `partial_pallets > 0` whose key is not
    /// in `exclude`. Candidates are collected in key order before the draw
    /// so the result depends only on `rng`'s stream, not map iteration.
    pub fn sample_available<R: Rng>(&self, exclude: &HashSet<Sku>, rng: &mut R) -> Option<Sku> {
        let candidates: Vec<Sku> = self
            .partial_pallets
            .iter()
            .filter(|(sku, count)| **count > 0 && !exclude.contains(sku))
            .map(|(sku, _)| *sku)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..candidates.len());
        Some(candidates[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn demand(rows: &[(&str, Sku, u64)]) -> DayDemand {
        let mut d = DayDemand::new();
        for (dest, sku, trays) in rows {
            d.add_tray_row(dest.to_string(), *sku, *trays);
        }
        d
    }

    #[test]
    fn aggregates_layers_per_sku_as_ceil_div_fifteen() {
        // 61 trays -> 15 layers for sku 1, 124 trays -> 31 layers for sku 2.
        let d = demand(&[("D1", 1, 61), ("D2", 2, 124)]);
        let alloc = SkuAllocation::from_day_demand(&d);
        assert_eq!(alloc.remaining(1), 1);
        assert_eq!(alloc.remaining(2), 3);
    }

    #[test]
    fn decrement_floors_at_zero() {
        let d = demand(&[("D1", 1, 4)]);
        let mut alloc = SkuAllocation::from_day_demand(&d);
        assert_eq!(alloc.remaining(1), 1);
        alloc.decrement(1);
        alloc.decrement(1);
        assert_eq!(alloc.remaining(1), 0);
    }

    #[test]
    fn sample_available_respects_exclusion() {
        let d = demand(&[("D1", 1, 60), ("D2", 2, 60)]);
        let alloc = SkuAllocation::from_day_demand(&d);
        let mut rng = StdRng::seed_from_u64(42);
        let mut exclude = HashSet::new();
        exclude.insert(1);
        for _ in 0..10 {
            assert_eq!(alloc.sample_available(&exclude, &mut rng), Some(2));
        }
    }

    #[test]
    fn sample_available_none_when_all_excluded() {
        let d = demand(&[("D1", 1, 60)]);
        let alloc = SkuAllocation::from_day_demand(&d);
        let mut rng = StdRng::seed_from_u64(1);
        let mut exclude = HashSet::new();
        exclude.insert(1);
        assert_eq!(alloc.sample_available(&exclude, &mut rng), None);
    }
}
