use std::collections::HashSet;

use palletizing_core::Sku;
use tracing::{debug, instrument};

use crate::types::{ComposedRow, EntryPlanRow, ExitPlanRow};

struct PendingPallet {
    destination: String,
    pallet_ordinal: usize,
    rows: Vec<(Sku, u64)>,
}

impl PendingPallet {
    fn sku_set(&self) -> HashSet<Sku> {
        self.rows.iter().map(|(sku, _)| *sku).collect()
    }
}

/// Groups composed output pallets into batches, each feasible with at most
/// `max_entry_skus` distinct source SKUs loaded simultaneously.
///
/// Returns the per-batch entry plan (source pallets to stage) and exit plan
/// (composed rows tagged with their batch group).
#[instrument(skip(composed), fields(composed_rows = composed.len(), max_entry_skus))]
pub fn plan_batches(
    composed: &[ComposedRow],
    max_entry_skus: usize,
) -> (Vec<EntryPlanRow>, Vec<ExitPlanRow>) {
    let mut remaining = group_by_pallet(composed);

    let mut entry_rows = Vec::new();
    let mut exit_rows = Vec::new();
    let mut group = 1usize;

    while !remaining.is_empty() {
        let seed_destination = remaining[0].destination.clone();
        let mut skus: HashSet<Sku> = remaining[0].sku_set();

        if skus.len() < max_entry_skus {
            for pallet in remaining.iter().skip(1) {
                if pallet.destination == seed_destination {
                    continue;
                }
                if skus.len() == max_entry_skus {
                    break;
                }
                let pallet_skus = pallet.sku_set();
                if pallet_skus.intersection(&skus).next().is_some() {
                    skus.extend(pallet_skus);
                }
            }
        }

        let mut assigned_idx = Vec::new();
        for (idx, pallet) in remaining.iter().enumerate() {
            if pallet.sku_set().is_subset(&skus) {
                assigned_idx.push(idx);
            }
        }

        let mut layers_per_sku: std::collections::HashMap<Sku, u64> = std::collections::HashMap::new();
        for &idx in &assigned_idx {
            let pallet = &remaining[idx];
            for (sku, layers) in &pallet.rows {
                *layers_per_sku.entry(*sku).or_insert(0) += layers;
                exit_rows.push(ExitPlanRow {
                    group,
                    destination: pallet.destination.clone(),
                    pallet_ordinal: pallet.pallet_ordinal,
                    sku: *sku,
                    layers: *layers,
                });
            }
        }

        let mut sorted_skus: Vec<&Sku> = skus.iter().collect();
        sorted_skus.sort_unstable();
        for sku in sorted_skus {
            let total_layers = layers_per_sku.get(sku).copied().unwrap_or(0);
            entry_rows.push(EntryPlanRow {
                group,
                sku: *sku,
                pallets_count: total_layers.div_ceil(palletizing_core::LAYERS_PER_PALLET as u64),
            });
        }

        debug!(group, pallets_assigned = assigned_idx.len(), distinct_skus = skus.len(), "batch closed");

        for &idx in assigned_idx.iter().rev() {
            remaining.remove(idx);
        }
        group += 1;
    }

    (entry_rows, exit_rows)
}

fn group_by_pallet(composed: &[ComposedRow]) -> Vec<PendingPallet> {
    let mut pallets: Vec<PendingPallet> = Vec::new();
    for row in composed {
        if let Some(p) = pallets
            .iter_mut()
            .find(|p| p.destination == row.destination && p.pallet_ordinal == row.pallet_ordinal)
        {
            p.rows.push((row.sku, row.layers));
        } else {
            pallets.push(PendingPallet {
                destination: row.destination.clone(),
                pallet_ordinal: row.pallet_ordinal,
                rows: vec![(row.sku, row.layers)],
            });
        }
    }
    pallets
}
