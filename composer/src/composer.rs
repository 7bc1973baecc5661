use palletizing_core::{Destination, LAYERS_PER_PALLET, SimError};
use tracing::{debug, instrument};

use crate::types::{ComposedRow, DemandRow};

/// Packs each destination's `(sku, layers_needed)` rows into fixed-capacity
/// pallet specs.
///
/// Destinations are processed independently and in the order given; within
/// a destination the packing is fully deterministic (see [`pack_destination`]).
#[instrument(skip(destinations), fields(destination_count = destinations.len()))]
pub fn compose(
    destinations: &[(Destination, Vec<DemandRow>)],
) -> Result<Vec<ComposedRow>, SimError> {
    let mut out = Vec::new();
    for (destination, rows) in destinations {
        let packed = pack_destination(rows)?;
        debug!(destination = %destination, pallets = packed.len(), "destination packed");
        for (pallet_ordinal, sku, layers) in packed {
            out.push(ComposedRow {
                destination: destination.clone(),
                pallet_ordinal,
                sku,
                layers,
            });
        }
    }
    Ok(out)
}

/// Packs one destination's rows into `(pallet_ordinal, sku, layers)` triples.
///
/// Rows are consumed largest-first. Each pallet is seeded with the largest
/// remaining row, then completed either by an exact-fill match or by a
/// first-fit sweep over what remains; a pallet that cannot be filled further
/// is closed out and the next one started.
fn pack_destination(rows: &[DemandRow]) -> Result<Vec<(usize, palletizing_core::Sku, u64)>, SimError> {
    for row in rows {
        if row.layers_needed > LAYERS_PER_PALLET as u64 {
            return Err(SimError::TypeMismatch(format!(
                "sku {} needs {} layers, exceeds pallet capacity {}",
                row.sku, row.layers_needed, LAYERS_PER_PALLET
            )));
        }
    }

    let mut remaining: Vec<(palletizing_core::Sku, u64)> =
        rows.iter().map(|r| (r.sku, r.layers_needed)).collect();
    remaining.sort_by(|a, b| b.1.cmp(&a.1));

    let mut out = Vec::new();
    let mut cur_pallet = 1usize;
    let mut cur_layers = 0u64;

    while !remaining.is_empty() {
        let head = remaining.remove(0);
        out.push((cur_pallet, head.0, head.1));
        cur_layers += head.1;

        let mut advanced = false;
        let layers_missing = LAYERS_PER_PALLET as u64 - cur_layers;

        if let Some(pos) = remaining.iter().position(|(_, count)| *count == layers_missing) {
            let (sku, count) = remaining.remove(pos);
            out.push((cur_pallet, sku, count));
            cur_pallet += 1;
            cur_layers = 0;
            advanced = true;
        } else {
            let mut filled = Vec::new();
            for (j, (sku, count)) in remaining.iter().enumerate() {
                if cur_layers == LAYERS_PER_PALLET as u64 {
                    break;
                }
                if *count <= LAYERS_PER_PALLET as u64 - cur_layers {
                    out.push((cur_pallet, *sku, *count));
                    cur_layers += *count;
                    filled.push(j);
                }
            }
            for &j in filled.iter().rev() {
                remaining.remove(j);
            }
            if cur_layers == LAYERS_PER_PALLET as u64 {
                cur_pallet += 1;
                cur_layers = 0;
                advanced = true;
            }
        }

        if !advanced {
            cur_pallet += 1;
            cur_layers = 0;
        }
    }

    Ok(out)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]
        #[test]
        fn composer_conserves_layers_and_never_overfills(
            rows in prop::collection::vec((0u32..20, 1u64..=15), 1..12)
        ) {
            // Dedup by sku, keeping the last count seen for that key.
            let mut by_sku: HashMap<u32, u64> = HashMap::new();
            for (sku, layers) in rows {
                by_sku.insert(sku, layers);
            }
            let demand: Vec<DemandRow> = by_sku
                .into_iter()
                .map(|(sku, layers_needed)| DemandRow { sku, layers_needed })
                .collect();
            let total_in: u64 = demand.iter().map(|r| r.layers_needed).sum();

            let packed = pack_destination(&demand).unwrap();

            let total_out: u64 = packed.iter().map(|(_, _, l)| l).sum();
            prop_assert_eq!(total_in, total_out);

            let mut per_pallet: HashMap<usize, u64> = HashMap::new();
            for (pallet, _, layers) in &packed {
                *per_pallet.entry(*pallet).or_insert(0) += layers;
            }
            for (_pallet, layers) in per_pallet {
                prop_assert!(layers <= LAYERS_PER_PALLET as u64);
            }
        }
    }
}
