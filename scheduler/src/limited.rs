use composer::{DemandRow, EntryPlanRow, ExitPlanRow, compose, plan_batches};
use palletizing_core::{DayDemand, DestPallet, IdGen, SimError, SourcePallet};
use tracing::{debug, instrument};

use crate::config::LimitedConfig;
use crate::metrics::SimulationMetrics;
use crate::outcome::SimOutcome;

/// Batch-driven simulator (strategy B): composes output pallets up front,
/// groups them with [`composer::plan_batches`], then walks each batch
/// loading exactly its planned entry pallets and exit pallets.
pub struct LimitedPositionScheduler {
    demand: DayDemand,
    ids: IdGen,
    config: LimitedConfig,
    metrics: SimulationMetrics,
    completed: Vec<DestPallet>,
}

pub struct SimRun {
    pub outcome: SimOutcome,
    pub metrics: SimulationMetrics,
    pub completed: Vec<DestPallet>,
}

impl LimitedPositionScheduler {
    pub fn new(demand: DayDemand, config: LimitedConfig) -> Self {
        let total_layers = demand.total_remaining();
        Self {
            demand,
            ids: IdGen::new(),
            config,
            metrics: SimulationMetrics::new(0, total_layers),
            completed: Vec::new(),
        }
    }

    #[instrument(skip(self), fields(max_entry_skus = self.config.max_entry_skus))]
    pub fn run(mut self) -> Result<SimRun, SimError> {
        let destinations = group_demand_by_destination(&self.demand);
        let composed = compose(&destinations)?;
        let (entry_plan, exit_plan) = plan_batches(&composed, self.config.max_entry_skus);

        self.metrics.total_pallets = composed
            .iter()
            .map(|row| (row.destination.clone(), row.pallet_ordinal))
            .collect::<std::collections::HashSet<_>>()
            .len() as u64;

        let mut groups: Vec<usize> = entry_plan.iter().map(|r| r.group).collect();
        groups.sort_unstable();
        groups.dedup();

        for group in groups {
            self.run_group(group, &entry_plan, &exit_plan)?;
        }

        let remaining = self.demand.total_remaining();
        let outcome = if remaining == 0 {
            SimOutcome::Completed
        } else {
            SimOutcome::Unsatisfied { remaining_layers: remaining }
        };
        self.metrics.remaining_layers = remaining;
        debug!(?outcome, "strategy B finished");

        Ok(SimRun { outcome, metrics: self.metrics, completed: self.completed })
    }

    fn run_group(
        &mut self,
        group: usize,
        entry_plan: &[EntryPlanRow],
        exit_plan: &[ExitPlanRow],
    ) -> Result<(), SimError> {
        let group_entries: Vec<&EntryPlanRow> = entry_plan.iter().filter(|r| r.group == group).collect();
        let mut group_exits: Vec<ExitPlanRow> =
            exit_plan.iter().filter(|r| r.group == group).cloned().collect();

        let mut entry_pallets: Vec<SourcePallet> = Vec::new();
        for entry in group_entries.iter().take(self.config.max_entry_skus) {
            for _ in 0..entry.pallets_count {
                entry_pallets.push(SourcePallet::new(entry.sku, &mut self.ids));
            }
        }

        let mut exit_pallets: Vec<DestPallet> = Vec::new();
        let mut exit_index: std::collections::HashMap<(String, usize), usize> = std::collections::HashMap::new();
        for row in &group_exits {
            let key = (row.destination.clone(), row.pallet_ordinal);
            exit_index.entry(key).or_insert_with(|| {
                exit_pallets.push(DestPallet::new(row.destination.clone(), &mut self.ids));
                exit_pallets.len() - 1
            });
        }

        for i in 0..entry_pallets.len() {
            if entry_pallets[i].empty() {
                continue;
            }
            let sku = entry_pallets[i].sku;

            for j in 0..exit_pallets.len() {
                if entry_pallets[i].empty() {
                    break;
                }
                let destination = exit_pallets[j].destination.clone();
                let Some(row) = group_exits
                    .iter_mut()
                    .find(|r| r.destination == destination && r.sku == sku && r.layers >= 1)
                else {
                    continue;
                };

                let q = row.layers.min(entry_pallets[i].remaining() as u64);
                if q == 0 {
                    continue;
                }
                for _ in 0..q {
                    let layer = entry_pallets[i].take_top()?;
                    exit_pallets[j].add(layer)?;
                    self.demand.decrement(&destination, sku);
                    self.metrics.record_layer_transfer();
                }
                row.layers -= q;
                self.metrics.record_batch_transfer();
            }
        }

        debug!(group, pallets = exit_pallets.len(), "batch group retired");
        self.metrics.num_completed_pallets += exit_pallets.len() as u64;
        self.completed.extend(exit_pallets);
        Ok(())
    }
}

fn group_demand_by_destination(demand: &DayDemand) -> Vec<(String, Vec<DemandRow>)> {
    let mut by_dest: Vec<(String, Vec<DemandRow>)> = Vec::new();
    for (destination, sku, remaining) in demand.rows() {
        match by_dest.iter_mut().find(|(d, _)| d == destination) {
            Some((_, rows)) => rows.push(DemandRow { sku, layers_needed: remaining }),
            None => by_dest.push((destination.clone(), vec![DemandRow { sku, layers_needed: remaining }])),
        }
    }
    by_dest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(rows: &[(&str, u32, u64)]) -> DayDemand {
        let mut d = DayDemand::new();
        for (dest, sku, trays) in rows {
            d.add_tray_row(dest.to_string(), *sku, *trays);
        }
        d
    }

    #[test]
    fn scenario_s2_pair_fill_completes_one_pallet() {
        // A=10 layers (40 trays), B=5 layers (20 trays), one destination.
        let d = demand(&[("D1", 1, 40), ("D1", 2, 20)]);
        let sched = LimitedPositionScheduler::new(d, LimitedConfig { max_entry_skus: 2 });
        let run = sched.run().unwrap();

        assert_eq!(run.outcome, SimOutcome::Completed);
        assert_eq!(run.metrics.transfered_layers, 15);
        assert_eq!(run.completed.len(), 1);
        assert!(run.completed[0].complete());
    }

    #[test]
    fn composer_coverage_matches_day_demand() {
        let d = demand(&[("D1", 1, 40), ("D1", 2, 20), ("D2", 3, 36)]);
        let total_in = d.total_remaining();
        let sched = LimitedPositionScheduler::new(d, LimitedConfig { max_entry_skus: 3 });
        let run = sched.run().unwrap();

        assert_eq!(run.metrics.transfered_layers, total_in);
        assert_eq!(run.metrics.remaining_layers, 0);
    }
}
