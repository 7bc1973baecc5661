use palletizing_core::{DayDemand, DestPallet, IdGen, LAYERS_PER_PALLET, SimError, SkuAllocation, SourcePallet};
use rand::Rng;
use tracing::{debug, instrument};

use crate::config::UnlimitedConfig;
use crate::metrics::SimulationMetrics;
use crate::outcome::SimOutcome;
use crate::swap_policy::run_swap_pass;

/// Greedy simulator with an unbounded number of concurrent output pallets
/// (strategy A). Entry pallets are refreshed wholesale at the end of every
/// outer pass by the swap policy, so the fleet of SKUs being worked changes
/// pass to pass.
pub struct UnlimitedExitScheduler<R: Rng> {
    demand: DayDemand,
    alloc: SkuAllocation,
    ids: IdGen,
    entry_pallets: Vec<SourcePallet>,
    exit_pallets: Vec<DestPallet>,
    completed: Vec<DestPallet>,
    metrics: SimulationMetrics,
    rng: R,
}

/// Final state returned once a day's simulation has terminated.
pub struct SimRun {
    pub outcome: SimOutcome,
    pub metrics: SimulationMetrics,
    pub completed: Vec<DestPallet>,
}

impl<R: Rng> UnlimitedExitScheduler<R> {
    #[instrument(skip(demand, rng), fields(start_pallets = config.start_pallets))]
    pub fn new(demand: DayDemand, config: UnlimitedConfig, rng: R) -> Self {
        let mut alloc = SkuAllocation::from_day_demand(&demand);
        let mut ids = IdGen::new();
        let total_layers = demand.total_remaining();

        let skus = alloc.top_skus(config.start_pallets);
        let entry_pallets: Vec<SourcePallet> =
            skus.into_iter().map(|sku| SourcePallet::new(sku, &mut ids)).collect();
        let total_pallets = entry_pallets.len() as u64;

        Self {
            demand,
            alloc,
            ids,
            entry_pallets,
            exit_pallets: Vec::new(),
            completed: Vec::new(),
            metrics: SimulationMetrics::new(total_pallets, total_layers),
            rng,
        }
    }

    /// Runs the day to completion or to a declared termination condition.
    #[instrument(skip(self), fields(initial_entry_pallets = self.entry_pallets.len()))]
    pub fn run(mut self) -> SimRun {
        while self.demand.total_remaining() > 0 && self.alloc.total_remaining() > 0 {
            if self.entry_pallets.is_empty() {
                return self.finish(SimOutcome::Unsatisfied {
                    remaining_layers: self.demand.total_remaining(),
                });
            }

            for i in 0..self.entry_pallets.len() {
                if self.entry_pallets[i].empty() {
                    continue;
                }
                let sku = self.entry_pallets[i].sku;
                let mut destinations = self.demand.destinations_for_sku(sku);

                while !self.entry_pallets[i].empty() && !destinations.is_empty() {
                    self.metrics.remaining_layers = self.demand.total_remaining();
                    self.metrics.snapshot();

                    let matched = self
                        .exit_pallets
                        .iter()
                        .position(|p| !p.complete() && destinations.iter().any(|d| d == &p.destination));

                    let j = match matched {
                        Some(j) => j,
                        None => {
                            let dest = destinations[0].clone();
                            self.exit_pallets.push(DestPallet::new(dest, &mut self.ids));
                            self.metrics.num_exit_pallets += 1;
                            self.exit_pallets.len() - 1
                        }
                    };

                    transfer_batch(i, j, &mut self.entry_pallets, &mut self.exit_pallets, &mut self.demand, &mut self.metrics)
                        .expect("scheduler invariant violated during batch transfer");

                    destinations = self.demand.destinations_for_sku(sku);

                    let mut retire = Vec::new();
                    for (k, exit) in self.exit_pallets.iter().enumerate() {
                        if exit.complete() || !destination_has_demand(&self.demand, &exit.destination) {
                            retire.push(k);
                        }
                    }
                    for &k in retire.iter().rev() {
                        let pallet = self.exit_pallets.remove(k);
                        if pallet.complete() {
                            self.metrics.num_completed_pallets += 1;
                        }
                        self.completed.push(pallet);
                    }
                    self.metrics.num_exit_pallets = self.exit_pallets.len() as u64;
                }
            }

            let changes = run_swap_pass(&mut self.entry_pallets, &mut self.alloc, &mut self.ids, &mut self.rng);
            self.metrics.record_pallet_changes(changes);
        }

        let outcome = if self.demand.total_remaining() == 0 {
            SimOutcome::Completed
        } else {
            SimOutcome::Unsatisfied { remaining_layers: self.demand.total_remaining() }
        };
        self.finish(outcome)
    }

    fn finish(mut self, outcome: SimOutcome) -> SimRun {
        self.metrics.remaining_layers = self.demand.total_remaining();
        self.metrics.num_exit_pallets = self.exit_pallets.len() as u64;
        debug!(?outcome, remaining = self.metrics.remaining_layers, "strategy A finished");
        SimRun { outcome, metrics: self.metrics, completed: self.completed }
    }
}

fn destination_has_demand(demand: &DayDemand, destination: &str) -> bool {
    demand.rows().any(|(dest, _, remaining)| dest == destination && remaining > 0)
}

/// Transfers `min(demand, source stock, dest headroom)` layers from
/// `entry_pallets[i]` into `exit_pallets[j]`, counting as exactly one batch
/// transfer regardless of how many layers moved.
fn transfer_batch(
    i: usize,
    j: usize,
    entry_pallets: &mut [SourcePallet],
    exit_pallets: &mut [DestPallet],
    demand: &mut DayDemand,
    metrics: &mut SimulationMetrics,
) -> Result<(), SimError> {
    let sku = entry_pallets[i].sku;
    let destination = exit_pallets[j].destination.clone();

    let needed = demand.layers_needed(&destination, sku);
    let source_remaining = entry_pallets[i].remaining() as u64;
    let dest_headroom = LAYERS_PER_PALLET as u64 - exit_pallets[j].len() as u64;
    let q = needed.min(source_remaining).min(dest_headroom);

    if q == 0 {
        return Ok(());
    }

    for _ in 0..q {
        let layer = entry_pallets[i].take_top()?;
        exit_pallets[j].add(layer)?;
        demand.decrement(&destination, sku);
        metrics.record_layer_transfer();
    }
    metrics.record_batch_transfer();
    Ok(())
}
