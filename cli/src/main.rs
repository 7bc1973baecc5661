mod cli;

use clap::Parser;
use common::logger::{TraceId, root_span};
use palletizing_core::DayDemand;
use rand::{SeedableRng, rngs::StdRng};
use scheduler::{LimitedConfig, LimitedPositionScheduler, SimOutcome, UnlimitedConfig, UnlimitedExitScheduler};
use tracing::info;

use cli::{Cli, StrategyArg};

/// A small built-in order book standing in for a day's historical rows,
/// already reduced to trays as the external data-loading collaborator
/// would deliver them.
fn demo_demand() -> DayDemand {
    let mut demand = DayDemand::new();
    demand.add_tray_row("WAREHOUSE-A".to_string(), 100, 120);
    demand.add_tray_row("WAREHOUSE-A".to_string(), 200, 32);
    demand.add_tray_row("WAREHOUSE-B".to_string(), 100, 60);
    demand.add_tray_row("WAREHOUSE-B".to_string(), 300, 180);
    demand.add_tray_row("WAREHOUSE-C".to_string(), 200, 48);
    demand
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    common::logger::init_tracing("palletizing-sim", cli.json_logs);

    let trace_id = TraceId::new("demo-day");
    let _span = root_span("simulate_day", &trace_id).entered();

    let demand = demo_demand();
    let total_layers = demand.total_remaining();
    info!(total_layers, strategy = %cli.strategy, "starting day simulation");

    match cli.strategy {
        StrategyArg::Unlimited => {
            let rng = StdRng::seed_from_u64(cli.seed);
            let sched = UnlimitedExitScheduler::new(demand, UnlimitedConfig { start_pallets: cli.start_pallets }, rng);
            let run = sched.run();
            report(&run.outcome, run.metrics.transfered_layers, run.metrics.batch_transfers, run.metrics.pallet_changes, run.completed.len());
        }
        StrategyArg::Limited => {
            let sched = LimitedPositionScheduler::new(demand, LimitedConfig { max_entry_skus: cli.max_entry_skus });
            let run = sched.run()?;
            report(&run.outcome, run.metrics.transfered_layers, run.metrics.batch_transfers, run.metrics.pallet_changes, run.completed.len());
        }
    }

    Ok(())
}

fn report(outcome: &SimOutcome, transfered_layers: u64, batch_transfers: u64, pallet_changes: u64, completed_pallets: usize) {
    match outcome {
        SimOutcome::Completed => info!(transfered_layers, batch_transfers, pallet_changes, completed_pallets, "day completed"),
        SimOutcome::Unsatisfied { remaining_layers } => {
            tracing::warn!(remaining_layers, transfered_layers, batch_transfers, completed_pallets, "day ended with unsatisfied demand")
        }
    }
}
