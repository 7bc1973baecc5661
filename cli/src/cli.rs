use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Unlimited,
    Limited,
}

/// Runs one day of the palletizing simulator against a built-in demo order
/// book and prints the resulting metrics.
#[derive(Debug, Parser)]
#[clap(name = "palletizing-sim", version)]
pub struct Cli {
    /// Which scheduling strategy to run.
    #[clap(long, value_enum, default_value_t = StrategyArg::Unlimited)]
    pub strategy: StrategyArg,

    /// Strategy A only: desired count of concurrent source pallets.
    #[clap(long, default_value_t = 2)]
    pub start_pallets: usize,

    /// Strategy B only: max distinct source SKUs per batch.
    #[clap(long, default_value_t = 3)]
    pub max_entry_skus: usize,

    /// Seed for the swap policy's RNG (strategy A only).
    #[clap(long, default_value_t = 42)]
    pub seed: u64,

    /// Emit logs as JSON instead of pretty-printed text.
    #[clap(long)]
    pub json_logs: bool,
}

impl std::fmt::Display for StrategyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StrategyArg::Unlimited => "unlimited",
            StrategyArg::Limited => "limited",
        };
        f.write_str(s)
    }
}
