/// Tuning knobs for [`crate::UnlimitedExitScheduler`].
#[derive(Debug, Clone, Copy)]
pub struct UnlimitedConfig {
    /// Desired count of concurrent source pallets held open at once.
    pub start_pallets: usize,
}

/// Tuning knobs for [`crate::LimitedPositionScheduler`].
#[derive(Debug, Clone, Copy)]
pub struct LimitedConfig {
    /// Cap on distinct source SKUs the cell may hold loaded simultaneously;
    /// forwarded to the batch planner as `N`.
    pub max_entry_skus: usize,
}
