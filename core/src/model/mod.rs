mod day_demand;
mod dest_pallet;
mod layer;
mod sku_allocation;
mod source_pallet;

pub use day_demand::DayDemand;
pub use dest_pallet::DestPallet;
pub use layer::Layer;
pub use sku_allocation::SkuAllocation;
pub use source_pallet::SourcePallet;
