//! Widget system: tag registry and intrinsic measurement.

pub mod tag;
pub mod traits;

pub use tag::{Tag, UnknownTag};
pub use traits::{
    AssetSizes, AssetTable, MeasureContext, MeasureError, MonospaceMetrics, TextMetrics, Widget,
};
