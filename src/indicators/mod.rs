pub mod registry;

pub use registry::{Category, IndicatorMetadata, Registry, UnitType};
