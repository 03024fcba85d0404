pub mod economy;
pub mod history;
pub mod insight;
pub mod metrics;
pub mod regime;
pub mod report;

pub use metrics::{DerivedMetrics, RegimeInputs};
pub use regime::{classify_at_point, RegimeLabel, RegimeResult, RegimeScore};
pub use report::RegimeReport;
