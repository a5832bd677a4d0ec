pub mod analysis;
pub mod grouping;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod serialization;
pub mod tensor;

mod traits;

pub use grouping::DirectoryScan;
pub use pipeline::{ProcessConfig, process_inputs, process_timestamp, run_processing};
pub use report::{RunReport, TimestampReport, render_human_summary, write_run_report};
pub use traits::{DiscoveredInputs, InputDiscovery};
