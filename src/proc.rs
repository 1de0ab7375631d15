pub mod probe;
pub mod sampler;
pub mod supervisor;

pub use probe::{ResourceProbe, Snapshot};
pub use sampler::{Sample, TimeSeries};
pub use supervisor::Supervisor;
