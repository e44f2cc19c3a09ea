pub mod host;
pub mod machine;
pub mod script;

pub use host::{Host, HostCall, RecordingHost, TrackEvent};
pub use machine::{Machine, State};
