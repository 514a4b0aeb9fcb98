//! Streaming JSON records: one object per line on stdout.

pub mod hook;
pub mod message;
pub mod outputs;
mod view;

pub use hook::{HookRecord, ResourceRecord};
pub use message::{Level, MessageType};
pub use outputs::{JsonOutput, JsonOutputs, outputs_from_map};
pub use view::JsonView;
