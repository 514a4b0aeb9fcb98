//! # Command views
//!
//! Every command talks to exactly one view, picked from the `ViewType` at
//! startup. The view decides whether calls turn into terminal text or into
//! streaming JSON records; handlers never branch on the mode themselves.
//!
//! ```text
//! [ Handler ] --> new_refresh(ViewType) --> [ RefreshHuman ] --> View (streams + colorize)
//!                                      \--> [ RefreshJson  ] --> JsonView --> one record per line
//! ```
//!
//! ## Directory Guide
//!
//! * `refresh.rs`: the `Refresh` contract and its two implementations.
//! * `hooks/`: progress receivers registered with the engine (`CountHook`,
//!   `UiHook`, `JsonHook`). Must be safe to call from many threads.
//! * `operation.rs`: operation-level messages (interrupts, cancellation).
//! * `json/`: record envelope and payload schemas.
//! * `view.rs`, `streams.rs`, `colorize.rs`, `format.rs`: shared terminal
//!   plumbing and text formatting.

pub mod colorize;
pub mod error;
pub mod format;
pub mod hooks;
pub mod json;
pub mod operation;
pub mod output;
pub mod refresh;
pub mod streams;
pub mod view;
pub mod view_type;

pub use colorize::Colorize;
pub use error::{Error, Result};
pub use hooks::{CountHook, Hook, JsonHook, ResourceCounts, UiHook};
pub use json::JsonView;
pub use operation::{Operation, OperationHuman, OperationJson, PlanMode};
pub use refresh::{Refresh, RefreshHuman, RefreshJson, new_refresh};
pub use streams::{CapturedOutput, Streams};
pub use view::View;
pub use view_type::ViewType;
