pub mod case;
pub mod commands;
pub mod constants;
pub mod diagnostics;
pub mod params;
pub mod query;
pub mod simhist_errors;
pub mod tagged_binary;
pub mod time_history;

pub use case::{Case, SegmentLoad, SnapshotFile};
pub use commands::{Command, CommandArgs, CommandOutput, CommandReport};
pub use diagnostics::Diagnostics;
pub use params::{SimhistParams, SimhistParamsBuilder};
pub use simhist_errors::SimhistError;
