//! Run orchestration, kept apart from argument parsing so the pipeline can
//! be driven programmatically without clap.

pub mod orchestration;
pub mod parameters;

pub use orchestration::{run_sync, SyncOutcome};
pub use parameters::{
    resolve_parameters, ExplicitParameters, Prompter, ResolvedParameters, SyncParameters,
    TerminalPrompter,
};
