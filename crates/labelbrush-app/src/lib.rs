//! LabelBrush application shell.
//!
//! Replays recorded pointer input through the brush engine and writes the
//! resulting label image and annotations to disk.

pub mod host;
pub mod replay;
pub mod script;

pub use host::ReplayHost;
pub use replay::{ReplayError, ReplayOutcome, run, run_file};
pub use script::{ReplayEvent, ReplayScript};
