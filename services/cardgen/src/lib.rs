//! Review card generator shell.
//!
//! Wires request files and CLI flags to the cover loader and renderer, and
//! writes the resulting PNGs.

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod watch;

pub use config::{default_output_name, load_batch, load_request, BatchEntry, RequestOverrides};
pub use error::{CardgenError, Result};
pub use pipeline::{generate, BatchReport, GenerateOptions, Generated, Pipeline};
pub use watch::{Debouncer, Preview, WatchEvent};
