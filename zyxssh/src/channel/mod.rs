//! Channel layer: output accumulation and prompt handling.
//!
//! This module holds the pieces of the interactive session that do not
//! touch the network: the ANSI-stripping accumulation buffer and the
//! prompt/echo cleaner applied once a command's output is complete.

mod buffer;
mod prompt;

pub use buffer::OutputBuffer;
pub use prompt::{PromptMarkers, clean_output};
