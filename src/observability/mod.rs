//! Structured logging to a rotating JSON log file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (JSON) → RotatingFile → mealshare.log
//! ```
//!
//! # Features
//!
//! - **File Output**: one JSON object per event in `<data dir>/mealshare.log`
//! - **Automatic Rotation**: files rotate at 10MB with 3-backup retention
//! - **Span Context**: each event carries its enclosing span and fields
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`file_writer`]: rotating file writer

mod file_writer;
mod init;

pub use file_writer::RotatingFile;
pub use init::init_tracing;
