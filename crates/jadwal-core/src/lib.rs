//! jadwal-core: Core library for the jadwal booking gateway
//!
//! Provides the schedule data model and file-backed store, the text
//! command parser, reply composition, and configuration.

pub mod command;
pub mod config;
pub mod error;
pub mod reply;
pub mod schedule;

pub use command::{parse_command, Command};
pub use config::Config;
pub use error::{Error, Result};
pub use schedule::{Schedule, ScheduleStore, SLOT_LABELS};
