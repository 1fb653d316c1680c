//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the host process.
//!
//! # Tasks
//! - Sweeper: removes expired cache entries at a fixed interval

mod sweeper;

pub use sweeper::{Sweeper, SweeperState};
