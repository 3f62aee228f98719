//! Coordinator Module
//!
//! Turns "give me a screenshot of camera C" into as few backend calls as
//! possible within one request scope.

mod key_locks;
mod screenshot;

pub(crate) use key_locks::KeyLocks;
pub use screenshot::{CoordinatorSettings, ScreenshotCoordinator};
