//! Core types: card uids, RNG, configuration, errors.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;

pub use config::{BoardConfig, DEFAULT_SESSION_KEY};
pub use entity::{CardUid, UidAllocator};
pub use error::{BoardError, Result};
pub use rng::GameRng;
