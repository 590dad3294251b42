//! Reactive primitives.
//!
//! - [`Observable`]: shared value cell with synchronous, ordered change
//!   notification.
//! - [`Subscription`]: handle for removing a subscriber.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). The types are
//! `!Send`, so the compiler keeps them on one thread.

pub mod observable;

pub use observable::{Observable, Subscription};
