#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(unreachable_pub)]

//! Single-subscriber cancellation signals for composed asynchronous operations.
//!
//! A [`Signal`] is one cancellation point. Its [`Slot`]s install, replace or
//! remove the type-erased handler that runs on [`Signal::emit`], and [`State`]
//! derives a child signal/slot pair from a parent slot so that one outer
//! emission reaches arbitrarily deeply nested operations. [`Slot::emitted`]
//! exposes the same subscription as a [`Future`](`core::future::Future`).
//!
//! Everything here executes on one logical sequence of execution: the types
//! are deliberately neither [`Send`] nor [`Sync`], no internal locking takes
//! place, and emission, installation and teardown all run to completion
//! without suspension. Emission is fire-and-forget.
//!
//! ```
//! use abscission::{Signal, State};
//!
//! let root = Signal::new();
//! let state = State::new(&root.slot());
//! let nested = State::new(&state.slot());
//!
//! assert!(!state.cancelled());
//! root.emit();
//! assert!(state.cancelled());
//! assert!(nested.cancelled());
//! ```

mod handler;

mod signal;
pub use signal::Signal;

mod slot;
pub use slot::Slot;

mod state;
pub use state::State;

mod emitted;
pub use emitted::Emitted;
