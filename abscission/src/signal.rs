//! The emission side of a cancellation point.

use std::{
	cell::RefCell,
	fmt::{self, Debug, Formatter},
	rc::Rc,
};

use crate::{handler::HandlerBox, Slot};

/// The storage location shared between a [`Signal`] and its [`Slot`]s.
///
/// Only the owning [`Signal`] holds this strongly; every [`Slot`] carries a
/// [`Weak`](`std::rc::Weak`) back-reference, so dropping the signal
/// deterministically releases the installed handler.
pub(crate) struct SlotStorage {
	pub(crate) handler: RefCell<Option<HandlerBox>>,
}

/// A cancellation signal with a single slot.
///
/// At most one handler is installed at a time; installing a new one always
/// supersedes and disposes of the previous one. Dropping the signal
/// synchronously releases any still-installed handler's memory *without*
/// invoking it — emit explicitly before teardown iff delivery is required.
///
/// The signal is the sole owner of its slot storage. Its [`Slot`]s never
/// keep it alive, and observe its destruction by degrading to the
/// unconnected state.
#[must_use = "A `Signal` only delivers cancellation while it is kept alive."]
pub struct Signal {
	storage: Rc<SlotStorage>,
}

impl Signal {
	/// Creates a new `Signal` without an installed handler.
	pub fn new() -> Self {
		Self {
			storage: Rc::new(SlotStorage {
				handler: RefCell::new(None),
			}),
		}
	}

	/// Emits the signal, invoking the installed handler, if any.
	///
	/// Emitting without an installed handler is a valid no-op, not an error.
	/// Emission is fire-and-forget: this neither blocks on nor observes
	/// whatever the handler sets in motion, and the handler stays installed
	/// afterwards, so a second `emit` invokes it again.
	///
	/// # Panics
	///
	/// Iff the handler accesses this signal's own slot, or emits this signal
	/// again, while it runs.
	pub fn emit(&self) {
		if let Some(handler) = self.storage.handler.borrow_mut().as_mut() {
			handler.invoke();
		}
	}

	/// Returns a [`Slot`] bound to this signal's storage location.
	///
	/// Cheap, side-effect-free and repeatable; all slots of one signal are
	/// [equal](`PartialEq`) and interchangeable, and installing through any
	/// of them replaces what the others see.
	#[must_use]
	pub fn slot(&self) -> Slot {
		Slot::new(Rc::downgrade(&self.storage))
	}
}

impl Default for Signal {
	fn default() -> Self {
		Self::new()
	}
}

impl Debug for Signal {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("has_handler", &self.slot().has_handler())
			.finish_non_exhaustive()
	}
}
