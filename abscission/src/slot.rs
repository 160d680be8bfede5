//! The subscription side of a cancellation point.

use std::{
	fmt::{self, Debug, Formatter},
	rc::Weak,
};

use crate::{handler::HandlerBox, signal::SlotStorage};

/// A slot associated with a cancellation [`Signal`](`crate::Signal`).
///
/// A `Slot` is a non-owning back-reference to the storage location inside
/// exactly one signal — it never keeps that signal alive. Each operation
/// validates the reference first: once the signal is dropped, its slots
/// degrade to the unconnected state instead of dangling.
///
/// [`Default`] yields an unconnected slot. All unconnected slots are
/// mutually [equal](`PartialEq`), as the single canonical value for "no
/// cancellation point was offered".
#[derive(Clone, Default)]
pub struct Slot {
	storage: Weak<SlotStorage>,
}

impl Slot {
	pub(crate) fn new(storage: Weak<SlotStorage>) -> Self {
		Self { storage }
	}

	/// Installs `handler`, to be called on each emission of the signal.
	///
	/// Any previously installed handler is disposed of first and is never
	/// called again. Its backing memory is retained and reused for `handler`
	/// iff the latter's footprint fits, so re-installation along a retry
	/// loop stays allocation-free. Installation is atomic: should it fail,
	/// the slot is left empty, never half-constructed.
	///
	/// # Panics
	///
	/// Iff `self` is not [connected](`Slot::is_connected`), or when called
	/// from within this slot's own running handler (including the replaced
	/// handler's destructor).
	pub fn emplace<H: FnMut() + 'static>(&self, handler: H) {
		let storage = self
			.storage
			.upgrade()
			.expect("attempted to install a handler through an unconnected `Slot`");
		let mut installed = storage.handler.borrow_mut();
		let reclaimed = installed.take().map(HandlerBox::into_block);
		*installed = Some(HandlerBox::emplace_in(reclaimed, handler));
	}

	/// Disposes of the installed handler and releases its memory, if any.
	///
	/// Idempotent, and a no-op on empty, unconnected and outlived slots.
	pub fn clear(&self) {
		if let Some(storage) = self.storage.upgrade() {
			let disposed = storage.handler.borrow_mut().take();
			// Dropped outside the borrow, so the handler's destructor may
			// observe the (now empty) slot.
			drop(disposed);
		}
	}

	/// Returns whether this slot currently references a live signal.
	///
	/// A default-constructed slot is unconnected from the start; a slot
	/// whose signal has been dropped becomes unconnected retroactively.
	#[must_use]
	pub fn is_connected(&self) -> bool {
		self.storage.strong_count() > 0
	}

	/// Returns whether this slot is connected and a handler is installed.
	#[must_use]
	pub fn has_handler(&self) -> bool {
		self.storage
			.upgrade()
			.is_some_and(|storage| storage.handler.borrow().is_some())
	}
}

impl Debug for Slot {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Slot")
			.field("is_connected", &self.is_connected())
			.finish_non_exhaustive()
	}
}

impl PartialEq for Slot {
	/// Slots are equal iff they reference the same storage location.
	fn eq(&self, other: &Self) -> bool {
		Weak::ptr_eq(&self.storage, &other.storage)
	}
}

impl Eq for Slot {}
