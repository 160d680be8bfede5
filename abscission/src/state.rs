//! Relaying cancellation through composed operations.

use std::{
	cell::Cell,
	fmt::{self, Debug, Formatter},
	rc::Rc,
};

use crate::{Signal, Slot};

/// Derives a child [`Signal`]/[`Slot`] pair from a parent [`Slot`], so that
/// an operation which itself issues nested asynchronous operations can relay
/// cancellation to them without knowing their concrete types.
///
/// Constructing a `State` from a connected parent slot installs a forwarding
/// handler into it that latches [`cancelled`](`State::cancelled`) and then
/// re-emits the private child signal. Nesting `N` levels deep is simply
/// constructing `N` states in sequence, each fed the previous level's slot;
/// a single `emit` at the outermost signal then reaches every level that is
/// still registered.
///
/// A `State` built from an unconnected slot is a pass-through no-op: its
/// [`slot`](`State::slot`) is unconnected and [`cancelled`](`State::cancelled`)
/// stays false — cancellation simply cannot propagate through a caller that
/// never offered a slot.
///
/// The `State` owns its child signal exclusively. Dropping it disposes of
/// the child signal (and whatever handler the nested operation left in it),
/// upon which the forwarding handler still installed in the parent becomes
/// inert.
#[must_use = "A `State` only relays cancellation while it is kept alive."]
pub struct State {
	inner: Option<Rc<Inner>>,
}

struct Inner {
	signal: Signal,
	cancelled: Cell<bool>,
}

impl State {
	/// Creates a `State` fed by `parent`, replacing any handler previously
	/// installed there.
	pub fn new(parent: &Slot) -> Self {
		if !parent.is_connected() {
			return Self { inner: None };
		}
		let inner = Rc::new(Inner {
			signal: Signal::new(),
			cancelled: Cell::new(false),
		});
		parent.emplace({
			// Weakly, so that this `State` stays the child signal's sole owner.
			let inner = Rc::downgrade(&inner);
			move || {
				let Some(inner) = inner.upgrade() else {
					return;
				};
				inner.cancelled.set(true);
				inner.signal.emit();
			}
		});
		Self { inner: Some(inner) }
	}

	/// Returns the child signal's slot, to be handed to the nested operation.
	///
	/// Repeatable and side-effect-free.
	#[must_use]
	pub fn slot(&self) -> Slot {
		self.inner
			.as_ref()
			.map_or_else(Slot::default, |inner| inner.signal.slot())
	}

	/// Returns whether cancellation has been observed through the parent slot.
	///
	/// The latch is monotonic: once true, it stays true for this `State`'s
	/// remaining lifetime, so an emission is never lost to a later check
	/// after a suspension point.
	#[must_use]
	pub fn cancelled(&self) -> bool {
		self.inner
			.as_ref()
			.is_some_and(|inner| inner.cancelled.get())
	}
}

impl Debug for State {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("State")
			.field("cancelled", &self.cancelled())
			.finish_non_exhaustive()
	}
}
