//! In-place storage for type-erased cancellation handlers.
//!
//! A handler is constructed directly into a raw [`Block`]. The block is
//! retained when the handler is disposed of along the replacement path, so
//! that an operation re-installing its handler on every step (a retry loop,
//! say) only touches the allocator when the new occupant outgrows it.

use std::{
	alloc::{self, Layout},
	mem::ManuallyDrop,
	ptr::{self, NonNull},
};

use scopeguard::ScopeGuard;

/// Capability surface kept for an installed handler after type erasure.
trait Invoke {
	fn invoke(&mut self);
}

impl<H: FnMut()> Invoke for H {
	fn invoke(&mut self) {
		self();
	}
}

/// A raw heap allocation that may outlive the handler constructed in it.
///
/// `layout` records the *allocated* capacity, which may exceed the current
/// occupant's needs. Deallocation always uses this original layout.
pub(crate) struct Block {
	ptr: NonNull<u8>,
	layout: Layout,
}

impl Block {
	fn allocate(occupant: Layout) -> Self {
		// Zero-sized handlers still get a real allocation, so that block
		// ownership stays uniform.
		let layout = Layout::from_size_align(occupant.size().max(1), occupant.align())
			.expect("unreachable");
		// SAFETY: `layout` has non-zero size.
		let ptr = unsafe { alloc::alloc(layout) };
		let Some(ptr) = NonNull::new(ptr) else {
			alloc::handle_alloc_error(layout)
		};
		Self { ptr, layout }
	}

	fn fits(&self, occupant: Layout) -> bool {
		self.layout.size() >= occupant.size() && self.layout.align() >= occupant.align()
	}
}

impl Drop for Block {
	fn drop(&mut self) {
		// SAFETY: `ptr` was allocated with `layout` in `Block::allocate`.
		unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
	}
}

/// A type-erased zero-argument handler, constructed in place in a [`Block`].
pub(crate) struct HandlerBox {
	/// Points at the occupant at the start of `block`.
	erased: NonNull<dyn Invoke>,
	block: Block,
}

impl HandlerBox {
	/// Moves `handler` into `reclaimed` iff it fits, else into a fresh block.
	///
	/// An unsuitable `reclaimed` block is released *before* the replacement
	/// is allocated, keeping peak usage flat across replacements.
	pub(crate) fn emplace_in<H: FnMut() + 'static>(reclaimed: Option<Block>, handler: H) -> Self {
		let occupant = Layout::new::<H>();
		let block = match reclaimed {
			Some(block) if block.fits(occupant) => block,
			unsuitable => {
				drop(unsuitable);
				Block::allocate(occupant)
			}
		};
		let ptr = block.ptr.cast::<H>();
		// SAFETY: `block` is at least `occupant`-sized and -aligned, and
		// exclusively owned here.
		unsafe { ptr.as_ptr().write(handler) };
		// Unsizing must happen on the raw pointer; only the vtable is added.
		let erased: *mut dyn Invoke = ptr.as_ptr();
		Self {
			// SAFETY: Derived from the pointer just written through.
			erased: unsafe { NonNull::new_unchecked(erased) },
			block,
		}
	}

	/// Calls the occupant. May be called repeatedly.
	pub(crate) fn invoke(&mut self) {
		// SAFETY: `erased` points at the live occupant of `block`.
		unsafe { self.erased.as_mut() }.invoke();
	}

	/// Drops the occupant and returns the backing [`Block`] for reuse.
	pub(crate) fn into_block(self) -> Block {
		let this = ManuallyDrop::new(self);
		// SAFETY: `this` is never dropped, so `block` is moved out exactly once.
		// The guard still releases it iff the occupant's `Drop` unwinds below.
		let block = scopeguard::guard(unsafe { ptr::read(&this.block) }, drop);
		// SAFETY: The occupant is live and is dropped exactly once here, as
		// `HandlerBox::drop` is bypassed through `ManuallyDrop` above.
		unsafe { ptr::drop_in_place(this.erased.as_ptr()) };
		ScopeGuard::into_inner(block)
	}
}

impl Drop for HandlerBox {
	fn drop(&mut self) {
		// SAFETY: `erased` points at the live occupant of `block`.
		unsafe { ptr::drop_in_place(self.erased.as_ptr()) };
		// `block` deallocates afterwards.
	}
}
