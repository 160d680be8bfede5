use std::{cell::Cell, rc::Rc};

use abscission::Signal;

struct Tally {
	drops: Rc<Cell<usize>>,
}

impl Drop for Tally {
	fn drop(&mut self) {
		self.drops.set(self.drops.get() + 1);
	}
}

#[test]
fn dropping_the_signal_releases_the_handler_without_invoking_it() {
	let calls = Rc::new(Cell::new(0));
	let drops = Rc::new(Cell::new(0));

	let signal = Signal::new();
	let slot = signal.slot();
	slot.emplace({
		let calls = Rc::clone(&calls);
		let tally = Tally {
			drops: Rc::clone(&drops),
		};
		move || {
			let _ = &tally;
			calls.set(calls.get() + 1);
		}
	});

	drop(signal);
	assert_eq!(calls.get(), 0);
	assert_eq!(drops.get(), 1);
}

#[test]
fn an_outlived_slot_degrades_to_unconnected() {
	let signal = Signal::new();
	let slot = signal.slot();
	slot.emplace(|| {});
	assert!(slot.is_connected());
	assert!(slot.has_handler());

	drop(signal);
	assert!(!slot.is_connected());
	assert!(!slot.has_handler());
	slot.clear(); // Outlived; must be a no-op.
}

#[test]
#[should_panic(expected = "unconnected `Slot`")]
fn emplace_through_an_outlived_slot_panics() {
	let signal = Signal::new();
	let slot = signal.slot();
	drop(signal);
	slot.emplace(|| {});
}

#[test]
fn outlived_slots_keep_their_identity() {
	let signal = Signal::new();
	let a = signal.slot();
	let b = signal.slot();
	drop(signal);

	// Both still name the same (dead) storage location…
	assert_eq!(a, b);
	// …which is distinct from the canonical unconnected value.
	assert_ne!(a, abscission::Slot::default());
}
