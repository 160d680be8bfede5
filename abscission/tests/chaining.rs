use std::{cell::Cell, rc::Rc};

use abscission::{Signal, Slot, State};

#[test]
fn state_latches_and_forwards() {
	let root = Signal::new();
	let state = State::new(&root.slot());

	let nested_hits = Rc::new(Cell::new(0));
	state.slot().emplace({
		let nested_hits = Rc::clone(&nested_hits);
		move || nested_hits.set(nested_hits.get() + 1)
	});

	assert!(!state.cancelled());
	assert_eq!(nested_hits.get(), 0);

	root.emit();
	assert!(state.cancelled());
	assert_eq!(nested_hits.get(), 1);

	// A second emission leaves the latch set and propagates again.
	root.emit();
	assert!(state.cancelled());
	assert_eq!(nested_hits.get(), 2);
}

#[test]
fn a_state_from_an_unconnected_slot_is_a_pass_through_no_op() {
	let state = State::new(&Slot::default());
	assert!(!state.slot().is_connected());
	assert!(!state.cancelled());

	let unrelated = Signal::new();
	unrelated.emit();
	assert!(!state.cancelled());
}

#[test]
fn chaining_reaches_every_level() {
	let root = Signal::new();
	let first = State::new(&root.slot());
	let second = State::new(&first.slot());

	root.emit();
	assert!(first.cancelled());
	assert!(second.cancelled());
}

#[test]
fn deep_chains_propagate_in_one_emission() {
	let root = Signal::new();
	let mut states = Vec::new();
	let mut slot = root.slot();
	for _ in 0..8 {
		let state = State::new(&slot);
		slot = state.slot();
		states.push(state);
	}

	root.emit();
	assert!(states.iter().all(State::cancelled));
}

#[test]
fn a_state_replaces_the_parent_handler() {
	let root = Signal::new();
	let displaced_calls = Rc::new(Cell::new(0));
	root.slot().emplace({
		let displaced_calls = Rc::clone(&displaced_calls);
		move || displaced_calls.set(displaced_calls.get() + 1)
	});

	let state = State::new(&root.slot());
	root.emit();
	assert_eq!(displaced_calls.get(), 0);
	assert!(state.cancelled());
}

#[test]
fn replacing_the_parent_handler_detaches_the_state() {
	let root = Signal::new();
	let state = State::new(&root.slot());

	root.slot().emplace(|| {});
	root.emit();
	assert!(!state.cancelled());
}

#[test]
fn a_dropped_state_leaves_the_parent_handler_inert() {
	let root = Signal::new();
	let state = State::new(&root.slot());
	let child_slot = state.slot();

	drop(state);
	// The child signal went with the state…
	assert!(!child_slot.is_connected());
	// …while the forwarding handler stays installed, but inert.
	assert!(root.slot().has_handler());
	root.emit();
}

#[test]
fn sibling_states_each_get_their_own_child_signal() {
	let root = Signal::new();
	let state = State::new(&root.slot());
	assert_ne!(state.slot(), root.slot());
	assert_eq!(state.slot(), state.slot());
}
