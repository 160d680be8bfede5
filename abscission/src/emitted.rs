//! Awaiting cancellation instead of handling it in a callback.

use std::{
	future::Future,
	pin::Pin,
	task::{Context, Poll},
};

use futures_channel::oneshot::{self, Receiver};
use pin_project::pin_project;

use crate::Slot;

impl Slot {
	/// Subscribes to the signal's next emission as a [`Future`].
	///
	/// This installs a handler — replacing any installed one, as the slot
	/// stays single-subscriber — that completes the returned [`Emitted`] on
	/// the first emission. Later emissions are absorbed.
	///
	/// The future never resolves iff `self` is unconnected, once the
	/// installed handler is itself replaced through an equal slot, or once
	/// the signal is dropped: in each of those cases, cancellation can no
	/// longer be delivered through this registration.
	///
	/// ```
	/// use abscission::Signal;
	///
	/// let signal = Signal::new();
	/// let emitted = signal.slot().emitted();
	///
	/// signal.emit();
	/// futures_lite::future::block_on(emitted);
	/// ```
	pub fn emitted(&self) -> Emitted {
		let (sender, receiver) = oneshot::channel();
		if self.is_connected() {
			let mut sender = Some(sender);
			self.emplace(move || {
				if let Some(sender) = sender.take() {
					let _ = sender.send(());
				}
			});
		}
		Emitted {
			receiver,
			disconnected: false,
		}
	}
}

/// Resolves once the [`Signal`](`crate::Signal`) behind the subscribed
/// [`Slot`] is first emitted. See [`Slot::emitted`].
#[pin_project]
#[must_use = "Futures do nothing unless you `.await` or poll them."]
pub struct Emitted {
	#[pin]
	receiver: Receiver<()>,
	disconnected: bool,
}

impl Future for Emitted {
	type Output = ();

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let this = self.project();
		if *this.disconnected {
			return Poll::Pending;
		}
		match this.receiver.poll(cx) {
			Poll::Ready(Ok(())) => Poll::Ready(()),
			Poll::Ready(Err(oneshot::Canceled)) => {
				// The handler was dropped unsent; emission can't arrive anymore.
				*this.disconnected = true;
				Poll::Pending
			}
			Poll::Pending => Poll::Pending,
		}
	}
}
