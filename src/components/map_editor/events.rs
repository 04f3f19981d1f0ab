//! Change notification for the graph and map window.
//!
//! A [`Subscribers`] list delivers notifications synchronously, in
//! subscription order, against a snapshot of the list taken at publish time:
//! a subscriber added during notification only receives later notifications.
//! Subscribers are read-only observers (typically a redraw flag); mutating
//! the publishing object from inside a callback would risk reentrant
//! publishes and is not supported.

use std::rc::Rc;

/// An ordered list of change callbacks.
#[derive(Clone, Default)]
pub struct Subscribers {
	callbacks: Vec<Rc<dyn Fn()>>,
}

impl Subscribers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a callback invoked after every mutation of the owner.
	pub fn subscribe(&mut self, callback: impl Fn() + 'static) {
		self.callbacks.push(Rc::new(callback));
	}

	/// Invoke all currently registered callbacks in subscription order.
	pub fn notify(&self) {
		let snapshot: Vec<Rc<dyn Fn()>> = self.callbacks.clone();
		for callback in snapshot {
			callback();
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn notifies_every_subscriber_in_order() {
		let mut subscribers = Subscribers::new();
		let order: Rc<std::cell::RefCell<Vec<u8>>> = Rc::default();

		let first = order.clone();
		subscribers.subscribe(move || first.borrow_mut().push(1));
		let second = order.clone();
		subscribers.subscribe(move || second.borrow_mut().push(2));

		subscribers.notify();
		assert_eq!(*order.borrow(), vec![1, 2]);
	}

	#[test]
	fn notify_counts_accumulate_per_publish() {
		let mut subscribers = Subscribers::new();
		let count = Rc::new(Cell::new(0));
		let seen = count.clone();
		subscribers.subscribe(move || seen.set(seen.get() + 1));

		subscribers.notify();
		subscribers.notify();
		assert_eq!(count.get(), 2);
	}
}
