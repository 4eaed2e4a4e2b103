use std::cell::RefCell;

use super::Subscriber;

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Synchronous observer registry. `notify` calls every subscriber in registration order,
/// on the caller's stack, with no batching.
pub struct ChangeNotifier {
    subscribers: RefCell<Vec<(SubscriptionId, Box<dyn Subscriber>)>>,
    next_id: usize,
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &format!("<{} subscribers>", self.len()))
            .finish()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.borrow_mut().push((id, subscriber));
        id
    }

    /// Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    pub fn notify(&self) {
        for (_, subscriber) in &mut *self.subscribers.borrow_mut() {
            subscriber.update();
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
