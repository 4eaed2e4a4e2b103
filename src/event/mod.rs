mod bus;

pub use bus::{ChangeNotifier, SubscriptionId};

/// Receives a payload-free notice after every document mutation and re-reads whatever
/// state it displays.
pub trait Subscriber {
    fn update(&mut self);
}

impl<F: FnMut()> Subscriber for F {
    fn update(&mut self) {
        self()
    }
}
