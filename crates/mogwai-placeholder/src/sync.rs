//! Shared values for the single-threaded event loop.
//!
//! Everything in this crate runs inside one event loop (the browser's, or a
//! [`ManualClock`](crate::time::ManualClock) driving a test), so these are
//! thin wrappers around `Rc<RefCell<T>>` instead of locks.
use std::{
    cell::{Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};

/// A "shared" value.
///
/// Equivalent to `Rc<RefCell<T>>`.
#[derive(Default)]
pub struct Shared<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: PartialEq> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.get() == *other.get()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Shared").field(&*self.get()).finish()
    }
}

impl<T> Shared<T> {
    /// Create a new shared `T`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Get a reference to the inner `T`.
    ///
    /// ## Panics
    /// Panics if the value is currently borrowed mutably.
    pub fn get(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    /// Get a mutable reference to the inner `T`.
    ///
    /// ## Panics
    /// Panics if the value is currently borrowed.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    /// Set the inner `T`.
    ///
    /// Returns the previous value.
    pub fn set(&self, value: T) -> T {
        std::mem::replace(&mut *self.inner.borrow_mut(), value)
    }

    /// Returns a weak handle that does not keep the value alive.
    pub fn downgrade(&self) -> WeakShared<T> {
        WeakShared {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Returns `true` if both handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> Shared<T> {
    /// Clone the inner `T` out of the cell.
    pub fn cloned(&self) -> T {
        self.get().clone()
    }
}

/// A weak "shared" value, see [`Shared::downgrade`].
pub struct WeakShared<T> {
    inner: Weak<RefCell<T>>,
}

impl<T> Clone for WeakShared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> WeakShared<T> {
    /// Returns the shared value if it is still alive.
    pub fn upgrade(&self) -> Option<Shared<T>> {
        self.inner.upgrade().map(|inner| Shared { inner })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn set_returns_previous() {
        let shared = Shared::new(1);
        let other = shared.clone();
        assert_eq!(1, shared.set(2));
        assert_eq!(2, *other.get());
        assert!(shared.ptr_eq(&other));
    }

    #[test]
    fn weak_does_not_keep_alive() {
        let shared = Shared::new("hello".to_string());
        let weak = shared.downgrade();
        assert_eq!("hello", weak.upgrade().unwrap().cloned());
        drop(shared);
        assert!(weak.upgrade().is_none());
    }
}
