//! The binding lifecycle.
//!
//! A declarative host attaches a placeholder when an element enters the
//! view, updates it when the bound value changes and detaches it when the
//! element is removed. [`Bindings`] keeps one independent [`Placeholder`]
//! per element, keyed by whatever identifies elements in the host.
use std::{borrow::Borrow, collections::HashMap, fmt::Debug, hash::Hash};

use crate::{
    animator::Placeholder, hints::PlaceholderConfig, time::Scheduler, view::PlaceholderInput,
};

pub struct Bindings<K, E: PlaceholderInput, S: Scheduler> {
    scheduler: S,
    bound: HashMap<K, Placeholder<E, S>>,
}

impl<K, E, S> Bindings<K, E, S>
where
    K: Eq + Hash + Debug,
    E: PlaceholderInput,
    S: Scheduler,
{
    pub fn new(scheduler: S) -> Self {
        Bindings {
            scheduler,
            bound: HashMap::default(),
        }
    }

    /// Attach a placeholder to the element identified by `key`.
    ///
    /// An element that is already bound is detached first, so its old
    /// animation can't keep writing.
    pub fn attach(&mut self, key: K, input: E, config: PlaceholderConfig) -> Placeholder<E, S> {
        log::debug!("binding placeholder to {key:?}");
        let placeholder = Placeholder::attach(input, self.scheduler.clone(), config);
        if let Some(previous) = self.bound.insert(key, placeholder.clone()) {
            previous.detach();
        }
        placeholder
    }

    /// The bound value changed. Returns `false` if `key` isn't bound.
    pub fn update<Q>(&mut self, key: &Q, config: PlaceholderConfig) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + Debug + ?Sized,
    {
        match self.bound.get(key) {
            Some(placeholder) => {
                placeholder.reconfigure(config);
                true
            }
            None => {
                log::warn!("no placeholder bound to {key:?}");
                false
            }
        }
    }

    /// The element was removed. Returns `false` if `key` isn't bound.
    pub fn detach<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + Debug + ?Sized,
    {
        match self.bound.remove(key) {
            Some(placeholder) => {
                log::debug!("unbinding placeholder from {key:?}");
                placeholder.detach();
                true
            }
            None => false,
        }
    }

    /// Detach every placeholder for which `f` returns `true`.
    ///
    /// Returns how many were detached.
    pub fn detach_if(&mut self, mut f: impl FnMut(&K, &Placeholder<E, S>) -> bool) -> usize {
        let mut detached = 0;
        self.bound.retain(|key, placeholder| {
            if !f(key, placeholder) {
                return true;
            }
            log::debug!("unbinding placeholder from {key:?}");
            placeholder.detach();
            detached += 1;
            false
        });
        detached
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Placeholder<E, S>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.bound.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Placeholder<E, S>)> {
        self.bound.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.bound.keys()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<K, E: PlaceholderInput, S: Scheduler> Drop for Bindings<K, E, S> {
    fn drop(&mut self) {
        for (_, placeholder) in self.bound.drain() {
            placeholder.detach();
        }
    }
}
