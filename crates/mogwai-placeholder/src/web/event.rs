//! Awaitable DOM events.
//!
//! An [`EventListener`] registers one Javascript callback on a target and
//! hands out futures that resolve at the next occurrence of the event. The
//! callback is removed from the target when the last clone of the listener
//! is dropped.
use std::{borrow::Cow, cell::RefCell, pin::Pin, rc::Rc, task::Waker};

use wasm_bindgen::{JsCast, JsValue, prelude::Closure};

#[derive(Clone, Default)]
struct Occurrence {
    event: Rc<RefCell<Option<web_sys::Event>>>,
    wakers: Rc<RefCell<Vec<Waker>>>,
}

impl Occurrence {
    fn resolve(self, event: web_sys::Event) {
        *self.event.borrow_mut() = Some(event);
        for waker in self.wakers.take() {
            waker.wake();
        }
    }
}

impl std::future::Future for Occurrence {
    type Output = web_sys::Event;

    fn poll(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Self::Output> {
        if let Some(event) = self.event.borrow().as_ref() {
            return std::task::Poll::Ready(event.clone());
        }
        self.wakers.borrow_mut().push(cx.waker().clone());
        std::task::Poll::Pending
    }
}

struct Registration {
    target: web_sys::EventTarget,
    event_name: Cow<'static, str>,
    callback: Closure<dyn FnMut(JsValue)>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        log::trace!("removing '{}' listener", self.event_name);
        let _ = self.target.remove_event_listener_with_callback(
            &self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// A DOM event listener whose occurrences can be awaited.
#[derive(Clone)]
pub struct EventListener {
    registration: Rc<Registration>,
    next: Rc<RefCell<Occurrence>>,
}

impl EventListener {
    /// Listen for `event_name` on `target`.
    pub fn new(
        target: impl AsRef<web_sys::EventTarget>,
        event_name: impl Into<Cow<'static, str>>,
    ) -> Self {
        let next: Rc<RefCell<Occurrence>> = Default::default();
        let callback = Closure::wrap(Box::new({
            let next = next.clone();
            move |val: JsValue| {
                // UNCHECKED: event listeners are only ever called with an `Event`.
                let event: web_sys::Event = val.unchecked_into();
                // Swap in a fresh occurrence for the next event before
                // resolving everyone awaiting this one.
                let occurrence = next.take();
                occurrence.resolve(event);
            }
        }) as Box<dyn FnMut(JsValue)>);

        let event_name = event_name.into();
        let target = target.as_ref().clone();
        if let Err(err) =
            target.add_event_listener_with_callback(&event_name, callback.as_ref().unchecked_ref())
        {
            log::error!("could not listen for '{event_name}': {err:?}");
        }

        EventListener {
            registration: Rc::new(Registration {
                target,
                event_name,
                callback,
            }),
            next,
        }
    }

    pub fn event_name(&self) -> &str {
        &self.registration.event_name
    }

    /// Resolves at the next occurrence of the event.
    ///
    /// Every future taken before the event fires resolves with that event.
    pub fn next(&self) -> impl std::future::Future<Output = web_sys::Event> {
        self.next.borrow().clone()
    }
}
