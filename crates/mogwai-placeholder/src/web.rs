//! Placeholders on browser inputs, through web-sys.
//!
//! ```html
//! <input id="search" data-placeholder='["Search", "Filter"]' data-last-char="_" />
//! <input data-placeholder="Type a city" />
//! <input data-placeholder-config='{"hints": "Email", "timing": {"dwell": 2000}}' />
//! ```
//!
//! [`bind_all`] binds every such input under a root element. [`bind`] binds
//! a single input with an explicit config.
use futures_lite::future;
use snafu::OptionExt;
use wasm_bindgen::{JsCast, prelude::Closure};

use crate::{
    animator::Placeholder,
    bindings::Bindings,
    error::{self, Error},
    hints::PlaceholderConfig,
    sync::Shared,
    time::{Scheduler, TimerKind},
    view::{FocusChange, PlaceholderInput},
};

pub mod event;

use event::EventListener;

pub mod prelude {
    pub use super::{WebBindings, WebInput, WebScheduler, bind, bind_all, event::EventListener};
    pub use crate::prelude::*;
}

/// Matches every element [`bind_all`] binds.
pub const SELECTOR: &str = "[data-placeholder], [data-placeholder-config]";

/// Return the DOM [`web_sys::Window`].
pub fn window() -> Result<web_sys::Window, Error> {
    web_sys::window().context(error::MissingWindow)
}

/// Return the global [`web_sys::Document`].
pub fn document() -> Result<web_sys::Document, Error> {
    window()?.document().context(error::MissingDocument)
}

/// Schedules callbacks with `window.setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebScheduler;

/// A pending `setTimeout`, cleared when dropped.
pub struct WebTimer {
    handle: i32,
    window: web_sys::Window,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for WebTimer {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}

impl Scheduler for WebScheduler {
    type Timer = WebTimer;

    fn schedule(
        &self,
        kind: TimerKind,
        millis: u32,
        f: impl FnOnce() + 'static,
    ) -> Result<WebTimer, Error> {
        let window = window()?;
        let mut f = Some(f);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(f) = f.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                i32::try_from(millis).unwrap_or(i32::MAX),
            )
            .map_err(|err| Error::Schedule {
                kind,
                msg: format!("{err:?}"),
            })?;
        Ok(WebTimer {
            handle,
            window,
            _callback: callback,
        })
    }
}

/// A browser `<input>` with its focus and blur listeners.
#[derive(Clone)]
pub struct WebInput {
    element: web_sys::HtmlInputElement,
    focus: EventListener,
    blur: EventListener,
}

impl From<web_sys::HtmlInputElement> for WebInput {
    fn from(element: web_sys::HtmlInputElement) -> Self {
        WebInput::new(element)
    }
}

impl WebInput {
    pub fn new(element: web_sys::HtmlInputElement) -> Self {
        let focus = EventListener::new(&element, "focus");
        let blur = EventListener::new(&element, "blur");
        WebInput {
            element,
            focus,
            blur,
        }
    }

    pub fn element(&self) -> &web_sys::HtmlInputElement {
        &self.element
    }
}

impl PlaceholderInput for WebInput {
    fn placeholder(&self) -> String {
        self.element.placeholder()
    }

    fn set_placeholder(&self, text: &str) {
        self.element.set_placeholder(text);
    }

    fn value(&self) -> String {
        self.element.value()
    }

    async fn next_focus_change(&self) -> FocusChange {
        future::or(
            async {
                self.focus.next().await;
                FocusChange::Focus
            },
            async {
                self.blur.next().await;
                FocusChange::Blur
            },
        )
        .await
    }
}

/// Read an element's placeholder binding.
///
/// `data-placeholder-config` holds a full config document and wins over
/// `data-placeholder`. See [`PlaceholderConfig::from_attributes`].
pub fn config_from_element(element: &web_sys::Element) -> Result<PlaceholderConfig, Error> {
    PlaceholderConfig::from_attributes(
        element.get_attribute("data-placeholder-config").as_deref(),
        element.get_attribute("data-placeholder").as_deref(),
        element.get_attribute("data-last-char").as_deref(),
    )
}

/// Attach a placeholder to `element` and feed it focus changes until it is
/// detached.
pub fn bind(
    element: web_sys::HtmlInputElement,
    config: PlaceholderConfig,
) -> Result<Placeholder<WebInput, WebScheduler>, Error> {
    // Fail here rather than on the first timer.
    let _ = window()?;
    let placeholder = Placeholder::attach(WebInput::new(element), WebScheduler, config);
    spawn_run_loop(&placeholder);
    Ok(placeholder)
}

fn spawn_run_loop(placeholder: &Placeholder<WebInput, WebScheduler>) {
    let placeholder = placeholder.clone();
    wasm_bindgen_futures::spawn_local(async move { placeholder.run().await });
}

/// Placeholders bound by [`bind_all`], keyed by element.
///
/// Inputs removed from the page are detached once a `MutationObserver` on
/// the root sees the removal. Dropping this stops observing and detaches
/// every remaining placeholder.
pub struct WebBindings {
    bindings: Shared<Bindings<String, WebInput, WebScheduler>>,
    observer: web_sys::MutationObserver,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for WebBindings {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl WebBindings {
    fn observe(
        root: &web_sys::Element,
        bindings: Bindings<String, WebInput, WebScheduler>,
    ) -> Result<Self, Error> {
        let bindings = Shared::new(bindings);
        let weak = bindings.downgrade();
        let callback = Closure::wrap(Box::new(move || {
            if let Some(bindings) = weak.upgrade() {
                detach_removed(&bindings);
            }
        }) as Box<dyn FnMut()>);
        let observer = web_sys::MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|err| Error::Observe {
                msg: format!("{err:?}"),
            })?;
        let options = web_sys::MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer
            .observe_with_options(root, &options)
            .map_err(|err| Error::Observe {
                msg: format!("{err:?}"),
            })?;
        Ok(WebBindings {
            bindings,
            observer,
            _callback: callback,
        })
    }

    pub fn get(&self, key: &str) -> Option<Placeholder<WebInput, WebScheduler>> {
        self.bindings.get().get(key).cloned()
    }

    /// The bound value changed. Returns `false` if `key` isn't bound.
    pub fn update(&self, key: &str, config: PlaceholderConfig) -> bool {
        self.bindings.get_mut().update(key, config)
    }

    /// Detach the placeholder bound to `key`, eg before removing its input.
    pub fn detach(&self, key: &str) -> bool {
        self.bindings.get_mut().detach(key)
    }

    /// Detach every placeholder whose input is no longer in the document.
    ///
    /// The observer does this on its own after each removal. Returns how many
    /// were detached.
    pub fn detach_removed(&self) -> usize {
        detach_removed(&self.bindings)
    }

    pub fn keys(&self) -> Vec<String> {
        self.bindings.get().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.get().is_empty()
    }
}

fn detach_removed(bindings: &Shared<Bindings<String, WebInput, WebScheduler>>) -> usize {
    let detached = bindings
        .get_mut()
        .detach_if(|_, placeholder| !placeholder.input().element().is_connected());
    if detached > 0 {
        log::debug!("detached {detached} placeholder(s) removed from the document");
    }
    detached
}

/// Bind every input under `root` that carries a placeholder binding.
///
/// Inputs are keyed by their `id`, or by `placeholder-{n}` in document order
/// when they have none. Elements that aren't inputs, or whose config doesn't
/// parse, are skipped with an error in the log. Inputs later removed from
/// `root` are detached. Dropping the returned bindings detaches every
/// placeholder.
pub fn bind_all(root: &web_sys::Element) -> Result<WebBindings, Error> {
    let _ = window()?;
    let nodes = root
        .query_selector_all(SELECTOR)
        .map_err(|err| Error::Query {
            selector: SELECTOR.to_string(),
            msg: format!("{err:?}"),
        })?;

    let mut bindings = Bindings::new(WebScheduler);
    for n in 0..nodes.length() {
        let Some(node) = nodes.item(n) else {
            continue;
        };
        let element = match node.dyn_into::<web_sys::HtmlInputElement>() {
            Ok(element) => element,
            Err(node) => {
                log::error!(
                    "{}",
                    Error::NotAnInput {
                        tag: node.node_name().to_lowercase()
                    }
                );
                continue;
            }
        };
        let config = match config_from_element(&element) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{err}");
                continue;
            }
        };
        let key = match element.id() {
            id if id.is_empty() => format!("placeholder-{n}"),
            id => id,
        };
        let placeholder = bindings.attach(key, WebInput::new(element), config);
        spawn_run_loop(&placeholder);
    }
    log::info!("bound {} placeholder(s)", bindings.len());
    WebBindings::observe(root, bindings)
}
