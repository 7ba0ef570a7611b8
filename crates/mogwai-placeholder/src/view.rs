//! The view interface of a placeholder animation.
//!
//! The animator is the model and logic. It only talks to its input through
//! [`PlaceholderInput`], so the same animation runs against a browser
//! `<input>` ([`crate::web::WebInput`]) or an in-memory one
//! ([`crate::ssr::SsrInput`]).
use std::future::Future;

/// A focus transition of the bound input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusChange {
    Focus,
    Blur,
}

/// A text input whose `placeholder` attribute can be animated.
pub trait PlaceholderInput: Clone + 'static {
    /// The current `placeholder` attribute, empty if unset.
    fn placeholder(&self) -> String;

    /// Overwrite the `placeholder` attribute.
    fn set_placeholder(&self, text: &str);

    /// The text the user has entered.
    fn value(&self) -> String;

    /// Resolves at the input's next focus or blur.
    fn next_focus_change(&self) -> impl Future<Output = FocusChange>;
}
