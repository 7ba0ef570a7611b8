//! Animated "typing" placeholders for text inputs.
//!
//! While an input is empty and unfocused its `placeholder` attribute cycles
//! through a list of hints. Each hint is typed in one character at a time
//! with a trailing cursor, rests for a few seconds while the cursor blinks,
//! and then the next hint starts. Focusing the input clears the effect and
//! blurring an empty input starts it again.
//!
//! ## Model, interface and logic
//!
//! Following the mogwai way of building widgets, the animation is split in
//! three:
//! * the model and its logic is [`Placeholder`](animator::Placeholder)
//! * the view interface is [`PlaceholderInput`](view::PlaceholderInput),
//!   implemented for browser inputs by [`web::WebInput`] and for in-memory
//!   inputs by [`ssr::SsrInput`]
//! * timers come from a [`Scheduler`](time::Scheduler), which is
//!   `setTimeout` in the browser and a [`ManualClock`](time::ManualClock)
//!   anywhere else
//!
//! ## Server side
//!
//! ```
//! use mogwai_placeholder::ssr::prelude::*;
//!
//! let input = SsrInput::new();
//! let clock = ManualClock::new();
//! let placeholder = Placeholder::attach(
//!     input.clone(),
//!     clock.clone(),
//!     PlaceholderConfig::new(vec!["Search", "Filter"]),
//! );
//! clock.advance(1000);
//! assert_eq!("S|", input.placeholder());
//!
//! placeholder.suspend();
//! assert_eq!("", input.placeholder());
//! ```
//!
//! ## Browser
//!
//! ```no_run
//! # #[cfg(feature = "web")]
//! # fn main() -> Result<(), mogwai_placeholder::error::Error> {
//! let body = mogwai_placeholder::web::document()?.body().unwrap();
//! // Keep the bindings alive, dropping them detaches every placeholder.
//! let bindings = mogwai_placeholder::web::bind_all(&body)?;
//! std::mem::forget(bindings);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "web"))]
//! # fn main() {}
//! ```
pub mod animator;
pub mod bindings;
pub mod error;
pub mod hints;
#[cfg(feature = "ssr")]
pub mod ssr;
pub mod sync;
pub mod time;
pub mod view;
#[cfg(feature = "web")]
pub mod web;

pub mod prelude {
    //! Re-exports for convenience
    pub use super::animator::{AnimatorState, Phase, Placeholder};
    pub use super::bindings::Bindings;
    pub use super::hints::{HintList, PlaceholderConfig, Timing};
    pub use super::time::{Scheduler, TimerKind};
    pub use super::view::{FocusChange, PlaceholderInput};
}
