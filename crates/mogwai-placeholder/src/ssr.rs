//! Server-side rendered inputs.
//!
//! [`SsrInput`] keeps its attributes in memory. Pair it with a
//! [`ManualClock`](crate::time::ManualClock) to render any frame of the
//! animation without a browser.
use crate::{
    sync::Shared,
    view::{FocusChange, PlaceholderInput},
};

pub mod prelude {
    pub use super::SsrInput;
    pub use crate::prelude::*;
    pub use crate::time::ManualClock;
}

/// An in-memory `<input>`.
#[derive(Clone)]
pub struct SsrInput {
    pub id: Option<String>,
    placeholder: Shared<String>,
    value: Shared<String>,
    focused: Shared<bool>,
    history: Shared<Vec<String>>,
    changes: (
        async_channel::Sender<FocusChange>,
        async_channel::Receiver<FocusChange>,
    ),
}

impl Default for SsrInput {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SsrInput {
    fn eq(&self, other: &Self) -> bool {
        self.placeholder.ptr_eq(&other.placeholder)
    }
}

impl std::fmt::Debug for SsrInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsrInput")
            .field("id", &self.id)
            .field("placeholder", &*self.placeholder.get())
            .field("value", &*self.value.get())
            .field("focused", &*self.focused.get())
            .finish()
    }
}

impl SsrInput {
    pub fn new() -> Self {
        SsrInput {
            id: None,
            placeholder: Default::default(),
            value: Default::default(),
            focused: Default::default(),
            history: Default::default(),
            changes: async_channel::unbounded(),
        }
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        SsrInput {
            id: Some(id.into()),
            ..Self::new()
        }
    }

    /// Focus the input, as if the user clicked into it.
    pub fn focus(&self) {
        self.focused.set(true);
        self.emit(FocusChange::Focus);
    }

    /// Blur the input, as if the user clicked away.
    pub fn blur(&self) {
        self.focused.set(false);
        self.emit(FocusChange::Blur);
    }

    fn emit(&self, change: FocusChange) {
        // Unbounded, and this input holds the receiver, so this can't fail.
        let _ = self.changes.0.try_send(change);
    }

    pub fn is_focused(&self) -> bool {
        *self.focused.get()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.value.set(value.into());
    }

    /// Every placeholder written since creation (or the last
    /// [`SsrInput::clear_history`]), oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.cloned()
    }

    pub fn clear_history(&self) {
        self.history.get_mut().clear();
    }

    /// Render the input as HTML.
    pub fn html_string(&self) -> String {
        let mut html = String::from("<input");
        if let Some(id) = self.id.as_ref() {
            html.push_str(&format!(" id=\"{}\"", escape_attribute(id)));
        }
        html.push_str(&format!(
            " placeholder=\"{}\"",
            escape_attribute(&self.placeholder.get())
        ));
        let value = self.value.get();
        if !value.is_empty() {
            html.push_str(&format!(" value=\"{}\"", escape_attribute(&value)));
        }
        html.push_str(" />");
        html
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

impl PlaceholderInput for SsrInput {
    fn placeholder(&self) -> String {
        self.placeholder.cloned()
    }

    fn set_placeholder(&self, text: &str) {
        self.placeholder.set(text.to_owned());
        self.history.get_mut().push(text.to_owned());
    }

    fn value(&self) -> String {
        self.value.cloned()
    }

    async fn next_focus_change(&self) -> FocusChange {
        match self.changes.1.recv().await {
            Ok(change) => change,
            // UNREACHABLE: this input owns a sender, so the channel never closes.
            Err(_) => FocusChange::Blur,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renders_escaped_html() {
        let input = SsrInput::with_id("search");
        input.set_placeholder("Say \"hi\" <b>");
        assert_eq!(
            r#"<input id="search" placeholder="Say &quot;hi&quot; &lt;b&gt;" />"#,
            input.html_string()
        );
        input.set_value("a & b");
        assert_eq!(
            r#"<input id="search" placeholder="Say &quot;hi&quot; &lt;b&gt;" value="a &amp; b" />"#,
            input.html_string()
        );
    }

    #[test]
    fn focus_changes_arrive_in_order() {
        let input = SsrInput::new();
        input.focus();
        assert!(input.is_focused());
        input.blur();
        assert!(!input.is_focused());
        futures_lite::future::block_on(async {
            assert_eq!(FocusChange::Focus, input.next_focus_change().await);
            assert_eq!(FocusChange::Blur, input.next_focus_change().await);
        });
    }

    #[test]
    fn history_records_writes() {
        let input = SsrInput::new();
        input.set_placeholder("a");
        input.set_placeholder("");
        assert_eq!(vec!["a".to_string(), String::new()], input.history());
        input.clear_history();
        assert!(input.history().is_empty());
    }
}
