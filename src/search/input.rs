// src/search/input.rs
// =============================================================================
// The search box.
//
// Editing only changes the local value. Nothing leaves this struct until
// submit() hands the current text to the callback the owner supplied.
// =============================================================================

/// Free-text input that reports its value only on explicit submit.
pub struct SearchInput<F>
where
    F: FnMut(String),
{
    value: String,
    on_submit: F,
}

impl<F> SearchInput<F>
where
    F: FnMut(String),
{
    pub fn new(on_submit: F) -> Self {
        Self {
            value: String::new(),
            on_submit,
        }
    }

    /// Replaces the local text. No other effect.
    pub fn edit(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Passes the current text to the callback, empty text included.
    ///
    /// The local value is kept, so submitting twice sends the same text twice.
    pub fn submit(&mut self) {
        (self.on_submit)(self.value.clone());
    }
}
