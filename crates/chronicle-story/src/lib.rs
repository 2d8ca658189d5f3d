//! chronicle-story library
//!
//! Synthesizes a markdown narrative from analyzed history: a prologue, one
//! chapter per calendar month with mood, themes, contributor spotlights,
//! milestone callouts, and notable work, then an epilogue. Randomness is
//! injected through the [`Picker`] trait so narratives can be replayed.

pub mod composer;
pub mod picker;
pub mod templates;

pub use composer::{StoryInput, compose};
pub use picker::{Picker, SeededPicker, ThreadPicker};
