//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Tick timing (one re-armable interval)
//! - Input events (keys, swipes, buttons)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod input;
pub mod storage;
pub mod timer;

pub use input::{Button, InputAction, SwipeTracker, captures_key, key_action};
pub use storage::{MemoryStore, PreferenceStore};
pub use timer::TickTimer;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
