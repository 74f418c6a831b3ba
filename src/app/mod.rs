//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the fetch/domain layers.
//!
//! ```text
//! Key input → Events → Event Handler → State Mutations → Actions → web_request
//!                 ↑                                                    ↓
//!                 └──────────────── SearchResponse ────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View state machine and input mode types
//! - [`results`]: Sorted and filtered views over the retained result set
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod results;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ViewState};
pub use state::AppState;
