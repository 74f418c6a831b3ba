//! User interface rendering layer with component-based architecture.
//!
//! Turns view models into ANSI-styled output through small components, with
//! theme support and fuzzy match highlighting.
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, padding)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod viewmodel;
pub mod renderer;
pub mod components;
pub mod helpers;
pub mod theme;

pub use viewmodel::{
    DetailLine, DetailView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo,
    UIViewModel, ViewBody, NO_BOOKS_MESSAGE,
};
pub use renderer::render;
pub use theme::Theme;
