//! Terminal UI layer.
//!
//! - [`picker`] and [`dialogue`] project controller state into view models.
//! - [`renderer`] draws those view models with ratatui.
//! - [`chat_loop`] runs the interactive loop: it maps keys to
//!   [`crate::core::app::AppAction`]s and performs requests off the UI path.
//!
//! Nothing here mutates the conversation directly; every change goes through
//! [`crate::core::controller::ConversationController`].

pub mod chat_loop;
pub mod dialogue;
pub mod picker;
pub mod renderer;
