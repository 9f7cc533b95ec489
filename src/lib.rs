//! Parley is a terminal front end for staging turn-based dialogues between
//! characters through a remote conversation service.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the character registry, the selection, and the
//!   conversation controller that drives a conversation's lifecycle.
//! - [`ui`] renders the picker and dialogue views and runs the interactive
//!   event loop.
//! - [`api`] defines the service payloads and the HTTP client that sends them.
//! - [`cli`] parses arguments and dispatches to the interactive session or the
//!   headless `duet`, `talk`, and `characters` commands.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
