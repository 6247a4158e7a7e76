//! Draw, edit and submit polygon annotations over a terminal map.
//!
//! `controller` holds the annotation state and reacts to events from a
//! `toolkit::MapToolkit`; `app`, `input` and `ui` are the terminal front end.

pub mod app;
pub mod bridge;
pub mod config;
pub mod controller;
pub mod error;
pub mod file_io;
pub mod geo;
pub mod input;
pub mod palette;
pub mod shapes;
pub mod toolkit;
pub mod ui;
