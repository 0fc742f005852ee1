//! Railway line lookup server.
//!
//! A web application that answers: "What do I need to know about this
//! station on this line?" Station facts, range-derived flags and the
//! line's terminating and stabling lists are resolved from per-line JSON
//! datasets.

pub mod assets;
pub mod config;
pub mod controller;
pub mod display;
pub mod domain;
pub mod release;
pub mod resolver;
pub mod source;
pub mod web;
