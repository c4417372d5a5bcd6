//! Configurable 2-D cellular automaton.
//!
//! A fixed-size [`grid::Grid`] is seeded from a text [`pattern::Pattern`] and
//! stepped with the survive-on-2-or-3, birth-on-3 rule under one of five
//! neighbor [`topology::Topology`] variants. The [`runner`] drives the loop,
//! honoring a shared pause flag and stop signal.

pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod pattern;
pub mod render;
pub mod runner;
pub mod topology;
pub mod validate;
