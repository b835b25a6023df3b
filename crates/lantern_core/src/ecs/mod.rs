//! # Entity Component System
//!
//! The kernel is split by responsibility:
//! - [`entity`] - generational handles and slot bookkeeping
//! - [`component`] - the closed component kind set and payload types
//! - [`storage`] - pre-allocated per-kind dense arrays
//! - [`hooks`] - destruction/creation hook registry
//! - [`world`] - the owning aggregate and entity lifecycle
//! - [`proximity`] - double-buffered overlap pair views

pub mod component;
pub mod entity;
pub mod hooks;
pub mod proximity;
pub mod storage;
pub mod world;
