// This is free and unencumbered software released into the public domain.

//! Camera preview session adapter.
//!
//! The adapter opens a hardware camera for a requested lens facing,
//! configures a repeating preview capture session, and routes frames to a
//! texture surface owned by a downstream frame consumer. The host camera
//! subsystem (device enumeration, characteristics, permissions, asynchronous
//! open/configure callbacks) sits behind the traits in [`platform`], so the
//! adapter can run against the real camera service or a test double.

mod adapter;
pub use adapter::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod listener;
pub use listener::*;

pub mod platform;

mod request;
pub use request::*;

mod surface;
pub use surface::*;

mod worker;
pub use worker::*;
