//! Kubernetes context switching on top of [`kctx_picker`].
//!
//! The picker crate knows nothing about Kubernetes; this crate supplies the
//! `kubectl`-backed item source and the application's ambient plumbing.

pub mod app_dirs;
pub mod kubectl;
pub mod logging;
