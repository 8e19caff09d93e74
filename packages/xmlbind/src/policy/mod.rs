//! Binding policies.
//!
//! A policy customises five decisions the binder makes per element: whether
//! to skip it, which field it binds to, which type it resolves to, how a
//! custom leaf type is parsed, and whether the policy stores the value
//! itself instead of the default mutator.

mod handler;
mod registry;

pub use handler::{Assignment, BindingPolicy, DefaultPolicy};
pub use registry::PolicyRegistry;
