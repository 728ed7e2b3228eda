// src/cascade/mod.rs

//! Status cascade resolver.
//!
//! - [`upgrade`] walks prerequisites to find what must move up before a
//!   course can become `Active` or `Passed`.
//! - [`downgrade`] walks dependents to find what falls back to `Pending`
//!   when a passed course regresses.
//! - [`apply`] writes a status change plus its overrides in one step.
//! - [`plan`] bundles the previews for preview-then-confirm callers.
//!
//! Previews are pure and total: they never fail, always terminate, and
//! come back empty when nothing needs to change.

pub mod apply;
pub mod downgrade;
pub mod plan;
pub mod upgrade;

pub use apply::{apply_change, AppliedChange, StatusTransition};
pub use downgrade::preview_downgrade_cascade;
pub use plan::{apply_plan, plan_status_change, StatusChangePlan};
pub use upgrade::{preview_upgrade_cascade, required_prerequisite_status, CascadeNode, CascadeTree};
