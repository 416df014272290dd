//! `collegedesk-auth` — role resolution and route gating.
//!
//! Everything here is a pure function of its inputs: no storage, no HTTP.

pub mod capabilities;
pub mod gate;
pub mod menu;
pub mod palette;
pub mod roles;
pub mod routes;

pub use capabilities::{Capability, CapabilityRegistry, capability_allowed};
pub use gate::{AccessDecision, AccessGate, GateResult, Outcome, Reason, evaluate};
pub use menu::MenuItem;
pub use palette::Palette;
pub use roles::{RoleProfile, resolve, resolve_role};
pub use routes::{RouteMatch, RouteRequirements, RouteTable};
