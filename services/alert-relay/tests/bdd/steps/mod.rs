//! BDD step definitions for the alert relay

pub mod composition_steps;
pub mod forwarding_steps;
