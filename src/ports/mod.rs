//! Port traits decoupling the domain from its environment.

pub mod clock_port;
pub mod config_port;
pub mod data_port;
