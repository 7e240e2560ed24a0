//! Access control. The drop has a single administrator: the deployer, or
//! whoever ownership was later transferred to.
pub mod ownable;
