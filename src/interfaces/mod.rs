//! Message types for the interface packages this tool understands.
//!
//! Each package module registers its types with a [`TypeRegistry`]: message
//! types in the primary tier, Service request and response types in the
//! secondary tier.
//!
//! Secondary tier types are bare request/response payloads. RMWs that prefix
//! `rq`/`rr` samples with a request header (the Cyclone DDS mapping) are not
//! decoded correctly by `echo`.

use crate::registry::TypeRegistry;

pub mod builtin_interfaces;
pub mod example_interfaces;
pub mod geometry_msgs;
pub mod rcl_interfaces;
pub mod std_msgs;
pub mod std_srvs;

pub(crate) fn register_all(registry: &mut TypeRegistry) {
  builtin_interfaces::register(registry);
  std_msgs::register(registry);
  geometry_msgs::register(registry);
  rcl_interfaces::register(registry);
  example_interfaces::register(registry);
  std_srvs::register(registry);
}
