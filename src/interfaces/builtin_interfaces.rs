use serde::{Deserialize, Serialize};
use ros2_client::Message;

use crate::{names::InterfaceTypeName, registry::TypeRegistry};

// https://index.ros.org/p/builtin_interfaces/
//
// Defines message types Duration and Time .
//
// The name "builtin_interfaces" is not very descriptive, but that is how
// it is in ROS.

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
#[serde(default)]
pub struct Time {
  pub sec: i32,
  pub nanosec: u32,
}
impl Message for Time {}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub struct Duration {
  pub sec: i32, // ROS2: Seconds component, range is valid over any possible int32 value.
  pub nanosec: u32, /* ROS2:  Nanoseconds component in the range of [0, 10e9). */
}
impl Message for Duration {}

pub(crate) fn register(registry: &mut TypeRegistry) {
  let msg = |t: &str| InterfaceTypeName::msg("builtin_interfaces", t);
  registry.add_primary::<Time>(msg("Time"));
  registry.add_primary::<Duration>(msg("Duration"));
}
