use serde::{Deserialize, Serialize};
use ros2_client::Message;

use crate::{names::InterfaceTypeName, registry::TypeRegistry};

// Request and response of the AddTwoInts demo Service.
// https://github.com/ros2/example_interfaces/blob/rolling/srv/AddTwoInts.srv

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddTwoIntsRequest {
  pub a: i64,
  pub b: i64,
}
impl Message for AddTwoIntsRequest {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddTwoIntsResponse {
  pub sum: i64,
}
impl Message for AddTwoIntsResponse {}

pub(crate) fn register(registry: &mut TypeRegistry) {
  let srv = |t: &str| InterfaceTypeName::srv("example_interfaces", t);
  registry.add_secondary::<AddTwoIntsRequest>(srv("AddTwoInts_Request"));
  registry.add_secondary::<AddTwoIntsResponse>(srv("AddTwoInts_Response"));
}
