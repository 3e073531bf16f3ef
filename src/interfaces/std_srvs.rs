use serde::{Deserialize, Serialize};
use ros2_client::Message;

use super::std_msgs::Empty;
use crate::{names::InterfaceTypeName, registry::TypeRegistry};

// https://index.ros.org/p/std_srvs/

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetBoolRequest {
  pub data: bool,
}
impl Message for SetBoolRequest {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetBoolResponse {
  pub success: bool,
  pub message: String,
}
impl Message for SetBoolResponse {}

// Trigger has an empty request
pub type TriggerResponse = SetBoolResponse;

pub(crate) fn register(registry: &mut TypeRegistry) {
  let srv = |t: &str| InterfaceTypeName::srv("std_srvs", t);
  registry.add_secondary::<Empty>(srv("Empty_Request"));
  registry.add_secondary::<Empty>(srv("Empty_Response"));
  registry.add_secondary::<SetBoolRequest>(srv("SetBool_Request"));
  registry.add_secondary::<SetBoolResponse>(srv("SetBool_Response"));
  registry.add_secondary::<Empty>(srv("Trigger_Request"));
  registry.add_secondary::<TriggerResponse>(srv("Trigger_Response"));
}
