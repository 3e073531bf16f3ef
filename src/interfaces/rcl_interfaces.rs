use serde::{Deserialize, Serialize};
use ros2_client::Message;

use super::builtin_interfaces::Time;
use crate::{names::InterfaceTypeName, registry::TypeRegistry};

// https://index.ros.org/p/rcl_interfaces/
//
// Messages every ROS2 Node may publish (rosout, parameter events), and the
// request/response types of the parameter Services.

/// Message on the `/rosout` logging Topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Log {
  pub stamp: Time,
  pub level: u8,
  pub name: String,
  pub msg: String,
  pub file: String,
  pub function: String,
  pub line: u32,
}
impl Message for Log {}

/// Tagged union of all parameter value types. `type` selects which of the
/// other fields is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterValue {
  #[serde(rename = "type")]
  pub ptype: u8,
  pub bool_value: bool,
  pub integer_value: i64,
  pub double_value: f64,
  pub string_value: String,
  pub byte_array_value: Vec<u8>,
  pub bool_array_value: Vec<bool>,
  pub integer_array_value: Vec<i64>,
  pub double_array_value: Vec<f64>,
  pub string_array_value: Vec<String>,
}
impl Message for ParameterValue {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
  pub name: String,
  pub value: ParameterValue,
}
impl Message for Parameter {}

/// Message on the `/parameter_events` Topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterEvent {
  pub stamp: Time,
  pub node: String,
  pub new_parameters: Vec<Parameter>,
  pub changed_parameters: Vec<Parameter>,
  pub deleted_parameters: Vec<Parameter>,
}
impl Message for ParameterEvent {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListParametersRequest {
  pub prefixes: Vec<String>,
  pub depth: u64,
}
impl Message for ListParametersRequest {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListParametersResult {
  pub names: Vec<String>,
  pub prefixes: Vec<String>,
}
impl Message for ListParametersResult {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListParametersResponse {
  pub result: ListParametersResult,
}
impl Message for ListParametersResponse {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetParametersRequest {
  pub names: Vec<String>,
}
impl Message for GetParametersRequest {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetParametersResponse {
  pub values: Vec<ParameterValue>,
}
impl Message for GetParametersResponse {}

pub(crate) fn register(registry: &mut TypeRegistry) {
  let msg = |t: &str| InterfaceTypeName::msg("rcl_interfaces", t);
  registry.add_primary::<Log>(msg("Log"));
  registry.add_primary::<ParameterValue>(msg("ParameterValue"));
  registry.add_primary::<Parameter>(msg("Parameter"));
  registry.add_primary::<ParameterEvent>(msg("ParameterEvent"));

  let srv = |t: &str| InterfaceTypeName::srv("rcl_interfaces", t);
  registry.add_secondary::<ListParametersRequest>(srv("ListParameters_Request"));
  registry.add_secondary::<ListParametersResponse>(srv("ListParameters_Response"));
  registry.add_secondary::<GetParametersRequest>(srv("GetParameters_Request"));
  registry.add_secondary::<GetParametersResponse>(srv("GetParameters_Response"));
}

#[test]
fn parameter_value_type_field() {
  let v: ParameterValue = serde_json::from_str(r#"{"type": 2, "integer_value": 42}"#).unwrap();
  assert_eq!(v.ptype, 2);
  assert_eq!(v.integer_value, 42);
  let json = serde_json::to_value(&v).unwrap();
  assert_eq!(json["type"], 2);
}
