use serde::{Deserialize, Serialize};
use ros2_client::Message;

use super::std_msgs::Header;
use crate::{names::InterfaceTypeName, registry::TypeRegistry};

// https://github.com/ros2/common_interfaces/tree/rolling/geometry_msgs/msg
//
// The struct definitions must have a layout corresponding to the
// ROS2 msg definitions to get compatible serialization.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vector3 {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}
impl Message for Vector3 {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}
impl Message for Point {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quaternion {
  pub x: f64,
  pub y: f64,
  pub z: f64,
  pub w: f64,
}
impl Message for Quaternion {}

// The .msg file gives w a default of 1, i.e. the identity rotation.
impl Default for Quaternion {
  fn default() -> Self {
    Quaternion {
      x: 0.0,
      y: 0.0,
      z: 0.0,
      w: 1.0,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
  pub position: Point,
  pub orientation: Quaternion,
}
impl Message for Pose {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseStamped {
  pub header: Header,
  pub pose: Pose,
}
impl Message for PoseStamped {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Twist {
  pub linear: Vector3,
  pub angular: Vector3,
}
impl Message for Twist {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwistStamped {
  pub header: Header,
  pub twist: Twist,
}
impl Message for TwistStamped {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Accel {
  pub linear: Vector3,
  pub angular: Vector3,
}
impl Message for Accel {}

pub(crate) fn register(registry: &mut TypeRegistry) {
  let msg = |t: &str| InterfaceTypeName::msg("geometry_msgs", t);
  registry.add_primary::<Vector3>(msg("Vector3"));
  registry.add_primary::<Point>(msg("Point"));
  registry.add_primary::<Quaternion>(msg("Quaternion"));
  registry.add_primary::<Pose>(msg("Pose"));
  registry.add_primary::<PoseStamped>(msg("PoseStamped"));
  registry.add_primary::<Twist>(msg("Twist"));
  registry.add_primary::<TwistStamped>(msg("TwistStamped"));
  registry.add_primary::<Accel>(msg("Accel"));
}

#[test]
fn quaternion_defaults_to_identity() {
  let pose: Pose = serde_json::from_str(r#"{"position": {"x": 1.0}}"#).unwrap();
  assert_eq!(pose.position.x, 1.0);
  assert_eq!(pose.orientation, Quaternion::default());
  assert_eq!(pose.orientation.w, 1.0);
}
