//! https://index.ros.org/p/std_msgs/
//!
//! Most of these wrap a single primitive in a field called `data`.

use serde::{Deserialize, Serialize};
use ros2_client::Message;

use super::builtin_interfaces::Time;
use crate::{names::InterfaceTypeName, registry::TypeRegistry};

macro_rules! data_message {
  ($name:ident, $data:ty) => {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct $name {
      pub data: $data,
    }
    impl Message for $name {}
  };
}

data_message!(Bool, bool);
data_message!(Byte, u8);
data_message!(Char, u8);
data_message!(Int8, i8);
data_message!(UInt8, u8);
data_message!(Int16, i16);
data_message!(UInt16, u16);
data_message!(Int32, i32);
data_message!(UInt32, u32);
data_message!(Int64, i64);
data_message!(UInt64, u64);
data_message!(Float32, f32);
data_message!(Float64, f64);

// Named `String` in ROS
data_message!(StringMsg, String);

// ROS2 implementations do not like really empty structs over the wire,
// so the generated type has a dummy byte.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Empty {
  pub structure_needs_at_least_one_member: u8,
}
impl Message for Empty {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
  pub stamp: Time,
  pub frame_id: String,
}
impl Message for Header {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorRGBA {
  pub r: f32,
  pub g: f32,
  pub b: f32,
  pub a: f32,
}
impl Message for ColorRGBA {}

pub(crate) fn register(registry: &mut TypeRegistry) {
  let msg = |t: &str| InterfaceTypeName::msg("std_msgs", t);
  registry.add_primary::<Bool>(msg("Bool"));
  registry.add_primary::<Byte>(msg("Byte"));
  registry.add_primary::<Char>(msg("Char"));
  registry.add_primary::<Int8>(msg("Int8"));
  registry.add_primary::<UInt8>(msg("UInt8"));
  registry.add_primary::<Int16>(msg("Int16"));
  registry.add_primary::<UInt16>(msg("UInt16"));
  registry.add_primary::<Int32>(msg("Int32"));
  registry.add_primary::<UInt32>(msg("UInt32"));
  registry.add_primary::<Int64>(msg("Int64"));
  registry.add_primary::<UInt64>(msg("UInt64"));
  registry.add_primary::<Float32>(msg("Float32"));
  registry.add_primary::<Float64>(msg("Float64"));
  registry.add_primary::<StringMsg>(msg("String"));
  registry.add_primary::<Empty>(msg("Empty"));
  registry.add_primary::<Header>(msg("Header"));
  registry.add_primary::<ColorRGBA>(msg("ColorRGBA"));
}
