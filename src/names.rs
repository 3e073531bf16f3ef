//! Conversions between the names a user types and the names used over DDS:
//! * Topic names, e.g. `/chatter` <-> `rt/chatter`
//! * Interface type names, e.g. `std_msgs/String` -> `std_msgs::msg::dds_::String_`
//!
//! See [topic and Service name mapping to DDS](https://design.ros2.org/articles/topic_and_service_names.html)

use std::fmt;

use ros2_client::names::{Name, NameError};

use crate::error::{ToolError, ToolResult};

// DDS topic name prefixes for ROS Topics, Service requests and Service replies.
const TOPIC_PREFIX: &str = "rt";
const REQUEST_PREFIX: &str = "rq";
const REPLY_PREFIX: &str = "rr";

/// Name of a data type carried over a Topic, e.g. `std_msgs/msg/String`.
///
/// The middle part is the interface kind: `msg` for messages, `srv` for
/// Service request and response types.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterfaceTypeName {
  package_name: String,
  kind: String,
  type_name: String,
}

impl InterfaceTypeName {
  pub fn new(package_name: &str, kind: &str, type_name: &str) -> Self {
    InterfaceTypeName {
      package_name: package_name.to_owned(),
      kind: kind.to_owned(),
      type_name: type_name.to_owned(),
    }
  }

  pub fn msg(package_name: &str, type_name: &str) -> Self {
    Self::new(package_name, "msg", type_name)
  }

  pub fn srv(package_name: &str, type_name: &str) -> Self {
    Self::new(package_name, "srv", type_name)
  }

  /// Parse a user-supplied type identifier.
  ///
  /// Accepts both the short form `pkg/Type`, which means `pkg/msg/Type`, and
  /// the full form `pkg/kind/Type`.
  pub fn parse(s: &str) -> ToolResult<Self> {
    let parts: Vec<&str> = s.split('/').collect();
    let (package, kind, type_name) = match parts.as_slice() {
      [package, type_name] => (*package, "msg", *type_name),
      [package, kind, type_name] => (*package, *kind, *type_name),
      _ => return Err(ToolError::BadTypeName(s.to_owned())),
    };
    let ok_token = |t: &str| {
      t.starts_with(|c: char| c.is_ascii_alphabetic())
        && t.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    if [package, kind, type_name].iter().all(|t| ok_token(t)) {
      Ok(Self::new(package, kind, type_name))
    } else {
      Err(ToolError::BadTypeName(s.to_owned()))
    }
  }

  /// Recognize a DDS type name such as `std_msgs::msg::dds_::String_`.
  pub fn from_dds(dds_type: &str) -> Option<Self> {
    let mut parts = dds_type.split("::");
    let package = parts.next()?;
    let kind = parts.next()?;
    if parts.next()? != "dds_" {
      return None;
    }
    let type_name = parts.next()?.strip_suffix('_')?;
    if parts.next().is_some() || package.is_empty() || type_name.is_empty() {
      return None;
    }
    Some(Self::new(package, kind, type_name))
  }

  pub fn package_name(&self) -> &str {
    &self.package_name
  }

  pub fn kind(&self) -> &str {
    &self.kind
  }

  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  /// Convert to type name used over DDS
  pub fn dds_type(&self) -> String {
    format!(
      "{}::{}::dds_::{}_",
      self.package_name, self.kind, self.type_name
    )
  }

  /// Which DDS topic prefix carries this type.
  ///
  /// Service request and response types travel on `rq` and `rr` topics,
  /// everything else on `rt`.
  pub fn dds_topic_prefix(&self) -> &'static str {
    if self.kind == "srv" && self.type_name.ends_with("_Request") {
      REQUEST_PREFIX
    } else if self.kind == "srv" && self.type_name.ends_with("_Response") {
      REPLY_PREFIX
    } else {
      TOPIC_PREFIX
    }
  }
}

impl fmt::Display for InterfaceTypeName {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}/{}/{}", self.package_name, self.kind, self.type_name)
  }
}

/// Convert a DDS topic name to the ROS name shown to users.
///
/// `rt/chatter` becomes `/chatter`. Service topics keep their suffix, so
/// `rq/add_two_intsRequest` becomes `/add_two_intsRequest`. DDS topics
/// without a ROS prefix are not ROS Topics, and yield `None`.
pub fn ros_topic_from_dds(dds_name: &str) -> Option<String> {
  [TOPIC_PREFIX, REQUEST_PREFIX, REPLY_PREFIX]
    .iter()
    .find_map(|prefix| {
      dds_name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
    })
    .filter(|rest| !rest.is_empty())
    .map(|rest| format!("/{rest}"))
}

/// Build the DDS topic name for a user-supplied topic name.
///
/// Relative names are resolved against the root namespace.
pub fn dds_topic_name(topic: &str, prefix: &str) -> Result<String, NameError> {
  let name = Name::parse(topic)?;
  let full = name.to_string();
  Ok(format!("{prefix}/{}", full.trim_start_matches('/')))
}

/// Is this one half of a Service request/reply topic pair?
pub fn is_service_topic(ros_name: &str) -> bool {
  ros_name.ends_with("Reply") || ros_name.ends_with("Request")
}

// -------------------------------------------------------------------------------------
// -------------------------------------------------------------------------------------
