//! The part of ROS2 this tool needs: Nodes that can be asked what Topics exist,
//! and that can create Publishers and Subscriptions for dynamically chosen
//! types.
//!
//! The production implementation is in [`crate::ros2`].

use std::{collections::BTreeMap, time::Duration};

use serde_json::Value;

use crate::{config::ToolConfig, error::ToolResult, registry::TypeSupport};

/// Discovered Topics: ROS Topic name to the type names seen for it.
///
/// Ordered by Topic name.
pub type TopicTypes = BTreeMap<String, Vec<String>>;

/// An initialized middleware. Dropping it shuts the middleware down.
pub trait Middleware {
  type Node: GraphNode;

  /// Create a Node. The Node is disposed of by dropping it.
  fn create_node(&self, config: &ToolConfig) -> ToolResult<Self::Node>;
}

pub trait GraphNode {
  /// Snapshot of the Topics discovered so far.
  fn topic_names_and_types(&self) -> TopicTypes;

  /// Give discovery one chance to make progress. Returns within the
  /// configured spin timeout.
  fn spin_once(&mut self);

  /// Create a Publisher with the default QoS profile.
  fn create_publisher(
    &mut self,
    topic: &str,
    type_support: &TypeSupport,
  ) -> ToolResult<Box<dyn JsonPublisher>>;

  /// Create a Subscription with the default QoS profile.
  fn create_subscription(
    &mut self,
    topic: &str,
    type_support: &TypeSupport,
  ) -> ToolResult<Box<dyn JsonSubscription>>;
}

/// Publisher whose messages are given as JSON values.
pub trait JsonPublisher {
  /// `message` must have been produced by [`TypeSupport::decode`] of the
  /// same type.
  fn publish(&mut self, message: &Value) -> ToolResult<()>;
}

/// Subscription whose messages are returned as JSON values.
pub trait JsonSubscription {
  /// Wait at most `timeout` for a message and return at most one.
  fn take(&mut self, timeout: Duration) -> ToolResult<Option<Value>>;
}
