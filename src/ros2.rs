//! [`Middleware`] implementation on top of ros2-client and RustDDS.

use std::{fmt, time::Duration};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use mio::{Events, Poll, PollOpt, Ready, Token};
use ros2_client::{
  Context, ContextOptions, Message, Node, NodeName, NodeOptions, Publisher, Subscription,
};
use rustdds::{Topic, TopicKind};
use serde_json::Value;

use crate::{
  config::ToolConfig,
  error::{ToolError, ToolResult},
  middleware::{GraphNode, JsonPublisher, JsonSubscription, Middleware, TopicTypes},
  names::{dds_topic_name, ros_topic_from_dds, InterfaceTypeName},
  qos::DEFAULT_QOS,
  registry::{message_to_json, TypeSupport},
};

const SUBSCRIPTION_TOKEN: Token = Token(1);

/// A ROS2 [`Context`], i.e. a DDS DomainParticipant.
///
/// Dropping this shuts down the participant once all Nodes are gone.
pub struct Ros2Middleware {
  context: Context,
}

impl Ros2Middleware {
  pub fn new(config: &ToolConfig) -> ToolResult<Ros2Middleware> {
    let context = Context::with_options(ContextOptions::new().domain_id(config.domain_id))
      .map_err(|e| ToolError::middleware("create context", e))?;
    debug!("ROS2 context started on domain {}", config.domain_id);
    Ok(Ros2Middleware { context })
  }
}

impl Drop for Ros2Middleware {
  fn drop(&mut self) {
    debug!("ROS2 context shutting down");
  }
}

impl Middleware for Ros2Middleware {
  type Node = Ros2Node;

  fn create_node(&self, config: &ToolConfig) -> ToolResult<Ros2Node> {
    let node_name = NodeName::new("/", &config.node_name)
      .map_err(|e| ToolError::middleware("create node", e))?;
    let node = self
      .context
      .new_node(node_name, NodeOptions::new().enable_rosout(false))
      .map_err(|e| ToolError::middleware("create node", e))?;
    debug!("Created node {}", node.fully_qualified_name());
    Ok(Ros2Node {
      node,
      context: self.context.clone(),
      spin_timeout: config.spin_timeout,
    })
  }
}

pub struct Ros2Node {
  node: Node,
  context: Context,
  spin_timeout: Duration,
}

impl Ros2Node {
  fn create_topic(&self, topic: &str, type_support: &TypeSupport) -> ToolResult<Topic> {
    let type_name = type_support.name();
    let dds_name = dds_topic_name(topic, type_name.dds_topic_prefix())
      .map_err(|e| ToolError::BadTopicName(topic.to_owned(), e))?;
    debug!("Topic {topic} is {dds_name} over DDS, type {type_name}");
    self
      .context
      .domain_participant()
      .create_topic(dds_name, type_name.dds_type(), &DEFAULT_QOS, TopicKind::NoKey)
      .map_err(|e| ToolError::middleware("create topic", e))
  }
}

impl GraphNode for Ros2Node {
  fn topic_names_and_types(&self) -> TopicTypes {
    let discovered = self.context.domain_participant().discovered_topics();
    topic_types_from_dds(
      discovered
        .iter()
        .map(|dt| (dt.topic_name(), dt.type_name())),
    )
  }

  // DDS discovery runs in the RustDDS background thread. We just give it
  // some time.
  fn spin_once(&mut self) {
    std::thread::sleep(self.spin_timeout);
  }

  fn create_publisher(
    &mut self,
    topic: &str,
    type_support: &TypeSupport,
  ) -> ToolResult<Box<dyn JsonPublisher>> {
    let topic = self.create_topic(topic, type_support)?;
    type_support.create_publisher(&mut self.node, &topic)
  }

  fn create_subscription(
    &mut self,
    topic: &str,
    type_support: &TypeSupport,
  ) -> ToolResult<Box<dyn JsonSubscription>> {
    let topic = self.create_topic(topic, type_support)?;
    type_support.create_subscription(&mut self.node, &topic)
  }
}

/// Convert discovered DDS `(topic name, type name)` pairs to ROS names.
///
/// DDS topics that are not ROS Topics are skipped. Type names not of the ROS
/// form are kept as they are. Each type is listed once per Topic, in order of
/// discovery.
pub(crate) fn topic_types_from_dds<I, S>(discovered: I) -> TopicTypes
where
  I: IntoIterator<Item = (S, S)>,
  S: AsRef<str>,
{
  let mut topics = TopicTypes::new();
  for (topic_name, type_name) in discovered {
    let (topic_name, type_name) = (topic_name.as_ref(), type_name.as_ref());
    let ros_name = match ros_topic_from_dds(topic_name) {
      Some(n) => n,
      None => {
        trace!("Not a ROS topic: {topic_name}");
        continue;
      }
    };
    let type_name = InterfaceTypeName::from_dds(type_name)
      .map(|t| t.to_string())
      .unwrap_or_else(|| type_name.to_string());
    let types = topics.entry(ros_name).or_default();
    if !types.contains(&type_name) {
      types.push(type_name);
    }
  }
  topics
}

impl Drop for Ros2Node {
  fn drop(&mut self) {
    debug!("Disposing node {}", self.node.fully_qualified_name());
  }
}

// ----------------------------------------------------
// ----------------------------------------------------

struct Ros2JsonPublisher<M: Message> {
  publisher: Publisher<M>,
}

pub(crate) fn create_json_publisher<M>(
  node: &mut Node,
  topic: &Topic,
) -> ToolResult<Box<dyn JsonPublisher>>
where
  M: Message + fmt::Debug + 'static,
{
  let publisher = node
    .create_publisher::<M>(topic, None)
    .map_err(|e| ToolError::middleware("create publisher", e))?;
  Ok(Box::new(Ros2JsonPublisher { publisher }))
}

impl<M> JsonPublisher for Ros2JsonPublisher<M>
where
  M: Message + fmt::Debug + 'static,
{
  fn publish(&mut self, message: &Value) -> ToolResult<()> {
    let message: M = serde_json::from_value(message.clone())?;
    self
      .publisher
      .publish(message)
      .map_err(|e| ToolError::middleware("publish", e))
  }
}

// ----------------------------------------------------

struct Ros2JsonSubscription<M: Message> {
  subscription: Subscription<M>,
  poll: Poll,
  events: Events,
}

pub(crate) fn create_json_subscription<M>(
  node: &mut Node,
  topic: &Topic,
) -> ToolResult<Box<dyn JsonSubscription>>
where
  M: Message + fmt::Debug + 'static,
{
  let subscription = node
    .create_subscription::<M>(topic, None)
    .map_err(|e| ToolError::middleware("create subscription", e))?;
  let poll = Poll::new()?;
  poll.register(
    &subscription,
    SUBSCRIPTION_TOKEN,
    Ready::readable(),
    PollOpt::edge(),
  )?;
  Ok(Box::new(Ros2JsonSubscription {
    subscription,
    poll,
    events: Events::with_capacity(4),
  }))
}

impl<M> Ros2JsonSubscription<M>
where
  M: Message + fmt::Debug + 'static,
{
  fn try_take(&self) -> ToolResult<Option<Value>> {
    match self
      .subscription
      .take()
      .map_err(|e| ToolError::middleware("take", e))?
    {
      Some((message, _info)) => Ok(Some(message_to_json(&message)?)),
      None => Ok(None),
    }
  }
}

impl<M> JsonSubscription for Ros2JsonSubscription<M>
where
  M: Message + fmt::Debug + 'static,
{
  fn take(&mut self, timeout: Duration) -> ToolResult<Option<Value>> {
    // Edge-triggered readiness: drain what is already there before waiting.
    if let Some(message) = self.try_take()? {
      return Ok(Some(message));
    }
    self.poll.poll(&mut self.events, Some(timeout))?;
    self.try_take()
  }
}

// -------------------------------------------------------------------------------------
// -------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn graph_from_discovered_topics() {
    let topics = topic_types_from_dds(vec![
      ("rt/chatter", "std_msgs::msg::dds_::String_"),
      ("ros_discovery_info", "rmw_dds_common::msg::dds_::ParticipantEntitiesInfo_"),
      ("rq/add_two_intsRequest", "example_interfaces::srv::dds_::AddTwoInts_Request_"),
      ("rt/chatter", "std_msgs::msg::dds_::String_"),
      ("rt/raw", "MyVendorType"),
      ("rt/chatter", "std_msgs::msg::dds_::Int32_"),
      ("DCPSParticipant", "SPDPDiscoveredParticipantData"),
    ]);
    assert_eq!(
      topics.keys().collect::<Vec<_>>(),
      vec!["/add_two_intsRequest", "/chatter", "/raw"]
    );
    assert_eq!(
      topics["/chatter"],
      vec!["std_msgs/msg/String", "std_msgs/msg/Int32"]
    );
    assert_eq!(
      topics["/add_two_intsRequest"],
      vec!["example_interfaces/srv/AddTwoInts_Request"]
    );
    assert_eq!(topics["/raw"], vec!["MyVendorType"]);
  }

  #[test]
  fn nothing_discovered() {
    assert!(topic_types_from_dds(Vec::<(String, String)>::new()).is_empty());
  }
}
