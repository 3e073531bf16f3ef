//! Mapping from type identifier strings to the Rust message types that can
//! carry them.
//!
//! Lookups go to the primary tier, which holds ordinary message types.
//! `echo` and `hz` may also fall back to the secondary tier, which holds the
//! request and response types carried on Service topics.

use std::{collections::BTreeMap, fmt};

use ros2_client::{Message, Node};
use rustdds::Topic;
use serde::Serialize;
use serde_json::Value;

use crate::{
  error::{ToolError, ToolResult},
  interfaces,
  middleware::{JsonPublisher, JsonSubscription},
  names::InterfaceTypeName,
  ros2,
};

type DecodeFn = fn(&str) -> ToolResult<Value>;
type PublisherFn = fn(&mut Node, &Topic) -> ToolResult<Box<dyn JsonPublisher>>;
type SubscriptionFn = fn(&mut Node, &Topic) -> ToolResult<Box<dyn JsonSubscription>>;

/// Everything needed to handle one message type without knowing it
/// statically: JSON decoding, and construction of typed ros2-client
/// Publishers and Subscriptions.
#[derive(Clone)]
pub struct TypeSupport {
  name: InterfaceTypeName,
  decode: DecodeFn,
  publisher: PublisherFn,
  subscription: SubscriptionFn,
}

impl TypeSupport {
  pub fn of<M>(name: InterfaceTypeName) -> TypeSupport
  where
    M: Message + fmt::Debug + 'static,
  {
    TypeSupport {
      name,
      decode: decode_json::<M>,
      publisher: ros2::create_json_publisher::<M>,
      subscription: ros2::create_json_subscription::<M>,
    }
  }

  pub fn name(&self) -> &InterfaceTypeName {
    &self.name
  }

  /// Decode a JSON literal into this type, and return it in JSON form again.
  ///
  /// The result has every field of the type. Fields missing from the
  /// literal get their default values.
  pub fn decode(&self, literal: &str) -> ToolResult<Value> {
    (self.decode)(literal)
  }

  pub(crate) fn create_publisher(
    &self,
    node: &mut Node,
    topic: &Topic,
  ) -> ToolResult<Box<dyn JsonPublisher>> {
    (self.publisher)(node, topic)
  }

  pub(crate) fn create_subscription(
    &self,
    node: &mut Node,
    topic: &Topic,
  ) -> ToolResult<Box<dyn JsonSubscription>> {
    (self.subscription)(node, topic)
  }
}

impl fmt::Debug for TypeSupport {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("TypeSupport")
      .field("name", &self.name)
      .finish()
  }
}

fn decode_json<M: Message>(literal: &str) -> ToolResult<Value> {
  let message: M = serde_json::from_str(literal)?;
  message_to_json(&message)
}

/// JSON form of a message, as shown to the user.
///
/// Goes through text: `serde_json::to_value` widens `f32` to `f64`, so that
/// 0.1 would show as 0.10000000149011612.
pub(crate) fn message_to_json<M: Serialize>(message: &M) -> ToolResult<Value> {
  Ok(serde_json::from_str(&serde_json::to_string(message)?)?)
}

/// Two-tier type registry
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
  primary: BTreeMap<InterfaceTypeName, TypeSupport>,
  secondary: BTreeMap<InterfaceTypeName, TypeSupport>,
}

impl TypeRegistry {
  /// An empty registry.
  pub fn new() -> TypeRegistry {
    TypeRegistry::default()
  }

  /// Registry with all the interface types this crate knows about.
  pub fn with_builtin_types() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    interfaces::register_all(&mut registry);
    registry
  }

  pub fn add_primary<M>(&mut self, name: InterfaceTypeName)
  where
    M: Message + fmt::Debug + 'static,
  {
    self.primary.insert(name.clone(), TypeSupport::of::<M>(name));
  }

  pub fn add_secondary<M>(&mut self, name: InterfaceTypeName)
  where
    M: Message + fmt::Debug + 'static,
  {
    self.secondary.insert(name.clone(), TypeSupport::of::<M>(name));
  }

  /// Look up a type identifier in the primary tier only.
  pub fn lookup(&self, type_id: &str) -> ToolResult<&TypeSupport> {
    let name = InterfaceTypeName::parse(type_id)?;
    self
      .primary
      .get(&name)
      .ok_or_else(|| ToolError::UnknownType(name.to_string()))
  }

  /// Look up a type identifier in the primary tier, then in the secondary.
  ///
  /// In the secondary tier the short form `pkg/Type` also matches
  /// `pkg/srv/Type`, since all secondary types are Service types.
  pub fn lookup_with_fallback(&self, type_id: &str) -> ToolResult<&TypeSupport> {
    let name = InterfaceTypeName::parse(type_id)?;
    self
      .primary
      .get(&name)
      .or_else(|| self.secondary.get(&name))
      .or_else(|| {
        let as_service = InterfaceTypeName::srv(name.package_name(), name.type_name());
        self.secondary.get(&as_service)
      })
      .ok_or_else(|| ToolError::UnknownType(name.to_string()))
  }

  /// All registered type names, primary tier first.
  pub fn type_names(&self) -> impl Iterator<Item = &InterfaceTypeName> {
    self.primary.keys().chain(self.secondary.keys())
  }
}
