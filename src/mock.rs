// In-memory middleware for unit tests. Records what the commands do.

use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration};

use serde_json::Value;

use crate::{
  cancel::CancelToken,
  config::ToolConfig,
  error::ToolResult,
  middleware::{GraphNode, JsonPublisher, JsonSubscription, Middleware, TopicTypes},
  registry::TypeSupport,
};

#[derive(Debug, Default)]
pub struct MockState {
  pub nodes_created: usize,
  pub nodes_dropped: usize,
  pub ticks: usize,
  pub publishers: Vec<(String, String)>,
  pub subscriptions: Vec<(String, String)>,
  pub subscriptions_dropped: usize,
  pub published: Vec<Value>,
  pub takes: usize,
  /// Messages delivered by successive `take` calls. `None` is an empty tick.
  pub incoming: VecDeque<Option<Value>>,
}

#[derive(Clone, Default)]
pub struct MockMiddleware {
  /// Successive discovery snapshots. The n-th tick moves to entry n.
  pub polls: Vec<TopicTypes>,
  pub state: Rc<RefCell<MockState>>,
  /// Cancel this token once this many messages have been published.
  pub cancel_after: Option<(usize, CancelToken)>,
  /// Cancel this token once this many takes have been made.
  pub cancel_after_takes: Option<(usize, CancelToken)>,
}

impl MockMiddleware {
  pub fn with_polls(polls: Vec<TopicTypes>) -> Self {
    MockMiddleware {
      polls,
      ..Default::default()
    }
  }
}

pub fn topics(entries: &[(&str, &[&str])]) -> TopicTypes {
  entries
    .iter()
    .map(|(name, types)| {
      (
        name.to_string(),
        types.iter().map(|t| t.to_string()).collect(),
      )
    })
    .collect()
}

impl Middleware for MockMiddleware {
  type Node = MockNode;

  fn create_node(&self, _config: &ToolConfig) -> ToolResult<MockNode> {
    self.state.borrow_mut().nodes_created += 1;
    Ok(MockNode {
      middleware: self.clone(),
      ticks: 0,
    })
  }
}

pub struct MockNode {
  middleware: MockMiddleware,
  ticks: usize,
}

impl GraphNode for MockNode {
  fn topic_names_and_types(&self) -> TopicTypes {
    let polls = &self.middleware.polls;
    polls
      .get(self.ticks.min(polls.len().saturating_sub(1)))
      .cloned()
      .unwrap_or_default()
  }

  fn spin_once(&mut self) {
    self.ticks += 1;
    self.middleware.state.borrow_mut().ticks += 1;
  }

  fn create_publisher(
    &mut self,
    topic: &str,
    type_support: &TypeSupport,
  ) -> ToolResult<Box<dyn JsonPublisher>> {
    self
      .middleware
      .state
      .borrow_mut()
      .publishers
      .push((topic.to_string(), type_support.name().to_string()));
    Ok(Box::new(MockPublisher {
      middleware: self.middleware.clone(),
    }))
  }

  fn create_subscription(
    &mut self,
    topic: &str,
    type_support: &TypeSupport,
  ) -> ToolResult<Box<dyn JsonSubscription>> {
    self
      .middleware
      .state
      .borrow_mut()
      .subscriptions
      .push((topic.to_string(), type_support.name().to_string()));
    Ok(Box::new(MockSubscription {
      middleware: self.middleware.clone(),
    }))
  }
}

impl Drop for MockNode {
  fn drop(&mut self) {
    self.middleware.state.borrow_mut().nodes_dropped += 1;
  }
}

struct MockPublisher {
  middleware: MockMiddleware,
}

impl JsonPublisher for MockPublisher {
  fn publish(&mut self, message: &Value) -> ToolResult<()> {
    let count = {
      let mut state = self.middleware.state.borrow_mut();
      state.published.push(message.clone());
      state.published.len()
    };
    if let Some((limit, token)) = &self.middleware.cancel_after {
      if count >= *limit {
        token.cancel();
      }
    }
    Ok(())
  }
}

struct MockSubscription {
  middleware: MockMiddleware,
}

impl JsonSubscription for MockSubscription {
  fn take(&mut self, _timeout: Duration) -> ToolResult<Option<Value>> {
    let mut state = self.middleware.state.borrow_mut();
    state.takes += 1;
    if let Some((limit, token)) = &self.middleware.cancel_after_takes {
      if state.takes >= *limit {
        token.cancel();
      }
    }
    Ok(state.incoming.pop_front().flatten())
  }
}

impl Drop for MockSubscription {
  fn drop(&mut self) {
    self.middleware.state.borrow_mut().subscriptions_dropped += 1;
  }
}
