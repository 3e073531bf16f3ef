//! `list`, `type` and `find`: what Topics are there, and of which types.

use std::io::Write;

use itertools::Itertools;
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use crate::{
  dispatch::Session,
  error::ToolResult,
  middleware::{GraphNode, Middleware, TopicTypes},
  names::is_service_topic,
};

/// Poll the discovered Topics, let discovery run once, and poll again.
///
/// Discovery is asynchronous, so the second poll may know more than the
/// first. Entries from both polls are kept.
pub fn discover<N: GraphNode>(node: &mut N) -> TopicTypes {
  let mut topics = node.topic_names_and_types();
  node.spin_once();
  topics.extend(node.topic_names_and_types());
  debug!("Discovered {} topics", topics.len());
  topics
}

pub fn list<M: Middleware>(
  session: &Session<M>,
  _args: &[String],
  out: &mut dyn Write,
) -> ToolResult<()> {
  let mut node = session.create_node()?;
  let topics = discover(&mut node);
  write_list(&topics, out)
}

fn write_list(topics: &TopicTypes, out: &mut dyn Write) -> ToolResult<()> {
  if topics.is_empty() {
    writeln!(out, "Empty topics !")?;
  }
  for name in topics.keys().filter(|name| !is_service_topic(name)) {
    writeln!(out, "{name}")?;
  }
  Ok(())
}

pub fn topic_type<M: Middleware>(
  session: &Session<M>,
  args: &[String],
  out: &mut dyn Write,
) -> ToolResult<()> {
  let topic = match args {
    [_, topic] => topic,
    [] | [_] => {
      writeln!(out, "Need to add topic name.")?;
      return Ok(());
    }
    _ => {
      writeln!(out, "You may only specify one input topic.")?;
      return Ok(());
    }
  };
  let mut node = session.create_node()?;
  let topics = discover(&mut node);
  write_type(&topics, topic, out)
}

fn write_type(topics: &TopicTypes, topic: &str, out: &mut dyn Write) -> ToolResult<()> {
  if topics.is_empty() {
    writeln!(out, "No Topics available !")?;
    return Ok(());
  }
  match topics.get(topic) {
    Some(types) => writeln!(out, "[{}]", types.iter().join(", "))?,
    None => writeln!(out, "No Topic {topic} available !")?,
  }
  Ok(())
}

pub fn find<M: Middleware>(
  session: &Session<M>,
  args: &[String],
  out: &mut dyn Write,
) -> ToolResult<()> {
  let type_name = match args.get(1) {
    Some(t) => t,
    None => {
      writeln!(out, "topic type must be specified")?;
      return Ok(());
    }
  };
  let mut node = session.create_node()?;
  let topics = discover(&mut node);
  write_find(&topics, type_name, out)
}

fn write_find(topics: &TopicTypes, type_name: &str, out: &mut dyn Write) -> ToolResult<()> {
  let matching = topics
    .iter()
    .filter(|(_name, types)| types.iter().any(|t| t == type_name))
    .map(|(name, _types)| name);
  for name in matching {
    writeln!(out, "{name}")?;
  }
  Ok(())
}

// -------------------------------------------------------------------------------------
// -------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use test_case::test_case;

  use super::*;
  use crate::{
    cancel::CancelToken,
    config::ToolConfig,
    mock::{topics, MockMiddleware},
    registry::TypeRegistry,
  };

  fn run_with(
    middleware: &MockMiddleware,
    handler: fn(&Session<MockMiddleware>, &[String], &mut dyn Write) -> ToolResult<()>,
    args: &[&str],
  ) -> String {
    let registry = TypeRegistry::with_builtin_types();
    let config = ToolConfig::default();
    let cancel = CancelToken::new();
    let session = Session {
      middleware,
      registry: &registry,
      config: &config,
      cancel: &cancel,
    };
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let mut out = Vec::new();
    handler(&session, &args, &mut out).unwrap();
    String::from_utf8(out).unwrap()
  }

  fn graph() -> MockMiddleware {
    MockMiddleware::with_polls(vec![
      topics(&[
        ("/chatter", &["std_msgs/msg/String"]),
        ("/add_two_intsRequest", &["example_interfaces/srv/AddTwoInts_Request"]),
      ]),
      // Second poll, after one tick, knows some more.
      topics(&[
        ("/add_two_intsReply", &["example_interfaces/srv/AddTwoInts_Response"]),
        ("/turtle1/cmd_vel", &["geometry_msgs/msg/Twist"]),
        ("/alpha", &["std_msgs/msg/String", "std_msgs/msg/Int32"]),
      ]),
    ])
  }

  #[test]
  fn discover_merges_polls_around_one_tick() {
    let middleware = graph();
    let mut node = middleware.create_node(&ToolConfig::default()).unwrap();
    let merged = discover(&mut node);
    assert_eq!(middleware.state.borrow().ticks, 1);
    assert_eq!(
      merged.keys().collect::<Vec<_>>(),
      vec![
        "/add_two_intsReply",
        "/add_two_intsRequest",
        "/alpha",
        "/chatter",
        "/turtle1/cmd_vel"
      ]
    );
  }

  #[test]
  fn list_is_sorted_and_hides_service_topics() {
    let middleware = graph();
    let output = run_with(&middleware, list, &["list"]);
    assert_eq!(output, "/alpha\n/chatter\n/turtle1/cmd_vel\n");
    assert!(!output
      .lines()
      .any(|l| l.ends_with("Reply") || l.ends_with("Request")));
    let state = middleware.state.borrow();
    assert_eq!(state.nodes_created, 1);
    assert_eq!(state.nodes_dropped, 1);
  }

  #[test]
  fn list_empty() {
    let middleware = MockMiddleware::default();
    assert_eq!(run_with(&middleware, list, &["list"]), "Empty topics !\n");
  }

  #[test]
  fn list_only_service_topics() {
    let middleware = MockMiddleware::with_polls(vec![topics(&[
      ("/fooRequest", &["a/srv/Foo_Request"]),
      ("/fooReply", &["a/srv/Foo_Response"]),
    ])]);
    assert_eq!(run_with(&middleware, list, &["list"]), "");
  }

  #[test_case(&["type", "/chatter"], "[std_msgs/msg/String]\n" ; "single type")]
  #[test_case(&["type", "/alpha"], "[std_msgs/msg/String, std_msgs/msg/Int32]\n" ; "two types")]
  #[test_case(&["type", "/nothing"], "No Topic /nothing available !\n" ; "unknown topic")]
  fn type_lookup(args: &[&str], expected: &str) {
    let middleware = graph();
    assert_eq!(run_with(&middleware, topic_type, args), expected);
  }

  #[test_case(&["type"], "Need to add topic name.\n" ; "no topic")]
  #[test_case(&["type", "/a", "/b"], "You may only specify one input topic.\n" ; "two topics")]
  fn type_usage_creates_no_node(args: &[&str], expected: &str) {
    let middleware = graph();
    assert_eq!(run_with(&middleware, topic_type, args), expected);
    assert_eq!(middleware.state.borrow().nodes_created, 0);
  }

  #[test]
  fn type_without_topics() {
    let middleware = MockMiddleware::default();
    assert_eq!(
      run_with(&middleware, topic_type, &["type", "/chatter"]),
      "No Topics available !\n"
    );
  }

  #[test]
  fn find_exact_type() {
    let middleware = graph();
    assert_eq!(
      run_with(&middleware, find, &["find", "std_msgs/msg/String"]),
      "/alpha\n/chatter\n"
    );
    assert_eq!(
      run_with(
        &middleware,
        find,
        &["find", "example_interfaces/srv/AddTwoInts_Request"]
      ),
      "/add_two_intsRequest\n"
    );
  }

  #[test_case("std_msgs/msg/Float64" ; "no such type")]
  #[test_case("std_msgs/msg/Str" ; "prefix only")]
  #[test_case("std_msgs/String" ; "short form is not exact")]
  fn find_nothing_prints_nothing(type_name: &str) {
    let middleware = graph();
    assert_eq!(run_with(&middleware, find, &["find", type_name]), "");
  }

  #[test]
  fn find_needs_type() {
    let middleware = graph();
    assert_eq!(
      run_with(&middleware, find, &["find"]),
      "topic type must be specified\n"
    );
    assert_eq!(middleware.state.borrow().nodes_created, 0);
  }
}
