//! Command word dispatch.
//!
//! The first argument selects a command. Unknown or missing commands print
//! the usage text. Commands that talk to ROS2 get a freshly initialized
//! middleware, which is shut down again when the command returns, whether it
//! succeeded or not.

use std::io::{self, Write};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use crate::{
  cancel::CancelToken,
  config::ToolConfig,
  discovery, echo,
  error::ToolResult,
  middleware::Middleware,
  publish,
  registry::TypeRegistry,
};

const FULL_USAGE: &str = "\
ros2topic is a command-line tool for printing information about ROS Topics.
Commands:
\tros2topic echo\tprint messages to screen
\tros2topic find\tfind topics by type
\tros2topic hz\tdisplay publishing rate of topic
\tros2topic list\tlist active topics
\tros2topic pub\tpublish data to topic
\tros2topic type\tprint topic type
Type ros2topic <command> -h for more detailed usage, e.g. 'ros2topic echo -h'";

const NOT_IMPLEMENTED: &str = "Not implemented...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolCommand {
  Echo,
  Hz,
  Type,
  List,
  Info,
  Pub,
  Bw,
  Find,
  Delay,
}

impl ToolCommand {
  pub fn parse(word: &str) -> Option<ToolCommand> {
    match word {
      "echo" => Some(ToolCommand::Echo),
      "hz" => Some(ToolCommand::Hz),
      "type" => Some(ToolCommand::Type),
      "list" => Some(ToolCommand::List),
      "info" => Some(ToolCommand::Info),
      "pub" => Some(ToolCommand::Pub),
      "bw" => Some(ToolCommand::Bw),
      "find" => Some(ToolCommand::Find),
      "delay" => Some(ToolCommand::Delay),
      _ => None,
    }
  }

  /// Does this command talk to ROS2 at all?
  pub fn needs_middleware(self) -> bool {
    !matches!(
      self,
      ToolCommand::Info | ToolCommand::Bw | ToolCommand::Delay
    )
  }

  fn usage(self) -> &'static str {
    match self {
      ToolCommand::Echo => "Usage: ros2topic echo <topic> <type> [max_count]",
      ToolCommand::Hz => "Usage: ros2topic hz <topic> <type> [max_count]",
      ToolCommand::Type => "Usage: ros2topic type <topic>",
      ToolCommand::List => "Usage: ros2topic list",
      ToolCommand::Find => "Usage: ros2topic find <type>",
      ToolCommand::Pub => {
        "Usage: ros2topic pub <topic> <type> <json> [rate]\n\
         \trate is messages per second, default 1. Use -1 to publish only once.\n\
         \tEvery iii in <json> is replaced by a message counter starting from 1."
      }
      ToolCommand::Info | ToolCommand::Bw | ToolCommand::Delay => NOT_IMPLEMENTED,
    }
  }

  fn takes_type(self) -> bool {
    matches!(
      self,
      ToolCommand::Echo | ToolCommand::Hz | ToolCommand::Pub
    )
  }
}

/// What a command handler may use while it runs.
pub struct Session<'a, M: Middleware> {
  pub middleware: &'a M,
  pub registry: &'a TypeRegistry,
  pub config: &'a ToolConfig,
  pub cancel: &'a CancelToken,
}

impl<'a, M: Middleware> Session<'a, M> {
  pub fn create_node(&self) -> ToolResult<M::Node> {
    self.middleware.create_node(self.config)
  }

  fn execute(&self, command: ToolCommand, args: &[String], out: &mut dyn Write) -> ToolResult<()> {
    match command {
      ToolCommand::Echo => echo::echo(self, args, out),
      ToolCommand::Hz => echo::hz(self, args, out),
      ToolCommand::Type => discovery::topic_type(self, args, out),
      ToolCommand::List => discovery::list(self, args, out),
      ToolCommand::Pub => publish::publish(self, args, out),
      ToolCommand::Find => discovery::find(self, args, out),
      ToolCommand::Info | ToolCommand::Bw | ToolCommand::Delay => {
        writeln!(out, "{NOT_IMPLEMENTED}")?;
        Ok(())
      }
    }
  }
}

/// Run the command in `args`, writing its output to `out`.
///
/// `connect` initializes the middleware. It is called only for commands that
/// need it. Command failures are reported to `out` and the log; only a
/// failure to write to `out` is returned.
pub fn run<M, F>(
  args: &[String],
  connect: F,
  registry: &TypeRegistry,
  config: &ToolConfig,
  cancel: &CancelToken,
  out: &mut dyn Write,
) -> io::Result<()>
where
  M: Middleware,
  F: FnOnce(&ToolConfig) -> ToolResult<M>,
{
  let command = match args.first().and_then(|word| ToolCommand::parse(word)) {
    Some(c) => c,
    None => {
      debug!("No known command in {args:?}");
      return writeln!(out, "{FULL_USAGE}");
    }
  };

  // Unimplemented commands accept any arguments, help included.
  if !command.needs_middleware() {
    return writeln!(out, "{NOT_IMPLEMENTED}");
  }

  if matches!(args.get(1).map(String::as_str), Some("-h") | Some("--help")) {
    return command_usage(command, registry, out);
  }

  let result = match connect(config) {
    Ok(middleware) => {
      let session = Session {
        middleware: &middleware,
        registry,
        config,
        cancel,
      };
      session.execute(command, args, out)
      // middleware is dropped, i.e. shut down, here
    }
    Err(e) => Err(e),
  };

  if let Err(e) = result {
    error!("{command:?} failed: {e}");
    writeln!(out, "ERROR : {e}")?;
  }
  Ok(())
}

fn command_usage(
  command: ToolCommand,
  registry: &TypeRegistry,
  out: &mut dyn Write,
) -> io::Result<()> {
  writeln!(out, "{}", command.usage())?;
  if command.takes_type() {
    writeln!(out, "Known types:")?;
    for name in registry.type_names() {
      writeln!(out, "\t{name}")?;
    }
  }
  Ok(())
}

// -------------------------------------------------------------------------------------
// -------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use test_case::test_case;

  use super::*;
  use crate::{
    error::ToolError,
    mock::{topics, MockMiddleware},
  };

  fn args(a: &[&str]) -> Vec<String> {
    a.iter().map(|s| s.to_string()).collect()
  }

  // Run with a connect function that counts how often it was called.
  fn run_counting(a: &[&str], middleware: MockMiddleware) -> (String, usize) {
    let connects = Rc::new(Cell::new(0));
    let counter = connects.clone();
    let mut out = Vec::new();
    run(
      &args(a),
      move |_config: &ToolConfig| {
        counter.set(counter.get() + 1);
        Ok(middleware)
      },
      &TypeRegistry::with_builtin_types(),
      &ToolConfig::default(),
      &CancelToken::new(),
      &mut out,
    )
    .unwrap();
    (String::from_utf8(out).unwrap(), connects.get())
  }

  #[test_case(&[] ; "empty")]
  #[test_case(&["foo"] ; "unknown")]
  #[test_case(&["LIST"] ; "wrong case")]
  #[test_case(&["--", "list"] ; "not a command word")]
  fn usage_without_middleware(a: &[&str]) {
    let middleware = MockMiddleware::default();
    let state = middleware.state.clone();
    let (output, connects) = run_counting(a, middleware);
    assert_eq!(output, format!("{FULL_USAGE}\n"));
    assert_eq!(connects, 0);
    assert_eq!(state.borrow().nodes_created, 0);
  }

  #[test_case(&["info"] ; "info")]
  #[test_case(&["bw", "/chatter"] ; "bw")]
  #[test_case(&["delay", "/a", "b", "c"] ; "delay")]
  #[test_case(&["info", "-h"] ; "info help")]
  #[test_case(&["bw", "-h"] ; "bw help")]
  #[test_case(&["delay", "--help"] ; "delay help")]
  fn not_implemented(a: &[&str]) {
    let (output, connects) = run_counting(a, MockMiddleware::default());
    assert_eq!(output, "Not implemented...\n");
    assert_eq!(connects, 0);
  }

  #[test]
  fn command_help() {
    let (output, connects) = run_counting(&["echo", "-h"], MockMiddleware::default());
    assert!(output.starts_with("Usage: ros2topic echo <topic> <type>"));
    assert!(output.contains("\tstd_msgs/msg/String\n"));
    assert_eq!(connects, 0);

    let (output, _) = run_counting(&["list", "--help"], MockMiddleware::default());
    assert_eq!(output, "Usage: ros2topic list\n");
  }

  #[test]
  fn known_command_connects_once_and_disposes_node() {
    let middleware =
      MockMiddleware::with_polls(vec![topics(&[("/chatter", &["std_msgs/msg/String"])])]);
    let state = middleware.state.clone();
    let (output, connects) = run_counting(&["list"], middleware);
    assert_eq!(output, "/chatter\n");
    assert_eq!(connects, 1);
    assert_eq!(state.borrow().nodes_created, 1);
    assert_eq!(state.borrow().nodes_dropped, 1);
  }

  #[test]
  fn handler_error_is_reported_not_propagated() {
    let middleware = MockMiddleware::default();
    let state = middleware.state.clone();
    let (output, _) = run_counting(
      &["pub", "/chatter", "nonexistent_msgs/Foo", "{}"],
      middleware,
    );
    assert_eq!(
      output,
      "ERROR : Message type nonexistent_msgs/msg/Foo not found !\n"
    );
    assert_eq!(state.borrow().nodes_created, 0);
  }

  #[test]
  fn connect_failure_is_reported() {
    let mut out = Vec::new();
    run(
      &args(&["list"]),
      |_config: &ToolConfig| -> ToolResult<MockMiddleware> {
        Err(ToolError::Middleware {
          operation: "create context",
          reason: "no network".to_string(),
        })
      },
      &TypeRegistry::new(),
      &ToolConfig::default(),
      &CancelToken::new(),
      &mut out,
    )
    .unwrap();
    assert_eq!(
      String::from_utf8(out).unwrap(),
      "ERROR : create context failed: no network\n"
    );
  }
}
