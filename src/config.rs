use std::time::Duration;

use clap::{value_parser, Arg, ArgMatches, Command}; // command line argument processing

/// Settings shared by all commands. Built from command line options that
/// precede the command word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolConfig {
  /// DDS Domain Id, as in `ROS_DOMAIN_ID`.
  pub domain_id: u16,
  /// How long one discovery or subscription tick may wait.
  pub spin_timeout: Duration,
  /// Base name of the Node created for each command.
  pub node_name: String,
}

pub const DEFAULT_NODE_NAME: &str = "_ros2topic";

impl Default for ToolConfig {
  fn default() -> Self {
    ToolConfig {
      domain_id: 0,
      spin_timeout: Duration::from_millis(100),
      node_name: DEFAULT_NODE_NAME.to_string(),
    }
  }
}

impl ToolConfig {
  /// Argument parser for the `ros2topic` binary.
  ///
  /// Everything from the first positional argument on is collected
  /// verbatim into `command`, so that command arguments such as `-1` or a
  /// JSON literal are not interpreted as options.
  pub fn command() -> Command {
    Command::new("ros2topic")
      .version(env!("CARGO_PKG_VERSION"))
      .about("Print information about ROS2 Topics, echo and publish messages")
      .arg(
        Arg::new("domain_id")
          .long("domain-id")
          .env("ROS_DOMAIN_ID")
          .help("DDS Domain Id")
          .value_name("ID")
          .value_parser(value_parser!(u16)),
      )
      .arg(
        Arg::new("spin_timeout_ms")
          .long("spin-timeout-ms")
          .help("Duration of one discovery or subscription tick")
          .value_name("MS")
          .value_parser(value_parser!(u64)),
      )
      .arg(
        Arg::new("node_name")
          .long("node-name")
          .help("Name of the ROS2 Node created by this tool")
          .value_name("NAME"),
      )
      .arg(
        Arg::new("command")
          .help("Command and its arguments, e.g. echo /chatter std_msgs/String")
          .num_args(0..)
          .trailing_var_arg(true)
          .allow_hyphen_values(true),
      )
  }

  /// Split parsed matches into configuration and the raw command vector.
  pub fn from_matches(matches: &ArgMatches) -> (ToolConfig, Vec<String>) {
    let defaults = ToolConfig::default();
    let config = ToolConfig {
      domain_id: matches
        .get_one::<u16>("domain_id")
        .copied()
        .unwrap_or(defaults.domain_id),
      spin_timeout: matches
        .get_one::<u64>("spin_timeout_ms")
        .map(|ms| Duration::from_millis(*ms))
        .unwrap_or(defaults.spin_timeout),
      node_name: matches
        .get_one::<String>("node_name")
        .cloned()
        .unwrap_or(defaults.node_name),
    };
    let args = matches
      .get_many::<String>("command")
      .map(|vals| vals.cloned().collect())
      .unwrap_or_default();
    (config, args)
  }
}
