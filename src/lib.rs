//! Command-line tool for ROS2 Topics, in the spirit of `ros2 topic`.
//!
//! Commands:
//! * `list` - list active Topics
//! * `type` - print the type of a Topic
//! * `find` - find Topics by type
//! * `echo` - print messages to screen as JSON
//! * `hz` - display the publishing rate of a Topic
//! * `pub` - publish a message given as JSON, once or periodically
//!
//! ROS2 communication is done with [ros2-client](https://crates.io/crates/ros2-client),
//! which in turn uses RustDDS.
//!
//! # Example
//!
//! ```no_run
//! use ros2_topic::{dispatch, CancelToken, Ros2Middleware, ToolConfig, TypeRegistry};
//!
//! let args = vec!["list".to_string()];
//! let registry = TypeRegistry::with_builtin_types();
//! let config = ToolConfig::default();
//! let cancel = CancelToken::new();
//! dispatch::run(
//!   &args,
//!   Ros2Middleware::new,
//!   &registry,
//!   &config,
//!   &cancel,
//!   &mut std::io::stdout(),
//! )
//! .unwrap();
//! ```

#[macro_use]
extern crate lazy_static;

pub mod cancel;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod echo;
pub mod error;
/// Message types known to this tool
pub mod interfaces;
pub mod middleware;
pub mod names;
pub mod publish;
pub mod qos;
pub mod registry;
pub mod ros2;

#[cfg(test)]
mod mock;

pub use cancel::CancelToken;
pub use config::ToolConfig;
pub use error::{ToolError, ToolResult};
pub use middleware::{GraphNode, Middleware, TopicTypes};
pub use registry::{TypeRegistry, TypeSupport};
pub use ros2::Ros2Middleware;
