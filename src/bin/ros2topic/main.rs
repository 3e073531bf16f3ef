use std::io;

#[allow(unused_imports)]
use log::{debug, error, info, warn};
use ros2_topic::{dispatch, CancelToken, Ros2Middleware, ToolConfig, TypeRegistry};

fn main() {
  pretty_env_logger::init();

  let arg_matches = ToolConfig::command().get_matches();
  let (config, args) = ToolConfig::from_matches(&arg_matches);
  debug!("{config:?} command={args:?}");

  // Ctrl-C stops the publish and echo loops, so that the ROS2 context
  // can be shut down in an orderly way.
  let cancel = CancelToken::new();
  let ctrlc_cancel = cancel.clone();
  ctrlc::set_handler(move || ctrlc_cancel.cancel())
    .unwrap_or_else(|e| error!("Cannot set Ctrl-C handler: {e:?}"));

  let registry = TypeRegistry::with_builtin_types();

  let stdout = io::stdout();
  let mut out = stdout.lock();
  dispatch::run(
    &args,
    Ros2Middleware::new,
    &registry,
    &config,
    &cancel,
    &mut out,
  )
  .unwrap_or_else(|e| error!("Cannot write output: {e:?}"));
}
