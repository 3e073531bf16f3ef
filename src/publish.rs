//! `pub`: publish a message given as a JSON literal, once or periodically.

use std::{io::Write, time::Duration};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use crate::{
  dispatch::Session,
  error::{ToolError, ToolResult},
  middleware::{GraphNode, Middleware},
};

/// Every occurrence of this in the JSON literal is replaced with the number
/// of the message being published, starting from 1.
///
/// This is plain text substitution, not templating: it also hits `iii`
/// inside longer words, and there is no way to escape it.
pub const COUNTER_TOKEN: &str = "iii";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishRate {
  /// Publish one message and stop.
  Once,
  /// Messages per second, never zero.
  PerSecond(u32),
}

impl PublishRate {
  /// Parse the optional rate argument.
  ///
  /// Missing means 1 per second, and so does 0. Exactly -1 means "publish
  /// once".
  pub fn parse(arg: Option<&str>) -> ToolResult<PublishRate> {
    let bad = || ToolError::BadNumber {
      what: "rate",
      value: arg.unwrap_or_default().to_string(),
    };
    match arg.map(|s| s.trim().parse::<i64>()) {
      None => Ok(PublishRate::PerSecond(1)),
      Some(Ok(-1)) => Ok(PublishRate::Once),
      Some(Ok(0)) => Ok(PublishRate::PerSecond(1)),
      Some(Ok(n)) => u32::try_from(n)
        .map(PublishRate::PerSecond)
        .map_err(|_| bad()),
      Some(Err(_)) => Err(bad()),
    }
  }

  /// Sleep between messages, `None` when publishing once.
  pub fn period(self) -> Option<Duration> {
    match self {
      PublishRate::Once => None,
      PublishRate::PerSecond(r) => Some(Duration::from_millis(1000 / u64::from(r))),
    }
  }
}

pub fn publish<M: Middleware>(
  session: &Session<M>,
  args: &[String],
  out: &mut dyn Write,
) -> ToolResult<()> {
  let (topic, type_id, literal) = match args {
    [_, topic, type_id, literal, ..] => (topic, type_id, literal),
    [_, _, _] => {
      writeln!(out, "message must be specified")?;
      return Ok(());
    }
    [_, _] => {
      writeln!(out, "topic type must be specified")?;
      return Ok(());
    }
    _ => {
      writeln!(out, "/topic must be specified")?;
      return Ok(());
    }
  };
  let rate = PublishRate::parse(args.get(4).map(String::as_str))?;
  if args.len() > 5 {
    warn!("Ignoring extra arguments {:?}", &args[5..]);
  }

  let type_support = session.registry.lookup(type_id)?;

  // With a counter, the literal may not be valid JSON before substitution,
  // e.g. {"data": iii}, so it is decoded per message.
  let has_counter = literal.contains(COUNTER_TOKEN);
  let mut message = if has_counter {
    None
  } else {
    Some(type_support.decode(literal)?)
  };

  let mut node = session.create_node()?;
  let mut publisher = node.create_publisher(topic, type_support)?;
  debug!("Publishing to {topic} as {}, {rate:?}", type_support.name());

  let mut counter: u64 = 0;
  while !session.cancel.is_cancelled() {
    counter += 1;
    if has_counter {
      let substituted = literal.replace(COUNTER_TOKEN, &counter.to_string());
      message = Some(type_support.decode(&substituted)?);
    }
    if let Some(ref message) = message {
      writeln!(out, "Publishing: {message}")?;
      publisher.publish(message)?;
    }

    match rate.period() {
      None => break,
      Some(period) => {
        session.cancel.sleep(period);
      }
    }
  }

  drop(publisher);
  Ok(())
}

// -------------------------------------------------------------------------------------
// -------------------------------------------------------------------------------------
