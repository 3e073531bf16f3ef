//! `echo` and `hz`: subscribe to a Topic, and either print the messages or
//! estimate how often they arrive.

use std::{io::Write, time::Instant};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use serde_json::Value;

use crate::{
  cancel::CancelToken,
  dispatch::Session,
  error::{ToolError, ToolResult},
  middleware::{GraphNode, JsonSubscription, Middleware},
};

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Publish frequency estimate from message arrival times.
///
/// At most one report per second: when a message arrives more than one
/// second after the previous report, the frequency is reported as the
/// inverse of the interval since the previous message.
#[derive(Clone, Copy, Debug)]
pub struct RateEstimator {
  window_start: i64, // nanoseconds
  last_arrival: i64, // nanoseconds
}

impl RateEstimator {
  /// `now` is in nanoseconds, from any fixed origin.
  pub fn new(now: i64) -> RateEstimator {
    RateEstimator {
      window_start: now,
      last_arrival: now,
    }
  }

  /// Record a message arrival. Returns the frequency in Hz, if it is time to
  /// report one.
  pub fn on_arrival(&mut self, now: i64) -> Option<f64> {
    let mut report = None;
    if now - self.window_start > NANOS_PER_SEC {
      let interval = now - self.last_arrival;
      report = Some(NANOS_PER_SEC as f64 / interval as f64);
      self.window_start = now;
    }
    self.last_arrival = now;
    report
  }
}

pub fn echo<M: Middleware>(
  session: &Session<M>,
  args: &[String],
  out: &mut dyn Write,
) -> ToolResult<()> {
  echo_or_rate(session, args, out, false, monotonic_clock())
}

pub fn hz<M: Middleware>(
  session: &Session<M>,
  args: &[String],
  out: &mut dyn Write,
) -> ToolResult<()> {
  echo_or_rate(session, args, out, true, monotonic_clock())
}

// Nanoseconds since the clock was created.
fn monotonic_clock() -> impl FnMut() -> i64 {
  let origin = Instant::now();
  move || origin.elapsed().as_nanos() as i64
}

fn echo_or_rate<M, C>(
  session: &Session<M>,
  args: &[String],
  out: &mut dyn Write,
  rate_mode: bool,
  mut clock: C,
) -> ToolResult<()>
where
  M: Middleware,
  C: FnMut() -> i64,
{
  let (topic, type_id) = match args {
    [_, topic, type_id, ..] => (topic, type_id),
    [_, _] => {
      writeln!(out, "topic type must be specified")?;
      return Ok(());
    }
    _ => {
      writeln!(out, "/topic must be specified")?;
      return Ok(());
    }
  };
  let max_ticks = match args.get(3) {
    None => u64::MAX,
    Some(s) => s.trim().parse::<u64>().map_err(|_| ToolError::BadNumber {
      what: "message count",
      value: s.clone(),
    })?,
  };

  let type_support = session.registry.lookup_with_fallback(type_id)?;

  let mut node = session.create_node()?;
  let mut subscription = node.create_subscription(topic, type_support)?;
  debug!("Subscribed to {topic} as {}", type_support.name());

  let mut estimator = RateEstimator::new(clock());

  let ticks = spin_subscription(
    subscription.as_mut(),
    max_ticks,
    session,
    |message| {
      if rate_mode {
        if let Some(freq) = estimator.on_arrival(clock()) {
          writeln!(out, "Freq : {freq:.6} hz")?;
        }
      } else {
        writeln!(out, "{message}")?;
      }
      Ok(())
    },
  )?;
  debug!("Stopped after {ticks} ticks");

  // Unsubscribe before the Node goes away.
  drop(subscription);
  Ok(())
}

/// Run up to `max_ticks` ticks, or until cancelled. Each tick waits for at
/// most one message and hands it to `on_message`.
///
/// Returns the number of ticks run.
fn spin_subscription<M, F>(
  subscription: &mut dyn JsonSubscription,
  max_ticks: u64,
  session: &Session<M>,
  mut on_message: F,
) -> ToolResult<u64>
where
  M: Middleware,
  F: FnMut(Value) -> ToolResult<()>,
{
  let cancel: &CancelToken = session.cancel;
  let mut ticks = 0;
  while ticks < max_ticks && !cancel.is_cancelled() {
    if let Some(message) = subscription.take(session.config.spin_timeout)? {
      on_message(message)?;
    }
    ticks += 1;
  }
  Ok(ticks)
}

// -------------------------------------------------------------------------------------
// -------------------------------------------------------------------------------------
