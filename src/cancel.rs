use std::{
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
  time::{Duration, Instant},
};

// Longest uninterrupted sleep slice. Cancellation is noticed within this time.
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Cooperative cancellation flag shared between the command loops and
/// whoever wants them to stop, e.g. a Ctrl-C handler.
///
/// Clones refer to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
  cancelled: Arc<AtomicBool>,
}

impl CancelToken {
  pub fn new() -> CancelToken {
    CancelToken::default()
  }

  pub fn cancel(&self) {
    self.cancelled.store(true, Ordering::SeqCst);
  }

  pub fn is_cancelled(&self) -> bool {
    self.cancelled.load(Ordering::SeqCst)
  }

  /// Sleep for `duration`, waking up early if cancelled.
  ///
  /// Returns `true` if the full duration elapsed without cancellation.
  pub fn sleep(&self, duration: Duration) -> bool {
    let deadline = Instant::now() + duration;
    loop {
      if self.is_cancelled() {
        return false;
      }
      let now = Instant::now();
      if now >= deadline {
        return true;
      }
      std::thread::sleep(SLEEP_SLICE.min(deadline - now));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clones_share_state() {
    let token = CancelToken::new();
    let other = token.clone();
    assert!(!other.is_cancelled());
    token.cancel();
    assert!(other.is_cancelled());
  }

  #[test]
  fn sleep_returns_early_when_cancelled() {
    let token = CancelToken::new();
    token.cancel();
    let start = Instant::now();
    assert!(!token.sleep(Duration::from_secs(10)));
    assert!(start.elapsed() < Duration::from_secs(1));
  }

  #[test]
  fn sleep_completes() {
    assert!(CancelToken::new().sleep(Duration::from_millis(5)));
  }
}
