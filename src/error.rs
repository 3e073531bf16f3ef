use std::{fmt, io};

use ros2_client::names::NameError;

/// Failures of a single command.
///
/// Usage errors (missing or extra arguments) are not represented here:
/// handlers print those directly and return `Ok(())`.
#[derive(Debug)]
pub enum ToolError {
  /// The type identifier is not in any registry tier that was consulted.
  UnknownType(String),
  /// The type identifier is not of the form `pkg/Type` or `pkg/msg/Type`.
  BadTypeName(String),
  BadTopicName(String, NameError),
  BadNumber {
    what: &'static str,
    value: String,
  },
  Json(serde_json::Error),
  /// Anything reported by ros2-client or RustDDS.
  Middleware {
    operation: &'static str,
    reason: String,
  },
  Io(io::Error),
}

pub type ToolResult<T> = Result<T, ToolError>;

impl ToolError {
  /// Wrap a middleware error. RustDDS error types differ between operations,
  /// and some are generic over the message type, so only the text is kept.
  pub fn middleware<E: fmt::Debug>(operation: &'static str, e: E) -> Self {
    ToolError::Middleware {
      operation,
      reason: format!("{e:?}"),
    }
  }
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ToolError::UnknownType(t) => write!(f, "Message type {t} not found !"),
      ToolError::BadTypeName(t) => {
        write!(f, "Bad message type name {t:?}. Expected pkg/Type or pkg/msg/Type")
      }
      ToolError::BadTopicName(n, e) => write!(f, "Bad topic name {n:?}: {e}"),
      ToolError::BadNumber { what, value } => write!(f, "Cannot parse {what} from {value:?}"),
      ToolError::Json(e) => write!(f, "Cannot decode message: {e}"),
      ToolError::Middleware { operation, reason } => write!(f, "{operation} failed: {reason}"),
      ToolError::Io(e) => write!(f, "Output error: {e}"),
    }
  }
}

impl std::error::Error for ToolError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ToolError::Json(e) => Some(e),
      ToolError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<serde_json::Error> for ToolError {
  fn from(e: serde_json::Error) -> Self {
    ToolError::Json(e)
  }
}

impl From<io::Error> for ToolError {
  fn from(e: io::Error) -> Self {
    ToolError::Io(e)
  }
}

#[test]
fn test_display() {
  let e = ToolError::BadNumber {
    what: "rate",
    value: "fast".to_string(),
  };
  assert_eq!(e.to_string(), "Cannot parse rate from \"fast\"");
  assert_eq!(
    ToolError::UnknownType("foo_msgs/msg/Bar".to_string()).to_string(),
    "Message type foo_msgs/msg/Bar not found !"
  );
}
