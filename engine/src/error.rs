use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
  InvalidConfiguration(String),
  ChannelClosed(String),
}

impl std::error::Error for EngineError {}

impl fmt::Display for EngineError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EngineError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
      EngineError::ChannelClosed(msg) => write!(f, "Feed channel closed: {}", msg),
    }
  }
}
