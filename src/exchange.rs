// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! # Exchange Types
//!
//! The closed set of exchange types the messaging client supports, with
//! conversions to the lapin representation and from configuration strings.

use crate::errors::AppError;
use std::{fmt, str::FromStr};

/// Represents the types of exchanges available in RabbitMQ.
///
/// Each exchange type has specific routing behavior:
/// - Direct: routes messages to queues on an exact routing-key match
/// - Topic: routes messages on wildcard pattern matching of routing keys
/// - Fanout: broadcasts messages to all bound queues, ignoring routing keys
/// - Headers: routes on message header values instead of routing keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExchangeKind {
    #[default]
    Direct,
    Topic,
    Fanout,
    Headers,
}

impl From<&ExchangeKind> for lapin::ExchangeKind {
    fn from(kind: &ExchangeKind) -> Self {
        match kind {
            ExchangeKind::Direct => lapin::ExchangeKind::Direct,
            ExchangeKind::Topic => lapin::ExchangeKind::Topic,
            ExchangeKind::Fanout => lapin::ExchangeKind::Fanout,
            ExchangeKind::Headers => lapin::ExchangeKind::Headers,
        }
    }
}

impl fmt::Display for ExchangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExchangeKind::Direct => "direct",
            ExchangeKind::Topic => "topic",
            ExchangeKind::Fanout => "fanout",
            ExchangeKind::Headers => "headers",
        };
        f.write_str(name)
    }
}

impl FromStr for ExchangeKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "direct" => Ok(ExchangeKind::Direct),
            "topic" => Ok(ExchangeKind::Topic),
            "fanout" => Ok(ExchangeKind::Fanout),
            "headers" => Ok(ExchangeKind::Headers),
            other => Err(AppError::Validation(format!(
                "unsupported exchange type `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_supported_kind() {
        assert_eq!("direct".parse::<ExchangeKind>().unwrap(), ExchangeKind::Direct);
        assert_eq!("topic".parse::<ExchangeKind>().unwrap(), ExchangeKind::Topic);
        assert_eq!("FANOUT".parse::<ExchangeKind>().unwrap(), ExchangeKind::Fanout);
        assert_eq!("headers".parse::<ExchangeKind>().unwrap(), ExchangeKind::Headers);
    }

    #[test]
    fn rejects_unknown_kinds() {
        let err = "x-delayed-message".parse::<ExchangeKind>().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn converts_to_lapin_kinds() {
        assert_eq!(
            lapin::ExchangeKind::from(&ExchangeKind::Topic),
            lapin::ExchangeKind::Topic
        );
        assert_eq!(
            lapin::ExchangeKind::from(&ExchangeKind::Direct),
            lapin::ExchangeKind::Direct
        );
    }
}
