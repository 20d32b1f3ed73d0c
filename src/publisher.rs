// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! # RabbitMQ Message Publisher
//!
//! Serializes file-processing events to UTF-8 JSON and publishes them on the
//! client's exchange. Every message leaves with fixed content-type/encoding
//! headers and the current trace context propagated in its headers.

use crate::{errors::AmqpError, events::FileProcessingEvent, options::PublishOptions, otel};
use lapin::{
    options::BasicPublishOptions,
    types::{AMQPValue, FieldTable, ShortString},
    BasicProperties, Channel,
};
use std::{
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::error;
use uuid::Uuid;

/// Content type stamped on every published message
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Content encoding stamped on every published message
pub const UTF8_CONTENT_ENCODING: &str = "utf-8";

fn epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Builds the AMQP properties for one publish call.
///
/// Content type and encoding are fixed regardless of caller options; the
/// message is persistent unless explicitly overridden; `message_id` defaults
/// to a fresh UUID and `timestamp` to the current time.
pub(crate) fn build_properties(options: &PublishOptions) -> BasicProperties {
    let mut headers = BTreeMap::<ShortString, AMQPValue>::default();
    otel::inject_context(&mut headers);

    let message_id = options
        .message_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let delivery_mode: u8 = if options.persistent { 2 } else { 1 };

    let mut properties = BasicProperties::default()
        .with_content_type(ShortString::from(JSON_CONTENT_TYPE))
        .with_content_encoding(ShortString::from(UTF8_CONTENT_ENCODING))
        .with_delivery_mode(delivery_mode)
        .with_message_id(ShortString::from(message_id))
        .with_timestamp(options.timestamp.unwrap_or_else(epoch_seconds))
        .with_headers(FieldTable::from(headers));

    if let Some(correlation_id) = &options.correlation_id {
        properties = properties.with_correlation_id(ShortString::from(correlation_id.clone()));
    }

    if let Some(expiration) = &options.expiration {
        properties = properties.with_expiration(ShortString::from(expiration.clone()));
    }

    properties
}

/// Publishes one event on the exchange.
///
/// Returns `Ok(true)` once the broker's local buffer accepted the write:
/// a buffering acknowledgment, not a delivery guarantee. Serialization and
/// transport failures both map to [`AmqpError::Publish`].
pub(crate) async fn publish_to(
    channel: &Channel,
    exchange: &str,
    event: &FileProcessingEvent,
    options: &PublishOptions,
) -> Result<bool, AmqpError> {
    let payload = match serde_json::to_vec(event) {
        Ok(payload) => payload,
        Err(err) => {
            error!(
                error = err.to_string(),
                event_type = event.event_type(),
                "error serializing event"
            );
            return Err(AmqpError::Publish(err.to_string()));
        }
    };

    match channel
        .basic_publish(
            exchange,
            &options.routing_key,
            BasicPublishOptions {
                immediate: false,
                mandatory: false,
            },
            &payload,
            build_properties(options),
        )
        .await
    {
        Err(err) => {
            error!(
                error = err.to_string(),
                exchange,
                routing_key = options.routing_key.as_str(),
                "error publishing message"
            );
            Err(AmqpError::Publish(err.to_string()))
        }
        _ => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_headers_are_fixed() {
        let props = build_properties(&PublishOptions::new("file.uploaded"));
        assert_eq!(
            props.content_type().as_ref().map(|value| value.as_str()),
            Some(JSON_CONTENT_TYPE)
        );
        assert_eq!(
            props
                .content_encoding()
                .as_ref()
                .map(|value| value.as_str()),
            Some(UTF8_CONTENT_ENCODING)
        );
    }

    #[test]
    fn messages_are_persistent_unless_overridden() {
        let props = build_properties(&PublishOptions::new("k"));
        assert_eq!(*props.delivery_mode(), Some(2));

        let props = build_properties(&PublishOptions::new("k").transient());
        assert_eq!(*props.delivery_mode(), Some(1));
    }

    #[test]
    fn message_id_and_timestamp_default_when_unset() {
        let props = build_properties(&PublishOptions::new("k"));
        assert!(props.message_id().is_some());
        assert!(props.timestamp().unwrap_or_default() > 0);
    }

    #[test]
    fn caller_supplied_metadata_is_passed_through() {
        let options = PublishOptions::new("k")
            .message_id("m-1")
            .correlation_id("c-1")
            .timestamp(1_700_000_000)
            .expiration("60000");
        let props = build_properties(&options);

        assert_eq!(
            props.message_id().as_ref().map(|value| value.as_str()),
            Some("m-1")
        );
        assert_eq!(
            props.correlation_id().as_ref().map(|value| value.as_str()),
            Some("c-1")
        );
        assert_eq!(*props.timestamp(), Some(1_700_000_000));
        assert_eq!(
            props.expiration().as_ref().map(|value| value.as_str()),
            Some("60000")
        );
    }
}
