// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! # RabbitMQ Message Dispatcher
//!
//! Turns broker-pushed deliveries into handler invocations plus ack/nack
//! decisions. The handler runs to completion before the outcome is decided:
//! success acknowledges the message; a deserialize or handler failure rejects
//! it without requeue, leaving redelivery to whatever dead-letter routing the
//! broker has configured. At-least-once delivery, no local retry loop.

use crate::{errors::AmqpError, errors::AppError, events::FileProcessingEvent, otel};
use async_trait::async_trait;
use futures_util::StreamExt;
use lapin::{
    message::Delivery,
    options::{BasicAckOptions, BasicConsumeOptions, BasicNackOptions},
    types::FieldTable,
    Channel,
};
use opentelemetry::{
    global::{self, BoxedTracer},
    trace::{Span, Status},
    Context,
};
use std::{borrow::Cow, sync::Arc};
use tracing::{debug, error, warn};

/// Processes one deserialized event.
///
/// Implementations are invoked once per delivered message with the trace
/// context extracted from the message headers. Returning an error rejects the
/// message without requeue; the error never propagates past the dispatch
/// loop.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConsumerHandler: Send + Sync {
    async fn exec(&self, ctx: &Context, event: &FileProcessingEvent) -> Result<(), AppError>;
}

/// Outcome of dispatching one message.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Disposition {
    Ack,
    /// Reject without requeue; dead-letter routing takes over if configured.
    DeadLetter,
}

/// Decides the outcome for one payload.
///
/// The handler runs to completion before the decision is made. Unparseable
/// payloads never reach the handler.
pub(crate) async fn dispatch(
    ctx: &Context,
    payload: &[u8],
    handler: &dyn ConsumerHandler,
) -> Disposition {
    let event = match serde_json::from_slice::<FileProcessingEvent>(payload) {
        Ok(event) => event,
        Err(err) => {
            warn!(
                error = err.to_string(),
                "rejecting message with unparseable payload"
            );
            return Disposition::DeadLetter;
        }
    };

    match handler.exec(ctx, &event).await {
        Ok(()) => Disposition::Ack,
        Err(err) => {
            error!(
                error = err.to_string(),
                event_type = event.event_type(),
                "handler failed, rejecting message"
            );
            Disposition::DeadLetter
        }
    }
}

/// Dispatches one delivery and settles it with the broker.
pub(crate) async fn handle_delivery(
    tracer: &BoxedTracer,
    delivery: &Delivery,
    handler: &dyn ConsumerHandler,
) -> Result<(), AmqpError> {
    let (ctx, mut span) =
        otel::consumer_span(&delivery.properties, tracer, delivery.routing_key.as_str());

    match dispatch(&ctx, &delivery.data, handler).await {
        Disposition::Ack => match delivery.ack(BasicAckOptions { multiple: false }).await {
            Ok(()) => {
                span.set_status(Status::Ok);
                Ok(())
            }
            Err(err) => {
                error!(error = err.to_string(), "error to ack msg");
                span.record_error(&err);
                span.set_status(Status::Error {
                    description: Cow::from("error to ack msg"),
                });
                Err(AmqpError::Ack)
            }
        },
        Disposition::DeadLetter => match delivery
            .nack(BasicNackOptions {
                multiple: false,
                requeue: false,
            })
            .await
        {
            Ok(()) => {
                span.set_status(Status::Error {
                    description: Cow::from("message rejected"),
                });
                Ok(())
            }
            Err(err) => {
                error!(error = err.to_string(), "error to nack msg");
                span.record_error(&err);
                span.set_status(Status::Error {
                    description: Cow::from("error to nack msg"),
                });
                Err(AmqpError::Nack)
            }
        },
    }
}

/// Attaches a consumer to the live channel and drains it in a spawned task.
///
/// The task ends when the channel dies or the consumer is cancelled; per-
/// message failures are logged and never stop the loop.
pub(crate) async fn attach_consumer(
    channel: Arc<Channel>,
    queue: &str,
    consumer_tag: &str,
    handler: Arc<dyn ConsumerHandler>,
) -> Result<(), AmqpError> {
    let mut consumer = match channel
        .basic_consume(
            queue,
            consumer_tag,
            BasicConsumeOptions {
                no_local: false,
                no_ack: false,
                exclusive: false,
                nowait: false,
            },
            FieldTable::default(),
        )
        .await
    {
        Ok(consumer) => consumer,
        Err(err) => {
            error!(error = err.to_string(), queue, "error to create the consumer");
            return Err(AmqpError::ConsumerSetup(queue.to_owned()));
        }
    };

    let queue = queue.to_owned();
    tokio::spawn(async move {
        while let Some(result) = consumer.next().await {
            match result {
                Ok(delivery) => {
                    if let Err(err) = handle_delivery(
                        &global::tracer("amqp consumer"),
                        &delivery,
                        handler.as_ref(),
                    )
                    .await
                    {
                        error!(
                            error = err.to_string(),
                            queue = queue.as_str(),
                            "error settling message"
                        );
                    }
                }
                Err(err) => error!(
                    error = err.to_string(),
                    queue = queue.as_str(),
                    "error receiving delivery"
                ),
            }
        }
        debug!(queue = queue.as_str(), "consumer stream closed");
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::imports::FileType;
    use crate::events::{FileUploadedData, FileUploadedEvent};

    fn sample_event() -> FileProcessingEvent {
        FileProcessingEvent::FileUploaded(FileUploadedEvent::new(FileUploadedData {
            file_id: "f-1".into(),
            file_name: "statement.csv".into(),
            file_type: FileType::Bank,
            user_id: "u-1".into(),
            import_options: None,
        }))
    }

    #[tokio::test]
    async fn successful_handler_acks_exactly_once() {
        let mut handler = MockConsumerHandler::new();
        handler.expect_exec().times(1).returning(|_, _| Ok(()));

        let payload = serde_json::to_vec(&sample_event()).unwrap();
        let disposition = dispatch(&Context::current(), &payload, &handler).await;
        assert_eq!(disposition, Disposition::Ack);
    }

    #[tokio::test]
    async fn failing_handler_dead_letters_without_requeue() {
        let mut handler = MockConsumerHandler::new();
        handler
            .expect_exec()
            .times(1)
            .returning(|_, _| Err(AppError::Internal("boom".into())));

        let payload = serde_json::to_vec(&sample_event()).unwrap();
        let disposition = dispatch(&Context::current(), &payload, &handler).await;
        assert_eq!(disposition, Disposition::DeadLetter);
    }

    #[tokio::test]
    async fn unparseable_payload_never_reaches_the_handler() {
        let mut handler = MockConsumerHandler::new();
        handler.expect_exec().times(0);

        let disposition = dispatch(&Context::current(), b"not json", &handler).await;
        assert_eq!(disposition, Disposition::DeadLetter);
    }

    #[tokio::test]
    async fn handler_receives_the_deserialized_event() {
        let event = sample_event();
        let expected_id = event.event_id().to_owned();

        let mut handler = MockConsumerHandler::new();
        handler
            .expect_exec()
            .withf(move |_, event| event.event_id() == expected_id)
            .times(1)
            .returning(|_, _| Ok(()));

        let payload = serde_json::to_vec(&event).unwrap();
        let disposition = dispatch(&Context::current(), &payload, &handler).await;
        assert_eq!(disposition, Disposition::Ack);
    }
}
