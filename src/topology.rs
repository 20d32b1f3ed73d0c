// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! # RabbitMQ Topology Management
//!
//! Declares the exchange and the per-queue bindings the client relies on.
//! Every operation here is idempotent, which matters because the client
//! re-declares the full consumer topology on every reconnect instead of
//! assuming the broker preserved durable bindings.

use crate::{errors::AmqpError, exchange::ExchangeKind, options::ConsumeOptions};
use lapin::{
    options::{ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions},
    types::FieldTable,
    Channel,
};
use std::sync::Arc;
use tracing::{debug, error};

/// Declares exchanges, queues, and bindings on a live channel.
///
/// Stateless beyond the channel it is given; the client builds a fresh
/// instance per (re)connect.
pub struct Topology {
    channel: Arc<Channel>,
}

impl Topology {
    pub fn new(channel: Arc<Channel>) -> Topology {
        Topology { channel }
    }

    /// Declares the durable exchange every publish and binding goes through.
    ///
    /// Must complete before any publish or consume operation.
    pub async fn declare_exchange(&self, name: &str, kind: &ExchangeKind) -> Result<(), AmqpError> {
        debug!(exchange = name, kind = kind.to_string(), "declaring exchange");

        match self
            .channel
            .exchange_declare(
                name,
                kind.into(),
                ExchangeDeclareOptions {
                    passive: false,
                    durable: true,
                    auto_delete: false,
                    internal: false,
                    nowait: false,
                },
                FieldTable::default(),
            )
            .await
        {
            Err(err) => {
                error!(
                    error = err.to_string(),
                    exchange = name,
                    "error to declare the exchange"
                );
                Err(AmqpError::DeclareExchange(name.to_owned()))
            }
            _ => {
                debug!(exchange = name, "exchange declared");
                Ok(())
            }
        }
    }

    /// Declares a queue and binds it to the exchange under the subscription's
    /// routing key.
    ///
    /// Runs once per subscription and again for every registered subscription
    /// on each reconnect.
    pub async fn declare_and_bind_queue(
        &self,
        exchange: &str,
        options: &ConsumeOptions,
    ) -> Result<(), AmqpError> {
        debug!(queue = options.queue.as_str(), "declaring queue");

        match self
            .channel
            .queue_declare(
                &options.queue,
                QueueDeclareOptions {
                    passive: false,
                    durable: options.durable,
                    exclusive: false,
                    auto_delete: options.auto_delete,
                    nowait: false,
                },
                FieldTable::default(),
            )
            .await
        {
            Err(err) => {
                error!(
                    error = err.to_string(),
                    queue = options.queue.as_str(),
                    "error to declare the queue"
                );
                return Err(AmqpError::DeclareQueue(options.queue.clone()));
            }
            _ => debug!(queue = options.queue.as_str(), "queue declared"),
        }

        debug!(
            queue = options.queue.as_str(),
            exchange,
            routing_key = options.routing_key.as_str(),
            "binding queue"
        );

        match self
            .channel
            .queue_bind(
                &options.queue,
                exchange,
                &options.routing_key,
                QueueBindOptions { nowait: false },
                FieldTable::default(),
            )
            .await
        {
            Err(err) => {
                error!(
                    error = err.to_string(),
                    queue = options.queue.as_str(),
                    exchange,
                    "error to bind queue to exchange"
                );
                Err(AmqpError::BindQueue(
                    options.queue.clone(),
                    exchange.to_owned(),
                ))
            }
            _ => {
                debug!(queue = options.queue.as_str(), "queue bound");
                Ok(())
            }
        }
    }
}
