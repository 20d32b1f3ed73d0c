// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! # AMQP Channel Management
//!
//! Establishes a connection to the RabbitMQ server and creates the single
//! channel every publish and consume operation runs on. Both handles are
//! wrapped in `Arc` so the client can share them across tasks.

use crate::{errors::AmqpError, options::ClientOptions};
use lapin::{types::LongString, Channel, Connection, ConnectionProperties};
use std::sync::Arc;
use tracing::{debug, error};

/// Opens a new connection/channel pair to the broker.
///
/// # Parameters
/// * `options` - Client options carrying the broker url and connection name
///
/// # Returns
/// * `Result<(Arc<Connection>, Arc<Channel>), AmqpError>` - the live pair on
///   success, or the failure that aborted the attempt.
pub(crate) async fn new_amqp_channel(
    options: &ClientOptions,
) -> Result<(Arc<Connection>, Arc<Channel>), AmqpError> {
    debug!("creating amqp connection...");
    let properties = ConnectionProperties::default()
        .with_connection_name(LongString::from(options.connection_name.clone()));

    let connection = match Connection::connect(&options.url, properties).await {
        Ok(conn) => conn,
        Err(err) => {
            error!(error = err.to_string(), "failure to connect");
            return Err(AmqpError::Connection(err.to_string()));
        }
    };
    debug!("amqp connected");

    debug!("creating amqp channel...");
    match connection.create_channel().await {
        Ok(channel) => {
            debug!("channel created");
            Ok((Arc::new(connection), Arc::new(channel)))
        }
        Err(err) => {
            error!(error = err.to_string(), "error to create the channel");
            Err(AmqpError::Channel)
        }
    }
}
