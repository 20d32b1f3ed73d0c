// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! # Error Types for the Common Library
//!
//! Two taxonomies live here. `AppError` is the application-level contract
//! shared by every microservice: each kind carries an HTTP-ish status code, a
//! stable error code, and an operational flag distinguishing expected business
//! conditions from unexpected/fatal ones. `AmqpError` is the internal taxonomy
//! of the messaging client; it surfaces to callers as
//! `AppError::ExternalService`.

use thiserror::Error;

/// Application-level error kinds shared across microservices.
///
/// `is_operational() == false` marks unexpected or fatal conditions (storage
/// or external-service failures) that callers must treat as outages, as
/// opposed to expected business conditions such as a missing resource.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// The input failed validation
    #[error("{0}")]
    Validation(String),

    /// The caller could not be authenticated
    #[error("{0}")]
    Authentication(String),

    /// The caller is not allowed to perform the operation
    #[error("{0}")]
    Authorization(String),

    /// A persistence-layer failure
    #[error("{0}")]
    Database(String),

    /// A failure in an external collaborator (broker, third-party API, ...)
    #[error("{0}")]
    ExternalService(String),

    /// Anything that does not fit the other kinds
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code associated with this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::NotFound(_) => 404,
            AppError::Validation(_) => 400,
            AppError::Authentication(_) => 401,
            AppError::Authorization(_) => 403,
            AppError::Database(_) => 500,
            AppError::ExternalService(_) => 502,
            AppError::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for this error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Authentication(_) => "AUTHENTICATION_ERROR",
            AppError::Authorization(_) => "AUTHORIZATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error represents an expected business condition.
    pub fn is_operational(&self) -> bool {
        !matches!(
            self,
            AppError::Database(_) | AppError::ExternalService(_) | AppError::Internal(_)
        )
    }
}

/// Errors raised by the RabbitMQ client internals.
///
/// Connection kinds are transient and drive the reconnection sequence;
/// declare/bind kinds abort the single setup call that triggered them;
/// `ReconnectExhausted` is terminal and distinguishable from every transient
/// kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmqpError {
    /// Error establishing a connection to the broker
    #[error("failure to connect: {0}")]
    Connection(String),

    /// Error creating a channel from an established connection
    #[error("failure to create a channel")]
    Channel,

    /// Error declaring an exchange with the given name
    #[error("failure to declare the exchange `{0}`")]
    DeclareExchange(String),

    /// Error declaring a queue with the given name
    #[error("failure to declare the queue `{0}`")]
    DeclareQueue(String),

    /// Error binding a queue to an exchange
    #[error("failure to bind the queue `{0}` to the exchange `{1}`")]
    BindQueue(String, String),

    /// Error configuring the prefetch limit for a queue
    #[error("failure to configure qos for the queue `{0}`")]
    QosDeclaration(String),

    /// Error attaching a consumer to a queue
    #[error("failure to set up a consumer for the queue `{0}`")]
    ConsumerSetup(String),

    /// Error serializing or publishing a message
    #[error("failure to publish: {0}")]
    Publish(String),

    /// Error acknowledging a message
    #[error("failure to ack the message")]
    Ack,

    /// Error rejecting a message
    #[error("failure to nack the message")]
    Nack,

    /// Reconnection abandoned after exhausting the configured attempts
    #[error("reconnection abandoned after {attempts} attempts")]
    ReconnectExhausted { attempts: u32 },

    /// Operation attempted on a client that was closed
    #[error("the client is closed")]
    Closed,
}

impl From<AmqpError> for AppError {
    /// Broker infrastructure failures surface to callers as
    /// external-service errors (502, non-operational).
    fn from(err: AmqpError) -> Self {
        AppError::ExternalService(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_contract() {
        assert_eq!(AppError::NotFound("x".into()).status_code(), 404);
        assert_eq!(AppError::Validation("x".into()).status_code(), 400);
        assert_eq!(AppError::Authentication("x".into()).status_code(), 401);
        assert_eq!(AppError::Authorization("x".into()).status_code(), 403);
        assert_eq!(AppError::Database("x".into()).status_code(), 500);
        assert_eq!(AppError::ExternalService("x".into()).status_code(), 502);
        assert_eq!(AppError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn operational_flag_marks_unexpected_kinds() {
        assert!(AppError::NotFound("x".into()).is_operational());
        assert!(AppError::Validation("x".into()).is_operational());
        assert!(!AppError::Database("x".into()).is_operational());
        assert!(!AppError::ExternalService("x".into()).is_operational());
        assert!(!AppError::Internal("x".into()).is_operational());
    }

    #[test]
    fn amqp_errors_surface_as_external_service() {
        let err: AppError = AmqpError::Publish("boom".into()).into();
        assert_eq!(err.error_code(), "EXTERNAL_SERVICE_ERROR");
        assert_eq!(err.status_code(), 502);
        assert!(!err.is_operational());
    }

    #[test]
    fn reconnect_exhausted_is_distinguishable() {
        let err = AmqpError::ReconnectExhausted { attempts: 10 };
        assert_eq!(err.to_string(), "reconnection abandoned after 10 attempts");
        assert_ne!(err, AmqpError::Channel);
    }
}
