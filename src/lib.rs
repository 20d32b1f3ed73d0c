// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! Shared messaging and contract library for the fintech-personal
//! microservices.
//!
//! The centerpiece is [`client::RabbitMqClient`], a resilient RabbitMQ client
//! that owns one connection, reconnects automatically, and replays every
//! registered subscription on each reconnect. Around it live the contracts
//! the services exchange: the [`events`] envelopes, the [`dto`] payloads, the
//! [`errors`] hierarchy, and the [`validation`] helpers.

mod channel;
mod otel;

pub mod client;
pub mod dispatcher;
pub mod dto;
pub mod errors;
pub mod events;
pub mod exchange;
pub mod options;
pub mod publisher;
pub mod topology;
pub mod validation;
