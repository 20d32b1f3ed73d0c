// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! # Shared DTOs
//!
//! Plain data contracts exchanged between the microservices. These carry no
//! behavior; the messaging client moves them around but never validates them.
//! Wire names are camelCase to match the other services.

pub mod finances;
pub mod imports;
pub mod users;
