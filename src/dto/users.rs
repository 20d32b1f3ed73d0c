// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! User-related DTOs shared across microservices.

use serde::{Deserialize, Serialize};

/// A user in the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for registering a new user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistrationDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Payload for authenticating a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserLoginDto {
    pub email: String,
    pub password: String,
}

/// Response after successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    pub token: String,
    pub user: UserDto,
}

/// Partial update of a user profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdateDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A stored user preference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingDto {
    pub id: String,
    pub user_id: String,
    pub setting_key: String,
    pub setting_value: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for updating a user preference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingUpdateDto {
    pub setting_key: String,
    pub setting_value: String,
}
