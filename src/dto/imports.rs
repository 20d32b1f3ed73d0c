// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! Import and data-processing DTOs shared across microservices.
//!
//! The closed unions here (`FileType`, `ImportStatus`, `TransformationStatus`,
//! `DataSource`) are also the ones the event envelopes in
//! [`crate::events`] carry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of financial statement a file contains.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Bank,
    CreditCard,
    Investment,
}

/// Lifecycle of a file import.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Lifecycle of a transformation job; unlike imports, jobs can be canceled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransformationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Canceled,
}

/// Which records a transformation job reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    ImportedData,
    All,
}

/// Information about an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadDto {
    pub file_id: String,
    pub file_name: String,
    pub file_type: FileType,
}

/// Response after a successful file upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponseDto {
    pub file_id: String,
    pub file_name: String,
    pub status: ImportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Status of a file import process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportStatusDto {
    pub import_id: String,
    pub file_id: String,
    pub file_name: String,
    pub file_type: FileType,
    pub user_id: String,
    pub status: ImportStatus,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_processed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_imported: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_rejected: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ImportErrorDto>>,
}

/// An error that occurred while importing a row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportErrorDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<u32>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<String>,
}

/// How one source column maps onto a target field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub target_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

/// Mapping configuration keyed by original column name.
pub type ColumnMappingDto = HashMap<String, ColumnMapping>;

/// Options for a file import.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptionsDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_mapping: Option<ColumnMappingDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_row: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
}

/// A saved column-mapping template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataMappingTemplateDto {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub file_type: FileType,
    pub mapping_config: ImportOptionsDto,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Options carried by a transformation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_existing: Option<bool>,
    /// Opaque engine-specific settings, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_options: Option<serde_json::Value>,
}

/// A data transformation job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformationJobDto {
    pub job_id: String,
    pub user_id: String,
    pub data_source: DataSource,
    pub status: TransformationStatus,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TransformationOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_processed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_transformed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_rejected: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&FileType::CreditCard).unwrap(),
            "\"credit_card\""
        );
        assert_eq!(serde_json::to_string(&FileType::Bank).unwrap(), "\"bank\"");
    }

    #[test]
    fn import_options_round_trip_with_column_mapping() {
        let mut mapping = ColumnMappingDto::new();
        mapping.insert(
            "Fecha".to_owned(),
            ColumnMapping {
                target_field: "date".to_owned(),
                transform: Some("dd/MM/yyyy".to_owned()),
            },
        );

        let options = ImportOptionsDto {
            date_format: Some("dd/MM/yyyy".to_owned()),
            column_mapping: Some(mapping),
            skip_rows: Some(1),
            header_row: None,
            sheet_name: None,
        };

        let json = serde_json::to_string(&options).unwrap();
        let back: ImportOptionsDto = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
        assert!(json.contains("columnMapping"));
        assert!(!json.contains("sheetName"));
    }
}
