// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! # File Processing Events
//!
//! The closed union of events the microservices exchange over RabbitMQ.
//! Every envelope carries `eventId`, `eventType`, and an RFC 3339 `timestamp`
//! next to a `data` payload whose shape is selected by the `eventType` tag.
//! The messaging client serializes these to UTF-8 JSON and back; it never
//! validates the payloads beyond deserialization.

use crate::dto::imports::{
    DataSource, FileType, ImportErrorDto, ImportOptionsDto, ImportStatus, TransformationOptions,
    TransformationStatus,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Union of all file-processing events, tagged by `eventType` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "eventType")]
pub enum FileProcessingEvent {
    FileUploaded(FileUploadedEvent),
    FileImportStatusUpdate(FileImportStatusUpdateEvent),
    DataTransformationRequest(DataTransformationRequestEvent),
    DataTransformationStatusUpdate(DataTransformationStatusUpdateEvent),
}

impl FileProcessingEvent {
    pub fn event_id(&self) -> &str {
        match self {
            FileProcessingEvent::FileUploaded(event) => &event.event_id,
            FileProcessingEvent::FileImportStatusUpdate(event) => &event.event_id,
            FileProcessingEvent::DataTransformationRequest(event) => &event.event_id,
            FileProcessingEvent::DataTransformationStatusUpdate(event) => &event.event_id,
        }
    }

    /// The wire tag of this event.
    pub fn event_type(&self) -> &'static str {
        match self {
            FileProcessingEvent::FileUploaded(_) => "FileUploaded",
            FileProcessingEvent::FileImportStatusUpdate(_) => "FileImportStatusUpdate",
            FileProcessingEvent::DataTransformationRequest(_) => "DataTransformationRequest",
            FileProcessingEvent::DataTransformationStatusUpdate(_) => {
                "DataTransformationStatusUpdate"
            }
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            FileProcessingEvent::FileUploaded(event) => &event.timestamp,
            FileProcessingEvent::FileImportStatusUpdate(event) => &event.timestamp,
            FileProcessingEvent::DataTransformationRequest(event) => &event.timestamp,
            FileProcessingEvent::DataTransformationStatusUpdate(event) => &event.timestamp,
        }
    }
}

fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Sent when a file is uploaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadedEvent {
    pub event_id: String,
    pub timestamp: String,
    pub data: FileUploadedData,
}

impl FileUploadedEvent {
    pub fn new(data: FileUploadedData) -> Self {
        FileUploadedEvent {
            event_id: new_event_id(),
            timestamp: now_rfc3339(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadedData {
    pub file_id: String,
    pub file_name: String,
    pub file_type: FileType,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_options: Option<ImportOptionsDto>,
}

/// Sent when the status of a file import changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileImportStatusUpdateEvent {
    pub event_id: String,
    pub timestamp: String,
    pub data: FileImportStatusData,
}

impl FileImportStatusUpdateEvent {
    pub fn new(data: FileImportStatusData) -> Self {
        FileImportStatusUpdateEvent {
            event_id: new_event_id(),
            timestamp: now_rfc3339(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileImportStatusData {
    pub file_id: String,
    pub import_id: String,
    pub status: ImportStatus,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ImportResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub records_processed: u64,
    pub records_imported: u64,
    pub records_rejected: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ImportErrorDto>>,
}

/// Sent to request a data transformation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataTransformationRequestEvent {
    pub event_id: String,
    pub timestamp: String,
    pub data: TransformationRequestData,
}

impl DataTransformationRequestEvent {
    pub fn new(data: TransformationRequestData) -> Self {
        DataTransformationRequestEvent {
            event_id: new_event_id(),
            timestamp: now_rfc3339(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformationRequestData {
    pub job_id: String,
    pub user_id: String,
    pub data_source: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<TransformationFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TransformationOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformationFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// Sent when the status of a transformation job changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataTransformationStatusUpdateEvent {
    pub event_id: String,
    pub timestamp: String,
    pub data: TransformationStatusData,
}

impl DataTransformationStatusUpdateEvent {
    pub fn new(data: TransformationStatusData) -> Self {
        DataTransformationStatusUpdateEvent {
            event_id: new_event_id(),
            timestamp: now_rfc3339(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformationStatusData {
    pub job_id: String,
    pub user_id: String,
    pub status: TransformationStatus,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TransformationResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformationResult {
    pub records_processed: u64,
    pub records_transformed: u64,
    pub records_rejected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn uploaded() -> FileProcessingEvent {
        FileProcessingEvent::FileUploaded(FileUploadedEvent::new(FileUploadedData {
            file_id: "f-1".into(),
            file_name: "statement.csv".into(),
            file_type: FileType::Bank,
            user_id: "u-1".into(),
            import_options: None,
        }))
    }

    fn import_status() -> FileProcessingEvent {
        FileProcessingEvent::FileImportStatusUpdate(FileImportStatusUpdateEvent::new(
            FileImportStatusData {
                file_id: "f-1".into(),
                import_id: "i-1".into(),
                status: ImportStatus::Completed,
                progress: 100,
                message: Some("done".into()),
                user_id: "u-1".into(),
                result: Some(ImportResult {
                    records_processed: 42,
                    records_imported: 40,
                    records_rejected: 2,
                    errors: Some(vec![ImportErrorDto {
                        row_number: Some(7),
                        message: "bad amount".into(),
                        raw_data: None,
                    }]),
                }),
            },
        ))
    }

    fn transformation_request() -> FileProcessingEvent {
        FileProcessingEvent::DataTransformationRequest(DataTransformationRequestEvent::new(
            TransformationRequestData {
                job_id: "j-1".into(),
                user_id: "u-1".into(),
                data_source: DataSource::ImportedData,
                filters: Some(TransformationFilters {
                    from_date: Some("2025-01-01".into()),
                    to_date: None,
                    categories: Some(vec!["groceries".into()]),
                }),
                options: Some(TransformationOptions {
                    clean_existing: Some(true),
                    transform_options: Some(serde_json::json!({"locale": "es-ES"})),
                }),
            },
        ))
    }

    fn transformation_status() -> FileProcessingEvent {
        FileProcessingEvent::DataTransformationStatusUpdate(
            DataTransformationStatusUpdateEvent::new(TransformationStatusData {
                job_id: "j-1".into(),
                user_id: "u-1".into(),
                status: TransformationStatus::Canceled,
                progress: 30,
                message: None,
                result: None,
            }),
        )
    }

    #[test]
    fn every_variant_round_trips_through_json() {
        for event in [
            uploaded(),
            import_status(),
            transformation_request(),
            transformation_status(),
        ] {
            let json = serde_json::to_string(&event).unwrap();
            let back: FileProcessingEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event);
        }
    }

    #[test]
    fn wire_shape_carries_tag_and_camel_case_fields() {
        let value = serde_json::to_value(uploaded()).unwrap();
        assert_eq!(value["eventType"], "FileUploaded");
        assert!(value["eventId"].is_string());
        assert!(value["timestamp"].is_string());
        assert_eq!(value["data"]["fileName"], "statement.csv");
        assert_eq!(value["data"]["fileType"], "bank");
        assert_eq!(value["data"]["userId"], "u-1");
    }

    #[test]
    fn constructors_fill_id_and_timestamp() {
        let event = uploaded();
        assert!(!event.event_id().is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(event.timestamp()).is_ok());
        assert_eq!(event.event_type(), "FileUploaded");
    }

    #[test]
    fn distinct_events_get_distinct_ids() {
        assert_ne!(uploaded().event_id(), uploaded().event_id());
    }
}
