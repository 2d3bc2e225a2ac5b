/// Store-assigned record identifier. Opaque to clients.
pub type RecordId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
