//! Record model — typed base, update and master rows.
//!
//! Rows arrive from the row source as positional text fields. They are
//! turned into named-field records exactly once, here, so nothing
//! downstream has to index by raw column position.

use crate::error::{RecordError, RowKind};

/// Number of columns in every base, update and master row.
pub const FIELD_COUNT: usize = 23;

/// Output column header, in master column order.
pub const MASTER_COLUMNS: [&str; FIELD_COUNT] = [
    "employee_firstname",
    "employee_lastname",
    "employee_number",
    "log_in_out",
    "date_time",
    "job_number",
    "job_name",
    "task_number",
    "caller_id",
    "latitude",
    "longitude",
    "radius",
    "location_acceptance",
    "log_id",
    "location_accuracy",
    "mileage",
    "operating_system",
    "os_version",
    "device_model",
    "app_version",
    "id",
    "created_at",
    "method",
];

/// Status value an update carries when it deleted its base entry.
pub const DELETED_STATUS: &str = "deleted";

fn into_array(row: Vec<String>, kind: RowKind) -> Result<[String; FIELD_COUNT], RecordError> {
    row.try_into()
        .map_err(|row: Vec<String>| RecordError::FieldCount {
            kind,
            expected: FIELD_COUNT,
            found: row.len(),
        })
}

// ── MasterRecord ──────────────────────────────────────────────────────────

/// One row of the master sequence.
///
/// Field order is the output column order ([`MASTER_COLUMNS`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterRecord {
    pub employee_firstname: String,
    pub employee_lastname: String,
    pub employee_number: String,
    pub log_in_out: String,
    pub date_time: String,
    pub job_number: String,
    pub job_name: String,
    pub task_number: String,
    pub caller_id: String,
    pub latitude: String,
    pub longitude: String,
    pub radius: String,
    pub location_acceptance: String,
    /// Chronological ordering key.
    pub log_id: String,
    pub location_accuracy: String,
    pub mileage: String,
    pub operating_system: String,
    pub os_version: String,
    pub device_model: String,
    pub app_version: String,
    pub id: String,
    pub created_at: String,
    pub method: String,
}

impl MasterRecord {
    /// Borrow the fields in column order.
    pub fn to_fields(&self) -> [&str; FIELD_COUNT] {
        [
            &self.employee_firstname,
            &self.employee_lastname,
            &self.employee_number,
            &self.log_in_out,
            &self.date_time,
            &self.job_number,
            &self.job_name,
            &self.task_number,
            &self.caller_id,
            &self.latitude,
            &self.longitude,
            &self.radius,
            &self.location_acceptance,
            &self.log_id,
            &self.location_accuracy,
            &self.mileage,
            &self.operating_system,
            &self.os_version,
            &self.device_model,
            &self.app_version,
            &self.id,
            &self.created_at,
            &self.method,
        ]
    }

    /// Consume the record into its fields in column order.
    pub fn into_fields(self) -> [String; FIELD_COUNT] {
        [
            self.employee_firstname,
            self.employee_lastname,
            self.employee_number,
            self.log_in_out,
            self.date_time,
            self.job_number,
            self.job_name,
            self.task_number,
            self.caller_id,
            self.latitude,
            self.longitude,
            self.radius,
            self.location_acceptance,
            self.log_id,
            self.location_accuracy,
            self.mileage,
            self.operating_system,
            self.os_version,
            self.device_model,
            self.app_version,
            self.id,
            self.created_at,
            self.method,
        ]
    }

    fn from_array(fields: [String; FIELD_COUNT]) -> Self {
        let [
            employee_firstname,
            employee_lastname,
            employee_number,
            log_in_out,
            date_time,
            job_number,
            job_name,
            task_number,
            caller_id,
            latitude,
            longitude,
            radius,
            location_acceptance,
            log_id,
            location_accuracy,
            mileage,
            operating_system,
            os_version,
            device_model,
            app_version,
            id,
            created_at,
            method,
        ] = fields;

        Self {
            employee_firstname,
            employee_lastname,
            employee_number,
            log_in_out,
            date_time,
            job_number,
            job_name,
            task_number,
            caller_id,
            latitude,
            longitude,
            radius,
            location_acceptance,
            log_id,
            location_accuracy,
            mileage,
            operating_system,
            os_version,
            device_model,
            app_version,
            id,
            created_at,
            method,
        }
    }
}

// ── BaseEntry ─────────────────────────────────────────────────────────────

/// One row of the base log.
///
/// Base rows already use the master layout and are copied into the
/// output unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEntry(MasterRecord);

impl BaseEntry {
    pub fn new(record: MasterRecord) -> Self {
        Self(record)
    }

    /// The chronological key.
    pub fn log_id(&self) -> &str {
        &self.0.log_id
    }

    pub fn record(&self) -> &MasterRecord {
        &self.0
    }

    pub fn into_record(self) -> MasterRecord {
        self.0
    }
}

impl TryFrom<Vec<String>> for BaseEntry {
    type Error = RecordError;

    fn try_from(row: Vec<String>) -> Result<Self, Self::Error> {
        into_array(row, RowKind::Base).map(|fields| Self(MasterRecord::from_array(fields)))
    }
}

// ── UpdateEntry ───────────────────────────────────────────────────────────

/// One row of the update log.
///
/// Same content as a base row, but the update's own id and the id of the
/// base entry it refers to lead the row, and the last column is a status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEntry {
    /// The update's own identity.
    pub update_id: String,
    /// `log_id` of the base entry this update pertains to.
    pub ref_log_id: String,
    pub employee_firstname: String,
    pub employee_lastname: String,
    pub employee_number: String,
    pub log_in_out: String,
    pub date_time: String,
    pub job_number: String,
    pub job_name: String,
    pub task_number: String,
    pub caller_id: String,
    pub latitude: String,
    pub longitude: String,
    pub radius: String,
    pub location_acceptance: String,
    pub location_accuracy: String,
    pub mileage: String,
    pub operating_system: String,
    pub os_version: String,
    pub device_model: String,
    pub app_version: String,
    pub created_at: String,
    /// `"deleted"`, or anything else for an active/modified entry.
    pub status: String,
}

impl UpdateEntry {
    /// Whether this update records a deletion.
    pub fn is_deletion(&self) -> bool {
        self.status == DELETED_STATUS
    }
}

impl TryFrom<Vec<String>> for UpdateEntry {
    type Error = RecordError;

    fn try_from(row: Vec<String>) -> Result<Self, Self::Error> {
        let [
            update_id,
            ref_log_id,
            employee_firstname,
            employee_lastname,
            employee_number,
            log_in_out,
            date_time,
            job_number,
            job_name,
            task_number,
            caller_id,
            latitude,
            longitude,
            radius,
            location_acceptance,
            location_accuracy,
            mileage,
            operating_system,
            os_version,
            device_model,
            app_version,
            created_at,
            status,
        ] = into_array(row, RowKind::Update)?;

        Ok(Self {
            update_id,
            ref_log_id,
            employee_firstname,
            employee_lastname,
            employee_number,
            log_in_out,
            date_time,
            job_number,
            job_name,
            task_number,
            caller_id,
            latitude,
            longitude,
            radius,
            location_acceptance,
            location_accuracy,
            mileage,
            operating_system,
            os_version,
            device_model,
            app_version,
            created_at,
            status,
        })
    }
}
