//! Mapping of update rows into the master column layout.

use crate::record::{MasterRecord, UpdateEntry};

/// Build the master record for an update.
///
/// The referenced base id becomes `log_id`, the update's own id becomes
/// `id`, and the status lands in the `method` column. Every other field
/// is copied unchanged.
pub fn remap(update: &UpdateEntry) -> MasterRecord {
    MasterRecord::from(update.clone())
}

impl From<UpdateEntry> for MasterRecord {
    fn from(update: UpdateEntry) -> Self {
        Self {
            employee_firstname: update.employee_firstname,
            employee_lastname: update.employee_lastname,
            employee_number: update.employee_number,
            log_in_out: update.log_in_out,
            date_time: update.date_time,
            job_number: update.job_number,
            job_name: update.job_name,
            task_number: update.task_number,
            caller_id: update.caller_id,
            latitude: update.latitude,
            longitude: update.longitude,
            radius: update.radius,
            location_acceptance: update.location_acceptance,
            log_id: update.ref_log_id,
            location_accuracy: update.location_accuracy,
            mileage: update.mileage,
            operating_system: update.operating_system,
            os_version: update.os_version,
            device_model: update.device_model,
            app_version: update.app_version,
            id: update.update_id,
            created_at: update.created_at,
            method: update.status,
        }
    }
}
