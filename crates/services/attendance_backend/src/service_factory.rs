// --- File: crates/services/attendance_backend/src/service_factory.rs ---
//! Builds the attendance service and its in-memory collaborators from configuration.

use attendance_common::models::{Activity, ActivityId, CourseId, ModuleId};
use attendance_common::{ConfiguredPresentation, Result};
use attendance_config::AppConfig;
use attendance_sessions::{
    AttendanceService, InMemoryCalendarStore, InMemoryModuleRegistry, InMemorySessionStore,
};
use std::sync::Arc;
use tracing::info;

/// The service together with the stores backing it.
pub struct AttendanceServiceFactory {
    pub sessions: Arc<InMemorySessionStore>,
    pub calendar: Arc<InMemoryCalendarStore>,
    pub modules: Arc<InMemoryModuleRegistry>,
    pub service: Arc<AttendanceService>,
}

impl AttendanceServiceFactory {
    /// Creates empty stores, registers the configured activities and builds the service.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let sessions = Arc::new(InMemorySessionStore::new());
        let calendar = Arc::new(InMemoryCalendarStore::new());
        let modules = Arc::new(InMemoryModuleRegistry::new());

        for seed in &config.attendance.activities {
            let activity = Activity {
                id: ActivityId(seed.id),
                course_ref: CourseId(seed.course_id),
                module_ref: ModuleId(seed.module_id),
                name: seed.name.clone(),
                default_subnet: seed.default_subnet.clone(),
            };
            modules.register(activity.module_ref, seed.visible)?;
            sessions.add_activity(activity)?;
        }
        info!(
            "Registered {} attendance activit(y/ies)",
            config.attendance.activities.len()
        );

        let service = AttendanceService::from_config(
            config,
            sessions.clone(),
            calendar.clone(),
            modules.clone(),
            Arc::new(ConfiguredPresentation::new(&config.calendar)),
        )?;

        Ok(Self {
            sessions,
            calendar,
            modules,
            service: Arc::new(service),
        })
    }
}
