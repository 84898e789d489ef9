// --- File: crates/attendance_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Localized string key used for the calendar action label.
pub const TAKE_ATTENDANCE_KEY: &str = "takeattendance";

/// Most sessions a single repeat rule may expand to.
pub const DEFAULT_MAX_REPEAT_SESSIONS: usize = 500;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- Calendar Config ---
// Controls whether sessions produce calendar events and how their actions are presented.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalendarConfig {
    /// Create calendar events for sessions that ask for one.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// IANA timezone used to interpret session form dates, e.g. "Europe/Zurich".
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// First day of the week for repeating sessions ("Mon", "Sun", ...).
    #[serde(default = "default_week_start")]
    pub week_start: String,
    /// Prefix prepended to action urls. Empty keeps urls site-relative.
    #[serde(default)]
    pub base_url: String,
    /// Path of the activity view endpoint.
    #[serde(default = "default_view_path")]
    pub view_path: String,
    /// Localized strings by key. Missing keys fall back to built-in English.
    #[serde(default)]
    pub strings: HashMap<String, String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timezone: default_timezone(),
            week_start: default_week_start(),
            base_url: String::new(),
            view_path: default_view_path(),
            strings: HashMap::new(),
        }
    }
}

// --- Attendance Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AttendanceConfig {
    /// Site-wide subnet used when an activity has no default subnet of its own.
    #[serde(default)]
    pub default_subnet: String,
    /// Activities registered with the in-memory stores at startup.
    #[serde(default)]
    pub activities: Vec<ActivityConfig>,
    /// Repeat rules expanding to more days than this are rejected.
    #[serde(default = "default_max_repeat_sessions")]
    pub max_repeat_sessions: usize,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            default_subnet: String::new(),
            activities: Vec::new(),
            max_repeat_sessions: DEFAULT_MAX_REPEAT_SESSIONS,
        }
    }
}

// An attendance activity known to the backend before any session is added.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActivityConfig {
    pub id: i64,
    pub course_id: i64,
    pub module_id: i64,
    pub name: String,
    #[serde(default)]
    pub default_subnet: String,
    #[serde(default = "default_true")]
    pub visible: bool,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub attendance: AttendanceConfig,
}

fn default_true() -> bool {
    true
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_week_start() -> String {
    "Mon".to_string()
}

fn default_max_repeat_sessions() -> usize {
    DEFAULT_MAX_REPEAT_SESSIONS
}

fn default_view_path() -> String {
    "/mod/attendance/view.php".to_string()
}
