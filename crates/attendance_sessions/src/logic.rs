// --- File: crates/attendance_sessions/src/logic.rs ---
use crate::form::{RepeatRule, SessionForm};
use attendance_common::models::{
    Activity, GroupId, NetworkRestriction, NewSession, SessionFlags, SessionType,
};
use attendance_common::{config_error, validation_error, Result};
use attendance_config::AppConfig;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use std::collections::BTreeSet;
use std::net::IpAddr;
use attendance_config::DEFAULT_MAX_REPEAT_SESSIONS;
use tracing::debug;

/// Scheduling settings derived from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSettings {
    /// Timezone session form dates and times are entered in.
    pub timezone: Tz,
    /// First day of the week when walking repeat periods.
    pub week_start: Weekday,
    /// Site-wide fallback for activities without a default subnet.
    pub default_subnet: String,
    /// Upper bound on the days a single repeat rule may produce.
    pub max_repeat_sessions: usize,
}

impl ScheduleSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timezone: Tz = config.calendar.timezone.parse().map_err(|e| {
            config_error(format!(
                "invalid calendar timezone '{}': {}",
                config.calendar.timezone, e
            ))
        })?;
        let week_start: Weekday = config.calendar.week_start.parse().map_err(|e| {
            config_error(format!(
                "invalid week start '{}': {}",
                config.calendar.week_start, e
            ))
        })?;
        Ok(Self {
            timezone,
            week_start,
            default_subnet: config.attendance.default_subnet.clone(),
            max_repeat_sessions: config.attendance.max_repeat_sessions,
        })
    }
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            week_start: Weekday::Mon,
            default_subnet: String::new(),
            max_repeat_sessions: DEFAULT_MAX_REPEAT_SESSIONS,
        }
    }
}

/// Builds the sessions described by `form` for `activity`.
///
/// One session is produced per scheduled day; `GROUP` sessions are further split
/// into one session per target group. Sessions come back in chronological order,
/// groups ascending within a day.
pub fn construct_sessions(
    form: &SessionForm,
    activity: &Activity,
    settings: &ScheduleSettings,
) -> Result<Vec<NewSession>> {
    let groups: BTreeSet<GroupId> = form.groups.iter().copied().collect();
    if form.session_type == SessionType::Group && groups.is_empty() {
        return Err(validation_error(
            "group sessions need at least one target group",
        ));
    }

    let network_restriction = resolve_network_restriction(form, activity, settings)?;
    let flags = SessionFlags {
        creates_calendar_event: form.calendar_event,
        generates_absentee_report: form.absentee_report,
        auto_marks_present: form.auto_mark,
    };

    let dates = match &form.repeat {
        Some(rule) => repeat_dates(form.session_date, form.session_end_date, rule, settings)?,
        None => vec![form.session_date],
    };

    let mut sessions = Vec::new();
    for date in dates {
        let (start_time, end_time) = session_bounds(form, date, settings.timezone)?;
        if start_time < form.course_start_date {
            return Err(validation_error(format!(
                "session on {} starts before the course start date",
                date
            )));
        }

        let base = NewSession {
            activity_ref: activity.id,
            session_type: form.session_type,
            target_group_refs: BTreeSet::new(),
            start_time,
            end_time,
            course_start_date: form.course_start_date,
            description: form.description.clone(),
            flags,
            network_restriction: network_restriction.clone(),
            status_set: form.status_set,
        };

        match form.session_type {
            SessionType::Group => {
                for group in &groups {
                    let mut session = base.clone();
                    session.target_group_refs.insert(*group);
                    sessions.push(session);
                }
            }
            SessionType::Individual | SessionType::All => sessions.push(base),
        }
    }

    debug!(
        "Constructed {} session(s) for activity {}",
        sessions.len(),
        activity.id
    );
    Ok(sessions)
}

/// Start and end of the session on `date`, converted to UTC.
fn session_bounds(
    form: &SessionForm,
    date: NaiveDate,
    timezone: Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let time = &form.time;
    let start = local_to_utc(date, time.start_hour, time.start_minute, timezone)?;
    let end = local_to_utc(date, time.end_hour, time.end_minute, timezone)?;
    if end < start {
        return Err(validation_error(format!(
            "session on {} ends before it starts",
            date
        )));
    }
    Ok((start, end))
}

fn local_to_utc(date: NaiveDate, hour: u32, minute: u32, timezone: Tz) -> Result<DateTime<Utc>> {
    let naive = date
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| validation_error(format!("invalid time of day {:02}:{:02}", hour, minute)))?;
    // Ambiguous times (clocks going back) resolve to the first occurrence.
    timezone
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            validation_error(format!(
                "{} does not exist in timezone {}",
                naive,
                timezone.name()
            ))
        })
}

/// Days between `start` and `end` (inclusive) matching `rule`.
///
/// Weeks are counted from the week containing `start`; after each week the walk
/// jumps ahead `period_weeks` weeks. A rule yielding more than
/// `settings.max_repeat_sessions` days is rejected.
pub fn repeat_dates(
    start: NaiveDate,
    end: Option<NaiveDate>,
    rule: &RepeatRule,
    settings: &ScheduleSettings,
) -> Result<Vec<NaiveDate>> {
    let end = end.ok_or_else(|| validation_error("repeating sessions need an end date"))?;
    if end < start {
        return Err(validation_error("session end date is before the session date"));
    }
    if rule.weekdays.is_empty() {
        return Err(validation_error("repeating sessions need at least one weekday"));
    }
    if rule.period_weeks == 0 {
        return Err(validation_error("repeat period must be at least one week"));
    }

    let offset = (start.weekday().num_days_from_monday() + 7
        - settings.week_start.num_days_from_monday())
        % 7;
    let mut week_start = start
        .checked_sub_signed(Duration::days(i64::from(offset)))
        .ok_or_else(|| validation_error(format!("session date {} is out of range", start)))?;
    let step = Duration::weeks(i64::from(rule.period_weeks));
    let mut dates = Vec::new();
    loop {
        let week = (0..7).filter_map(|i| week_start.checked_add_signed(Duration::days(i)));
        for day in week {
            if day >= start && day <= end && rule.weekdays.contains(&day.weekday()) {
                if dates.len() >= settings.max_repeat_sessions {
                    return Err(validation_error(format!(
                        "repeat rule yields more than {} sessions",
                        settings.max_repeat_sessions
                    )));
                }
                dates.push(day);
            }
        }
        // A step past the last representable date also ends the walk.
        match week_start.checked_add_signed(step) {
            Some(next) if next <= end => week_start = next,
            _ => break,
        }
    }
    Ok(dates)
}

fn resolve_network_restriction(
    form: &SessionForm,
    activity: &Activity,
    settings: &ScheduleSettings,
) -> Result<NetworkRestriction> {
    let cidr = if form.use_default_subnet {
        if activity.default_subnet.trim().is_empty() {
            settings.default_subnet.clone()
        } else {
            activity.default_subnet.clone()
        }
    } else {
        form.subnet.clone()
    };
    validate_subnet(&cidr)?;

    Ok(NetworkRestriction {
        cidr: cidr.trim().to_string(),
        use_default: form.use_default_subnet,
        prevent_shared_ip: form.prevent_shared_ip,
        grace_seconds: form.prevent_shared_ip_seconds,
    })
}

/// Checks a comma separated list of addresses and CIDR blocks. Empty is allowed.
pub fn validate_subnet(subnet: &str) -> Result<()> {
    for entry in subnet.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (address, prefix) = match entry.split_once('/') {
            Some((address, prefix)) => (address, Some(prefix)),
            None => (entry, None),
        };
        let ip: IpAddr = address
            .parse()
            .map_err(|_| validation_error(format!("invalid subnet entry '{}'", entry)))?;
        if let Some(prefix) = prefix {
            let max = if ip.is_ipv4() { 32 } else { 128 };
            match prefix.parse::<u8>() {
                Ok(bits) if bits <= max => {}
                _ => {
                    return Err(validation_error(format!(
                        "invalid prefix length in subnet entry '{}'",
                        entry
                    )))
                }
            }
        }
    }
    Ok(())
}
