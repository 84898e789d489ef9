#[cfg(test)]
mod tests {
    use crate::form::RepeatRule;
    use crate::logic::{construct_sessions, repeat_dates, ScheduleSettings};
    use crate::test_fixtures::{activity, group_form, harness, MODULE};
    use attendance_common::models::{SessionType, UserId};
    use chrono::{Datelike, Duration, NaiveDate, Weekday};
    use proptest::prelude::*;

    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    fn session_type(index: usize) -> SessionType {
        [SessionType::Individual, SessionType::Group, SessionType::All][index % 3]
    }

    fn pick_weekdays(mask: u8) -> Vec<Weekday> {
        WEEKDAYS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, d)| *d)
            .collect()
    }

    proptest! {
        // The action depends only on module visibility.
        #[test]
        fn test_action_follows_visibility(
            visible in any::<bool>(),
            type_index in 0..3usize,
            groups in proptest::collection::vec(1..50i64, 1..4),
            start_hour in 0..12u32,
            length_hours in 0..12u32,
            day_offset in 0..60i64,
            viewer in 1..10_000i64,
        ) {
            let h = harness(visible);
            let mut form = group_form(&groups);
            form.session_type = session_type(type_index);
            form.session_date += Duration::days(day_offset);
            form.time.start_hour = start_hour;
            form.time.end_hour = start_hour + length_hours;

            let sessions = h.service.add_sessions(activity().id, &form).unwrap();
            prop_assert!(!sessions.is_empty());
            for session in sessions {
                prop_assert!(session.end_time >= session.start_time);
                let event_id = session.calendar_event_ref.unwrap();
                let action = h.service.resolve_action(event_id, UserId(viewer)).unwrap();
                if visible {
                    let action = action.unwrap();
                    prop_assert_eq!(action.item_count, 1);
                    prop_assert!(action.url.contains("mod/attendance/view.php"));
                    let expected_suffix = format!("id={}", MODULE);
                    prop_assert!(action.url.ends_with(&expected_suffix));
                } else {
                    prop_assert!(action.is_none());
                }
            }
        }

        #[test]
        fn test_repeat_dates_stay_in_range_and_on_selected_days(
            start_offset in 0..365i64,
            span_days in 0..120i64,
            mask in 1..128u8,
            period_weeks in 1..4u32,
            week_start_index in 0..7usize,
        ) {
            let start = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap() + Duration::days(start_offset);
            let end = start + Duration::days(span_days);
            let rule = RepeatRule { weekdays: pick_weekdays(mask), period_weeks };
            let settings = ScheduleSettings {
                week_start: WEEKDAYS[week_start_index],
                ..ScheduleSettings::default()
            };

            let dates = repeat_dates(start, Some(end), &rule, &settings).unwrap();
            for pair in dates.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for date in &dates {
                prop_assert!(*date >= start && *date <= end);
                prop_assert!(rule.weekdays.contains(&date.weekday()));
            }
            // Weekly repetition over at least a full week hits every selected day.
            if period_weeks == 1 && span_days >= 6 {
                for day in &rule.weekdays {
                    prop_assert!(dates.iter().any(|d| d.weekday() == *day));
                }
            }
        }

        #[test]
        fn test_group_fan_out_matches_days_times_groups(
            groups in proptest::collection::btree_set(1..100i64, 1..5),
            mask in 1..128u8,
            span_days in 0..28i64,
        ) {
            let groups: Vec<i64> = groups.into_iter().collect();
            let mut form = group_form(&groups);
            form.session_end_date = Some(form.session_date + Duration::days(span_days));
            form.repeat = Some(RepeatRule { weekdays: pick_weekdays(mask), period_weeks: 1 });
            let settings = ScheduleSettings::default();

            let days = repeat_dates(
                form.session_date,
                form.session_end_date,
                form.repeat.as_ref().unwrap(),
                &settings,
            ).unwrap();
            let sessions = construct_sessions(&form, &activity(), &settings).unwrap();
            prop_assert_eq!(sessions.len(), days.len() * groups.len());
            for session in &sessions {
                prop_assert_eq!(session.target_group_refs.len(), 1);
            }
        }
    }
}
