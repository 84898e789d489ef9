//! Calendar actions for session events, end to end over the in-memory stores.


use attendance_common::AttendanceError;
use fixtures::{course_start, create_course, group_session_form, GROUP, STUDENT};

#[test]
fn test_group_session_event_offers_view_action() {
    let course = create_course();
    let sessions = course
        .service
        .add_sessions(course.activity.id, &group_session_form(course_start()))
        .unwrap();
    let session = &sessions[0];
    assert!(session.target_group_refs.contains(&GROUP));

    let event = course
        .service
        .load_event(session.calendar_event_ref.expect("calendar event created"))
        .unwrap();
    let action = course
        .service
        .resolve_event_action(&event, STUDENT)
        .unwrap()
        .expect("visible activity offers an action");

    assert_eq!(action.item_count, 1);
    assert!(action.url.contains("mod/attendance/view.php"));
    assert_eq!(action.label, "Take attendance");
}

#[test]
fn test_hidden_activity_offers_no_action() {
    let course = create_course();
    course
        .modules
        .set_visible(course.activity.module_ref, false)
        .unwrap();

    let sessions = course
        .service
        .add_sessions(course.activity.id, &group_session_form(course_start()))
        .unwrap();
    let event = course
        .service
        .load_event(sessions[0].calendar_event_ref.unwrap())
        .unwrap();
    assert!(!event.visible);
    assert_eq!(course.calendar.len().unwrap(), 1);

    let action = course.service.resolve_event_action(&event, STUDENT).unwrap();
    assert!(action.is_none());
}

#[test]
fn test_event_of_removed_activity_is_an_error() {
    let course = create_course();
    let sessions = course
        .service
        .add_sessions(course.activity.id, &group_session_form(course_start()))
        .unwrap();
    let event_id = sessions[0].calendar_event_ref.unwrap();

    course
        .sessions
        .remove_activity(course.activity.id)
        .unwrap();

    let err = course.service.resolve_action(event_id, STUDENT).unwrap_err();
    assert!(matches!(err, AttendanceError::BrokenInvariant(_)));
}

#[test]
fn test_repeated_resolution_gives_identical_results() {
    let course = create_course();
    let sessions = course
        .service
        .add_sessions(course.activity.id, &group_session_form(course_start()))
        .unwrap();
    let event_id = sessions[0].calendar_event_ref.unwrap();

    let first = course.service.resolve_action(event_id, STUDENT).unwrap();
    let second = course.service.resolve_action(event_id, STUDENT).unwrap();
    assert_eq!(first, second);
}
