#[cfg(test)]
mod tests {
    use crate::handlers::{ActionResponse, AddSessionsResponse};
    use crate::routes::routes;
    use crate::test_fixtures::{group_form, harness, Harness, MODULE};
    use attendance_common::models::GroupId;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    fn app(h: Harness) -> (Router, Harness) {
        (routes(h.service.clone()), h)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_sessions(activity_id: i64, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/attendance/activities/{}/sessions", activity_id))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_action(event_id: i64, user_id: i64) -> Request<Body> {
        Request::builder()
            .uri(format!(
                "/attendance/events/{}/action?user_id={}",
                event_id, user_id
            ))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_sessions_then_fetch_action() {
        let (router, _h) = app(harness(true));
        let form = serde_json::to_value(group_form(&[3])).unwrap();

        let response = router
            .clone()
            .oneshot(post_sessions(1, &form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: AddSessionsResponse = body_json(response).await;
        assert_eq!(created.sessions.len(), 1);
        assert!(created.sessions[0].target_group_refs.contains(&GroupId(3)));
        let event_id = created.sessions[0].calendar_event_ref.unwrap();

        let response = router.oneshot(get_action(event_id.0, 42)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let action: ActionResponse = body_json(response).await;
        let action = action.action.expect("action present");
        assert_eq!(action.item_count, 1);
        assert!(action.url.contains("mod/attendance/view.php"));
    }

    #[tokio::test]
    async fn test_hidden_activity_returns_null_action() {
        let (router, h) = app(harness(true));
        let form = serde_json::to_value(group_form(&[3])).unwrap();
        let response = router
            .clone()
            .oneshot(post_sessions(1, &form))
            .await
            .unwrap();
        let created: AddSessionsResponse = body_json(response).await;
        let event_id = created.sessions[0].calendar_event_ref.unwrap();

        h.modules.set_visible(MODULE, false).unwrap();
        let response = router.oneshot(get_action(event_id.0, 42)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let action: ActionResponse = body_json(response).await;
        assert!(action.action.is_none());
    }

    #[tokio::test]
    async fn test_invalid_form_is_bad_request() {
        let (router, _h) = app(harness(true));
        let form = serde_json::to_value(group_form(&[])).unwrap();
        let response = router.oneshot(post_sessions(1, &form)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_activity_is_not_found() {
        let (router, _h) = app(harness(true));
        let form = serde_json::to_value(group_form(&[1])).unwrap();
        let response = router.oneshot(post_sessions(77, &form)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_found() {
        let (router, _h) = app(harness(true));
        let response = router.oneshot(get_action(404, 1)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_orphaned_event_is_server_error() {
        let (router, h) = app(harness(true));
        let form = serde_json::to_value(group_form(&[1])).unwrap();
        let response = router
            .clone()
            .oneshot(post_sessions(1, &form))
            .await
            .unwrap();
        let created: AddSessionsResponse = body_json(response).await;
        let event_id = created.sessions[0].calendar_event_ref.unwrap();

        h.sessions.remove_activity(crate::test_fixtures::ACTIVITY).unwrap();
        let response = router.oneshot(get_action(event_id.0, 1)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (router, _h) = app(harness(true));
        let form = serde_json::to_value(group_form(&[1])).unwrap();
        let response = router
            .clone()
            .oneshot(post_sessions(1, &form))
            .await
            .unwrap();
        let created: AddSessionsResponse = body_json(response).await;
        let session_id = created.sessions[0].id;

        let delete = |id: i64| {
            Request::builder()
                .method("DELETE")
                .uri(format!("/attendance/sessions/{}", id))
                .body(Body::empty())
                .unwrap()
        };
        let response = router.clone().oneshot(delete(session_id.0)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = router.oneshot(delete(session_id.0)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
