// File: services/attendance_backend/src/main.rs
use attendance_backend::service_factory::AttendanceServiceFactory;
use attendance_common::logging;
use attendance_config::load_config;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let config = load_config()?;
    let factory = AttendanceServiceFactory::from_config(&config)?;

    let api_router = Router::new()
        .route("/", get(|| async { "Attendance API" }))
        .merge(attendance_sessions::routes(factory.service.clone()));

    #[allow(unused_mut)] // mutable only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use attendance_sessions::doc::AttendanceApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Attendance API",
                version = "0.1.0",
                description = "Attendance sessions and calendar actions"
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(AttendanceApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
