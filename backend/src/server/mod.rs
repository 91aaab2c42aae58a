//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{
    ServerConfig, ServerSettings, admin_credentials_from_env,
    sms_gateway_from_env,
};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use prescripto_backend::Trace;
#[cfg(debug_assertions)]
use prescripto_backend::doc::ApiDoc;
use prescripto_backend::inbound::http::admin::{add_doctor, admin_login};
use prescripto_backend::inbound::http::doctors::list_doctors;
use prescripto_backend::inbound::http::emergency::send_emergency_alert;
use prescripto_backend::inbound::http::health::{HealthState, live, ready};
use prescripto_backend::inbound::http::state::HttpState;
use prescripto_backend::inbound::http::users::{login, register, set_doctor_phone};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let user_api = web::scope("/api/user")
        .service(register)
        .service(login)
        .service(set_doctor_phone)
        .service(send_emergency_alert);
    let admin_api = web::scope("/api/admin")
        .service(admin_login)
        .service(add_doctor);
    let doctor_api = web::scope("/api/doctor").service(list_doctors);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(user_api)
        .service(admin_api)
        .service(doctor_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the SMS gateway client cannot be built,
/// or when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)
        .map_err(|e| std::io::Error::other(format!("SMS gateway setup failed: {e}")))?;
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
