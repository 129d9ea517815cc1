//! API routes and OpenAPI documentation.
//!
//! Handlers are registered through `utoipa_axum::routes!` so every route lands in the
//! generated OpenAPI document served by Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        assistance, auth, complaint, document, event, family, forum, notification, resident,
        rt, user,
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RT/RW Portal API",
        description = "Neighbourhood administration: residents, families, letters, complaints, events, social assistance and forum"
    ),
    tags(
        (name = auth::AUTH_TAG, description = "Login, registration and first admin setup"),
        (name = user::USER_TAG, description = "Account management"),
        (name = rt::RT_TAG, description = "RT administration"),
        (name = resident::RESIDENT_TAG, description = "Resident registry"),
        (name = family::FAMILY_TAG, description = "Family cards (KK)"),
        (name = document::DOCUMENT_TAG, description = "Letter requests and their approval workflow"),
        (name = complaint::COMPLAINT_TAG, description = "Resident complaints"),
        (name = event::EVENT_TAG, description = "Neighbourhood events"),
        (name = assistance::ASSISTANCE_TAG, description = "Social assistance programs and recipients"),
        (name = forum::FORUM_TAG, description = "Community forum"),
        (name = notification::NOTIFICATION_TAG, description = "In-app notifications")
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        // auth
        .routes(routes!(auth::login))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::me))
        .routes(routes!(auth::change_password))
        .routes(routes!(auth::register))
        .routes(routes!(auth::setup_admin))
        // users
        .routes(routes!(user::get_users, user::create_user))
        .routes(routes!(user::update_user, user::delete_user))
        // rt
        .routes(routes!(rt::get_rts, rt::create_rt))
        .routes(routes!(rt::get_rt, rt::update_rt, rt::delete_rt))
        .routes(routes!(rt::get_rt_summary))
        // residents
        .routes(routes!(resident::get_residents, resident::create_resident))
        .routes(routes!(
            resident::get_resident,
            resident::update_resident,
            resident::delete_resident
        ))
        // families
        .routes(routes!(family::get_families, family::create_family))
        .routes(routes!(
            family::get_family,
            family::update_family,
            family::delete_family
        ))
        .routes(routes!(family::add_family_member))
        .routes(routes!(family::remove_family_member))
        // documents
        .routes(routes!(document::get_documents, document::create_document))
        .routes(routes!(document::get_document, document::withdraw_document))
        .routes(routes!(document::process_document))
        .routes(routes!(document::approve_document))
        .routes(routes!(document::sign_document))
        .routes(routes!(document::complete_document))
        .routes(routes!(document::reject_document))
        // complaints
        .routes(routes!(complaint::get_complaints, complaint::create_complaint))
        .routes(routes!(complaint::get_complaint))
        .routes(routes!(complaint::process_complaint))
        .routes(routes!(complaint::resolve_complaint))
        .routes(routes!(complaint::reject_complaint))
        // events
        .routes(routes!(event::get_events, event::create_event))
        .routes(routes!(event::get_event, event::update_event, event::delete_event))
        .routes(routes!(event::join_event, event::leave_event))
        // social assistance
        .routes(routes!(assistance::get_programs, assistance::create_program))
        .routes(routes!(
            assistance::get_program,
            assistance::update_program,
            assistance::delete_program
        ))
        .routes(routes!(
            assistance::get_recipients,
            assistance::propose_recipient
        ))
        .routes(routes!(assistance::approve_recipient))
        .routes(routes!(assistance::reject_recipient))
        .routes(routes!(assistance::distribute_recipient))
        // forum
        .routes(routes!(forum::get_posts, forum::create_post))
        .routes(routes!(forum::get_post, forum::update_post, forum::delete_post))
        .routes(routes!(forum::toggle_pin))
        .routes(routes!(forum::add_comment))
        .routes(routes!(forum::delete_comment))
        .routes(routes!(forum::toggle_like))
        // notifications
        .routes(routes!(notification::get_notifications))
        .routes(routes!(notification::get_unread_count))
        .routes(routes!(notification::mark_read))
        .routes(routes!(notification::mark_all_read))
        .routes(routes!(notification::broadcast))
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
