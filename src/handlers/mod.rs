pub mod auth;
pub mod bookings;
pub mod chats;
pub mod orders;
pub mod portfolios;
pub mod profiles;
pub mod users;

use actix_web::web;

use crate::chat::session as chat_session;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (protected by JWT via the AuthenticatedUser extractor) ──
    cfg.service(
        web::scope("/auth")
            .route("/me", web::get().to(auth::me))
            .route("/complete-profile", web::post().to(auth::complete_profile)),
    );

    // ── User routes (all protected — require valid JWT) ──
    cfg.service(
        web::resource("/users")
            .route(web::get().to(users::get_users)),
    );
    cfg.service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::update_user))
            .route(web::delete().to(users::delete_user)),
    );

    // ── Photographer profile routes ──
    cfg.service(
        web::scope("/profiles")
            .route("", web::get().to(profiles::get_profiles))
            .route("", web::post().to(profiles::create_profile))
            .route("/company/{company_name}", web::get().to(profiles::get_profile_by_company))
            .route("/{id}", web::get().to(profiles::get_profile))
            .route("/{id}", web::put().to(profiles::update_profile))
            .route("/{id}", web::delete().to(profiles::delete_profile)),
    );

    // ── Portfolio routes ──
    cfg.service(
        web::scope("/portfolios")
            .route("", web::post().to(portfolios::create_portfolio))
            .route("/photographer/{photographer_id}", web::get().to(portfolios::get_portfolios_by_photographer))
            .route("/{id}", web::get().to(portfolios::get_portfolio))
            .route("/{id}", web::put().to(portfolios::update_portfolio))
            .route("/{id}", web::delete().to(portfolios::delete_portfolio)),
    );

    // ── Booking routes (photographer and rental providers) ──
    cfg.service(
        web::scope("/bookings")
            .route("", web::get().to(bookings::get_bookings))
            .route("", web::post().to(bookings::create_booking))
            .route("/{id}", web::get().to(bookings::get_booking))
            .route("/{id}/status", web::put().to(bookings::update_status)),
    );

    // ── Order routes (equipment shops) ──
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(orders::get_orders))
            .route("", web::post().to(orders::create_order))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}/status", web::put().to(orders::update_status)),
    );

    // ── Chat routes (REST session manager + WebSocket gateway) ──
    // `/ws` must be registered before the `{id}` routes.
    cfg.service(
        web::scope("/chats")
            .route("/ws", web::get().to(chat_session::ws_connect))
            .route("", web::get().to(chats::list_chats))
            .route("", web::post().to(chats::create_or_get_chat))
            .route("/{id}", web::get().to(chats::get_chat))
            .route("/{id}/messages", web::post().to(chats::send_message)),
    );
}
