use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, contacts, excursions, gallery, health, news, partners, pdfs, reviews, upload},
    state::AppState,
};

// Headroom for multipart framing and the other form fields
const BODY_OVERHEAD: usize = 1024 * 1024;

/// Every API route, without middleware or state.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/api/user", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/user/{id}", get(auth::get_user))
        // Standalone image upload
        .route("/api/upload-image", post(upload::upload_image))
        // News
        .route("/api/news", get(news::list_news).post(news::create_news))
        .route("/api/news/pagination", get(news::list_news_paginated))
        .route(
            "/api/news/{id}",
            get(news::get_news)
                .put(news::update_news)
                .patch(news::update_news)
                .delete(news::delete_news),
        )
        // Excursions (multipart)
        .route(
            "/api/excursions",
            get(excursions::list_excursions).post(excursions::create_excursion),
        )
        .route(
            "/api/excursions/pagination",
            get(excursions::list_excursions_paginated),
        )
        .route(
            "/api/excursions/{id}",
            get(excursions::get_excursion)
                .put(excursions::update_excursion)
                .patch(excursions::update_excursion)
                .delete(excursions::delete_excursion),
        )
        // Gallery
        .route(
            "/api/gallery",
            get(gallery::list_gallery).post(gallery::create_gallery_item),
        )
        .route("/api/gallery/pagination", get(gallery::list_gallery_paginated))
        .route(
            "/api/gallery/{id}",
            get(gallery::get_gallery_item)
                .put(gallery::update_gallery_item)
                .patch(gallery::update_gallery_item)
                .delete(gallery::delete_gallery_item),
        )
        // Partners
        .route(
            "/api/partners",
            get(partners::list_partners).post(partners::create_partner),
        )
        .route("/api/partners/pagination", get(partners::list_partners_paginated))
        .route(
            "/api/partners/{id}",
            get(partners::get_partner)
                .put(partners::update_partner)
                .patch(partners::update_partner)
                .delete(partners::delete_partner),
        )
        // Reviews
        .route(
            "/api/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route("/api/reviews/pagination", get(reviews::list_reviews_paginated))
        .route(
            "/api/reviews/{id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .patch(reviews::update_review)
                .delete(reviews::delete_review),
        )
        // Contacts (hard delete)
        .route(
            "/api/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route("/api/contacts/pagination", get(contacts::list_contacts_paginated))
        .route(
            "/api/contacts/{id}",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .patch(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        // Documents (multipart)
        .route("/api/pdf", get(pdfs::list_pdfs).post(pdfs::create_pdf))
        .route("/api/pdf/pagination", get(pdfs::list_pdfs_paginated))
        .route(
            "/api/pdf/{id}",
            get(pdfs::get_pdf)
                .put(pdfs::update_pdf)
                .patch(pdfs::update_pdf)
                .delete(pdfs::delete_pdf),
        )
}

/// The full application: routes, health check and middleware, bound to `state`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Base64 JSON bodies are a third larger than the file they carry
    let max_file_size = usize::try_from(state.config.max_file_size).unwrap_or(usize::MAX);
    let body_limit = max_file_size
        .saturating_add(max_file_size / 3)
        .saturating_add(BODY_OVERHEAD);

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
