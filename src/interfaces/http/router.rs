//! API router with Swagger UI

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    bookings, buses, discounts, health, routes, tickets, trips,
};
use crate::interfaces::http::AppState;

use super::common::{ApiResponse, PaginationParams};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Buses
        buses::handlers::list_buses,
        buses::handlers::get_bus,
        buses::handlers::create_bus,
        buses::handlers::update_bus,
        buses::handlers::delete_bus,
        // Routes
        routes::handlers::list_routes,
        routes::handlers::get_route,
        routes::handlers::create_route,
        routes::handlers::update_route,
        routes::handlers::delete_route,
        // Trips
        trips::handlers::list_trips,
        trips::handlers::get_trip,
        trips::handlers::create_trip,
        trips::handlers::start_trip,
        trips::handlers::complete_trip,
        trips::handlers::cancel_trip,
        trips::handlers::delay_trip,
        trips::handlers::trip_events,
        trips::handlers::record_trip_event,
        trips::handlers::today_trips,
        trips::handlers::upcoming_trips,
        trips::handlers::active_trips,
        // Tickets
        tickets::handlers::list_tickets,
        tickets::handlers::get_ticket,
        tickets::handlers::create_ticket,
        tickets::handlers::confirm_ticket,
        tickets::handlers::check_in_ticket,
        tickets::handlers::cancel_ticket,
        tickets::handlers::refund_ticket,
        tickets::handlers::expired_tickets,
        tickets::handlers::today_tickets,
        // Bookings
        bookings::handlers::list_bookings,
        bookings::handlers::get_booking,
        bookings::handlers::create_booking,
        bookings::handlers::mark_booking_paid,
        bookings::handlers::booking_tickets,
        bookings::handlers::booking_receipts,
        bookings::handlers::issue_receipt,
        // Discounts
        discounts::handlers::list_discounts,
        discounts::handlers::get_discount,
        discounts::handlers::create_discount,
        discounts::handlers::update_discount,
        discounts::handlers::activate_discount,
        discounts::handlers::deactivate_discount,
        discounts::handlers::active_discounts,
        discounts::handlers::validate_code,
        discounts::handlers::redeem_code,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginationParams,
            health::handlers::HealthResponse,
            // Buses
            buses::BusDto,
            buses::CreateBusRequest,
            buses::UpdateBusRequest,
            // Routes
            routes::RouteDto,
            routes::CreateRouteRequest,
            routes::UpdateRouteRequest,
            // Trips
            trips::TripDto,
            trips::TripEventDto,
            trips::CreateTripRequest,
            trips::CreateTripEventRequest,
            trips::ReasonRequest,
            // Tickets
            tickets::TicketDto,
            tickets::CreateTicketRequest,
            tickets::CheckInRequest,
            tickets::CancelTicketRequest,
            tickets::RefundTicketRequest,
            // Bookings
            bookings::BookingDto,
            bookings::ReceiptDto,
            bookings::CreateBookingRequest,
            bookings::MarkPaidRequest,
            bookings::CreateReceiptRequest,
            // Discounts
            discounts::DiscountDto,
            discounts::CreateDiscountRequest,
            discounts::UpdateDiscountRequest,
            discounts::DiscountCodeRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Buses", description = "Fleet vehicle management"),
        (name = "Routes", description = "Service pattern management"),
        (name = "Trips", description = "Trip scheduling and lifecycle"),
        (name = "Tickets", description = "Ticket issuance, check-in, cancellation and refunds"),
        (name = "Bookings", description = "Ticket grouping, payments and receipts"),
        (name = "Discounts", description = "Discount codes, validation and redemption"),
    ),
    info(
        title = "Fleetline API",
        version = "0.1.0",
        description = "Multi-tenant bus fleet and ticketing back office",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState, auth_state: AuthState) -> Router {
    let bus_routes = Router::new()
        .route(
            "/",
            get(buses::handlers::list_buses).post(buses::handlers::create_bus),
        )
        .route(
            "/{id}",
            get(buses::handlers::get_bus)
                .put(buses::handlers::update_bus)
                .delete(buses::handlers::delete_bus),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let route_routes = Router::new()
        .route(
            "/",
            get(routes::handlers::list_routes).post(routes::handlers::create_route),
        )
        .route(
            "/{id}",
            get(routes::handlers::get_route)
                .put(routes::handlers::update_route)
                .delete(routes::handlers::delete_route),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let trip_routes = Router::new()
        .route(
            "/",
            get(trips::handlers::list_trips).post(trips::handlers::create_trip),
        )
        .route("/today", get(trips::handlers::today_trips))
        .route("/upcoming", get(trips::handlers::upcoming_trips))
        .route("/active", get(trips::handlers::active_trips))
        .route("/{id}", get(trips::handlers::get_trip))
        .route("/{id}/start-trip", post(trips::handlers::start_trip))
        .route("/{id}/complete-trip", post(trips::handlers::complete_trip))
        .route("/{id}/cancel-trip", post(trips::handlers::cancel_trip))
        .route("/{id}/delay-trip", post(trips::handlers::delay_trip))
        .route(
            "/{id}/events",
            get(trips::handlers::trip_events).post(trips::handlers::record_trip_event),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let ticket_routes = Router::new()
        .route(
            "/",
            get(tickets::handlers::list_tickets).post(tickets::handlers::create_ticket),
        )
        .route("/expired", get(tickets::handlers::expired_tickets))
        .route("/today", get(tickets::handlers::today_tickets))
        .route("/{id}", get(tickets::handlers::get_ticket))
        .route("/{id}/confirm", post(tickets::handlers::confirm_ticket))
        .route("/{id}/check-in", post(tickets::handlers::check_in_ticket))
        .route("/{id}/cancel", post(tickets::handlers::cancel_ticket))
        .route("/{id}/refund", post(tickets::handlers::refund_ticket))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::handlers::list_bookings).post(bookings::handlers::create_booking),
        )
        .route("/{id}", get(bookings::handlers::get_booking))
        .route("/{id}/mark-paid", post(bookings::handlers::mark_booking_paid))
        .route("/{id}/tickets", get(bookings::handlers::booking_tickets))
        .route(
            "/{id}/receipts",
            get(bookings::handlers::booking_receipts).post(bookings::handlers::issue_receipt),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let discount_routes = Router::new()
        .route(
            "/",
            get(discounts::handlers::list_discounts).post(discounts::handlers::create_discount),
        )
        .route("/active", get(discounts::handlers::active_discounts))
        .route("/validate_code", post(discounts::handlers::validate_code))
        .route("/redeem", post(discounts::handlers::redeem_code))
        .route(
            "/{id}",
            get(discounts::handlers::get_discount).put(discounts::handlers::update_discount),
        )
        .route(
            "/{id}/activate",
            post(discounts::handlers::activate_discount),
        )
        .route(
            "/{id}/deactivate",
            post(discounts::handlers::deactivate_discount),
        )
        .layer(middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/v1/health", get(health::handlers::health_check))
        .nest("/api/v1/buses", bus_routes)
        .nest("/api/v1/routes", route_routes)
        .nest("/api/v1/trips", trip_routes)
        .nest("/api/v1/tickets", ticket_routes)
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1/discounts", discount_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
