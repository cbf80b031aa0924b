//! Application services - Use case implementations

mod booking_service;
mod debounced_resolver;
mod route_estimator;
#[cfg(test)]
mod test_support;
mod trip_planner;

pub use booking_service::BookingService;
pub use debounced_resolver::{
    DEFAULT_MIN_QUERY_CHARS, DEFAULT_RESOLVE_DELAY, DEFAULT_SUGGEST_DELAY,
    DEFAULT_SUGGESTION_LIMIT, DebouncedResolver, FieldSnapshot, ResolverConfig,
};
pub use route_estimator::{RouteEstimator, RouteSnapshot};
pub use trip_planner::{TripPlanner, TripSnapshot};
