pub mod auth_routes;
pub mod reservation_routes;
pub mod vehicle_routes;
