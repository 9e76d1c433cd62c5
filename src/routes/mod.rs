pub mod api;
pub mod web;

pub use api::create_api_routes;
pub use web::create_web_routes;
