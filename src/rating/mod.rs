pub mod dtos;
pub mod handlers;

pub use handlers::calculate_star_rating;
