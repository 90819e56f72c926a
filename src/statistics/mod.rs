//! Dashboard statistics computed from a user's transactions on every request.

mod aggregation;
mod handler;

pub use aggregation::{CategoryKey, CategoryStat, StatisticsSnapshot, compute_statistics};
pub use handler::get_statistics_endpoint;
