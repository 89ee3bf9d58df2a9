//! Focus analytics

pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod tests_support;

pub use ports::StatsRepository;
pub use service::StatsService;
