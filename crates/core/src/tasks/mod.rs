//! Task tracking

pub mod ports;
pub mod service;

pub use ports::TaskRepository;
pub use service::TaskService;
