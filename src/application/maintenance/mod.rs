mod service;
mod staleness;
mod tag_counts;

pub use service::MaintenanceService;
