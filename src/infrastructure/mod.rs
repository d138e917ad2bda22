pub mod database;
pub mod outbound;
pub mod repositories;
pub mod time;
