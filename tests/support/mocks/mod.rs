// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod outbound;
pub mod search;
pub mod time;

pub use outbound::{RecordingAnnouncer, RecordingJobs, RecordingNotifier};
pub use search::CountingSearchEngine;
pub use time::{FixedClock, fixed_now};
