// src/application/ports/mod.rs
pub mod jobs;
pub mod notifications;
pub mod time;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type ClockPort = dyn time::Clock;
pub type JobSchedulerPort = dyn jobs::JobScheduler;
pub type AnnounceChannelPort = dyn notifications::AnnounceChannel;
pub type SubscriberNotifierPort = dyn notifications::SubscriberNotifier;
