pub mod announce;
pub mod attendance;
pub mod config;
pub mod curriculum;
pub mod event;
pub mod export;
pub mod gallery;
pub mod rsvp;
pub mod scout;
pub mod subscriber;
