pub mod event;
pub mod tracker;
