pub mod capability;
pub mod registry;
pub mod scheduler;
