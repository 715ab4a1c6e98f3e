pub mod events;
pub mod invoke;
