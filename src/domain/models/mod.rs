pub mod booking;
pub mod calendar;
pub mod plan;
pub mod selection;
pub mod slot;
