pub mod calendar;
pub mod classifier;
pub mod fetcher;
pub mod pricing;
pub mod selection;
