pub mod compile;
pub mod diff;
pub mod tags;
