pub mod config;
pub mod data;
pub mod day;
pub mod place;
pub mod transit;
pub mod trip;
pub mod view;
