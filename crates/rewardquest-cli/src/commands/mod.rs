pub mod activity;
pub mod alarm;
pub mod config;
pub mod focus;
pub mod parse;
