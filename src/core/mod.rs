pub mod calculator;
pub mod catalog;
pub mod config;
pub mod entries;
pub mod export;
pub mod financial;
pub mod log;
pub mod logic;
