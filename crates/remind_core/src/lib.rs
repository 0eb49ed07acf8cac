pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod monitor;
pub mod notify;
pub mod ordering;
pub mod parser;
pub mod session;
pub mod storage;
pub mod task_api;
pub mod upcoming;
