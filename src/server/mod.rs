pub mod client;
pub mod facade;
pub mod proto;
pub mod service;
