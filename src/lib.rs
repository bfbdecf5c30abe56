pub mod audit;
pub mod cart;
pub mod config;
pub mod dto;
pub mod error;
pub mod events;
pub mod export;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod response;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;
