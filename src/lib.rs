pub mod cli;
pub mod commands;
pub mod compile;
pub mod config;
pub mod error;
pub mod fee;
pub mod rpc;
pub mod submit;
pub mod tx_builder;
