pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod store;
pub mod tokenizer;
