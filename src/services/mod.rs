pub mod autosave;
pub mod cable_aggregator;
pub mod calculator;
pub mod chart;
pub mod config;
pub mod cost_aggregator;
pub mod export;
pub mod formatting;
pub mod history_log;
pub mod input_reader;
pub mod labor_cost;
pub mod persistence;
pub mod reconciliation;
pub mod session;
pub mod store;
pub mod time_breakdown;
