pub mod cable;
pub mod history;
pub mod inputs;
pub mod line_items;
pub mod project;
pub mod results;
pub mod vendor;
