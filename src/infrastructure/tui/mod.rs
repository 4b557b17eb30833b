pub mod app_runner;
pub mod input;
pub mod terminal_guard;
pub mod widgets;
