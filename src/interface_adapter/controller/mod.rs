pub mod prompt_controller;
