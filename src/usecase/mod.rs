pub mod prompt_usecase;
