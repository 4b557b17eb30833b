pub mod terminal_adapter_factory;
