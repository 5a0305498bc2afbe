pub mod settings;

pub use settings::StorageSettings;
