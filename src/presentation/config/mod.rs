mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VARIABLE, Environment};
pub use settings::{
    LoggingSettings, OrchestratorSettings, ReviewProviderSetting, ReviewSettings, ServerSettings,
    Settings, StorageProviderSetting, StorageSettings, TranscriptionProviderSetting,
    TranscriptionSettings,
};
