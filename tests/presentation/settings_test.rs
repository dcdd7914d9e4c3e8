use menuscribe::presentation::Settings;
use menuscribe::presentation::config::{
    Environment, OrchestratorSettings, ReviewProviderSetting, StorageProviderSetting, TranscriptionProviderSetting,
};

#[test]
fn given_no_settings_file_when_loading_then_defaults_apply() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.server.port, 5000);
    assert_eq!(settings.server.max_upload_size_bytes, 25 * 1024 * 1024);
    assert_eq!(settings.storage.provider, StorageProviderSetting::Local);
    assert_eq!(settings.transcription.provider, TranscriptionProviderSetting::Google);
    assert_eq!(settings.transcription.language_code, "en-US");
    assert_eq!(settings.transcription.sample_rate_hertz, 16_000);
    assert_eq!(settings.review.provider, ReviewProviderSetting::Gemini);
    assert_eq!(settings.orchestrator.max_attempts, 1);
}

#[test]
fn given_only_max_attempts_when_loading_orchestrator_settings_then_other_fields_default() {
    let settings: OrchestratorSettings = config::Config::builder()
        .set_override("max_attempts", "3")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    let defaults = OrchestratorSettings::default();
    assert_eq!(settings.max_attempts, 3);
    assert_eq!(settings.initial_backoff_ms, defaults.initial_backoff_ms);
    assert_eq!(settings.max_backoff_ms, defaults.max_backoff_ms);
}

#[test]
fn given_local_profile_when_loading_then_retries_are_disabled() {
    let settings = Settings::load(Environment::Local).unwrap();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.orchestrator.max_attempts, 1);
}
