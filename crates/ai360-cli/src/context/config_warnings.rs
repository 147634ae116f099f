use ai360_config::Ai360Config;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &Ai360Config) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &Ai360Config, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.gemini.is_configured() && has_single_underscore_key(&env_keys, "AI360_GEMINI") {
        warnings.push(
            "Gemini API key is empty while AI360_GEMINI* env vars exist. Use double underscores (example: AI360_GEMINI__API_KEY)."
                .to_string(),
        );
    }

    if !config.elevenlabs.is_configured() && has_single_underscore_key(&env_keys, "AI360_ELEVENLABS")
    {
        warnings.push(
            "ElevenLabs API key is empty while AI360_ELEVENLABS* env vars exist. Use double underscores (example: AI360_ELEVENLABS__API_KEY)."
                .to_string(),
        );
    }

    warnings
}

/// True if some key starts with `prefix` but not with `prefix__`.
fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    let nested = format!("{prefix}__");
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&nested))
}

#[cfg(test)]
mod tests {
    use ai360_config::{Ai360Config, ElevenLabsConfig, GeminiConfig};

    use super::collect_unconfigured_warnings;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn warns_for_single_underscore_keys() {
        let warnings = collect_unconfigured_warnings(
            &Ai360Config::default(),
            env(&[
                ("AI360_GEMINI_API_KEY", "key"),
                ("AI360_ELEVENLABS_API_KEY", "key"),
            ]),
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("AI360_GEMINI__API_KEY"));
    }

    #[test]
    fn nested_keys_do_not_warn() {
        let warnings = collect_unconfigured_warnings(
            &Ai360Config::default(),
            env(&[("AI360_GEMINI__MODEL", "x"), ("AI360_LOG", "debug")]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn configured_sections_do_not_warn() {
        let config = Ai360Config {
            gemini: GeminiConfig {
                api_key: "key".to_string(),
                ..Default::default()
            },
            elevenlabs: ElevenLabsConfig {
                api_key: "key".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let warnings = collect_unconfigured_warnings(
            &config,
            env(&[
                ("AI360_GEMINI_API_KEY", "key"),
                ("AI360_ELEVENLABS_API_KEY", "key"),
            ]),
        );
        assert!(warnings.is_empty());
    }
}
