use config::ConfigError;
use domain::IdentityMode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const ENV_PREFIX: &str = "COMMENT_FORM_";

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub form: FormSettings,
    pub store: StoreSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Deserialize, Clone)]
pub struct FormSettings {
    pub identity: IdentityMode,
    pub notification_ttl_ms: u64,
}

impl FormSettings {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[derive(Deserialize, Clone)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum StoreSettings {
    Supabase {
        url: String,
        api_key: String,
        table: String,
    },
    Memory,
}

impl From<StoreSettings> for adapter::StoreConfig {
    fn from(settings: StoreSettings) -> Self {
        match settings {
            StoreSettings::Supabase {
                url,
                api_key,
                table,
            } => adapter::StoreConfig::Supabase(adapter::SupabaseConfig {
                url,
                api_key,
                table,
            }),
            StoreSettings::Memory => adapter::StoreConfig::Memory,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load(&run_mode, collect_env_vars(std::env::vars()))
    }

    fn load(run_mode: &str, env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let env_json = serde_json::to_string(&env_map)
            .map_err(|e| ConfigError::Message(format!("Environment variables should serialize to JSON: {}", e)))?;

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("database.url", "sqlite://data/comment-form.db")?
            .set_default("form.identity", "query")?
            .set_default("form.notification_ttl_ms", 3000)?
            .set_default("store.mode", "supabase")?
            .set_default("store.table", domain::protocol::COMMENTS_TABLE)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(&env_json, config::FileFormat::Json))
            .build()?;

        s.try_deserialize()
    }
}

/// `COMMENT_FORM_STORE__API_KEY=..` becomes `store.api_key`.
fn collect_env_vars(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches(ENV_PREFIX)
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        collect_env_vars(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn env_keys_are_nested_and_lowercased() {
        let map = env(&[
            ("COMMENT_FORM_STORE__API_KEY", "anon"),
            ("COMMENT_FORM_SERVER__PORT", "8080"),
            ("UNRELATED", "x"),
        ]);
        assert_eq!(map.get("store.api_key").map(String::as_str), Some("anon"));
        assert_eq!(map.get("server.port").map(String::as_str), Some("8080"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn memory_store_needs_no_credentials() {
        let settings = Settings::load(
            "test",
            env(&[
                ("COMMENT_FORM_STORE__MODE", "memory"),
                ("COMMENT_FORM_FORM__IDENTITY", "fields"),
            ]),
        )
        .unwrap();

        assert!(matches!(settings.store, StoreSettings::Memory));
        assert_eq!(settings.form.identity, IdentityMode::Fields);
        assert_eq!(settings.form.notification_ttl(), Duration::from_secs(3));
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn supabase_store_requires_api_key() {
        let result = Settings::load(
            "test",
            env(&[("COMMENT_FORM_STORE__URL", "https://demo.supabase.co")]),
        );
        assert!(result.is_err());

        let settings = Settings::load(
            "test",
            env(&[
                ("COMMENT_FORM_STORE__URL", "https://demo.supabase.co"),
                ("COMMENT_FORM_STORE__API_KEY", "anon"),
            ]),
        )
        .unwrap();
        match settings.store {
            StoreSettings::Supabase { table, .. } => assert_eq!(table, "comments"),
            StoreSettings::Memory => panic!("expected supabase mode"),
        }
    }
}
