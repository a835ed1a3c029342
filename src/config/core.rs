use super::{BenchConfig, ConfigOverrides, smart_load};
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

impl BenchConfig {
    /// Load defaults, user and repository config files, and environment variables
    pub fn load() -> Result<Self> {
        Self::load_with(None, &ConfigOverrides::default())
    }

    /// Load configuration, optionally from an explicit file, with command-line overrides on top
    pub fn load_with(custom_config: Option<&str>, overrides: &ConfigOverrides) -> Result<Self> {
        Self::figment(custom_config, overrides)
            .extract()
            .context("Failed to load wordbench configuration")
    }

    /// The merged provider stack, highest priority last
    pub fn figment(custom_config: Option<&str>, overrides: &ConfigOverrides) -> Figment {
        tracing::trace!("CONFIG LOAD: Starting");
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        if let Some(custom_path) = custom_config {
            // Explicit config replaces the user/repo search
            figment = figment.merge(smart_load::auto(custom_path));
        } else {
            let user_config = Self::user_config_path();
            figment = figment
                // User config - support multiple formats
                .merge(Toml::file(&user_config))
                .merge(Json::file(user_config.replace(".toml", ".json")))
                .merge(Yaml::file(user_config.replace(".toml", ".yaml")))
                // Repository config - support multiple formats
                .merge(Toml::file("wordbench.toml"))
                .merge(Json::file("wordbench.json"))
                .merge(Yaml::file("wordbench.yaml"))
                .merge(Yaml::file("wordbench.yml"));
        }

        // Environment variables, then CLI flags
        figment = figment.merge(Env::prefixed("WORDBENCH_").ignore(&["query"]).split("__"));
        // Taken verbatim so `1605`, `007` or `true` stay strings
        if let Ok(query) = std::env::var("WORDBENCH_QUERY") {
            figment = figment.merge(Serialized::default("query", query));
        }
        figment.merge(Serialized::defaults(overrides.to_value()))
    }

    /// Render the merged configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/wordbench/config.toml", home),
            Err(_) => "~/.config/wordbench/config.toml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::overrides::{OutputOverrides, ParallelOverrides};
    use crate::count::StrategyKind;
    use figment::Jail;
    use std::path::PathBuf;

    fn jailed_home(jail: &mut Jail) {
        let home = jail.directory().to_path_buf();
        jail.set_env("HOME", home.display());
    }

    #[test]
    fn test_config_loads_defaults() {
        Jail::expect_with(|jail| {
            jailed_home(jail);
            let config = BenchConfig::load().map_err(|e| e.to_string())?;

            assert_eq!(config.query, "y");
            assert_eq!(config.repetitions, 3);
            assert_eq!(
                config.strategies,
                vec![
                    StrategyKind::Serial,
                    StrategyKind::ParallelCpu,
                    StrategyKind::ParallelGpu
                ]
            );
            assert_eq!(config.parallel.timeout_secs, 3600);
            assert_eq!(config.output.csv, Some(PathBuf::from("results.csv")));
            assert!(config.output.chart);
            Ok(())
        });
    }

    #[test]
    fn test_repo_config_and_env_layering() {
        Jail::expect_with(|jail| {
            jailed_home(jail);
            jail.create_file(
                "wordbench.toml",
                r#"
                query = "Quixote"
                repetitions = 5

                [parallel]
                workers = 2
                "#,
            )?;
            jail.set_env("WORDBENCH_REPETITIONS", "7");
            jail.set_env("WORDBENCH_PARALLEL__TIMEOUT_SECS", "30");

            let config = BenchConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.query, "Quixote");
            assert_eq!(config.repetitions, 7);
            assert_eq!(config.parallel.workers, 2);
            assert_eq!(config.parallel.timeout_secs, 30);
            Ok(())
        });
    }

    #[test]
    fn test_cli_overrides_win() {
        Jail::expect_with(|jail| {
            jailed_home(jail);
            jail.set_env("WORDBENCH_QUERY", "env");

            let overrides = ConfigOverrides {
                query: Some("cli".to_string()),
                strategies: vec![StrategyKind::Rayon],
                parallel: ParallelOverrides {
                    workers: Some(8),
                    ..Default::default()
                },
                output: OutputOverrides {
                    chart: Some(false),
                    ..Default::default()
                },
                ..Default::default()
            };
            let config = BenchConfig::load_with(None, &overrides).map_err(|e| e.to_string())?;

            assert_eq!(config.query, "cli");
            assert_eq!(config.strategies, vec![StrategyKind::Rayon]);
            assert_eq!(config.parallel.workers, 8);
            assert!(!config.output.chart);
            // Untouched values still come from defaults
            assert_eq!(config.repetitions, 3);
            Ok(())
        });
    }

    #[test]
    fn test_numeric_and_boolean_env_query_stay_text() {
        Jail::expect_with(|jail| {
            jailed_home(jail);
            for raw in ["1605", "007", "true", "2.50"] {
                jail.set_env("WORDBENCH_QUERY", raw);
                let config = BenchConfig::load().map_err(|e| e.to_string())?;
                assert_eq!(config.query, raw);
            }
            Ok(())
        });
    }

    #[test]
    fn test_unquoted_query_in_config_file() {
        Jail::expect_with(|jail| {
            jailed_home(jail);
            jail.create_file("wordbench.toml", "query = 1605")?;
            let config = BenchConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.query, "1605");

            jail.create_file("wordbench.toml", "query = false")?;
            let config = BenchConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.query, "false");
            Ok(())
        });
    }

    #[test]
    fn test_custom_config_file() {
        Jail::expect_with(|jail| {
            jailed_home(jail);
            jail.create_file("bench.json", r#"{ "query": "Sancho", "strategies": ["serial"] }"#)?;

            let config = BenchConfig::load_with(Some("bench.json"), &ConfigOverrides::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(config.query, "Sancho");
            assert_eq!(config.strategies, vec![StrategyKind::Serial]);
            Ok(())
        });
    }

    #[test]
    fn test_missing_custom_config_falls_back_to_defaults() {
        Jail::expect_with(|jail| {
            jailed_home(jail);
            let config = BenchConfig::load_with(Some("non_existent.toml"), &ConfigOverrides::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(config.query, "y");
            Ok(())
        });
    }

    #[test]
    fn test_to_toml_round_trips() {
        Jail::expect_with(|jail| {
            jailed_home(jail);
            let config = BenchConfig::load().map_err(|e| e.to_string())?;
            let rendered = config.to_toml().map_err(|e| e.to_string())?;
            let parsed: BenchConfig = toml::from_str(&rendered).map_err(|e| e.to_string())?;
            assert_eq!(parsed, config);
            Ok(())
        });
    }
}
