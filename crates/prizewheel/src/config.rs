use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wheelspin::{Prize, PrizeColor, PrizeId, PrizeList, PrizeName, SpinDuration, WheelError};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrizeConfig {
    pub id: Option<PrizeId>,
    pub name: PrizeName,
    pub weight: f64,
    pub color: Option<PrizeColor>,
}

impl PrizeConfig {
    fn into_prize(self, index: usize) -> Prize {
        Prize {
            id: self
                .id
                .unwrap_or_else(|| PrizeId::new((index + 1).to_string())),
            name: self.name,
            weight: self.weight,
            color: self
                .color
                .unwrap_or_else(|| PrizeColor::from_palette(index)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub spin_duration_ms: SpinDuration,
    #[serde(default)]
    pub distributed_start: u64,
    #[serde(default = "default_prizes")]
    pub prizes: Vec<PrizeConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spin_duration_ms: SpinDuration::default(),
            distributed_start: 0,
            prizes: default_prizes(),
        }
    }
}

impl Config {
    pub fn prize_list(&self) -> Result<PrizeList, WheelError> {
        PrizeList::new(
            self.prizes
                .iter()
                .cloned()
                .enumerate()
                .map(|(i, p)| p.into_prize(i))
                .collect(),
        )
    }
}

fn default_prizes() -> Vec<PrizeConfig> {
    ["Study", "Sleep", "Exercise", "Watch TV", "Chores"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| PrizeConfig {
            id: None,
            name: PrizeName::from(name),
            weight: 1.0,
            color: Some(PrizeColor::from_palette(i)),
        })
        .collect()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "prizewheel", "prizewheel")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("PRIZEWHEEL").try_parsing(true))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default configuration to {}", path.display()),
            Err(e) => log::error!("Failed to write default configuration: {}", e),
        }
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_embedded_default_matches_builtin_default() {
        let embedded = parse(DEFAULT_CONFIG).prize_list().unwrap();
        let builtin = Config::default().prize_list().unwrap();

        assert_eq!(embedded, builtin);
        assert_eq!(parse(DEFAULT_CONFIG).spin_duration_ms, SpinDuration::default());
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let config = parse(
            r##"
            spin_duration_ms = 9000

            [[prizes]]
            name = "Grand prize"
            weight = 0.5

            [[prizes]]
            id = "consolation"
            name = "Consolation"
            weight = 9.5
            color = "#06b6d4"
            "##,
        );

        assert_eq!(config.spin_duration_ms.as_millis(), 5000);
        assert_eq!(config.distributed_start, 0);

        let prizes = config.prize_list().unwrap();
        let first = prizes.get(0).unwrap();
        assert_eq!(first.id.as_str(), "1");
        assert_eq!(first.color, PrizeColor::from_palette(0));
        assert_eq!(prizes.get(1).unwrap().id.as_str(), "consolation");
        assert_eq!(prizes.share(0), Some(0.05));
    }

    #[test]
    fn test_invalid_prize_lists_are_rejected() {
        let single = parse(
            r#"
            [[prizes]]
            name = "Only"
            weight = 1
            "#,
        );
        assert!(matches!(
            single.prize_list(),
            Err(WheelError::TooFewPrizes { .. })
        ));

        let zero = parse(
            r#"
            [[prizes]]
            name = "A"
            weight = 1

            [[prizes]]
            name = "B"
            weight = 0
            "#,
        );
        assert!(matches!(
            zero.prize_list(),
            Err(WheelError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_prize_config_json_round() {
        let prize: PrizeConfig =
            serde_json::from_str(r##"{"id":null,"name":"Sleep","weight":2,"color":"#8b5cf6"}"##)
                .unwrap();
        assert_eq!(prize.color, Some(PrizeColor::from_palette(1)));
        assert_eq!(prize.weight, 2.0);
    }
}
