use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub pois_url: String,
    pub settings_url: String,
    pub map_container_id: String,
    pub draft_storage_key: String,
    pub export_file_name: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pois_url: "./assets/pois.json".to_string(),
            settings_url: "./assets/settings.json".to_string(),
            map_container_id: "map".to_string(),
            draft_storage_key: "draftPois".to_string(),
            export_file_name: "pois.json".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Configuración fijada en compilación (ver build.rs para `.env`)
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("POI_DATA_URL"),
            option_env!("SETTINGS_URL"),
            option_env!("MAP_CONTAINER_ID"),
            option_env!("DRAFT_STORAGE_KEY"),
            option_env!("EXPORT_FILE_NAME"),
            option_env!("LOG_LEVEL"),
        )
    }

    fn from_values(
        pois_url: Option<&str>,
        settings_url: Option<&str>,
        map_container_id: Option<&str>,
        draft_storage_key: Option<&str>,
        export_file_name: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        let pick = |value: Option<&str>, default: String| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(default)
        };
        Self {
            pois_url: pick(pois_url, defaults.pois_url),
            settings_url: pick(settings_url, defaults.settings_url),
            map_container_id: pick(map_container_id, defaults.map_container_id),
            draft_storage_key: pick(draft_storage_key, defaults.draft_storage_key),
            export_file_name: pick(export_file_name, defaults.export_file_name),
            log_level: pick(log_level, defaults.log_level),
        }
    }

    /// Nivel de log de consola; nombres desconocidos caen a `info`
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
