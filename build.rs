use std::env;
use std::fs;
use std::path::Path;

/// Variables leídas con `option_env!` en src/config.rs
const CONFIG_KEYS: &[&str] = &[
    "POI_DATA_URL",
    "SETTINGS_URL",
    "MAP_CONTAINER_ID",
    "DRAFT_STORAGE_KEY",
    "EXPORT_FILE_NAME",
    "LOG_LEVEL",
];

fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                // KEY=VALUE, opcionalmente entre comillas
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if !CONFIG_KEYS.contains(&key) {
                        println!("cargo:warning=Ignorando clave .env desconocida {}", key);
                        continue;
                    }

                    // El entorno real tiene prioridad sobre .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
