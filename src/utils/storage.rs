use web_sys::{window, Storage};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// String guardado bajo `key`, `None` si la clave no existe
pub fn load_raw(key: &str) -> Result<Option<String>, String> {
    let storage = get_local_storage().ok_or("localStorage is not available")?;
    storage
        .get_item(key)
        .map_err(|e| format!("Error reading localStorage: {:?}", e))
}

/// Guarda `value` bajo `key`. Falla por cuota o modo privado.
pub fn save_raw(key: &str, value: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("localStorage is not available")?;
    storage
        .set_item(key, value)
        .map_err(|e| format!("Error writing localStorage: {:?}", e))
}
