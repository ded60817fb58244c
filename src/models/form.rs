use std::fmt;

use crate::models::poi::{Address, LatLng, PoiFeature, PoiProperties};
use crate::utils::constants::{DEFAULT_EMOJI, DEFAULT_MARKER_SIZE, MAX_MARKER_SIZE, MIN_MARKER_SIZE};

/// Valores crudos del modal "nuevo POI", tal como los escribe el usuario
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiForm {
    pub name: String,
    pub emoji: String,
    pub category: String,
    pub area: String,
    pub marker_size: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    MissingName,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::MissingName => write!(f, "POI name is required"),
        }
    }
}

impl std::error::Error for FormError {}

/// Entero inicial de `raw` (como `parseInt` de JS), limitado al rango de marcadores.
/// Sin dígitos iniciales, o cero, se usa el tamaño por defecto.
pub fn parse_marker_size(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return DEFAULT_MARKER_SIZE;
    }
    // Demasiados dígitos = "demasiado grande"
    let value = digits[..end].parse::<u64>().unwrap_or(u64::MAX);
    // Cero cuenta como "sin tamaño"
    if value == 0 {
        return DEFAULT_MARKER_SIZE;
    }
    if negative {
        return MIN_MARKER_SIZE;
    }
    value.clamp(MIN_MARKER_SIZE as u64, MAX_MARKER_SIZE as u64) as u32
}

impl PoiForm {
    /// Construye una feature borrador en `position`. Los textos se recortan.
    pub fn to_feature(&self, position: LatLng) -> Result<PoiFeature, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let emoji = match self.emoji.trim() {
            "" => DEFAULT_EMOJI,
            emoji => emoji,
        };

        let properties = PoiProperties {
            name: name.to_string(),
            emoji: emoji.to_string(),
            category: self.category.trim().to_string(),
            area: self.area.trim().to_string(),
            marker_size: parse_marker_size(&self.marker_size),
            address: Address {
                street: self.street.trim().to_string(),
                city: self.city.trim().to_string(),
                state: self.state.trim().to_string(),
                zip_code: Some(self.zip_code.trim().to_string()),
            },
            needs_coordinate_update: false,
            ..Default::default()
        };

        Ok(PoiFeature::new(position, properties))
    }
}
