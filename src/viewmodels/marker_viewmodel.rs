// ============================================================================
// MARKER VIEWMODEL - POI -> markup del popup + descriptor del icono
// ============================================================================
// Funciones puras, sin acceso al DOM
// ============================================================================

use serde::Serialize;

use crate::models::{PoiFeature, PoiProperties};
use crate::utils::constants::{COORDINATE_WARNING, EMOJI_MARKER_CLASS};
use crate::utils::html::escape_html;

/// Opciones de un `divIcon` de Leaflet. Se serializa directo al objeto de opciones JS.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IconSpec {
    pub html: String,
    pub icon_size: [f64; 2],
    pub icon_anchor: [f64; 2],
    pub popup_anchor: [f64; 2],
    pub class_name: &'static str,
}

impl IconSpec {
    /// Icono emoji cuadrado de `size` px, anclado al centro, popup justo encima
    pub fn emoji(emoji: &str, size: u32) -> Self {
        let size = f64::from(size);
        let half = size / 2.0;
        Self {
            html: format!(
                r#"<div style="font-size: {}px; text-align: center; line-height: 1;">{}</div>"#,
                size,
                escape_html(emoji)
            ),
            icon_size: [size, size],
            icon_anchor: [half, half],
            popup_anchor: [0.0, -half],
            class_name: EMOJI_MARKER_CLASS,
        }
    }

    pub fn for_poi(properties: &PoiProperties) -> Self {
        Self::emoji(&properties.emoji, properties.marker_size)
    }
}

/// Todo lo que el mapa necesita para dibujar un POI
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerContent {
    pub icon: IconSpec,
    pub popup_html: String,
}

impl MarkerContent {
    pub fn for_feature(feature: &PoiFeature) -> Self {
        Self {
            icon: IconSpec::for_poi(&feature.properties),
            popup_html: popup_html(&feature.properties),
        }
    }
}

/// Cuerpo del popup: título, dirección en negrita, categoría, área en cursiva, aviso opcional
pub fn popup_html(properties: &PoiProperties) -> String {
    let address = &properties.address;
    let city_line = match address.zip() {
        Some(zip) => format!(
            "{}, {} {}",
            escape_html(&address.city),
            escape_html(&address.state),
            escape_html(zip)
        ),
        None => format!("{}, {}", escape_html(&address.city), escape_html(&address.state)),
    };

    let warning = if properties.needs_coordinate_update {
        format!(r#"<p><small style="color: red;">{}</small></p>"#, COORDINATE_WARNING)
    } else {
        String::new()
    };

    format!(
        r#"<div style="text-align: center;">
  <h3>{} {}</h3>
  <p><strong>{}<br>{}</strong></p>
  <p>{}</p>
  <p><em>{}</em></p>
  {}
</div>"#,
        escape_html(&properties.emoji),
        escape_html(&properties.name),
        escape_html(&address.street),
        city_line,
        escape_html(&properties.category),
        escape_html(&properties.area),
        warning
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, PoiProperties};
    use crate::utils::constants::DEFAULT_EMOJI;

    fn restaurant() -> PoiProperties {
        PoiProperties {
            name: "Test Restaurant".to_string(),
            emoji: "🍕".to_string(),
            category: "Restaurant".to_string(),
            area: "Downtown".to_string(),
            address: Address {
                street: "123 Main St".to_string(),
                city: "Augusta".to_string(),
                state: "GA".to_string(),
                zip_code: Some("30901".to_string()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_popup_with_full_record() {
        let html = popup_html(&restaurant());
        assert!(html.contains("<h3>🍕 Test Restaurant</h3>"));
        assert!(html.contains("<strong>123 Main St<br>Augusta, GA 30901</strong>"));
        assert!(html.contains("<p>Restaurant</p>"));
        assert!(html.contains("<p><em>Downtown</em></p>"));
        assert!(!html.contains(COORDINATE_WARNING));
    }

    #[test]
    fn test_popup_without_zip() {
        let mut props = restaurant();
        props.address.zip_code = None;
        let html = popup_html(&props);
        assert!(html.contains("Augusta, GA</strong>"));
        assert!(!html.contains("GA </strong>"));

        props.address.zip_code = Some(String::new());
        let html = popup_html(&props);
        assert!(html.contains("Augusta, GA</strong>"));
    }

    #[test]
    fn test_popup_with_missing_fields() {
        let props: PoiProperties = serde_json::from_str(r#"{ "name": "Test POI" }"#).unwrap();
        let html = popup_html(&props);
        assert!(html.contains(&format!("<h3>{} Test POI</h3>", DEFAULT_EMOJI)));
        assert!(html.contains("<strong><br>, </strong>"));
        assert!(html.contains("<p></p>"));
        assert!(html.contains("<p><em></em></p>"));
    }

    #[test]
    fn test_popup_warning_when_stale() {
        let mut props = restaurant();
        props.needs_coordinate_update = true;
        assert!(popup_html(&props).contains("Coordinates need to be updated"));
    }

    #[test]
    fn test_popup_escapes_user_text() {
        let mut props = restaurant();
        props.name = "<script>x</script>".to_string();
        let html = popup_html(&props);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_icon_geometry() {
        for size in [16u32, 30, 31, 64] {
            let icon = IconSpec::emoji("📍", size);
            let s = f64::from(size);
            assert_eq!(icon.icon_size, [s, s]);
            assert_eq!(icon.icon_anchor, [s / 2.0, s / 2.0]);
            assert_eq!(icon.popup_anchor, [0.0, -s / 2.0]);
            assert_eq!(icon.class_name, "emoji-marker");
        }
    }

    #[test]
    fn test_icon_uses_poi_size() {
        let icon = IconSpec::for_poi(&PoiProperties::default());
        assert_eq!(icon.icon_size, [30.0, 30.0]);
        assert!(icon.html.contains("font-size: 30px"));
        assert!(icon.html.contains(DEFAULT_EMOJI));
    }

    #[test]
    fn test_icon_serializes_for_leaflet() {
        let json = serde_json::to_value(IconSpec::emoji("🍕", 40)).unwrap();
        assert_eq!(json["iconAnchor"], serde_json::json!([20.0, 20.0]));
        assert_eq!(json["popupAnchor"], serde_json::json!([0.0, -20.0]));
        assert_eq!(json["className"], "emoji-marker");
    }
}
