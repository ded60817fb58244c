// ============================================================================
// DOCUMENT SERVICE - Documentos estáticos de POIs y settings
// ============================================================================
// SOLO descarga y decodificación, sin lógica de mapa
// ============================================================================

use crate::maps::MapError;
use crate::models::{PoiCollection, Settings};

/// Origen de los dos documentos de arranque
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    async fn fetch_pois(&self) -> Result<PoiCollection, MapError>;
    async fn fetch_settings(&self) -> Result<Settings, MapError>;
}

/// Descarga ambos documentos en paralelo. Gana el primer error.
pub async fn fetch_documents<D: DocumentSource>(
    source: &D,
) -> Result<(PoiCollection, Settings), MapError> {
    futures::try_join!(source.fetch_pois(), source.fetch_settings())
}

/// Documentos servidos junto a la página
#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
pub struct HttpDocumentSource {
    pois_url: String,
    settings_url: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpDocumentSource {
    pub fn new(pois_url: &str, settings_url: &str) -> Self {
        Self {
            pois_url: pois_url.to_string(),
            settings_url: settings_url.to_string(),
        }
    }

    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        Self::new(&config.pois_url, &config.settings_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, MapError> {
        use gloo_net::http::Request;

        log::info!("📥 [FETCH] {}", url);
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| MapError::Network(format!("{}: {}", url, e)))?;
        if !response.ok() {
            return Err(MapError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| MapError::Decode(format!("{}: {}", url, e)))
    }
}

#[cfg(target_arch = "wasm32")]
impl DocumentSource for HttpDocumentSource {
    async fn fetch_pois(&self) -> Result<PoiCollection, MapError> {
        Self::get_json(&self.pois_url).await
    }

    async fn fetch_settings(&self) -> Result<Settings, MapError> {
        Self::get_json(&self.settings_url).await
    }
}
