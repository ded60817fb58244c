// ============================================================================
// ADMIN VIEW - Modal "Nuevo POI", avisos y descarga JSON
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlElement, HtmlInputElement, Url};

use crate::dom::{self, require_element, require_html_element, require_input};
use crate::models::PoiForm;
use crate::utils::constants::{ids, DEFAULT_MARKER_SIZE};
use crate::viewmodels::admin_viewmodel::AdminView;

/// Campos del formulario del modal, en orden de página
struct FormInputs {
    name: HtmlInputElement,
    emoji: HtmlInputElement,
    category: HtmlInputElement,
    area: HtmlInputElement,
    marker_size: HtmlInputElement,
    street: HtmlInputElement,
    city: HtmlInputElement,
    state: HtmlInputElement,
    zip_code: HtmlInputElement,
}

impl FormInputs {
    fn lookup() -> Result<Self, JsValue> {
        Ok(Self {
            name: require_input(ids::INPUT_NAME)?,
            emoji: require_input(ids::INPUT_EMOJI)?,
            category: require_input(ids::INPUT_CATEGORY)?,
            area: require_input(ids::INPUT_AREA)?,
            marker_size: require_input(ids::INPUT_MARKER_SIZE)?,
            street: require_input(ids::INPUT_STREET)?,
            city: require_input(ids::INPUT_CITY)?,
            state: require_input(ids::INPUT_STATE)?,
            zip_code: require_input(ids::INPUT_ZIP)?,
        })
    }

    fn all(&self) -> [&HtmlInputElement; 9] {
        [
            &self.name,
            &self.emoji,
            &self.category,
            &self.area,
            &self.marker_size,
            &self.street,
            &self.city,
            &self.state,
            &self.zip_code,
        ]
    }
}

/// Controles de admin encontrados en la página
pub struct DomAdminView {
    backdrop: HtmlElement,
    preview: HtmlElement,
    inputs: FormInputs,
}

impl DomAdminView {
    /// `None` si la página no tiene controles de admin (solo mapa público)
    pub fn find() -> Option<Self> {
        let has_controls = [ids::BTN_ENTER_ADD_POI, ids::MODAL_BACKDROP]
            .iter()
            .all(|id| dom::get_element_by_id(id).is_some());
        if !has_controls {
            log::info!("ℹ️ [ADMIN] Sin controles de admin en la página, overlay desactivado");
            return None;
        }

        match Self::lookup() {
            Ok(view) => Some(view),
            Err(e) => {
                log::error!("❌ [ADMIN] Markup de admin incompleto: {:?}", e);
                None
            }
        }
    }

    fn lookup() -> Result<Self, JsValue> {
        Ok(Self {
            backdrop: require_html_element(ids::MODAL_BACKDROP)?,
            preview: require_html_element(ids::COORD_PREVIEW)?,
            inputs: FormInputs::lookup()?,
        })
    }

    /// Valores actuales de los campos, sin recortar
    pub fn read_form(&self) -> PoiForm {
        let i = &self.inputs;
        PoiForm {
            name: i.name.value(),
            emoji: i.emoji.value(),
            category: i.category.value(),
            area: i.area.value(),
            marker_size: i.marker_size.value(),
            street: i.street.value(),
            city: i.city.value(),
            state: i.state.value(),
            zip_code: i.zip_code.value(),
        }
    }

    fn reset_form(&self) {
        for input in self.inputs.all() {
            input.set_value("");
        }
        self.inputs.marker_size.set_value(&DEFAULT_MARKER_SIZE.to_string());
    }

    fn try_download(&self, file_name: &str, contents: &str) -> Result<(), JsValue> {
        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let properties = BlobPropertyBag::new();
        properties.set_type("application/json");
        let blob = Blob::new_with_str_sequence_and_options(&parts, &properties)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let anchor = dom::create_element("a")?.dyn_into::<HtmlAnchorElement>()?;
        anchor.set_href(&url);
        anchor.set_download(file_name);

        let body = dom::document()
            .and_then(|doc| doc.body())
            .ok_or_else(|| JsValue::from_str("No document body"))?;
        body.append_child(&anchor)?;
        anchor.click();
        anchor.remove();

        Url::revoke_object_url(&url)
    }
}

impl AdminView for DomAdminView {
    fn show_modal(&self) {
        if let Err(e) = dom::set_display(&self.backdrop, "flex") {
            log::error!("❌ [ADMIN] Error mostrando modal: {:?}", e);
        }
    }

    fn hide_modal(&self) {
        if let Err(e) = dom::set_display(&self.backdrop, "none") {
            log::error!("❌ [ADMIN] Error ocultando modal: {:?}", e);
        }
        self.reset_form();
        self.preview.set_text_content(Some(""));
    }

    fn set_coordinate_preview(&self, text: &str) {
        self.preview.set_text_content(Some(text));
    }

    fn notify(&self, message: &str) {
        if let Some(win) = dom::window() {
            if let Err(e) = win.alert_with_message(message) {
                log::warn!("⚠️ [ADMIN] alert falló: {:?}", e);
            }
        }
    }

    fn download_json(&self, file_name: &str, contents: &str) -> Result<(), String> {
        self.try_download(file_name, contents)
            .map_err(|e| format!("Error downloading {}: {:?}", file_name, e))
    }
}

/// Botones de admin, buscados una vez al montar el overlay
pub struct AdminButtons {
    pub enter_add: web_sys::Element,
    pub export: Option<web_sys::Element>,
    pub clear: Option<web_sys::Element>,
    pub cancel: web_sys::Element,
    pub save: web_sys::Element,
}

impl AdminButtons {
    pub fn lookup() -> Result<Self, JsValue> {
        Ok(Self {
            enter_add: require_element(ids::BTN_ENTER_ADD_POI)?,
            export: dom::get_element_by_id(ids::BTN_EXPORT_POIS),
            clear: dom::get_element_by_id(ids::BTN_CLEAR_DRAFT),
            cancel: require_element(ids::BTN_CANCEL_POI)?,
            save: require_element(ids::BTN_SAVE_POI)?,
        })
    }
}
