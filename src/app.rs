// ============================================================================
// APP - Arranque de la página
// ============================================================================
// 1. bootstrap del mapa (documentos -> mapa Leaflet -> marcadores)
// 2. publicarlo a los scripts de la página y al listener de ready
// 3. montar el overlay de admin cuando el mapa está listo, si hay controles
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::CONFIG;
use crate::dom;
use crate::maps::web::LeafletMap;
use crate::maps::MapSurface;
use crate::services::{HttpDocumentSource, LocalStorageDraftStore};
use crate::state::{ready_signal, MapReady, ReadyListener};
use crate::viewmodels::{AdminViewModel, MapViewModel};
use crate::views::{publish_map_ready, AdminButtons, DomAdminView};

type WebAdmin = AdminViewModel<LeafletMap, LocalStorageDraftStore, DomAdminView>;

pub struct App;

impl App {
    pub fn start() {
        let (publisher, listener) = ready_signal::<LeafletMap>();

        // El listener se registra antes de que el bootstrap pueda terminar
        wasm_bindgen_futures::spawn_local(Self::attach_admin_when_ready(listener));

        wasm_bindgen_futures::spawn_local(async move {
            let source = HttpDocumentSource::from_config(&CONFIG);
            let ready = MapViewModel::initialize(&source, |view| {
                LeafletMap::create(&CONFIG.map_container_id, view)
            })
            .await;

            // Si falla, el publisher se descarta y el listener resuelve a None
            if let Some(ready) = ready {
                if let Err(e) = publish_map_ready(&ready) {
                    log::error!("❌ [APP] Error publicando el mapa: {:?}", e);
                }
                publisher.publish(ready);
            }
        });
    }

    async fn attach_admin_when_ready(listener: ReadyListener<LeafletMap>) {
        let Some(ready) = listener.wait().await else {
            log::warn!("⚠️ [ADMIN] Mapa no disponible, overlay de admin no montado");
            return;
        };
        let Some(view) = DomAdminView::find() else {
            return;
        };
        let buttons = match AdminButtons::lookup() {
            Ok(buttons) => buttons,
            Err(e) => {
                log::error!("❌ [ADMIN] Faltan botones de admin: {:?}", e);
                return;
            }
        };

        let admin = Rc::new(RefCell::new(AdminViewModel::attach(
            &ready,
            LocalStorageDraftStore::new(&CONFIG.draft_storage_key),
            view,
            &CONFIG.export_file_name,
        )));

        if let Err(e) = Self::wire(&ready, &admin, &buttons) {
            log::error!("❌ [ADMIN] Error conectando controles de admin: {:?}", e);
        }
    }

    fn wire(ready: &MapReady<LeafletMap>, admin: &Rc<RefCell<WebAdmin>>, buttons: &AdminButtons) -> Result<(), JsValue> {
        let a = Rc::clone(admin);
        dom::on_click(&buttons.enter_add, move |_| a.borrow_mut().enter_add_mode())?;

        if let Some(export) = &buttons.export {
            let a = Rc::clone(admin);
            dom::on_click(export, move |_| {
                if let Err(e) = a.borrow().export() {
                    log::error!("❌ [ADMIN] Exportación fallida: {}", e);
                }
            })?;
        }

        if let Some(clear) = &buttons.clear {
            let a = Rc::clone(admin);
            dom::on_click(clear, move |_| a.borrow_mut().clear_drafts())?;
        }

        let a = Rc::clone(admin);
        dom::on_click(&buttons.cancel, move |_| a.borrow_mut().cancel())?;

        let a = Rc::clone(admin);
        dom::on_click(&buttons.save, move |_| {
            let form = a.borrow().view().read_form();
            a.borrow_mut().save(&form);
        })?;

        let a = Rc::clone(admin);
        ready
            .map
            .on_click(Box::new(move |position| a.borrow_mut().handle_map_click(position)))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("🛠️ [ADMIN] Controles conectados");
        Ok(())
    }
}
