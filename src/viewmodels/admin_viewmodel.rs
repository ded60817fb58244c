// ============================================================================
// ADMIN VIEWMODEL - Editor de POIs borrador sobre un mapa listo
// ============================================================================
// add-mode off -> add-mode on -> punto pendiente (modal abierto) -> add-mode off
// ============================================================================

use std::rc::Rc;

use crate::maps::MapSurface;
use crate::models::{LatLng, PoiCollection, PoiFeature, PoiForm};
use crate::services::{DraftRepository, DraftStore};
use crate::state::MapReady;
use crate::utils::constants::{MSG_DRAFTS_CLEARED, MSG_DRAFT_SAVED, MSG_NAME_REQUIRED};
use crate::viewmodels::map_viewmodel::MapViewModel;

/// Modal, avisos y descargas, tal como los ve el overlay de admin
pub trait AdminView {
    fn show_modal(&self);

    /// Oculta el modal y resetea todos los campos
    fn hide_modal(&self);

    fn set_coordinate_preview(&self, text: &str);

    /// Aviso bloqueante (`alert`)
    fn notify(&self, message: &str);

    fn download_json(&self, file_name: &str, contents: &str) -> Result<(), String>;
}

/// Estado de colocación mientras se añade un POI
pub enum Placement<K> {
    Off,
    /// Esperando un click en el mapa
    Armed,
    /// Posición elegida, modal abierto
    Pending { position: LatLng, marker: Option<K> },
}

impl<K> Placement<K> {
    pub fn is_active(&self) -> bool {
        !matches!(self, Placement::Off)
    }

    pub fn pending_position(&self) -> Option<LatLng> {
        match self {
            Placement::Pending { position, .. } => Some(*position),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SaveOutcome {
    Saved,
    /// Validación fallida; el modal sigue abierto
    Rejected,
    /// No hay punto pendiente que guardar
    Ignored,
}

pub struct AdminViewModel<M: MapSurface, S, V> {
    map: Rc<M>,
    base: Rc<PoiCollection>,
    drafts: Vec<PoiFeature>,
    draft_markers: Vec<M::Marker>,
    placement: Placement<M::Marker>,
    repository: DraftRepository<S>,
    view: V,
    export_file_name: String,
}

impl<M, S, V> AdminViewModel<M, S, V>
where
    M: MapSurface,
    S: DraftStore,
    V: AdminView,
{
    /// Restaura los borradores guardados y los dibuja en el mapa
    pub fn attach(ready: &MapReady<M>, store: S, view: V, export_file_name: &str) -> Self {
        let repository = DraftRepository::new(store);
        let drafts = repository.load();

        let mut admin = Self {
            map: Rc::clone(&ready.map),
            base: Rc::clone(&ready.pois),
            drafts: Vec::new(),
            draft_markers: Vec::new(),
            placement: Placement::Off,
            repository,
            view,
            export_file_name: export_file_name.to_string(),
        };
        for draft in &drafts {
            admin.render_draft(draft);
        }
        admin.drafts = drafts;

        log::info!(
            "🛠️ [ADMIN] Montado ({} POIs base, {} borradores)",
            admin.base.len(),
            admin.drafts.len()
        );
        admin
    }

    pub fn drafts(&self) -> &[PoiFeature] {
        &self.drafts
    }

    pub fn placement(&self) -> &Placement<M::Marker> {
        &self.placement
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn enter_add_mode(&mut self) {
        if !self.placement.is_active() {
            self.placement = Placement::Armed;
        }
        if let Err(e) = self.map.set_crosshair(true) {
            log::error!("❌ [ADMIN] Error poniendo el cursor: {}", e);
        }
    }

    /// Click en el mapa: se ignora salvo en add-mode
    pub fn handle_map_click(&mut self, position: LatLng) {
        if !self.placement.is_active() {
            return;
        }
        self.discard_pending();

        let marker = match self.map.add_pending_marker(position) {
            Ok(marker) => Some(marker),
            Err(e) => {
                log::error!("❌ [ADMIN] Error colocando marcador temporal: {}", e);
                None
            }
        };
        self.placement = Placement::Pending { position, marker };

        self.view.set_coordinate_preview(&format!(
            "Selected: {:.6}, {:.6}",
            position.lat, position.lng
        ));
        self.view.show_modal();
    }

    pub fn cancel(&mut self) {
        self.exit_add_mode();
        self.view.hide_modal();
    }

    pub fn save(&mut self, form: &PoiForm) -> SaveOutcome {
        let Some(position) = self.placement.pending_position() else {
            return SaveOutcome::Ignored;
        };

        let feature = match form.to_feature(position) {
            Ok(feature) => feature,
            Err(e) => {
                log::warn!("⚠️ [ADMIN] Borrador rechazado: {}", e);
                self.view.notify(MSG_NAME_REQUIRED);
                return SaveOutcome::Rejected;
            }
        };

        self.render_draft(&feature);
        log::info!("➕ [ADMIN] POI borrador \"{}\" añadido", feature.properties.name);
        self.drafts.push(feature);
        self.persist();

        self.exit_add_mode();
        self.view.hide_modal();
        self.view.notify(MSG_DRAFT_SAVED);
        SaveOutcome::Saved
    }

    /// Olvida todos los borradores. Los archivos ya exportados no se tocan.
    pub fn clear_drafts(&mut self) {
        self.drafts.clear();
        self.persist();

        if let Err(e) = self.map.close_popup() {
            log::error!("❌ [ADMIN] Error cerrando popup: {}", e);
        }
        for marker in self.draft_markers.drain(..) {
            if let Err(e) = self.map.remove_marker(&marker) {
                log::error!("❌ [ADMIN] Error quitando capa: {}", e);
            }
        }
        self.discard_pending();

        log::info!("🧹 [ADMIN] Borradores eliminados");
        self.view.notify(MSG_DRAFTS_CLEARED);
    }

    /// Features base seguidas de los borradores. Los borradores se conservan.
    pub fn merged_collection(&self) -> PoiCollection {
        self.base.merged_with(&self.drafts)
    }

    /// Descarga el documento combinado como JSON indentado
    pub fn export(&self) -> Result<PoiCollection, String> {
        let merged = self.merged_collection();
        let json = serde_json::to_string_pretty(&merged)
            .map_err(|e| format!("Error serializing POIs: {}", e))?;
        self.view.download_json(&self.export_file_name, &json)?;
        log::info!(
            "📤 [ADMIN] Exportados {} POIs ({} borradores) a {}",
            merged.len(),
            self.drafts.len(),
            self.export_file_name
        );
        Ok(merged)
    }

    fn render_draft(&mut self, feature: &PoiFeature) {
        match MapViewModel::add_marker(self.map.as_ref(), feature) {
            Ok(marker) => self.draft_markers.push(marker),
            Err(e) => log::error!("❌ [ADMIN] Error añadiendo marcador borrador: {}", e),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.repository.persist(&self.drafts) {
            log::error!("❌ [ADMIN] Error guardando POIs borrador: {}", e);
        }
    }

    /// Descarta el punto pendiente y su marcador; add-mode queda como estaba
    fn discard_pending(&mut self) {
        let previous = std::mem::replace(&mut self.placement, Placement::Off);
        if let Placement::Pending { marker: Some(marker), .. } = &previous {
            if let Err(e) = self.map.remove_marker(marker) {
                log::error!("❌ [ADMIN] Error quitando marcador temporal: {}", e);
            }
        }
        if previous.is_active() {
            self.placement = Placement::Armed;
        }
    }

    fn exit_add_mode(&mut self) {
        self.discard_pending();
        self.placement = Placement::Off;
        if let Err(e) = self.map.set_crosshair(false) {
            log::error!("❌ [ADMIN] Error restaurando el cursor: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::recording::{MapCall, RecordingMap};
    use crate::maps::MapView;
    use crate::models::Settings;
    use crate::services::draft_service::memory::MemoryDraftStore;
    use crate::utils::constants::DEFAULT_EMOJI;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeView {
        modal_open: RefCell<bool>,
        form_resets: RefCell<usize>,
        preview: RefCell<String>,
        notices: RefCell<Vec<String>>,
        downloads: RefCell<Vec<(String, String)>>,
    }

    impl AdminView for Rc<FakeView> {
        fn show_modal(&self) {
            *self.modal_open.borrow_mut() = true;
        }

        fn hide_modal(&self) {
            *self.modal_open.borrow_mut() = false;
            *self.form_resets.borrow_mut() += 1;
            self.preview.borrow_mut().clear();
        }

        fn set_coordinate_preview(&self, text: &str) {
            *self.preview.borrow_mut() = text.to_string();
        }

        fn notify(&self, message: &str) {
            self.notices.borrow_mut().push(message.to_string());
        }

        fn download_json(&self, file_name: &str, contents: &str) -> Result<(), String> {
            self.downloads
                .borrow_mut()
                .push((file_name.to_string(), contents.to_string()));
            Ok(())
        }
    }

    type Admin = AdminViewModel<RecordingMap, MemoryDraftStore, Rc<FakeView>>;

    struct Harness {
        map: Rc<RecordingMap>,
        store: MemoryDraftStore,
        view: Rc<FakeView>,
        admin: Admin,
    }

    fn base_pois() -> PoiCollection {
        serde_json::from_str(include_str!("../../assets/pois.json")).unwrap()
    }

    fn harness_with(store: MemoryDraftStore) -> Harness {
        let ready = MapReady {
            map: Rc::new(RecordingMap::new(&MapView::default())),
            pois: Rc::new(base_pois()),
            settings: Rc::new(Settings::default()),
        };
        let view = Rc::new(FakeView::default());
        let admin = AdminViewModel::attach(&ready, store.clone(), Rc::clone(&view), "pois.json");
        Harness {
            map: ready.map,
            store,
            view,
            admin,
        }
    }

    fn harness() -> Harness {
        harness_with(MemoryDraftStore::default())
    }

    fn cafe() -> PoiForm {
        PoiForm {
            name: "Cafe".to_string(),
            marker_size: "30".to_string(),
            ..Default::default()
        }
    }

    fn add_draft(h: &mut Harness, name: &str, position: LatLng) {
        h.admin.enter_add_mode();
        h.admin.handle_map_click(position);
        let form = PoiForm {
            name: name.to_string(),
            ..Default::default()
        };
        assert_eq!(h.admin.save(&form), SaveOutcome::Saved);
    }

    #[test]
    fn test_attach_restores_and_renders_drafts() {
        let drafts = vec![
            PoiFeature::new(LatLng::new(33.1, -81.1), Default::default()),
            PoiFeature::new(LatLng::new(33.2, -81.2), Default::default()),
        ];
        let stored = serde_json::to_string(&drafts).unwrap();

        let h = harness_with(MemoryDraftStore::with_content(&stored));

        assert_eq!(h.admin.drafts().len(), 2);
        assert_eq!(h.map.poi_markers().len(), 2);
        assert_eq!(h.map.poi_markers()[1].0, LatLng::new(33.2, -81.2));
    }

    #[test]
    fn test_attach_with_corrupt_storage() {
        let h = harness_with(MemoryDraftStore::with_content("][ nope"));
        assert!(h.admin.drafts().is_empty());
        assert!(h.map.calls().is_empty());
    }

    #[test]
    fn test_click_ignored_outside_add_mode() {
        let mut h = harness();
        h.admin.handle_map_click(LatLng::new(33.47, -81.96));
        assert!(h.map.calls().is_empty());
        assert!(!*h.view.modal_open.borrow());
    }

    #[test]
    fn test_enter_add_mode_sets_crosshair() {
        let mut h = harness();
        h.admin.enter_add_mode();
        assert!(matches!(h.admin.placement(), Placement::Armed));
        assert_eq!(h.map.calls(), vec![MapCall::Crosshair(true)]);
    }

    #[test]
    fn test_map_clicks_reach_admin_through_surface_handler() {
        let Harness { map, view, admin, .. } = harness();
        let admin = Rc::new(RefCell::new(admin));

        let handler_admin = Rc::clone(&admin);
        map.on_click(Box::new(move |position| {
            handler_admin.borrow_mut().handle_map_click(position)
        }))
        .unwrap();

        map.click(LatLng::new(33.47, -81.96));
        assert!(map.calls().is_empty());
        assert!(!*view.modal_open.borrow());

        admin.borrow_mut().enter_add_mode();
        map.click(LatLng::new(33.48, -81.97));

        assert_eq!(
            map.calls(),
            vec![
                MapCall::Crosshair(true),
                MapCall::PendingMarker {
                    id: 0,
                    position: LatLng::new(33.48, -81.97)
                },
            ]
        );
        assert!(*view.modal_open.borrow());
        assert_eq!(
            admin.borrow().placement().pending_position(),
            Some(LatLng::new(33.48, -81.97))
        );
    }

    #[test]
    fn test_click_opens_modal_with_coordinates() {
        let mut h = harness();
        h.admin.enter_add_mode();
        h.admin.handle_map_click(LatLng::new(33.4712345678, -81.9654321));

        assert!(*h.view.modal_open.borrow());
        assert_eq!(*h.view.preview.borrow(), "Selected: 33.471235, -81.965432");
        assert_eq!(
            h.admin.placement().pending_position(),
            Some(LatLng::new(33.4712345678, -81.9654321))
        );
        assert_eq!(h.map.live_markers().len(), 1);
    }

    #[test]
    fn test_second_click_replaces_temporary_marker() {
        let mut h = harness();
        h.admin.enter_add_mode();
        h.admin.handle_map_click(LatLng::new(1.0, 1.0));
        h.admin.handle_map_click(LatLng::new(2.0, 2.0));

        assert_eq!(h.map.live_markers().len(), 1);
        assert!(h.map.calls().contains(&MapCall::RemoveMarker(0)));
        assert_eq!(
            h.admin.placement().pending_position(),
            Some(LatLng::new(2.0, 2.0))
        );
    }

    #[test]
    fn test_cancel_discards_pending_point() {
        let mut h = harness();
        h.admin.enter_add_mode();
        h.admin.handle_map_click(LatLng::new(1.0, 1.0));
        h.admin.cancel();

        assert!(matches!(h.admin.placement(), Placement::Off));
        assert!(h.map.live_markers().is_empty());
        assert!(!*h.view.modal_open.borrow());
        assert_eq!(*h.view.form_resets.borrow(), 1);
        assert_eq!(h.map.calls().last(), Some(&MapCall::Crosshair(false)));
        assert!(h.admin.drafts().is_empty());
    }

    #[test]
    fn test_save_cafe_end_to_end() {
        let mut h = harness();
        h.admin.enter_add_mode();
        h.admin.handle_map_click(LatLng::new(33.475, -81.97));

        let outcome = h.admin.save(&cafe());

        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(h.admin.drafts().len(), 1);
        let draft = &h.admin.drafts()[0];
        assert_eq!(draft.properties.name, "Cafe");
        assert_eq!(draft.properties.emoji, DEFAULT_EMOJI);
        assert!(!draft.properties.needs_coordinate_update);
        assert_eq!(draft.geometry.coordinates.0, [-81.97, 33.475]);

        // marcador temporal quitado, marcador borrador dibujado
        assert_eq!(h.map.poi_markers().len(), 1);
        assert_eq!(h.map.live_markers().len(), 1);
        assert!(matches!(h.admin.placement(), Placement::Off));
        assert!(!*h.view.modal_open.borrow());
        assert_eq!(h.view.notices.borrow().as_slice(), [MSG_DRAFT_SAVED]);

        let stored: Vec<PoiFeature> =
            serde_json::from_str(h.store.content.borrow().as_deref().unwrap()).unwrap();
        assert_eq!(stored, h.admin.drafts());
    }

    #[test]
    fn test_save_without_name_is_rejected() {
        let mut h = harness();
        h.admin.enter_add_mode();
        h.admin.handle_map_click(LatLng::new(1.0, 1.0));

        let outcome = h.admin.save(&PoiForm {
            name: "   ".to_string(),
            ..Default::default()
        });

        assert_eq!(outcome, SaveOutcome::Rejected);
        assert!(h.admin.drafts().is_empty());
        assert!(*h.view.modal_open.borrow());
        assert_eq!(h.view.notices.borrow().as_slice(), [MSG_NAME_REQUIRED]);
        assert!(h.admin.placement().pending_position().is_some());
        assert!(h.store.content.borrow().is_none());
    }

    #[test]
    fn test_save_without_pending_point_is_ignored() {
        let mut h = harness();
        assert_eq!(h.admin.save(&cafe()), SaveOutcome::Ignored);
        h.admin.enter_add_mode();
        assert_eq!(h.admin.save(&cafe()), SaveOutcome::Ignored);
        assert!(h.admin.drafts().is_empty());
    }

    #[test]
    fn test_storage_failure_does_not_block_save() {
        let store = MemoryDraftStore::default();
        *store.fail_writes.borrow_mut() = true;
        let mut h = harness_with(store);

        add_draft(&mut h, "Cafe", LatLng::new(1.0, 1.0));

        assert_eq!(h.admin.drafts().len(), 1);
        assert_eq!(h.view.notices.borrow().as_slice(), [MSG_DRAFT_SAVED]);
    }

    #[test]
    fn test_clear_drafts_removes_everything() {
        let mut h = harness();
        add_draft(&mut h, "One", LatLng::new(1.0, 1.0));
        add_draft(&mut h, "Two", LatLng::new(2.0, 2.0));
        h.admin.enter_add_mode();
        h.admin.handle_map_click(LatLng::new(3.0, 3.0));

        h.admin.clear_drafts();

        assert!(h.admin.drafts().is_empty());
        assert!(h.map.live_markers().is_empty());
        assert!(h.map.calls().contains(&MapCall::ClosePopup));
        assert!(h.admin.placement().pending_position().is_none());
        assert_eq!(h.store.content.borrow().as_deref(), Some("[]"));
        assert_eq!(h.view.notices.borrow().last().unwrap(), MSG_DRAFTS_CLEARED);
    }

    #[test]
    fn test_clear_drafts_survives_cleanup_errors() {
        let mut h = harness();
        add_draft(&mut h, "One", LatLng::new(1.0, 1.0));
        add_draft(&mut h, "Two", LatLng::new(2.0, 2.0));
        h.map.fail_cleanup.set(true);

        h.admin.clear_drafts();

        assert!(h.admin.drafts().is_empty());
        assert_eq!(h.store.content.borrow().as_deref(), Some("[]"));
        assert_eq!(h.view.notices.borrow().last().unwrap(), MSG_DRAFTS_CLEARED);
    }

    #[test]
    fn test_export_merges_base_then_drafts() {
        let mut h = harness();
        add_draft(&mut h, "Draft A", LatLng::new(1.0, 1.0));
        add_draft(&mut h, "Draft B", LatLng::new(2.0, 2.0));

        let merged = h.admin.export().unwrap();

        let names: Vec<_> = merged
            .features
            .iter()
            .map(|f| f.properties.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "Augusta Common",
                "Riverwalk Landing",
                "Broad Street Coffee",
                "Draft A",
                "Draft B"
            ]
        );

        let downloads = h.view.downloads.borrow();
        let (file_name, contents) = &downloads[0];
        assert_eq!(file_name, "pois.json");
        assert!(contents.starts_with("{\n  \"type\": \"FeatureCollection\""));
        let parsed: PoiCollection = serde_json::from_str(contents).unwrap();
        assert_eq!(parsed, merged);

        // los borradores se conservan
        assert_eq!(h.admin.drafts().len(), 2);
    }

    #[test]
    fn test_repeated_export_includes_drafts_again() {
        let mut h = harness();
        add_draft(&mut h, "Draft", LatLng::new(1.0, 1.0));
        let first = h.admin.export().unwrap();
        let second = h.admin.export().unwrap();
        assert_eq!(first, second);
        assert_eq!(second.len(), 4);
    }
}
