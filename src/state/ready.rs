// ============================================================================
// READY SIGNAL - Resultado del bootstrap entregado una vez a quien llega tarde
// ============================================================================

use futures::channel::oneshot;
use std::rc::Rc;

use crate::models::{PoiCollection, Settings};

/// Lo que produce un bootstrap exitoso
pub struct MapReady<M> {
    pub map: Rc<M>,
    pub pois: Rc<PoiCollection>,
    pub settings: Rc<Settings>,
}

impl<M> Clone for MapReady<M> {
    fn clone(&self) -> Self {
        Self {
            map: Rc::clone(&self.map),
            pois: Rc::clone(&self.pois),
            settings: Rc::clone(&self.settings),
        }
    }
}

/// Mitad emisora, consumida por `publish`: el resultado se entrega como mucho una vez
pub struct ReadyPublisher<M> {
    sender: oneshot::Sender<MapReady<M>>,
}

/// Mitad receptora
pub struct ReadyListener<M> {
    receiver: oneshot::Receiver<MapReady<M>>,
}

pub fn ready_signal<M>() -> (ReadyPublisher<M>, ReadyListener<M>) {
    let (sender, receiver) = oneshot::channel();
    (ReadyPublisher { sender }, ReadyListener { receiver })
}

impl<M> ReadyPublisher<M> {
    pub fn publish(self, ready: MapReady<M>) {
        if self.sender.send(ready).is_err() {
            log::debug!("[READY] Nadie espera el mapa");
        }
    }
}

impl<M> ReadyListener<M> {
    /// Resuelve con el resultado del bootstrap, o `None` si el bootstrap falló
    /// (el publisher se descartó sin publicar).
    pub async fn wait(self) -> Option<MapReady<M>> {
        self.receiver.await.ok()
    }
}
