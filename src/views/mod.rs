// ============================================================================
// VIEWS - Lado DOM de los viewmodels
// ============================================================================

pub mod admin_view;
pub mod map_view;

pub use admin_view::{AdminButtons, DomAdminView};
pub use map_view::publish_map_ready;
