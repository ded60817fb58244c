// ============================================================================
// STATE MODULE - Resultado del bootstrap compartido con el overlay admin
// ============================================================================

pub mod ready;

pub use ready::*;
