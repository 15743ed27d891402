// crates/lineup_core/src/tactics/mod.rs
// Formation templates and the catalog that serves them

pub mod catalog;

pub use catalog::{
    FormationCatalog, FormationKind, FormationMetadata, FormationTemplate, Slot, TacticalStyle,
    CATALOG_VERSION, OUTFIELD_SLOTS,
};
