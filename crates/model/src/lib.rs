//! # Clinident Model
//!
//! Wire models for every resource the clinic API serves.
//!
//! Responsibilities:
//! - Define serde structs matching the remote JSON shapes exactly
//!   (camelCase Spanish field names, server-assigned integer ids)
//! - Implement dynamic field access ([`Fields`]) for the filter engine
//! - Define the fixed label→field export projection per entity
//!
//! The API is the source of truth for these shapes; nothing here validates
//! beyond what serde decoding enforces.

pub mod account;
pub mod bank;
pub mod billing;
pub mod doctor;
pub mod patient;
pub mod product;

pub use account::{AccountMovement, Role, UserAccount};
pub use bank::Bank;
pub use billing::{Cobranza, Proforma, ProformaDetail};
pub use doctor::Doctor;
pub use patient::Patient;
pub use product::Product;

use clinident_types::ExportRecord;

/// An entity with a fixed, display-oriented export projection.
///
/// `headers` is the column order of the projection; `export_row` renders
/// one record through the label→field table, absent fields becoming empty
/// strings. `entity_name` is the filename stem used for downloads.
pub trait Exportable {
    /// Filename stem for exports of this entity (`medicos`, `pacientes`, ...).
    fn entity_name() -> &'static str;

    /// Column labels in projection order.
    fn export_headers() -> &'static [&'static str];

    /// Project one record into `(label, value)` pairs in header order.
    fn export_row(&self) -> ExportRecord;
}

/// Join two optional name parts into the "Nombre Completo" display form.
pub(crate) fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}").trim().to_owned()
}
