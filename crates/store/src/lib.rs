//! # Clinident Store
//!
//! Per-entity state containers sitting between the views (or the CLI) and
//! the resource clients. Each store owns one loaded collection plus its
//! loading flags, issues CRUD calls through a gateway seam, and mirrors the
//! server's responses back into local state (append on create, replace-by-id
//! on update, remove-by-id on delete) so the list stays consistent without
//! a full refetch.
//!
//! Ground rules, every store:
//! - loading flags are cleared on success *and* failure; a failed call never
//!   leaves a store stuck "loading"
//! - local state is only touched after the remote call succeeded; a failure
//!   never half-applies a change
//! - loads cannot overlap: `&mut self` across the await serializes them,
//!   so a stale result can never overwrite a newer one
//! - outcomes reach the user through the [`notify::Notifier`] seam

pub mod banks;
pub mod doctors;
pub mod gateway;
pub mod notify;
pub mod patients;
pub mod products;
pub mod wizard;

pub use banks::BankStore;
pub use doctors::{DoctorStore, DoctorStoreError};
pub use gateway::{
    BanksGateway, DoctorsGateway, PatientsGateway, PaymentBackend, PaymentGateway,
    ProductsGateway, RolesGateway, UsersGateway,
};
pub use notify::{Notification, Notifier, Severity, TracingNotifier};
pub use patients::{PatientStore, PatientStoreError};
pub use products::ProductStore;
pub use wizard::{SpecialistPaymentWizard, WizardError, WizardStep, PAYMENT_CATEGORY_ID};
