//! # Clinident Client
//!
//! Async REST resource clients for the clinic API, one service per entity.
//!
//! Each service wraps the shared [`ApiClient`] and mirrors the remote
//! verb/path contract: `GET /resource`, `GET /resource/{id}`,
//! `POST /resource`, `PUT /resource/{id}`, `DELETE /resource/{id}`, plus
//! the relationship sub-paths the views need (proformas by patient,
//! cobranzas by proforma). Responses are consumed directly as the wire
//! models in `clinident-model`; no extra schema-validation layer, no
//! retries. A failed call surfaces to the caller.

mod accounts;
mod banks;
mod billing;
mod doctors;
mod error;
mod http;
mod patients;
mod products;

pub use accounts::{AccountsApi, RolesApi, UsersApi};
pub use banks::BanksApi;
pub use billing::{CobranzasApi, ProformasApi};
pub use doctors::{DoctorsApi, DEFAULT_DOCTOR_PASSWORD};
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use patients::PatientsApi;
pub use products::ProductsApi;
