//! Doctor resource client (`/api/medicos`).
//!
//! Doctors carry a linked user account. The server contract expects a
//! password on every create/update payload: creates get the fixed initial
//! password (staff change it on first login), updates must echo the stored
//! one back so it is not overwritten. `update` therefore reads the current
//! record first.

use crate::{ApiClient, ClientResult};
use clinident_core::Endpoint;
use clinident_model::Doctor;

/// Initial password assigned to a freshly created doctor account.
pub const DEFAULT_DOCTOR_PASSWORD: &str = "123";

#[derive(Clone, Debug)]
pub struct DoctorsApi {
    client: ApiClient,
}

impl DoctorsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<Doctor>> {
        let url = self.client.config().url(Endpoint::Medicos);
        self.client.get_json(&url).await
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<Doctor> {
        let url = self.client.config().resource_url(Endpoint::Medicos, id);
        self.client.get_json(&url).await
    }

    /// Create a doctor, injecting the initial password if the caller did
    /// not set one.
    pub async fn create(&self, doctor: &Doctor) -> ClientResult<Doctor> {
        let url = self.client.config().url(Endpoint::Medicos);
        let payload = with_default_password(doctor);
        self.client.post_json(&url, &payload).await
    }

    /// Update a doctor, preserving the stored password.
    pub async fn update(&self, id: i64, doctor: &Doctor) -> ClientResult<Doctor> {
        let existing = self.get_by_id(id).await?;
        let mut payload = doctor.clone();
        payload.password = existing.password;
        let url = self.client.config().resource_url(Endpoint::Medicos, id);
        self.client.put_json(&url, &payload).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let url = self.client.config().resource_url(Endpoint::Medicos, id);
        self.client.delete(&url).await
    }
}

fn with_default_password(doctor: &Doctor) -> Doctor {
    let mut payload = doctor.clone();
    if payload.password.is_none() {
        payload.password = Some(DEFAULT_DOCTOR_PASSWORD.to_owned());
    }
    payload
}
