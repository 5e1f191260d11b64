//! Patient resource client (`/api/pacientes`).

use crate::{ApiClient, ClientResult};
use clinident_core::Endpoint;
use clinident_model::Patient;

#[derive(Clone, Debug)]
pub struct PatientsApi {
    client: ApiClient,
}

impl PatientsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<Patient>> {
        let url = self.client.config().url(Endpoint::Pacientes);
        self.client.get_json(&url).await
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<Patient> {
        let url = self.client.config().resource_url(Endpoint::Pacientes, id);
        self.client.get_json(&url).await
    }

    /// Create a patient; the server echoes the record back with its id.
    pub async fn create(&self, patient: &Patient) -> ClientResult<Patient> {
        let url = self.client.config().url(Endpoint::Pacientes);
        self.client.post_json(&url, patient).await
    }

    pub async fn update(&self, id: i64, patient: &Patient) -> ClientResult<Patient> {
        let url = self.client.config().resource_url(Endpoint::Pacientes, id);
        self.client.put_json(&url, patient).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let url = self.client.config().resource_url(Endpoint::Pacientes, id);
        self.client.delete(&url).await
    }
}
