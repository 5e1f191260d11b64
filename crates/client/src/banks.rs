//! Bank account resource client (`/api/bancos`).

use crate::{ApiClient, ClientResult};
use clinident_core::Endpoint;
use clinident_model::Bank;

#[derive(Clone, Debug)]
pub struct BanksApi {
    client: ApiClient,
}

impl BanksApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<Bank>> {
        let url = self.client.config().url(Endpoint::Bancos);
        self.client.get_json(&url).await
    }

    pub async fn create(&self, bank: &Bank) -> ClientResult<Bank> {
        let url = self.client.config().url(Endpoint::Bancos);
        self.client.post_json(&url, bank).await
    }

    pub async fn update(&self, id: i64, bank: &Bank) -> ClientResult<Bank> {
        let url = self.client.config().resource_url(Endpoint::Bancos, id);
        self.client.put_json(&url, bank).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let url = self.client.config().resource_url(Endpoint::Bancos, id);
        self.client.delete(&url).await
    }
}
