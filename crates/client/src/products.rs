//! Product resource client (`/api/productos`).

use crate::{ApiClient, ClientResult};
use clinident_core::Endpoint;
use clinident_model::Product;

#[derive(Clone, Debug)]
pub struct ProductsApi {
    client: ApiClient,
}

impl ProductsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<Product>> {
        let url = self.client.config().url(Endpoint::Productos);
        self.client.get_json(&url).await
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<Product> {
        let url = self.client.config().resource_url(Endpoint::Productos, id);
        self.client.get_json(&url).await
    }

    pub async fn create(&self, product: &Product) -> ClientResult<Product> {
        let url = self.client.config().url(Endpoint::Productos);
        self.client.post_json(&url, product).await
    }

    pub async fn update(&self, id: i64, product: &Product) -> ClientResult<Product> {
        let url = self.client.config().resource_url(Endpoint::Productos, id);
        self.client.put_json(&url, product).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let url = self.client.config().resource_url(Endpoint::Productos, id);
        self.client.delete(&url).await
    }
}
