//! Product (treatment/service) list store.

use crate::gateway::ProductsGateway;
use crate::notify::{Notification, Notifier};
use clinident_client::ClientError;
use clinident_model::Product;
use std::sync::Arc;

pub struct ProductStore<G: ProductsGateway> {
    gateway: G,
    notifier: Arc<dyn Notifier>,
    items: Vec<Product>,
    loading: bool,
    is_saving: bool,
}

impl<G: ProductsGateway> ProductStore<G> {
    pub fn new(gateway: G, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            items: Vec::new(),
            loading: false,
            is_saving: false,
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    /// `&mut self` serializes loads; a stale result can never win.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.gateway.fetch_all().await;
        self.loading = false;

        match result {
            Ok(data) => {
                self.items = data;
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("Error al conectarse al servidor"));
                Err(e)
            }
        }
    }

    pub async fn create(&mut self, product: Product) -> Result<Product, ClientError> {
        self.is_saving = true;
        let result = self.gateway.create(&product).await;
        self.is_saving = false;

        match result {
            Ok(created) => {
                self.items.push(created.clone());
                self.notifier
                    .notify(Notification::success("Producto creado correctamente"));
                Ok(created)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo crear el producto"));
                Err(e)
            }
        }
    }

    pub async fn update(&mut self, id: i64, product: Product) -> Result<Product, ClientError> {
        self.is_saving = true;
        let result = self.gateway.update(id, &product).await;
        self.is_saving = false;

        match result {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|p| p.id == Some(id)) {
                    *slot = updated.clone();
                }
                self.notifier
                    .notify(Notification::success("Producto actualizado correctamente"));
                Ok(updated)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo actualizar el producto"));
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.is_saving = true;
        let result = self.gateway.delete(id).await;
        self.is_saving = false;

        match result {
            Ok(()) => {
                self.items.retain(|p| p.id != Some(id));
                self.notifier
                    .notify(Notification::success("Producto eliminado correctamente"));
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo eliminar el producto"));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::TracingNotifier;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn product(codigo: &str) -> Product {
        Product {
            id: None,
            codigo: codigo.into(),
            nombre: "Limpieza dental".into(),
            descripcion: None,
            precio: 35.0,
            categoria: Some("Prevención".into()),
        }
    }

    #[derive(Default)]
    struct FakeGateway {
        next_id: AtomicI64,
    }

    #[async_trait]
    impl ProductsGateway for FakeGateway {
        async fn fetch_all(&self) -> Result<Vec<Product>, ClientError> {
            Ok(vec![product("P-001"), product("P-002")])
        }
        async fn create(&self, p: &Product) -> Result<Product, ClientError> {
            let id = 100 + self.next_id.fetch_add(1, Ordering::SeqCst);
            Ok(Product {
                id: Some(id),
                ..p.clone()
            })
        }
        async fn update(&self, id: i64, p: &Product) -> Result<Product, ClientError> {
            Ok(Product {
                id: Some(id),
                ..p.clone()
            })
        }
        async fn delete(&self, _id: i64) -> Result<(), ClientError> {
            Ok(())
        }
    }

    fn store() -> ProductStore<FakeGateway> {
        ProductStore::new(FakeGateway::default(), Arc::new(TracingNotifier))
    }

    #[tokio::test]
    async fn load_replaces_items() {
        let mut store = store();
        store.load().await.expect("load");
        assert_eq!(store.items().len(), 2);
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn create_appends_server_echo() {
        let mut store = store();
        let created = store.create(product("P-003")).await.expect("create");
        assert_eq!(created.id, Some(100));
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_from_list() {
        let mut store = store();
        store.create(product("P-003")).await.expect("create");
        store.delete(100).await.expect("delete");
        assert!(store.items().is_empty());
    }
}
