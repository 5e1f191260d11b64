//! Bank catalogue store.

use crate::gateway::BanksGateway;
use crate::notify::{Notification, Notifier};
use clinident_client::ClientError;
use clinident_model::Bank;
use std::sync::Arc;

pub struct BankStore<G: BanksGateway> {
    gateway: G,
    notifier: Arc<dyn Notifier>,
    items: Vec<Bank>,
    loading: bool,
    is_saving: bool,
}

impl<G: BanksGateway> BankStore<G> {
    pub fn new(gateway: G, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            items: Vec::new(),
            loading: false,
            is_saving: false,
        }
    }

    pub fn items(&self) -> &[Bank] {
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

    pub async fn create(&mut self, bank: Bank) -> Result<Bank, ClientError> {
        self.is_saving = true;
        let result = self.gateway.create(&bank).await;
        self.is_saving = false;

        match result {
            Ok(created) => {
                self.items.push(created.clone());
                self.notifier
                    .notify(Notification::success("Banco creado correctamente"));
                Ok(created)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo crear el banco"));
                Err(e)
            }
        }
    }

    pub async fn update(&mut self, id: i64, bank: Bank) -> Result<Bank, ClientError> {
        self.is_saving = true;
        let result = self.gateway.update(id, &bank).await;
        self.is_saving = false;

        match result {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|b| b.id == Some(id)) {
                    *slot = updated.clone();
                }
                self.notifier
                    .notify(Notification::success("Banco actualizado correctamente"));
                Ok(updated)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo actualizar el banco"));
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
                self.items.retain(|b| b.id != Some(id));
                self.notifier
                    .notify(Notification::success("Banco eliminado correctamente"));
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo eliminar el banco"));
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

    fn bank(nombre: &str) -> Bank {
        Bank {
            id: None,
            nombre: nombre.into(),
            codigo: Some("0032".into()),
            numero_cuenta: Some("2201456789".into()),
            tipo_cuenta: Some("corriente".into()),
        }
    }

    struct FakeGateway;

    #[async_trait]
    impl BanksGateway for FakeGateway {
        async fn fetch_all(&self) -> Result<Vec<Bank>, ClientError> {
            Ok(vec![bank("Banco Pichincha"), bank("Banco Guayaquil")])
        }
        async fn create(&self, b: &Bank) -> Result<Bank, ClientError> {
            Ok(Bank {
                id: Some(5),
                ..b.clone()
            })
        }
        async fn update(&self, id: i64, b: &Bank) -> Result<Bank, ClientError> {
            Ok(Bank {
                id: Some(id),
                ..b.clone()
            })
        }
        async fn delete(&self, _id: i64) -> Result<(), ClientError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_then_update_in_place() {
        let mut store = BankStore::new(FakeGateway, Arc::new(TracingNotifier));
        store.load().await.expect("load");
        assert_eq!(store.items().len(), 2);

        store.create(bank("Produbanco")).await.expect("create");
        let mut renamed = bank("Produbanco Grupo Promerica");
        renamed.id = Some(5);
        store.update(5, renamed).await.expect("update");

        let updated = store.items().iter().find(|b| b.id == Some(5)).unwrap();
        assert_eq!(updated.nombre, "Produbanco Grupo Promerica");
    }
}
