//! Client half of the catalog store (C2) — upserted, never deleted.

use campaign_core::types::Client;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct ClientStore {
    clients: DashMap<Uuid, Client>,
}

impl ClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: Uuid) -> Option<Client> {
        self.clients.get(&id).map(|r| r.value().clone())
    }

    pub fn exists(&self, id: Uuid) -> bool {
        self.clients.contains_key(&id)
    }

    /// Idempotent create-or-update keyed by `id`. Same input yields the
    /// same resulting state (spec.md §4.2).
    pub fn bulk_upsert(&self, clients: Vec<Client>) -> Vec<Client> {
        for client in &clients {
            self.clients.insert(client.id, client.clone());
        }
        clients
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: Uuid) -> Client {
        Client {
            id,
            login: "alice".into(),
            age: Some(30),
            location: Some("Paris".into()),
            gender: Some(campaign_core::types::ClientGender::Female),
        }
    }

    #[test]
    fn upsert_is_idempotent() {
        let store = ClientStore::new();
        let id = Uuid::new_v4();
        store.bulk_upsert(vec![client(id)]);
        store.bulk_upsert(vec![client(id)]);
        assert_eq!(store.clients.len(), 1);
        assert!(store.exists(id));
    }

    #[test]
    fn upsert_replaces_fields() {
        let store = ClientStore::new();
        let id = Uuid::new_v4();
        store.bulk_upsert(vec![client(id)]);
        let mut updated = client(id);
        updated.login = "bob".into();
        store.bulk_upsert(vec![updated]);
        assert_eq!(store.get(id).unwrap().login, "bob");
    }
}
