use std::sync::Arc;

use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::pricing::models::{estimate, PriceEstimate, PricingTable, Selection};
use crate::storage::Storage;

const SNAPSHOT: &str = "pricing";

/// Holds the one pricing table every estimate is computed against.
///
/// Updates replace the whole table, the last writer wins.
#[derive(Debug, Clone)]
pub struct PricingStore {
    table: Arc<RwLock<PricingTable>>,
    storage: Storage,
}

impl PricingStore {
    /// start from the stored table, or the default prices when there is none
    pub fn load(storage: Storage) -> Result<Self, ServiceError> {
        let table = storage.load::<PricingTable>(SNAPSHOT)?.unwrap_or_default();

        Ok(PricingStore {
            table: Arc::new(RwLock::new(table)),
            storage,
        })
    }

    pub async fn get(&self) -> PricingTable {
        *self.table.read().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn set(&self, table: PricingTable) -> Result<PricingTable, ServiceError> {
        let mut current = self.table.write().await;

        self.storage.save(SNAPSHOT, &table).await?;
        *current = table;

        info!("pricing table replaced");
        Ok(table)
    }

    pub async fn estimate(&self, selection: &Selection) -> PriceEstimate {
        let table = self.table.read().await;
        estimate(selection, &table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::options::{RoomType, SeatLevel, TransportClass};
    use crate::storage::scratch_dir;

    fn vip_weekend(guests: u32) -> Selection {
        Selection {
            room_type: Some(RoomType::Single),
            transport_class: Some(TransportClass::Economy),
            seat_level: Some(SeatLevel::Vip),
            guests,
        }
    }

    #[actix_rt::test]
    async fn starts_with_the_default_prices() {
        let store = PricingStore::load(Storage::in_memory()).unwrap();

        assert_eq!(store.get().await, PricingTable::default());
        assert_eq!(store.estimate(&vip_weekend(2)).await.total, 1160);
    }

    #[actix_rt::test]
    async fn estimates_see_a_new_table_immediately() {
        let store = PricingStore::load(Storage::in_memory()).unwrap();

        let mut table = store.get().await;
        table.ticket.vip = 500;
        store.set(table).await.unwrap();

        let estimate = store.estimate(&vip_weekend(1)).await;
        assert_eq!(estimate.ticket, 500);
        assert_eq!(estimate.total, 730);
    }

    #[actix_rt::test]
    async fn table_survives_a_restart() {
        let dir = scratch_dir();
        let store = PricingStore::load(Storage::on_disk(&dir)).unwrap();

        let mut table = store.get().await;
        table.room.double = 90;
        store.set(table).await.unwrap();

        let restarted = PricingStore::load(Storage::on_disk(&dir)).unwrap();
        assert_eq!(restarted.get().await.room.double, 90);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[actix_rt::test]
    async fn concurrent_updates_keep_one_whole_table() {
        let dir = scratch_dir();
        let store = PricingStore::load(Storage::on_disk(&dir)).unwrap();

        let mut cheap = PricingTable::default();
        cheap.room.single = 50;
        cheap.ticket.vip = 100;
        let mut pricey = PricingTable::default();
        pricey.room.single = 500;
        pricey.ticket.vip = 1000;

        let (a, b) = futures::join!(store.set(cheap), store.set(pricey));
        assert_eq!(a.unwrap(), cheap);
        assert_eq!(b.unwrap(), pricey);

        let current = store.get().await;
        assert!(current == cheap || current == pricey);

        let restarted = PricingStore::load(Storage::on_disk(&dir)).unwrap();
        assert_eq!(restarted.get().await, current);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[actix_rt::test]
    async fn failed_update_keeps_the_old_table() {
        let blocker = scratch_dir();
        std::fs::write(&blocker, b"").unwrap();
        let store = PricingStore::load(Storage::on_disk(blocker.join("data"))).unwrap();

        let mut table = store.get().await;
        table.room.single = 1;

        assert!(matches!(
            store.set(table).await,
            Err(ServiceError::Persistence(_))
        ));
        assert_eq!(store.get().await, PricingTable::default());

        std::fs::remove_file(blocker).unwrap();
    }
}
