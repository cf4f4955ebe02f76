mod drivers;
mod traits;

pub use drivers::memory::MemoryStore;
pub use drivers::supabase::{SupabaseConfig, SupabaseStore};
pub use traits::CommentStore;

use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub enum StoreConfig {
    Supabase(SupabaseConfig),
    Memory,
}

pub fn connect(config: StoreConfig) -> anyhow::Result<Arc<dyn CommentStore>> {
    let store: Arc<dyn CommentStore> = match config {
        StoreConfig::Supabase(conf) => {
            info!("Initializing comment store in SUPABASE mode...");
            Arc::new(SupabaseStore::new(conf)?)
        }
        StoreConfig::Memory => {
            info!("Initializing comment store in MEMORY mode...");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}
