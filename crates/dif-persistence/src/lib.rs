//! Persistencia SQLite de la caché. Expone el módulo `schema` y reexporta el
//! repositorio Diesel que implementa `CacheRepository`. La implementación
//! detallada está en `cache_persistence.rs`.

mod cache_persistence;
pub mod schema;

pub use cache_persistence::{default_cache_path, new_cache_from_env, open_cache, DieselCacheRepository, MIGRATIONS};
