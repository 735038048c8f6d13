//! Cache port and the Redis adapter behind it.

pub mod cache_keys;
mod cache_port;
mod redis_cache;

pub use cache_keys::CacheKeys;
pub use cache_port::CachePort;
pub use redis_cache::{create_pool, RedisCache};
