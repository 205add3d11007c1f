// ── Identity caches ──
//
// `CachedClient` is the entry point. `DeviceMapping` is the immutable
// snapshot it builds; `ResultCache` backs the name-keyed script lookups.

mod client;
mod mapping;
mod result_cache;

pub use client::CachedClient;
pub use mapping::DeviceMapping;
pub use result_cache::ResultCache;
