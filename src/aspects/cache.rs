//! Time-bounded cache for rendered pages.
//!
//! Keys combine the view name with its arguments. Each entry remembers its
//! own lifetime, so views with different TTLs share one map; moka's cache
//! TTL only bounds how long stale entries linger before eviction.

use moka::sync::Cache;
use once_cell::sync::Lazy;
use std::future::Future;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct CachedPage {
    body: String,
    stored_at: Instant,
    ttl: Duration,
}

static PAGE_CACHE: Lazy<Cache<String, CachedPage>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(3600))
        .max_capacity(1_000)
        .build()
});

/// Return the cached body for `view:key` if it is younger than `ttl`,
/// otherwise run `render`, store its output, and return it.
pub async fn with_cache<F, Fut>(
    view: &'static str,
    key: &str,
    ttl: Duration,
    render: F,
) -> Result<String, actix_web::Error>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, actix_web::Error>>,
{
    let cache_key = format!("{}:{}", view, key);

    if let Some(hit) = PAGE_CACHE.get(&cache_key) {
        if hit.stored_at.elapsed() < hit.ttl {
            log::debug!("cache: hit for '{}'", cache_key);
            return Ok(hit.body);
        }
        log::debug!("cache: expired entry for '{}'", cache_key);
    } else {
        log::debug!("cache: miss for '{}'", cache_key);
    }

    let body = render().await?;
    PAGE_CACHE.insert(
        cache_key,
        CachedPage {
            body: body.clone(),
            stored_at: Instant::now(),
            ttl,
        },
    );
    Ok(body)
}

/// Drop a single entry.
pub fn invalidate(view: &str, key: &str) {
    PAGE_CACHE.invalidate(&format!("{}:{}", view, key));
}

/// Drop everything. Used by tests sharing the process-global map.
pub fn clear() {
    PAGE_CACHE.invalidate_all();
}
