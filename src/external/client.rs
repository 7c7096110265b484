use std::sync::LazyLock;
use std::time::Duration;

/// Global HTTP client instance, initialized lazily on first access and
/// reused across the application for connection pooling.
///
/// Individual callers override the request timeout where they need a
/// tighter bound than the client-wide default.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .deflate(true)
        .build()
        .expect("Failed to build HTTP client")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_initializes() {
        let _ = &*HTTP_CLIENT;
    }
}
