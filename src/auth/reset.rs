// Reset-code registry
//
// Ephemeral mapping from email to a one-time 6-digit code. At most one code
// is pending per email (put overwrites), codes are single-use (deleted by the
// reset-completion flow) and expire after a TTL. The store sits behind a
// capability trait so the in-process map can be swapped for a shared
// time-expiring store without touching the auth service.

use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default code lifetime when RESET_CODE_TTL_SECS is not set
pub const DEFAULT_CODE_TTL: Duration = Duration::from_secs(600);

/// Generate a uniformly random 6-digit verification code (100000-999999)
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Keyed store of pending reset codes
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Store a code for an email, replacing any pending one
    async fn put(&self, email: &str, code: &str, ttl: Duration);

    /// Fetch the pending code for an email; expired entries are absent
    async fn get(&self, email: &str) -> Option<String>;

    /// Drop the pending code for an email
    async fn delete(&self, email: &str);
}

#[derive(Debug, Clone)]
struct CodeEntry {
    code: String,
    deadline: Instant,
}

/// In-process code store
///
/// Last writer wins when concurrent requests race on the same email; any
/// reader holding a matching code passes verification until the entry is
/// consumed or expires.
#[derive(Default)]
pub struct InMemoryCodeStore {
    entries: RwLock<HashMap<String, CodeEntry>>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CodeStore for InMemoryCodeStore {
    async fn put(&self, email: &str, code: &str, ttl: Duration) {
        let entry = CodeEntry {
            code: code.to_string(),
            deadline: Instant::now() + ttl,
        };
        self.entries.write().await.insert(email.to_string(), entry);
    }

    async fn get(&self, email: &str) -> Option<String> {
        let mut entries = self.entries.write().await;
        match entries.get(email) {
            Some(entry) if entry.deadline > Instant::now() => Some(entry.code.clone()),
            Some(_) => {
                // Lapsed entry, drop it on the way out
                entries.remove(email);
                None
            }
            None => None,
        }
    }

    async fn delete(&self, email: &str) {
        self.entries.write().await.remove(email);
    }
}
