use std::collections::HashMap;

use sha2::{Digest, Sha256};

/// Префикс API-ключей агентов.
pub const API_KEY_PREFIX: &str = "pa_sk_";

/// Кому принадлежит ключ: пользователь и его кошелёк.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthedAgent {
    pub user: String,
    pub wallet_address: Option<String>,
}

/// Реестр API-ключей. Сырые ключи не хранятся: только
/// SHA-256-хэши в hex, сверка — по хэшу входящего bearer'а.
#[derive(Debug, Default)]
pub struct ApiKeyRegistry {
    by_hash: HashMap<String, AuthedAgent>,
}

impl ApiKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Зарегистрировать ключ. Ключи без префикса pa_sk_ не принимаются.
    pub fn register_key(&mut self, plain_key: &str, agent: AuthedAgent) -> bool {
        if !plain_key.starts_with(API_KEY_PREFIX) {
            return false;
        }
        self.by_hash.insert(sha256_hex(plain_key), agent);
        true
    }

    /// Разобрать заголовок Authorization и найти владельца ключа.
    pub fn resolve_bearer(&self, authorization: &str) -> Option<&AuthedAgent> {
        let token = authorization.strip_prefix("Bearer ")?.trim();
        if !token.starts_with(API_KEY_PREFIX) {
            return None;
        }
        self.by_hash.get(&sha256_hex(token))
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }

    /// Загрузить ключи из переменной окружения вида
    /// `user1:wallet1:pa_sk_xxx;user2::pa_sk_yyy`
    /// (пустой кошелёк — агент без escrow).
    pub fn from_env(var: &str) -> Self {
        let mut registry = Self::new();
        let Ok(raw) = std::env::var(var) else {
            return registry;
        };
        for entry in raw.split(';').filter(|s| !s.is_empty()) {
            let mut parts = entry.splitn(3, ':');
            let user = parts.next().unwrap_or_default().to_string();
            let wallet = parts.next().unwrap_or_default().to_string();
            let key = parts.next().unwrap_or_default();
            let agent = AuthedAgent {
                user,
                wallet_address: if wallet.is_empty() {
                    None
                } else {
                    Some(wallet)
                },
            };
            if !registry.register_key(key, agent) {
                tracing::warn!("ключ без префикса {API_KEY_PREFIX} в {var} пропущен");
            }
        }
        registry
    }
}

/// SHA-256 строки в нижнем hex.
pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut out = String::with_capacity(64);
    for byte in digest {
        use std::fmt::Write;
        let _ = write!(out, "{byte:02x}");
    }
    out
}
