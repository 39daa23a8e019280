//! Redis-backed cache. Expiry is left to Redis; every key carries the prefix.
//!
//! Every command runs under a deadline, so a stalled server reads as a miss
//! instead of holding up the query.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use tracing::{info, warn};

use crate::store::CacheStore;

/// Keys fetched per SCAN round trip during `clear`.
const SCAN_BATCH: usize = 200;

pub struct RedisCacheStore {
    conn: ConnectionManager,
    prefix: String,
    command_timeout: Duration,
}

impl RedisCacheStore {
    /// Connect and PING, giving up after `connect_timeout`.
    pub async fn connect(
        url: &str,
        prefix: &str,
        connect_timeout: Duration,
        command_timeout: Duration,
    ) -> Result<Self> {
        let client = redis::Client::open(url).context("invalid Redis URL")?;
        let handshake = async {
            let mut conn = ConnectionManager::new(client)
                .await
                .context("failed to connect to Redis")?;
            let _: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .context("Redis PING failed")?;
            Ok::<_, anyhow::Error>(conn)
        };
        let conn = tokio::time::timeout(connect_timeout, handshake)
            .await
            .map_err(|_| anyhow!("timed out after {connect_timeout:?} connecting to Redis"))??;

        info!(prefix, "Connected to Redis cache");
        Ok(Self {
            conn,
            prefix: prefix.to_string(),
            command_timeout,
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    async fn bounded<T>(&self, op: &str, fut: impl Future<Output = RedisResult<T>>) -> Result<T> {
        match tokio::time::timeout(self.command_timeout, fut).await {
            Ok(res) => res.with_context(|| format!("Redis {op} failed")),
            Err(_) => Err(anyhow!("Redis {op} timed out after {:?}", self.command_timeout)),
        }
    }

    async fn scan_prefixed(&self) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}:*", self.prefix);
        let mut cursor: u64 = 0;
        let mut found = Vec::new();
        loop {
            let mut cmd = redis::cmd("SCAN");
            cmd.arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH);
            let (next, keys): (u64, Vec<String>) =
                self.bounded("SCAN", cmd.query_async(&mut conn)).await?;
            found.extend(keys);
            if next == 0 {
                return Ok(found);
            }
            cursor = next;
        }
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        match self
            .bounded("GET", conn.get::<_, Option<String>>(self.key(key)))
            .await
        {
            Ok(value) => value,
            Err(e) => {
                warn!(key, "{e:#}");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> bool {
        let mut conn = self.conn.clone();
        let full = self.key(key);
        let outcome = if ttl_secs > 0 {
            self.bounded("SET", conn.set_ex::<_, _, ()>(&full, value, ttl_secs))
                .await
        } else {
            self.bounded("SET", conn.set::<_, _, ()>(&full, value)).await
        };
        match outcome {
            Ok(()) => true,
            Err(e) => {
                warn!(key, "{e:#}");
                false
            }
        }
    }

    async fn del(&self, key: &str) -> bool {
        let mut conn = self.conn.clone();
        match self.bounded("DEL", conn.del::<_, ()>(self.key(key))).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key, "{e:#}");
                false
            }
        }
    }

    /// Deletes only keys under this store's prefix.
    async fn clear(&self) -> bool {
        let keys = match self.scan_prefixed().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(prefix = %self.prefix, "{e:#}");
                return false;
            }
        };
        if keys.is_empty() {
            return true;
        }

        let mut conn = self.conn.clone();
        match self.bounded("DEL", conn.del::<_, ()>(&keys)).await {
            Ok(()) => {
                info!(prefix = %self.prefix, removed = keys.len(), "Cleared Redis cache");
                true
            }
            Err(e) => {
                warn!(prefix = %self.prefix, "{e:#}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;
    use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
    use tokio::net::tcp::OwnedReadHalf;
    use tokio::net::TcpListener;

    #[derive(Clone, Copy, PartialEq)]
    enum Mode {
        Normal,
        /// Answers the handshake and PING, then never replies to data commands.
        StallData,
        /// Accepts the connection but never answers PING.
        StallPing,
    }

    type Keyspace = Arc<Mutex<HashMap<String, String>>>;

    /// Minimal RESP2 server covering the commands the store issues.
    async fn fake_redis(mode: Mode, keyspace: Keyspace) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else { return };
                let keyspace = keyspace.clone();
                tokio::spawn(async move {
                    let (read, mut write) = socket.into_split();
                    let mut reader = BufReader::new(read);
                    while let Some(args) = read_command(&mut reader).await {
                        if let Some(reply) = respond(mode, &args, &keyspace) {
                            if write.write_all(reply.as_bytes()).await.is_err() {
                                return;
                            }
                        }
                    }
                });
            }
        });
        format!("redis://{addr}/")
    }

    async fn read_command(reader: &mut BufReader<OwnedReadHalf>) -> Option<Vec<String>> {
        let mut line = String::new();
        if reader.read_line(&mut line).await.ok()? == 0 {
            return None;
        }
        let count: usize = line.trim().strip_prefix('*')?.parse().ok()?;
        let mut args = Vec::with_capacity(count);
        for _ in 0..count {
            line.clear();
            reader.read_line(&mut line).await.ok()?;
            let len: usize = line.trim().strip_prefix('$')?.parse().ok()?;
            let mut buf = vec![0; len + 2];
            reader.read_exact(&mut buf).await.ok()?;
            buf.truncate(len);
            args.push(String::from_utf8(buf).ok()?);
        }
        Some(args)
    }

    fn bulk(s: &str) -> String {
        format!("${}\r\n{}\r\n", s.len(), s)
    }

    fn respond(mode: Mode, args: &[String], keyspace: &Keyspace) -> Option<String> {
        let cmd = args.first()?.to_ascii_uppercase();
        match cmd.as_str() {
            "CLIENT" | "SELECT" => return Some("+OK\r\n".into()),
            "PING" if mode == Mode::StallPing => return None,
            "PING" => return Some("+PONG\r\n".into()),
            _ if mode != Mode::Normal => return None,
            _ => {}
        }

        let mut data = keyspace.lock().unwrap();
        Some(match cmd.as_str() {
            "GET" => data.get(&args[1]).map(|v| bulk(v)).unwrap_or_else(|| "$-1\r\n".into()),
            "SET" => {
                data.insert(args[1].clone(), args[2].clone());
                "+OK\r\n".into()
            }
            "SETEX" => {
                data.insert(args[1].clone(), args[3].clone());
                "+OK\r\n".into()
            }
            "DEL" => {
                let removed = args[1..].iter().filter(|k| data.remove(*k).is_some()).count();
                format!(":{removed}\r\n")
            }
            "SCAN" => {
                let pattern = args
                    .iter()
                    .position(|a| a.eq_ignore_ascii_case("MATCH"))
                    .map(|i| args[i + 1].trim_end_matches('*').to_string())
                    .unwrap_or_default();
                let keys: Vec<String> =
                    data.keys().filter(|k| k.starts_with(&pattern)).map(|k| bulk(k)).collect();
                format!("*2\r\n{}*{}\r\n{}", bulk("0"), keys.len(), keys.concat())
            }
            _ => "-ERR unknown command\r\n".into(),
        })
    }

    async fn connect(url: &str, prefix: &str) -> Result<RedisCacheStore> {
        RedisCacheStore::connect(url, prefix, Duration::from_secs(2), Duration::from_millis(200)).await
    }

    #[tokio::test]
    async fn keys_carry_prefix_and_clear_is_prefix_scoped() {
        let keyspace = Keyspace::default();
        keyspace.lock().unwrap().insert("billing:invoice".into(), "keep".into());
        let url = fake_redis(Mode::Normal, keyspace.clone()).await;
        let store = connect(&url, "triton").await.unwrap();

        assert!(store.set("abc123", "{\"result\":\"ok\"}", 60).await);
        assert!(store.set("def456", "x", 0).await);
        assert!(keyspace.lock().unwrap().contains_key("triton:abc123"));
        assert_eq!(store.get("abc123").await.as_deref(), Some("{\"result\":\"ok\"}"));
        assert_eq!(store.get("missing").await, None);

        assert!(store.clear().await);
        let remaining: Vec<String> = keyspace.lock().unwrap().keys().cloned().collect();
        assert_eq!(remaining, vec!["billing:invoice".to_string()]);
    }

    #[tokio::test]
    async fn stalled_server_degrades_to_miss() {
        let url = fake_redis(Mode::StallData, Keyspace::default()).await;
        let store = connect(&url, "triton").await.unwrap();

        let started = Instant::now();
        assert_eq!(store.get("k").await, None);
        assert!(!store.set("k", "v", 60).await);
        assert!(!store.del("k").await);
        assert!(!store.clear().await);
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn unanswered_ping_fails_connect() {
        let url = fake_redis(Mode::StallPing, Keyspace::default()).await;
        let started = Instant::now();
        let res = RedisCacheStore::connect(
            &url,
            "triton",
            Duration::from_millis(300),
            Duration::from_millis(200),
        )
        .await;
        assert!(res.is_err());
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
