//! Client Module
//!
//! Typed operations over a Connector.
//!
//! ## Call Path
//! 1. Validate keys and bind values (local failures end here)
//! 2. Build a command descriptor
//! 3. Execute it on the connector
//! 4. Classify the outcome, then extract the typed result

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::classify;
use crate::config::Config;
use crate::error::{DomainError, ProviderError, Result};
use crate::key::{self, Key, KeyValueMapping};
use crate::network::{Connector, TcpConnector};
use crate::protocol::{
    CommandDescriptor, CommandType as Cmd, DescriptorBuilder, RawResult, ResponseShape as Shape,
};
use crate::range::{RangeSpec, ScoreRange, ScoredEntry};
use crate::sort::{Sort, SortSpec};
use crate::types::{ObjectInfo, RedisType, ServerInfo};
use crate::value::{BincodeCodec, Binder, Number, ObjectCodec, Value};

type Extract<T> = fn(&'static str, RawResult) -> Result<T>;

/// Typed client over a connector
///
/// `S` is the object codec used by [`Client::object`] and
/// [`Client::get_object`].
pub struct Client<C: Connector, S: ObjectCodec = BincodeCodec> {
    connector: C,
    binder: Binder<S>,
}

impl Client<TcpConnector> {
    /// Connect over TCP with the default codec
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(Self::new(TcpConnector::connect(config)?))
    }
}

impl<C: Connector> Client<C> {
    pub fn new(connector: C) -> Self {
        Self::with_codec(connector, BincodeCodec)
    }
}

impl<C: Connector, S: ObjectCodec> Client<C, S> {
    pub fn with_codec(connector: C, codec: S) -> Self {
        Self {
            connector,
            binder: Binder::new(codec),
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    pub fn into_connector(self) -> C {
        self.connector
    }

    pub fn binder(&self) -> &Binder<S> {
        &self.binder
    }

    /// Execute a descriptor and classify the outcome
    pub(crate) fn dispatch(&mut self, descriptor: &CommandDescriptor) -> Result<RawResult> {
        tracing::trace!(
            "Executing {} with {} args",
            descriptor.name(),
            descriptor.args().len()
        );
        let outcome = self.connector.execute(descriptor);
        classify::classify(descriptor, outcome)
    }

    fn call<T>(&mut self, descriptor: CommandDescriptor, extract: Extract<T>) -> Result<T> {
        let raw = self.dispatch(&descriptor)?;
        extract(descriptor.name(), raw)
    }

    fn bind(&self, value: impl Into<Value>) -> Result<Bytes> {
        self.binder.bind(value.into())
    }

    // =========================================================================
    // Connection
    // =========================================================================

    pub fn ping(&mut self) -> Result<()> {
        self.call(cmd(Cmd::Ping, Shape::Status).build(), classify::unit)
    }

    /// Ask the server to close the connection
    pub fn quit(&mut self) -> Result<()> {
        self.call(cmd(Cmd::Quit, Shape::None).build(), classify::unit)
    }

    // =========================================================================
    // Strings
    // =========================================================================

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let key = Key::new(key)?;
        let value = self.bind(value)?;
        self.call(cmd(Cmd::Set, Shape::Status).key(&key).arg(value).build(), classify::unit)
    }

    /// Set only if the key does not exist
    pub fn setnx(&mut self, key: &str, value: impl Into<Value>) -> Result<bool> {
        let key = Key::new(key)?;
        let value = self.bind(value)?;
        self.call(cmd(Cmd::SetNx, Shape::Boolean).key(&key).arg(value).build(), classify::boolean)
    }

    pub fn get(&mut self, key: &str) -> Result<Option<Bytes>> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::Get, Shape::Bulk).key(&key).build(), classify::bulk)
    }

    /// Set a new value and return the old one
    pub fn getset(&mut self, key: &str, value: impl Into<Value>) -> Result<Option<Bytes>> {
        let key = Key::new(key)?;
        let value = self.bind(value)?;
        self.call(cmd(Cmd::GetSet, Shape::Bulk).key(&key).arg(value).build(), classify::bulk)
    }

    /// Values for each key, `None` where a key is missing
    pub fn mget(&mut self, keys: &[&str]) -> Result<Vec<Option<Bytes>>> {
        let keys = key::keys("MGET", keys)?;
        self.call(cmd(Cmd::MGet, Shape::MultiBulk).keys(&keys).build(), classify::elements)
    }

    pub fn mset(&mut self, mapping: KeyValueMapping) -> Result<()> {
        let descriptor = self.mapping_command(Cmd::MSet, Shape::Status, mapping)?;
        self.call(descriptor, classify::unit)
    }

    /// Set every mapping, or none of them if any key exists
    pub fn msetnx(&mut self, mapping: KeyValueMapping) -> Result<bool> {
        let descriptor = self.mapping_command(Cmd::MSetNx, Shape::Boolean, mapping)?;
        self.call(descriptor, classify::boolean)
    }

    fn mapping_command(
        &self,
        command: Cmd,
        shape: Shape,
        mapping: KeyValueMapping,
    ) -> Result<CommandDescriptor> {
        if mapping.is_empty() {
            return Err(DomainError::EmptyMapping.into());
        }
        let mut builder = cmd(command, shape);
        for (key, value) in mapping.into_entries() {
            builder = builder.key(&key).arg(self.binder.bind(value)?);
        }
        Ok(builder.build())
    }

    pub fn incr(&mut self, key: &str) -> Result<i64> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::Incr, Shape::Integer).key(&key).build(), classify::integer)
    }

    pub fn incrby(&mut self, key: &str, delta: i64) -> Result<i64> {
        let key = Key::new(key)?;
        self.call(
            cmd(Cmd::IncrBy, Shape::Integer).key(&key).int(delta).build(),
            classify::integer,
        )
    }

    pub fn decr(&mut self, key: &str) -> Result<i64> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::Decr, Shape::Integer).key(&key).build(), classify::integer)
    }

    pub fn decrby(&mut self, key: &str, delta: i64) -> Result<i64> {
        let key = Key::new(key)?;
        self.call(
            cmd(Cmd::DecrBy, Shape::Integer).key(&key).int(delta).build(),
            classify::integer,
        )
    }

    pub fn exists(&mut self, key: &str) -> Result<bool> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::Exists, Shape::Boolean).key(&key).build(), classify::boolean)
    }

    /// Delete keys; returns the number of keys removed
    pub fn del(&mut self, keys: &[&str]) -> Result<u64> {
        let keys = key::keys("DEL", keys)?;
        self.call(cmd(Cmd::Del, Shape::Integer).keys(&keys).build(), classify::count)
    }

    pub fn key_type(&mut self, key: &str) -> Result<RedisType> {
        let key = Key::new(key)?;
        let name = self.call(cmd(Cmd::Type, Shape::Status).key(&key).build(), classify::status)?;
        RedisType::from_reply(&name).ok_or_else(|| {
            ProviderError::MalformedReply {
                command: "TYPE",
                detail: format!("unknown type {:?}", name),
            }
            .into()
        })
    }

    // =========================================================================
    // Key Space
    // =========================================================================

    pub fn keys(&mut self, pattern: &str) -> Result<Vec<String>> {
        if pattern.is_empty() {
            return Err(DomainError::EmptyArgument("KEYS pattern").into());
        }
        let names = self.call(
            cmd(Cmd::Keys, Shape::MultiBulk).arg(pattern.to_string()).build(),
            classify::members,
        )?;
        names.into_iter().map(|name| classify::text("KEYS", name)).collect()
    }

    /// Every key in the current database
    pub fn all_keys(&mut self) -> Result<Vec<String>> {
        self.keys("*")
    }

    pub fn randomkey(&mut self) -> Result<Option<String>> {
        let name = self.call(cmd(Cmd::RandomKey, Shape::Bulk).build(), classify::bulk)?;
        name.map(|name| classify::text("RANDOMKEY", name)).transpose()
    }

    pub fn rename(&mut self, old_key: &str, new_key: &str) -> Result<()> {
        let (old_key, new_key) = (Key::new(old_key)?, Key::new(new_key)?);
        self.call(
            cmd(Cmd::Rename, Shape::Status).key(&old_key).key(&new_key).build(),
            classify::unit,
        )
    }

    /// Rename only if the new key does not exist
    pub fn renamenx(&mut self, old_key: &str, new_key: &str) -> Result<bool> {
        let (old_key, new_key) = (Key::new(old_key)?, Key::new(new_key)?);
        self.call(
            cmd(Cmd::RenameNx, Shape::Boolean).key(&old_key).key(&new_key).build(),
            classify::boolean,
        )
    }

    pub fn dbsize(&mut self) -> Result<u64> {
        self.call(cmd(Cmd::DbSize, Shape::Integer).build(), classify::count)
    }

    pub fn expire(&mut self, key: &str, ttl_seconds: u64) -> Result<bool> {
        let key = Key::new(key)?;
        self.call(
            cmd(Cmd::Expire, Shape::Boolean).key(&key).arg(ttl_seconds.to_string()).build(),
            classify::boolean,
        )
    }

    /// Expire at a unix time given in **milliseconds**
    ///
    /// The server expects seconds; the time is truncated to whole seconds.
    pub fn expireat(&mut self, key: &str, epoch_millis: u64) -> Result<bool> {
        let key = Key::new(key)?;
        let epoch_seconds = epoch_millis / 1000;
        self.call(
            cmd(Cmd::ExpireAt, Shape::Boolean).key(&key).arg(epoch_seconds.to_string()).build(),
            classify::boolean,
        )
    }

    /// Remaining time to live in seconds; negative when no expiry is set
    pub fn ttl(&mut self, key: &str) -> Result<i64> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::Ttl, Shape::Integer).key(&key).build(), classify::integer)
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Append to the tail; returns the new length
    pub fn rpush(&mut self, key: &str, value: impl Into<Value>) -> Result<u64> {
        self.push(Cmd::RPush, key, value)
    }

    /// Prepend to the head; returns the new length
    pub fn lpush(&mut self, key: &str, value: impl Into<Value>) -> Result<u64> {
        self.push(Cmd::LPush, key, value)
    }

    fn push(&mut self, command: Cmd, key: &str, value: impl Into<Value>) -> Result<u64> {
        let key = Key::new(key)?;
        let value = self.bind(value)?;
        self.call(cmd(command, Shape::Integer).key(&key).arg(value).build(), classify::count)
    }

    pub fn lset(&mut self, key: &str, index: i64, value: impl Into<Value>) -> Result<()> {
        let key = Key::new(key)?;
        let value = self.bind(value)?;
        self.call(
            cmd(Cmd::LSet, Shape::Status).key(&key).int(index).arg(value).build(),
            classify::unit,
        )
    }

    /// Remove occurrences of a value; returns the number removed
    ///
    /// `count > 0` removes from the head, `count < 0` from the tail, `0` all.
    pub fn lrem(&mut self, key: &str, value: impl Into<Value>, count: i64) -> Result<u64> {
        let key = Key::new(key)?;
        let value = self.bind(value)?;
        self.call(
            cmd(Cmd::LRem, Shape::Integer).key(&key).int(count).arg(value).build(),
            classify::count,
        )
    }

    pub fn llen(&mut self, key: &str) -> Result<u64> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::LLen, Shape::Integer).key(&key).build(), classify::count)
    }

    pub fn lrange(&mut self, key: &str, from: i64, to: i64) -> Result<Vec<Bytes>> {
        let key = Key::new(key)?;
        let range = RangeSpec::new(from, to).resolve()?;
        self.call(ranged(cmd(Cmd::LRange, Shape::MultiBulk).key(&key), range).build(), classify::members)
    }

    /// Keep only the elements in `[keep_from, keep_to]`
    pub fn ltrim(&mut self, key: &str, keep_from: i64, keep_to: i64) -> Result<()> {
        let key = Key::new(key)?;
        let range = RangeSpec::new(keep_from, keep_to).resolve()?;
        self.call(ranged(cmd(Cmd::LTrim, Shape::Status).key(&key), range).build(), classify::unit)
    }

    pub fn lindex(&mut self, key: &str, index: i64) -> Result<Option<Bytes>> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::LIndex, Shape::Bulk).key(&key).int(index).build(), classify::bulk)
    }

    pub fn lpop(&mut self, key: &str) -> Result<Option<Bytes>> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::LPop, Shape::Bulk).key(&key).build(), classify::bulk)
    }

    pub fn rpop(&mut self, key: &str) -> Result<Option<Bytes>> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::RPop, Shape::Bulk).key(&key).build(), classify::bulk)
    }

    /// Pop from the tail of `source` and push onto the head of `destination`
    pub fn rpoplpush(&mut self, source: &str, destination: &str) -> Result<Option<Bytes>> {
        let (source, destination) = (Key::new(source)?, Key::new(destination)?);
        self.call(
            cmd(Cmd::RPopLPush, Shape::Bulk).key(&source).key(&destination).build(),
            classify::bulk,
        )
    }

    // =========================================================================
    // Sets
    // =========================================================================

    pub fn sadd(&mut self, key: &str, member: impl Into<Value>) -> Result<bool> {
        self.member_flag(Cmd::SAdd, key, member)
    }

    pub fn srem(&mut self, key: &str, member: impl Into<Value>) -> Result<bool> {
        self.member_flag(Cmd::SRem, key, member)
    }

    pub fn sismember(&mut self, key: &str, member: impl Into<Value>) -> Result<bool> {
        self.member_flag(Cmd::SIsMember, key, member)
    }

    fn member_flag(&mut self, command: Cmd, key: &str, member: impl Into<Value>) -> Result<bool> {
        let key = Key::new(key)?;
        let member = self.bind(member)?;
        self.call(cmd(command, Shape::Boolean).key(&key).arg(member).build(), classify::boolean)
    }

    pub fn smove(&mut self, source: &str, destination: &str, member: impl Into<Value>) -> Result<bool> {
        let (source, destination) = (Key::new(source)?, Key::new(destination)?);
        let member = self.bind(member)?;
        self.call(
            cmd(Cmd::SMove, Shape::Boolean)
                .key(&source)
                .key(&destination)
                .arg(member)
                .build(),
            classify::boolean,
        )
    }

    pub fn scard(&mut self, key: &str) -> Result<u64> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::SCard, Shape::Integer).key(&key).build(), classify::count)
    }

    pub fn sinter(&mut self, keys: &[&str]) -> Result<Vec<Bytes>> {
        self.set_algebra(Cmd::SInter, keys)
    }

    pub fn sunion(&mut self, keys: &[&str]) -> Result<Vec<Bytes>> {
        self.set_algebra(Cmd::SUnion, keys)
    }

    /// Members of the first set not in any of the others
    pub fn sdiff(&mut self, keys: &[&str]) -> Result<Vec<Bytes>> {
        self.set_algebra(Cmd::SDiff, keys)
    }

    fn set_algebra(&mut self, command: Cmd, keys: &[&str]) -> Result<Vec<Bytes>> {
        let keys = key::keys(command.as_str(), keys)?;
        self.call(cmd(command, Shape::MultiBulk).keys(&keys).build(), classify::members)
    }

    /// Store the intersection in `destination`; returns its cardinality
    pub fn sinterstore(&mut self, destination: &str, keys: &[&str]) -> Result<u64> {
        self.set_algebra_store(Cmd::SInterStore, destination, keys)
    }

    pub fn sunionstore(&mut self, destination: &str, keys: &[&str]) -> Result<u64> {
        self.set_algebra_store(Cmd::SUnionStore, destination, keys)
    }

    pub fn sdiffstore(&mut self, destination: &str, keys: &[&str]) -> Result<u64> {
        self.set_algebra_store(Cmd::SDiffStore, destination, keys)
    }

    fn set_algebra_store(&mut self, command: Cmd, destination: &str, keys: &[&str]) -> Result<u64> {
        let destination = Key::new(destination)?;
        let keys = key::keys(command.as_str(), keys)?;
        self.call(
            cmd(command, Shape::Integer).key(&destination).keys(&keys).build(),
            classify::count,
        )
    }

    pub fn smembers(&mut self, key: &str) -> Result<Vec<Bytes>> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::SMembers, Shape::MultiBulk).key(&key).build(), classify::members)
    }

    pub fn srandmember(&mut self, key: &str) -> Result<Option<Bytes>> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::SRandMember, Shape::Bulk).key(&key).build(), classify::bulk)
    }

    pub fn spop(&mut self, key: &str) -> Result<Option<Bytes>> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::SPop, Shape::Bulk).key(&key).build(), classify::bulk)
    }

    // =========================================================================
    // Sorted Sets
    // =========================================================================

    /// Add a member; returns false if it was already present (score updated)
    pub fn zadd(&mut self, key: &str, score: f64, member: impl Into<Value>) -> Result<bool> {
        let key = Key::new(key)?;
        let score = self.bind(Number::Float(score))?;
        let member = self.bind(member)?;
        self.call(
            cmd(Cmd::ZAdd, Shape::Boolean).key(&key).arg(score).arg(member).build(),
            classify::boolean,
        )
    }

    pub fn zrem(&mut self, key: &str, member: impl Into<Value>) -> Result<bool> {
        self.member_flag(Cmd::ZRem, key, member)
    }

    pub fn zcard(&mut self, key: &str) -> Result<u64> {
        let key = Key::new(key)?;
        self.call(cmd(Cmd::ZCard, Shape::Integer).key(&key).build(), classify::count)
    }

    /// Number of members with a score in `[min, max]`
    pub fn zcount(&mut self, key: &str, min: f64, max: f64) -> Result<u64> {
        let key = Key::new(key)?;
        let range = ScoreRange::new(min, max)?;
        self.call(scored_range(cmd(Cmd::ZCount, Shape::Integer).key(&key), range).build(), classify::count)
    }

    pub fn zscore(&mut self, key: &str, member: impl Into<Value>) -> Result<Option<f64>> {
        let key = Key::new(key)?;
        let member = self.bind(member)?;
        let score = self.call(cmd(Cmd::ZScore, Shape::Bulk).key(&key).arg(member).build(), classify::bulk)?;
        score.map(|s| classify::float("ZSCORE", &s)).transpose()
    }

    pub fn zrange(&mut self, key: &str, from: i64, to: i64) -> Result<Vec<Bytes>> {
        self.zrank_range(Cmd::ZRange, key, from, to)
    }

    /// Like `zrange`, highest score first
    pub fn zrevrange(&mut self, key: &str, from: i64, to: i64) -> Result<Vec<Bytes>> {
        self.zrank_range(Cmd::ZRevRange, key, from, to)
    }

    fn zrank_range(&mut self, command: Cmd, key: &str, from: i64, to: i64) -> Result<Vec<Bytes>> {
        let key = Key::new(key)?;
        let range = RangeSpec::new(from, to).resolve()?;
        self.call(ranged(cmd(command, Shape::MultiBulk).key(&key), range).build(), classify::members)
    }

    pub fn zrange_with_scores(&mut self, key: &str, from: i64, to: i64) -> Result<Vec<ScoredEntry>> {
        self.zrank_range_scored(Cmd::ZRange, key, from, to)
    }

    pub fn zrevrange_with_scores(&mut self, key: &str, from: i64, to: i64) -> Result<Vec<ScoredEntry>> {
        self.zrank_range_scored(Cmd::ZRevRange, key, from, to)
    }

    fn zrank_range_scored(&mut self, command: Cmd, key: &str, from: i64, to: i64) -> Result<Vec<ScoredEntry>> {
        let key = Key::new(key)?;
        let range = RangeSpec::new(from, to).resolve()?;
        self.call(
            ranged(cmd(command, Shape::ScoredMultiBulk).key(&key), range)
                .token("WITHSCORES")
                .build(),
            classify::scored,
        )
    }

    pub fn zrangebyscore(&mut self, key: &str, min: f64, max: f64) -> Result<Vec<Bytes>> {
        let key = Key::new(key)?;
        let range = ScoreRange::new(min, max)?;
        self.call(
            scored_range(cmd(Cmd::ZRangeByScore, Shape::MultiBulk).key(&key), range).build(),
            classify::members,
        )
    }

    pub fn zrangebyscore_with_scores(&mut self, key: &str, min: f64, max: f64) -> Result<Vec<ScoredEntry>> {
        let key = Key::new(key)?;
        let range = ScoreRange::new(min, max)?;
        self.call(
            scored_range(cmd(Cmd::ZRangeByScore, Shape::ScoredMultiBulk).key(&key), range)
                .token("WITHSCORES")
                .build(),
            classify::scored,
        )
    }

    /// Remove members with a score in `[min, max]`; returns the number removed
    pub fn zremrangebyscore(&mut self, key: &str, min: f64, max: f64) -> Result<u64> {
        let key = Key::new(key)?;
        let range = ScoreRange::new(min, max)?;
        self.call(
            scored_range(cmd(Cmd::ZRemRangeByScore, Shape::Integer).key(&key), range).build(),
            classify::count,
        )
    }

    /// Add `increment` to a member's score; returns the new score
    pub fn zincrby(&mut self, key: &str, increment: f64, member: impl Into<Value>) -> Result<f64> {
        let key = Key::new(key)?;
        let increment = self.bind(Number::Float(increment))?;
        let member = self.bind(member)?;
        let score = self.call(
            cmd(Cmd::ZIncrBy, Shape::Bulk).key(&key).arg(increment).arg(member).build(),
            classify::bulk,
        )?;
        match score {
            Some(score) => classify::float("ZINCRBY", &score),
            None => Err(ProviderError::MalformedReply {
                command: "ZINCRBY",
                detail: "nil score".to_string(),
            }
            .into()),
        }
    }

    // =========================================================================
    // Databases
    // =========================================================================

    /// Remove every key in the current database
    pub fn flushdb(&mut self) -> Result<()> {
        self.call(cmd(Cmd::FlushDb, Shape::Status).build(), classify::unit)
    }

    /// Remove every key in every database
    pub fn flushall(&mut self) -> Result<()> {
        self.call(cmd(Cmd::FlushAll, Shape::Status).build(), classify::unit)
    }

    /// Move a key to another database; false if it was not moved
    pub fn move_key(&mut self, key: &str, db_index: u32) -> Result<bool> {
        let key = Key::new(key)?;
        self.call(
            cmd(Cmd::Move, Shape::Boolean).key(&key).arg(db_index.to_string()).build(),
            classify::boolean,
        )
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Start a SORT query on a list, set or sorted set
    ///
    /// ```no_run
    /// # use atlasredis::{Client, Config};
    /// # fn main() -> atlasredis::Result<()> {
    /// let mut client = Client::connect(&Config::default())?;
    /// let mut sort = client.sort("my-list")?;
    /// sort.get("object_*")?.desc()?.alpha()?.by("weight_*")?.limit(1, 11)?;
    /// for item in sort.exec()? {
    ///     // ...
    /// #   let _ = item;
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn sort(&mut self, key: &str) -> Result<Sort<'_, C, S>> {
        let spec = SortSpec::new(key)?;
        Ok(Sort::new(self, spec))
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Synchronous snapshot
    pub fn save(&mut self) -> Result<()> {
        self.call(cmd(Cmd::Save, Shape::Status).build(), classify::unit)
    }

    /// Background snapshot
    pub fn bgsave(&mut self) -> Result<()> {
        self.call(cmd(Cmd::BgSave, Shape::Status).build(), classify::unit)
    }

    /// Rewrite the append-only log; returns the server's status text
    pub fn bgrewriteaof(&mut self) -> Result<String> {
        self.call(cmd(Cmd::BgRewriteAof, Shape::Status).build(), classify::status)
    }

    /// Unix time (seconds) of the last successful save
    pub fn lastsave(&mut self) -> Result<i64> {
        self.call(cmd(Cmd::LastSave, Shape::Integer).build(), classify::integer)
    }

    // =========================================================================
    // Server
    // =========================================================================

    pub fn info(&mut self) -> Result<ServerInfo> {
        let fields = self.call(cmd(Cmd::Info, Shape::Mapping).build(), classify::mapping)?;
        Ok(fields.into_iter().collect())
    }

    /// Replicate from `host:port`
    pub fn slaveof(&mut self, host: &str, port: u16) -> Result<()> {
        if host.is_empty() {
            return Err(DomainError::EmptyArgument("SLAVEOF host").into());
        }
        self.call(
            cmd(Cmd::SlaveOf, Shape::Status)
                .arg(host.to_string())
                .arg(port.to_string())
                .build(),
            classify::unit,
        )
    }

    /// Stop replicating and become a master
    pub fn slaveof_none(&mut self) -> Result<()> {
        self.call(
            cmd(Cmd::SlaveOf, Shape::Status).token("NO").token("ONE").build(),
            classify::unit,
        )
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub fn echo(&mut self, message: impl Into<Value>) -> Result<Bytes> {
        let message = self.bind(message)?;
        let echoed = self.call(cmd(Cmd::Echo, Shape::Bulk).arg(message).build(), classify::bulk)?;
        echoed.ok_or_else(|| {
            ProviderError::MalformedReply {
                command: "ECHO",
                detail: "nil reply".to_string(),
            }
            .into()
        })
    }

    pub fn debug_object(&mut self, key: &str) -> Result<ObjectInfo> {
        let key = Key::new(key)?;
        let line = self.call(
            cmd(Cmd::Debug, Shape::Status).token("OBJECT").key(&key).build(),
            classify::status,
        )?;
        Ok(ObjectInfo::parse(line))
    }

    // =========================================================================
    // Objects
    // =========================================================================

    /// Encode an object with this client's codec, ready to pass as a value
    pub fn object<T: Serialize + ?Sized>(&self, object: &T) -> Result<Value> {
        self.binder.object(object)
    }

    /// Read and decode an object stored with this client's codec
    pub fn get_object<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(bytes) => self.binder.decode_object(&bytes).map(Some),
            None => Ok(None),
        }
    }
}

fn cmd(command: Cmd, shape: Shape) -> DescriptorBuilder {
    CommandDescriptor::builder(command, shape)
}

fn ranged(builder: DescriptorBuilder, range: RangeSpec) -> DescriptorBuilder {
    let [from, to] = range.wire_args();
    builder.arg(from).arg(to)
}

fn scored_range(builder: DescriptorBuilder, range: ScoreRange) -> DescriptorBuilder {
    let [min, max] = range.wire_args();
    builder.arg(min).arg(max)
}
