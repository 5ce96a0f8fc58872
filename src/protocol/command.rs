//! Command definitions
//!
//! Command tokens sent as the first element of every request.

use std::fmt;

macro_rules! command_types {
    ($($variant:ident => $token:literal),* $(,)?) => {
        /// Command types
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CommandType {
            $($variant,)*
        }

        impl CommandType {
            /// Wire token for this command
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(CommandType::$variant => $token,)*
                }
            }
        }
    };
}

command_types! {
    // Connection
    Ping => "PING",
    Quit => "QUIT",

    // Strings
    Set => "SET",
    SetNx => "SETNX",
    Get => "GET",
    GetSet => "GETSET",
    MGet => "MGET",
    MSet => "MSET",
    MSetNx => "MSETNX",
    Incr => "INCR",
    IncrBy => "INCRBY",
    Decr => "DECR",
    DecrBy => "DECRBY",
    Exists => "EXISTS",
    Del => "DEL",
    Type => "TYPE",

    // Key space
    Keys => "KEYS",
    RandomKey => "RANDOMKEY",
    Rename => "RENAME",
    RenameNx => "RENAMENX",
    DbSize => "DBSIZE",
    Expire => "EXPIRE",
    ExpireAt => "EXPIREAT",
    Ttl => "TTL",

    // Lists
    RPush => "RPUSH",
    LPush => "LPUSH",
    LSet => "LSET",
    LRem => "LREM",
    LLen => "LLEN",
    LRange => "LRANGE",
    LTrim => "LTRIM",
    LIndex => "LINDEX",
    LPop => "LPOP",
    RPop => "RPOP",
    RPopLPush => "RPOPLPUSH",

    // Sets
    SAdd => "SADD",
    SRem => "SREM",
    SIsMember => "SISMEMBER",
    SMove => "SMOVE",
    SCard => "SCARD",
    SInter => "SINTER",
    SInterStore => "SINTERSTORE",
    SUnion => "SUNION",
    SUnionStore => "SUNIONSTORE",
    SDiff => "SDIFF",
    SDiffStore => "SDIFFSTORE",
    SMembers => "SMEMBERS",
    SRandMember => "SRANDMEMBER",
    SPop => "SPOP",

    // Sorted sets
    ZAdd => "ZADD",
    ZRem => "ZREM",
    ZCard => "ZCARD",
    ZCount => "ZCOUNT",
    ZScore => "ZSCORE",
    ZRange => "ZRANGE",
    ZRevRange => "ZREVRANGE",
    ZRangeByScore => "ZRANGEBYSCORE",
    ZRemRangeByScore => "ZREMRANGEBYSCORE",
    ZIncrBy => "ZINCRBY",

    // Databases
    FlushDb => "FLUSHDB",
    FlushAll => "FLUSHALL",
    Move => "MOVE",

    // Sorting
    Sort => "SORT",

    // Persistence
    Save => "SAVE",
    BgSave => "BGSAVE",
    BgRewriteAof => "BGREWRITEAOF",
    LastSave => "LASTSAVE",

    // Server
    Info => "INFO",
    SlaveOf => "SLAVEOF",

    // Diagnostics
    Echo => "ECHO",
    Debug => "DEBUG",
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
