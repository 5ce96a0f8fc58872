//! Client Tests
//!
//! Tests for the descriptors each operation sends, the replies it accepts
//! and the validation it performs before anything is sent.

#[path = "../common/mod.rs"]
mod common;

use std::collections::HashMap;

use atlasredis::{
    Client, ClientError, ConnectorError, DomainError, ErrorKind, JsonCodec, KeyValueMapping, ObjectCodec,
    ProviderError, RawResult, RedisType, ResponseShape, ScoredEntry,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use common::{args, bulk, multi, ok, ScriptedConnector};

fn client(raw: RawResult) -> Client<ScriptedConnector> {
    Client::new(ScriptedConnector::new().reply(raw))
}

fn sent(client: &Client<ScriptedConnector>) -> (String, Vec<String>, ResponseShape) {
    let last = client.connector().last();
    (last.name().to_string(), args(last), last.shape())
}

fn assert_nothing_sent<S: ObjectCodec>(client: &Client<ScriptedConnector, S>) {
    assert!(client.connector().sent.is_empty());
}

// =============================================================================
// String Tests
// =============================================================================

#[test]
fn test_set_and_get() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(ok())
            .reply(bulk("world")),
    );

    c.set("hello", "world").unwrap();
    assert_eq!(
        sent(&c),
        ("SET".to_string(), vec!["hello".into(), "world".into()], ResponseShape::Status)
    );

    assert_eq!(c.get("hello").unwrap(), Some(Bytes::from("world")));
    assert_eq!(sent(&c).1, vec!["hello"]);
    assert_eq!(sent(&c).2, ResponseShape::Bulk);
}

#[test]
fn test_get_missing_is_none() {
    let mut c = client(RawResult::Bulk(None));
    assert_eq!(c.get("missing").unwrap(), None);
}

#[test]
fn test_set_number_sends_decimal_text() {
    let mut c = client(ok());
    c.set("counter", 10).unwrap();
    assert_eq!(sent(&c).1, vec!["counter", "10"]);
}

#[test]
fn test_setnx_boolean() {
    let mut c = client(RawResult::Boolean(false));
    assert!(!c.setnx("k", "v").unwrap());
    assert_eq!(sent(&c).0, "SETNX");
    assert_eq!(sent(&c).2, ResponseShape::Boolean);
}

#[test]
fn test_getset_returns_old_value() {
    let mut c = client(bulk("old"));
    assert_eq!(c.getset("k", "new").unwrap(), Some(Bytes::from("old")));
    assert_eq!(sent(&c).1, vec!["k", "new"]);
}

#[test]
fn test_mget_keeps_nil_positions() {
    let mut c = client(RawResult::MultiBulk(Some(vec![
        Some(Bytes::from("1")),
        None,
        Some(Bytes::from("3")),
    ])));
    let values = c.mget(&["a", "b", "c"]).unwrap();
    assert_eq!(values, vec![Some(Bytes::from("1")), None, Some(Bytes::from("3"))]);
    assert_eq!(sent(&c).1, vec!["a", "b", "c"]);
}

#[test]
fn test_mset_emits_pairs_in_order() {
    let mut c = client(ok());
    let mapping = KeyValueMapping::from_pairs([("b", "2"), ("a", "1")]).unwrap();
    c.mset(mapping).unwrap();
    assert_eq!(sent(&c).0, "MSET");
    assert_eq!(sent(&c).1, vec!["b", "2", "a", "1"]);
}

#[test]
fn test_msetnx_is_one_command() {
    let mut c = client(RawResult::Boolean(true));
    let mut mapping = KeyValueMapping::new();
    mapping.insert("x", 1).unwrap().insert("y", 2.5).unwrap();

    assert!(c.msetnx(mapping).unwrap());
    assert_eq!(c.connector().sent.len(), 1);
    assert_eq!(
        sent(&c),
        (
            "MSETNX".to_string(),
            vec!["x".into(), "1".into(), "y".into(), "2.5".into()],
            ResponseShape::Boolean
        )
    );
}

#[test]
fn test_empty_mapping_rejected_locally() {
    let mut c = client(ok());
    let err = c.mset(KeyValueMapping::new()).unwrap_err();
    assert!(matches!(err, ClientError::Domain(DomainError::EmptyMapping)));
    assert!(c.msetnx(KeyValueMapping::new()).is_err());
    assert_nothing_sent(&c);
}

#[test]
fn test_incr_family() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(RawResult::Integer(1))
            .reply(RawResult::Integer(11))
            .reply(RawResult::Integer(10))
            .reply(RawResult::Integer(-5)),
    );

    assert_eq!(c.incr("n").unwrap(), 1);
    assert_eq!(c.incrby("n", 10).unwrap(), 11);
    assert_eq!(sent(&c).1, vec!["n", "10"]);
    assert_eq!(c.decr("n").unwrap(), 10);
    assert_eq!(c.decrby("n", 15).unwrap(), -5);
    assert_eq!(sent(&c), ("DECRBY".to_string(), vec!["n".into(), "15".into()], ResponseShape::Integer));
}

#[test]
fn test_incr_on_text_is_remote_domain_error() {
    let mut c = client(RawResult::Error(
        "ERR value is not an integer or out of range".to_string(),
    ));
    let err = c.incr("name").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert!(err.remote_message().unwrap().contains("not an integer"));
}

#[test]
fn test_exists_and_del() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(RawResult::Boolean(true))
            .reply(RawResult::Integer(2)),
    );
    assert!(c.exists("k").unwrap());
    assert_eq!(c.del(&["a", "b", "c"]).unwrap(), 2);
    assert_eq!(sent(&c).1, vec!["a", "b", "c"]);
}

#[test]
fn test_del_negative_count_is_malformed() {
    let mut c = client(RawResult::Integer(-1));
    let err = c.del(&["a"]).unwrap_err();
    assert!(matches!(
        err,
        ClientError::Provider(ProviderError::MalformedReply { command: "DEL", .. })
    ));
}

#[test]
fn test_no_keys_rejected_locally() {
    let mut c = client(ok());
    assert!(matches!(
        c.del(&[]).unwrap_err(),
        ClientError::Domain(DomainError::NoKeys("DEL"))
    ));
    assert!(c.mget(&[]).is_err());
    assert!(c.sinter(&[]).is_err());
    assert!(c.sunionstore("dest", &[]).is_err());
    assert_nothing_sent(&c);
}

#[test]
fn test_empty_key_rejected_locally() {
    let mut c = client(ok());
    for err in [
        c.get("").unwrap_err(),
        c.set("", "v").unwrap_err(),
        c.del(&["a", ""]).unwrap_err(),
        c.rename("a", "").unwrap_err(),
        c.lrange("", 0, -1).unwrap_err(),
        c.zadd("", 1.0, "m").unwrap_err(),
        c.sort("").map(|_| ()).unwrap_err(),
    ] {
        assert!(matches!(err, ClientError::Domain(DomainError::EmptyKey)));
    }
    assert_nothing_sent(&c);
}

#[test]
fn test_key_type() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(RawResult::Status("zset".to_string()))
            .reply(RawResult::Status("none".to_string()))
            .reply(RawResult::Status("stream".to_string())),
    );
    assert_eq!(c.key_type("z").unwrap(), RedisType::ZSet);
    assert_eq!(c.key_type("missing").unwrap(), RedisType::None);
    assert_eq!(c.key_type("s").unwrap_err().kind(), ErrorKind::Provider);
}

// =============================================================================
// Key Space Tests
// =============================================================================

#[test]
fn test_keys_pattern() {
    let mut c = client(multi(&["user:1", "user:2"]));
    assert_eq!(c.keys("user:*").unwrap(), vec!["user:1", "user:2"]);
    assert_eq!(sent(&c).1, vec!["user:*"]);
}

#[test]
fn test_keys_empty_pattern_rejected() {
    let mut c = client(multi(&[]));
    assert_eq!(c.keys("").unwrap_err().kind(), ErrorKind::Domain);
    assert_nothing_sent(&c);

    c.all_keys().unwrap();
    assert_eq!(sent(&c).1, vec!["*"]);
}

#[test]
fn test_keys_nil_reply_is_empty() {
    let mut c = client(RawResult::MultiBulk(None));
    assert!(c.keys("*").unwrap().is_empty());
}

#[test]
fn test_randomkey() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(bulk("k1"))
            .reply(RawResult::Bulk(None)),
    );
    assert_eq!(c.randomkey().unwrap(), Some("k1".to_string()));
    assert_eq!(c.randomkey().unwrap(), None);
}

#[test]
fn test_rename_and_renamenx() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(ok())
            .reply(RawResult::Boolean(false)),
    );
    c.rename("old", "new").unwrap();
    assert_eq!(sent(&c).1, vec!["old", "new"]);
    assert!(!c.renamenx("old", "taken").unwrap());
}

#[test]
fn test_rename_to_same_key_is_remote_error() {
    let mut c = client(RawResult::Error(
        "ERR source and destination objects are the same".to_string(),
    ));
    assert_eq!(c.rename("k", "k").unwrap_err().kind(), ErrorKind::Domain);
}

#[test]
fn test_expiry() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(RawResult::Boolean(true))
            .reply(RawResult::Boolean(true))
            .reply(RawResult::Integer(-1))
            .reply(RawResult::Integer(7)),
    );

    assert!(c.expire("k", 30).unwrap());
    assert_eq!(sent(&c).1, vec!["k", "30"]);

    // milliseconds in, whole seconds on the wire
    assert!(c.expireat("k", 1_700_000_000_999).unwrap());
    assert_eq!(sent(&c), ("EXPIREAT".to_string(), vec!["k".into(), "1700000000".into()], ResponseShape::Boolean));

    assert_eq!(c.ttl("k").unwrap(), -1);
    assert_eq!(c.dbsize().unwrap(), 7);
}

// =============================================================================
// List Tests
// =============================================================================

#[test]
fn test_push_returns_length() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(RawResult::Integer(1))
            .reply(RawResult::Integer(2)),
    );
    assert_eq!(c.rpush("list", "a").unwrap(), 1);
    assert_eq!(c.lpush("list", "b").unwrap(), 2);
    assert_eq!(sent(&c), ("LPUSH".to_string(), vec!["list".into(), "b".into()], ResponseShape::Integer));
}

#[test]
fn test_lrem_wire_order() {
    let mut c = client(RawResult::Integer(2));
    assert_eq!(c.lrem("list", "x", -2).unwrap(), 2);
    assert_eq!(sent(&c).1, vec!["list", "-2", "x"]);
}

#[test]
fn test_lset_and_lindex() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(ok())
            .reply(bulk("z")),
    );
    c.lset("list", -1, "z").unwrap();
    assert_eq!(sent(&c).1, vec!["list", "-1", "z"]);
    assert_eq!(c.lindex("list", -1).unwrap(), Some(Bytes::from("z")));
}

#[test]
fn test_lset_out_of_range_is_domain() {
    let mut c = client(RawResult::Error("ERR index out of range".to_string()));
    assert_eq!(c.lset("list", 99, "v").unwrap_err().kind(), ErrorKind::Domain);
}

#[test]
fn test_lrange_sends_raw_indices() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(multi(&["b", "c"]))
            .reply(ok()),
    );
    let items = c.lrange("list", -3, -2).unwrap();
    assert_eq!(items, vec![Bytes::from("b"), Bytes::from("c")]);
    assert_eq!(sent(&c).1, vec!["list", "-3", "-2"]);

    c.ltrim("list", 0, 99).unwrap();
    assert_eq!(sent(&c), ("LTRIM".to_string(), vec!["list".into(), "0".into(), "99".into()], ResponseShape::Status));
}

#[test]
fn test_lrange_nil_element_is_malformed() {
    let mut c = client(RawResult::MultiBulk(Some(vec![None])));
    assert_eq!(c.lrange("list", 0, -1).unwrap_err().kind(), ErrorKind::Provider);
}

#[test]
fn test_pops() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(bulk("head"))
            .reply(RawResult::Bulk(None))
            .reply(bulk("moved")),
    );
    assert_eq!(c.lpop("list").unwrap(), Some(Bytes::from("head")));
    assert_eq!(c.rpop("empty").unwrap(), None);
    assert_eq!(c.rpoplpush("src", "dst").unwrap(), Some(Bytes::from("moved")));
    assert_eq!(sent(&c).1, vec!["src", "dst"]);
}

// =============================================================================
// Set Tests
// =============================================================================

#[test]
fn test_set_membership() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(RawResult::Boolean(true))
            .reply(RawResult::Boolean(false))
            .reply(RawResult::Boolean(true))
            .reply(RawResult::Boolean(true)),
    );
    assert!(c.sadd("s", "m").unwrap());
    assert!(!c.srem("s", "absent").unwrap());
    assert!(c.sismember("s", "m").unwrap());
    assert!(c.smove("s", "t", "m").unwrap());
    assert_eq!(sent(&c), ("SMOVE".to_string(), vec!["s".into(), "t".into(), "m".into()], ResponseShape::Boolean));
}

#[test]
fn test_set_algebra() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(multi(&["x"]))
            .reply(multi(&["x", "y", "z"]))
            .reply(multi(&[]))
            .reply(RawResult::Integer(1))
            .reply(RawResult::Integer(3))
            .reply(RawResult::Integer(0)),
    );
    assert_eq!(c.sinter(&["a", "b"]).unwrap(), vec![Bytes::from("x")]);
    assert_eq!(c.sunion(&["a", "b"]).unwrap().len(), 3);
    assert!(c.sdiff(&["a", "b"]).unwrap().is_empty());
    assert_eq!(sent(&c).0, "SDIFF");

    assert_eq!(c.sinterstore("d", &["a", "b"]).unwrap(), 1);
    assert_eq!(sent(&c).1, vec!["d", "a", "b"]);
    assert_eq!(c.sunionstore("d", &["a"]).unwrap(), 3);
    assert_eq!(c.sdiffstore("d", &["a", "b"]).unwrap(), 0);
    assert_eq!(sent(&c).0, "SDIFFSTORE");
}

#[test]
fn test_set_reads() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(RawResult::Integer(2))
            .reply(multi(&["a", "b"]))
            .reply(bulk("a"))
            .reply(RawResult::Bulk(None)),
    );
    assert_eq!(c.scard("s").unwrap(), 2);
    assert_eq!(c.smembers("s").unwrap().len(), 2);
    assert_eq!(c.srandmember("s").unwrap(), Some(Bytes::from("a")));
    assert_eq!(c.spop("empty").unwrap(), None);
}

// =============================================================================
// Sorted Set Tests
// =============================================================================

#[test]
fn test_zadd_score_canonical() {
    let mut c = client(RawResult::Boolean(true));
    assert!(c.zadd("z", 2.5, "m").unwrap());
    assert_eq!(sent(&c).1, vec!["z", "2.5", "m"]);
}

#[test]
fn test_zadd_nan_rejected_locally() {
    let mut c = client(RawResult::Boolean(true));
    let err = c.zadd("z", f64::NAN, "m").unwrap_err();
    assert!(matches!(err, ClientError::Domain(DomainError::InvalidNumber(_))));
    assert_nothing_sent(&c);
}

#[test]
fn test_zscore() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(bulk("3.5"))
            .reply(RawResult::Bulk(None))
            .reply(bulk("abc")),
    );
    assert_eq!(c.zscore("z", "m").unwrap(), Some(3.5));
    assert_eq!(c.zscore("z", "absent").unwrap(), None);
    assert_eq!(c.zscore("z", "m").unwrap_err().kind(), ErrorKind::Provider);
}

#[test]
fn test_zrange_variants() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(multi(&["a", "b"]))
            .reply(multi(&["b", "a"]))
            .reply(RawResult::ScoredMultiBulk(vec![ScoredEntry::new("a", 1.0)]))
            .reply(RawResult::ScoredMultiBulk(vec![])),
    );
    assert_eq!(c.zrange("z", 0, -1).unwrap().len(), 2);
    assert_eq!(c.zrevrange("z", 0, -1).unwrap()[0], Bytes::from("b"));
    assert_eq!(sent(&c).0, "ZREVRANGE");

    let scored = c.zrange_with_scores("z", 0, 0).unwrap();
    assert_eq!(scored, vec![ScoredEntry::new("a", 1.0)]);
    assert_eq!(
        sent(&c),
        (
            "ZRANGE".to_string(),
            vec!["z".into(), "0".into(), "0".into(), "WITHSCORES".into()],
            ResponseShape::ScoredMultiBulk
        )
    );

    assert!(c.zrevrange_with_scores("z", 0, -1).unwrap().is_empty());
    assert_eq!(sent(&c).1.last().unwrap(), "WITHSCORES");
}

#[test]
fn test_score_queries() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(RawResult::Integer(4))
            .reply(multi(&["a"]))
            .reply(RawResult::ScoredMultiBulk(vec![ScoredEntry::new("a", 1.5)]))
            .reply(RawResult::Integer(2)),
    );

    assert_eq!(c.zcount("z", 1.0, 2.0).unwrap(), 4);
    assert_eq!(sent(&c).1, vec!["z", "1", "2"]);

    assert_eq!(c.zrangebyscore("z", -1.5, 10.0).unwrap(), vec![Bytes::from("a")]);
    assert_eq!(sent(&c).1, vec!["z", "-1.5", "10"]);

    let scored = c.zrangebyscore_with_scores("z", 1.5, 1.5).unwrap();
    assert_eq!(scored[0].score, 1.5);

    assert_eq!(c.zremrangebyscore("z", 0.0, 100.0).unwrap(), 2);
    assert_eq!(sent(&c).0, "ZREMRANGEBYSCORE");
}

#[test]
fn test_infinite_score_bounds_rejected_locally() {
    let mut c = client(RawResult::Integer(0));
    assert!(matches!(
        c.zcount("z", f64::NEG_INFINITY, 0.0).unwrap_err(),
        ClientError::Domain(DomainError::InvalidScore(_))
    ));
    assert!(c.zrangebyscore("z", 0.0, f64::NAN).is_err());
    assert_nothing_sent(&c);
}

#[test]
fn test_zincrby() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(bulk("4.25"))
            .reply(RawResult::Bulk(None)),
    );
    assert_eq!(c.zincrby("z", 0.25, "m").unwrap(), 4.25);
    assert_eq!(sent(&c).1, vec!["z", "0.25", "m"]);
    assert_eq!(c.zincrby("z", 1.0, "m").unwrap_err().kind(), ErrorKind::Provider);
}

#[test]
fn test_zcard_and_zrem() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(RawResult::Integer(3))
            .reply(RawResult::Boolean(true)),
    );
    assert_eq!(c.zcard("z").unwrap(), 3);
    assert!(c.zrem("z", "m").unwrap());
    assert_eq!(sent(&c).0, "ZREM");
}

// =============================================================================
// Database / Persistence / Server Tests
// =============================================================================

#[test]
fn test_database_commands() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(ok())
            .reply(ok())
            .reply(RawResult::Boolean(false)),
    );
    c.flushdb().unwrap();
    c.flushall().unwrap();
    assert!(!c.move_key("k", 3).unwrap());
    assert_eq!(sent(&c), ("MOVE".to_string(), vec!["k".into(), "3".into()], ResponseShape::Boolean));
}

#[test]
fn test_persistence_commands() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(ok())
            .reply(RawResult::Status("Background saving started".to_string()))
            .reply(RawResult::Status("Background append only file rewriting started".to_string()))
            .reply(RawResult::Integer(1_700_000_000)),
    );
    c.save().unwrap();
    c.bgsave().unwrap();
    assert!(c.bgrewriteaof().unwrap().contains("rewriting"));
    assert_eq!(c.lastsave().unwrap(), 1_700_000_000);
}

#[test]
fn test_info() {
    let mut c = client(RawResult::Mapping(vec![
        ("redis_version".to_string(), "1.2.6".to_string()),
        ("role".to_string(), "master".to_string()),
    ]));
    let info = c.info().unwrap();
    assert_eq!(info.version(), Some("1.2.6"));
    assert_eq!(info.role(), Some("master"));
    assert_eq!(info.len(), 2);
    assert_eq!(sent(&c).2, ResponseShape::Mapping);
}

#[test]
fn test_slaveof() {
    let mut c = Client::new(ScriptedConnector::new().reply(ok()).reply(ok()));
    c.slaveof("10.0.0.1", 6380).unwrap();
    assert_eq!(sent(&c).1, vec!["10.0.0.1", "6380"]);
    c.slaveof_none().unwrap();
    assert_eq!(sent(&c).1, vec!["NO", "ONE"]);
    assert!(c.slaveof("", 6379).is_err());
}

#[test]
fn test_ping_and_quit() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(RawResult::Status("PONG".to_string()))
            .reply(RawResult::None),
    );
    c.ping().unwrap();
    c.quit().unwrap();
    assert_eq!(sent(&c).2, ResponseShape::None);
}

#[test]
fn test_echo_and_debug_object() {
    let mut c = Client::new(
        ScriptedConnector::new()
            .reply(bulk("hi"))
            .reply(RawResult::Status(
                "Value at:0xb6838d20 refcount:1 encoding:raw serializedlength:5".to_string(),
            )),
    );
    assert_eq!(c.echo("hi").unwrap(), Bytes::from("hi"));

    let info = c.debug_object("k").unwrap();
    assert_eq!(sent(&c).1, vec!["OBJECT", "k"]);
    assert_eq!(info.refcount(), Some(1));
    assert_eq!(info.encoding(), Some("raw"));
    assert_eq!(info.serialized_length(), Some(5));
}

// =============================================================================
// Classification Through Operations
// =============================================================================

#[test]
fn test_wrong_shape_is_provider() {
    let mut c = client(RawResult::Integer(1));
    let err = c.get("k").unwrap_err();
    assert!(matches!(
        err,
        ClientError::Provider(ProviderError::ShapeMismatch {
            command: "GET",
            expected: ResponseShape::Bulk,
            actual: ResponseShape::Integer,
        })
    ));
}

#[test]
fn test_connector_failure_is_runtime() {
    let mut c = Client::new(ScriptedConnector::new().fail(ConnectorError::Closed));
    let err = c.ping().unwrap_err();
    assert!(matches!(err, ClientError::Runtime(ConnectorError::Closed)));
}

// =============================================================================
// Object Tests
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    visits: u32,
}

#[test]
fn test_object_round_trip_through_client() {
    let session = Session {
        user: "ada".to_string(),
        visits: 3,
    };

    let mut c = Client::new(ScriptedConnector::new().reply(ok()));
    let value = c.object(&session).unwrap();
    c.set("session", value).unwrap();

    let stored = c.connector().last().args()[1].clone();
    c.connector_mut().push(RawResult::Bulk(Some(stored)));
    c.connector_mut().push(RawResult::Bulk(None));

    assert_eq!(c.get_object::<Session>("session").unwrap(), Some(session));
    assert_eq!(c.get_object::<Session>("missing").unwrap(), None);
}

#[test]
fn test_plain_value_is_not_decoded_as_object() {
    let mut c = client(bulk("just text"));
    let err = c.get_object::<Session>("k").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Provider);
}

#[test]
fn test_unserializable_object_never_reaches_connector() {
    let mut map: HashMap<Vec<u8>, u8> = HashMap::new();
    map.insert(vec![1, 2], 3);

    let c = Client::with_codec(ScriptedConnector::new().reply(ok()), JsonCodec);
    let err = c.object(&map).unwrap_err();
    assert!(matches!(
        err,
        ClientError::Provider(ProviderError::Serialization(_))
    ));
    assert_nothing_sent(&c);
    assert_eq!(c.connector().remaining(), 1);
}

#[test]
fn test_custom_codec() {
    let mut c = Client::with_codec(ScriptedConnector::new().reply(ok()), JsonCodec);
    let value = c.object(&vec!["a", "b"]).unwrap();
    c.set("list", value).unwrap();
    let stored = &c.connector().last().args()[1];
    assert!(stored.ends_with(b"[\"a\",\"b\"]"));
}
