//! # Asset Ledger Service Tests

use super::*;
use crate::adapters::{InMemoryKVStore, NoAttributeContext, StaticContext};
use crate::domain::authorization::{PermissionTable, Role};
use crate::domain::entities::{Asset, BalanceReport};
use crate::domain::errors::{LedgerError, RecordKind};
use crate::domain::operations::{EntryPoint, Operation};
use crate::ports::inbound::AssetLedgerApi;
use crate::ports::outbound::KeyValueStore;

fn make_test_ledger() -> AssetLedger<InMemoryKVStore> {
    AssetLedger::new(InMemoryKVStore::new(), LedgerConfig::default())
}

fn make_initialized_ledger() -> AssetLedger<InMemoryKVStore> {
    let mut ledger = make_test_ledger();
    ledger
        .init(&args(&["alice", "certA", "bob", "certB"]))
        .unwrap();
    ledger
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn regulator() -> StaticContext {
    StaticContext::for_caller("reg", "regulator")
}

fn create(
    ledger: &mut AssetLedger<InMemoryKVStore>,
    ctx: &StaticContext,
    id: &str,
) -> Result<Vec<u8>, LedgerError> {
    ledger.invoke(ctx, "createAsset", &args(&[id, "Gold", "1", "alice"]))
}

#[test]
fn test_bootstrap_create_and_query() {
    let mut ledger = make_initialized_ledger();
    let ctx = regulator();

    let out = ledger
        .invoke(&ctx, "createAsset", &args(&["C1", "Gold", "1", "alice"]))
        .unwrap();
    assert!(out.is_empty());

    let info = ledger.query(&ctx, "getAssetInfo", &args(&["C1"])).unwrap();
    let asset: Asset = serde_json::from_slice(&info).unwrap();
    assert_eq!(asset, Asset::new("C1", "Gold", 1, "alice"));

    let balance = ledger
        .query(&ctx, "getBalance", &args(&["C1", "alice"]))
        .unwrap();
    let report: BalanceReport = serde_json::from_slice(&balance).unwrap();
    assert_eq!(report.identity, "alice");
    assert_eq!(report.balance, 0.0);

    assert_eq!(ledger.load_catalog().unwrap().ids(), ["C1".to_string()]);
}

#[test]
fn test_duplicate_create_keeps_first_record() {
    let mut ledger = make_initialized_ledger();
    let ctx = regulator();

    create(&mut ledger, &ctx, "C1").unwrap();
    let before = ledger.get_asset("C1").unwrap();

    let err = ledger
        .invoke(&ctx, "createAsset", &args(&["C1", "Silver", "2", "bob"]))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::AlreadyExists {
            record: RecordKind::Asset,
            ..
        }
    ));

    assert_eq!(ledger.get_asset("C1").unwrap(), before);
    assert_eq!(ledger.load_catalog().unwrap().len(), 1);
}

#[test]
fn test_non_regulator_cannot_create() {
    let mut ledger = make_initialized_ledger();
    let keys_before: Vec<Vec<u8>> = ledger.store().keys().map(<[u8]>::to_vec).collect();

    for role in ["subscriber", "private", "user", "auditor"] {
        let ctx = StaticContext::for_caller("carol", role);
        let err = create(&mut ledger, &ctx, "C1").unwrap_err();
        assert!(
            matches!(
                err,
                LedgerError::PermissionDenied {
                    operation: "createAsset",
                    ..
                }
            ),
            "role {role} was not denied"
        );
    }

    let keys_after: Vec<Vec<u8>> = ledger.store().keys().map(<[u8]>::to_vec).collect();
    assert_eq!(keys_before, keys_after);
    assert!(ledger.load_catalog().unwrap().is_empty());
}

#[test]
fn test_absent_holder_has_zero_balance() {
    let mut ledger = make_initialized_ledger();
    let ctx = regulator();
    create(&mut ledger, &ctx, "C1").unwrap();

    let user = StaticContext::for_caller("dave", "user");
    let out = ledger
        .query(&user, "getBalance", &args(&["C1", "nobody"]))
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["identity"], "nobody");
    assert_eq!(json["balance"], 0.0);
}

#[test]
fn test_stored_balance_is_reported() {
    let mut ledger = make_initialized_ledger();
    let ctx = regulator();
    create(&mut ledger, &ctx, "C1").unwrap();

    let mut asset = ledger.get_asset("C1").unwrap();
    asset.balances.insert("bob".to_string(), 12.5);
    ledger.save_asset(&asset).unwrap();

    let out = ledger
        .query(&ctx, "getBalance", &args(&["C1", "bob"]))
        .unwrap();
    let report: BalanceReport = serde_json::from_slice(&out).unwrap();
    assert_eq!(report.balance, 12.5);
}

#[test]
fn test_catalog_keeps_creation_order() {
    let mut ledger = make_initialized_ledger();
    let ctx = regulator();

    let ids = ["Z9", "A1", "M5", "B2"];
    for id in ids {
        create(&mut ledger, &ctx, id).unwrap();
    }

    let catalog = ledger.load_catalog().unwrap();
    assert_eq!(catalog.ids(), args(&ids).as_slice());
}

#[test]
fn test_ping_on_both_entries_for_every_role() {
    let mut ledger = make_test_ledger();

    for role in ["regulator", "subscriber", "private", "user", "auditor"] {
        let ctx = StaticContext::for_caller("anyone", role);
        assert_eq!(ledger.query(&ctx, "ping", &[]).unwrap(), b"Hello, world!");
        assert_eq!(ledger.invoke(&ctx, "ping", &[]).unwrap(), b"Hello, world!");
    }

    // Ping never touches the store, even before init.
    assert!(ledger.store().is_empty());
}

#[test]
fn test_ping_requires_identity() {
    let ledger = make_test_ledger();
    assert!(matches!(
        ledger.query(&NoAttributeContext, "ping", &[]),
        Err(LedgerError::IdentityUnavailable { .. })
    ));
}

#[test]
fn test_unknown_operation_vs_bad_arguments() {
    let mut ledger = make_initialized_ledger();
    let ctx = regulator();

    assert!(matches!(
        ledger.query(&ctx, "transfer", &[]),
        Err(LedgerError::UnknownOperation {
            entry: EntryPoint::ReadOnly,
            ..
        })
    ));
    assert!(matches!(
        ledger.query(&ctx, "createAsset", &args(&["C1", "Gold", "1", "alice"])),
        Err(LedgerError::UnknownOperation { .. })
    ));
    assert!(matches!(
        ledger.invoke(&ctx, "getAssetInfo", &args(&["C1"])),
        Err(LedgerError::UnknownOperation {
            entry: EntryPoint::Mutating,
            ..
        })
    ));
    assert!(matches!(
        ledger.invoke(&ctx, "createAsset", &args(&["C1", "Gold", "1"])),
        Err(LedgerError::InvalidArguments {
            operation: "createAsset",
            ..
        })
    ));
    assert!(matches!(
        ledger.query(&ctx, "getBalance", &args(&["C1"])),
        Err(LedgerError::InvalidArguments { .. })
    ));
}

#[test]
fn test_arity_checked_before_authorization() {
    let mut ledger = make_initialized_ledger();
    let user = StaticContext::for_caller("dave", "user");

    assert!(matches!(
        ledger.invoke(&user, "createAsset", &args(&["C1"])),
        Err(LedgerError::InvalidArguments { .. })
    ));
}

#[test]
fn test_kind_must_be_integer() {
    let mut ledger = make_initialized_ledger();
    let ctx = regulator();

    for kind in ["one", "1.5", ""] {
        let err = ledger
            .invoke(&ctx, "createAsset", &args(&["C1", "Gold", kind, "alice"]))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArguments { .. }));
    }
    assert!(matches!(
        ledger.get_asset("C1"),
        Err(LedgerError::NotFound { .. })
    ));

    create(&mut ledger, &ctx, "C2").unwrap();
    ledger
        .invoke(&ctx, "createAsset", &args(&["C3", "Gold", "-7", "alice"]))
        .unwrap();
    assert_eq!(ledger.get_asset("C3").unwrap().kind, -7);
}

#[test]
fn test_reserved_and_empty_asset_ids_rejected() {
    let mut ledger = make_initialized_ledger();
    let ctx = regulator();

    assert!(matches!(
        create(&mut ledger, &ctx, ""),
        Err(LedgerError::InvalidArguments { .. })
    ));
    assert!(matches!(
        create(&mut ledger, &ctx, "currHolder"),
        Err(LedgerError::InvalidArguments { .. })
    ));
    assert!(ledger.load_catalog().unwrap().is_empty());
}

#[test]
fn test_corrupt_asset_record_is_reported() {
    let mut ledger = make_initialized_ledger();
    ledger.store_mut().put(b"C1", b"{not json").unwrap();

    let ctx = regulator();
    let err = ledger
        .query(&ctx, "getAssetInfo", &args(&["C1"]))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Corrupt {
            record: RecordKind::Asset,
            ..
        }
    ));
    assert!(matches!(
        ledger.query(&ctx, "getBalance", &args(&["C1", "alice"])),
        Err(LedgerError::Corrupt { .. })
    ));
}

#[test]
fn test_missing_asset_not_found() {
    let ledger = make_initialized_ledger();
    let ctx = regulator();
    assert!(matches!(
        ledger.query(&ctx, "getAssetInfo", &args(&["nope"])),
        Err(LedgerError::NotFound {
            record: RecordKind::Asset,
            ..
        })
    ));
}

#[test]
fn test_catalog_write_failure_leaves_asset_uncataloged() {
    let mut ledger = make_initialized_ledger();
    ledger.store_mut().reject_writes_to("currHolder");

    let ctx = regulator();
    let err = create(&mut ledger, &ctx, "C1").unwrap_err();
    assert!(matches!(
        err,
        LedgerError::PersistenceError {
            record: RecordKind::Catalog,
            ..
        }
    ));

    // The asset record was written first and is readable.
    assert!(ledger.get_asset("C1").is_ok());
    assert!(!ledger.load_catalog().unwrap().contains("C1"));
}

#[test]
fn test_create_before_init_saves_asset_then_fails_on_catalog() {
    let mut ledger = make_test_ledger();
    let err = create(&mut ledger, &regulator(), "C1").unwrap_err();

    assert!(matches!(
        err,
        LedgerError::NotFound {
            record: RecordKind::Catalog,
            ..
        }
    ));
    assert!(ledger.get_asset("C1").is_ok());
}

#[test]
fn test_reinit_fails_and_keeps_catalog() {
    let mut ledger = make_initialized_ledger();
    create(&mut ledger, &regulator(), "C1").unwrap();

    let err = ledger.init(&args(&["carol", "certC"])).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::AlreadyExists {
            record: RecordKind::Catalog,
            ..
        }
    ));
    assert_eq!(ledger.load_catalog().unwrap().len(), 1);
    assert!(matches!(
        ledger.get_credential("carol"),
        Err(LedgerError::NotFound { .. })
    ));
}

#[test]
fn test_init_argument_validation() {
    let mut ledger = make_test_ledger();

    assert!(matches!(
        ledger.init(&args(&["alice", "certA", "bob"])),
        Err(LedgerError::InvalidArguments { operation: "init", .. })
    ));
    assert!(matches!(
        ledger.init(&args(&["", "certA"])),
        Err(LedgerError::InvalidArguments { .. })
    ));
    assert!(matches!(
        ledger.init(&args(&["currHolder", "cert"])),
        Err(LedgerError::InvalidArguments { .. })
    ));

    // Rejected bootstraps wrote nothing.
    assert!(ledger.store().is_empty());

    ledger.init(&[]).unwrap();
    assert!(ledger.load_catalog().unwrap().is_empty());
}

#[test]
fn test_credentials_are_raw_bytes() {
    let ledger = make_initialized_ledger();
    let ctx = StaticContext::for_caller("dave", "user");

    let cert = ledger
        .query(&ctx, "getCredential", &args(&["bob"]))
        .unwrap();
    assert_eq!(cert, b"certB");

    assert!(matches!(
        ledger.query(&ctx, "getCredential", &args(&["zed"])),
        Err(LedgerError::NotFound {
            record: RecordKind::Credential,
            ..
        })
    ));
}

#[test]
fn test_custom_permission_table() {
    let permissions = PermissionTable::default()
        .grant(Operation::CreateAsset, Role::Subscriber)
        .restrict(Operation::GetCredential, [Role::Regulator]);
    let config = LedgerConfig::default().with_permissions(permissions);
    let mut ledger = AssetLedger::new(InMemoryKVStore::new(), config);
    ledger.init(&args(&["alice", "certA"])).unwrap();

    let subscriber = StaticContext::for_caller("sam", "subscriber");
    create(&mut ledger, &subscriber, "C1").unwrap();

    assert!(matches!(
        ledger.query(&subscriber, "getCredential", &args(&["alice"])),
        Err(LedgerError::PermissionDenied { .. })
    ));
    assert_eq!(
        ledger
            .query(&regulator(), "getCredential", &args(&["alice"]))
            .unwrap(),
        b"certA"
    );
}

#[test]
fn test_custom_catalog_key_and_payload() {
    let config = LedgerConfig::default()
        .with_catalog_key("index")
        .with_liveness_payload("pong");
    let mut ledger = AssetLedger::new(InMemoryKVStore::new(), config);
    ledger.init(&[]).unwrap();

    let ctx = regulator();
    assert_eq!(ledger.query(&ctx, "ping", &[]).unwrap(), b"pong");

    // The default catalog key is an ordinary asset id here.
    create(&mut ledger, &ctx, "currHolder").unwrap();
    assert!(matches!(
        create(&mut ledger, &ctx, "index"),
        Err(LedgerError::InvalidArguments { .. })
    ));
    assert_eq!(
        ledger.load_catalog().unwrap().ids(),
        ["currHolder".to_string()]
    );
}

#[test]
fn test_replay_is_deterministic() {
    let run = || {
        let mut ledger = make_initialized_ledger();
        let ctx = regulator();
        for id in ["C1", "C2", "C1", "C3"] {
            let _ = create(&mut ledger, &ctx, id);
        }
        ledger.into_store()
    };

    let first = run();
    let second = run();
    assert_eq!(
        first.keys().collect::<Vec<_>>(),
        second.keys().collect::<Vec<_>>()
    );
    for key in first.keys() {
        assert_eq!(first.get(key).unwrap(), second.get(key).unwrap());
    }
}

#[test]
fn test_asset_write_failure_leaves_no_catalog_entry() {
    let mut ledger = make_initialized_ledger();
    ledger.store_mut().reject_writes_to("C1");

    let err = create(&mut ledger, &regulator(), "C1").unwrap_err();
    assert!(matches!(
        err,
        LedgerError::PersistenceError {
            record: RecordKind::Asset,
            ..
        }
    ));

    assert!(matches!(
        ledger.get_asset("C1"),
        Err(LedgerError::NotFound {
            record: RecordKind::Asset,
            ..
        })
    ));
    assert!(ledger.load_catalog().unwrap().is_empty());
}

#[test]
fn test_undecodable_catalog_blocks_append() {
    let mut ledger = make_initialized_ledger();
    ledger.store_mut().put(b"currHolder", b"{garbage").unwrap();

    let err = create(&mut ledger, &regulator(), "C1").unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Corrupt {
            record: RecordKind::Catalog,
            ..
        }
    ));

    // The asset was saved before the catalog was read.
    assert!(ledger.get_asset("C1").is_ok());
    assert_eq!(
        ledger.store().get(b"currHolder").unwrap(),
        Some(b"{garbage".to_vec())
    );
}

#[test]
fn test_null_collections_from_earlier_deployments() {
    let mut ledger = make_test_ledger();
    ledger.store_mut().put(b"currHolder", br#"{"ids":null}"#).unwrap();
    ledger
        .store_mut()
        .put(
            b"OLD",
            br#"{"currid":"OLD","name":"Gold","ctype":1,"owner":"alice","balances":null}"#,
        )
        .unwrap();

    let ctx = regulator();
    create(&mut ledger, &ctx, "C1").unwrap();
    assert_eq!(ledger.load_catalog().unwrap().ids(), ["C1".to_string()]);

    let info = ledger.query(&ctx, "getAssetInfo", &args(&["OLD"])).unwrap();
    let asset: Asset = serde_json::from_slice(&info).unwrap();
    assert!(asset.balances.is_empty());

    let out = ledger
        .query(&ctx, "getBalance", &args(&["OLD", "alice"]))
        .unwrap();
    let report: BalanceReport = serde_json::from_slice(&out).unwrap();
    assert_eq!(report.balance, 0.0);
}
