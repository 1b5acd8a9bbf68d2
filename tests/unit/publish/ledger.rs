use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_ledger")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("mkdir");
    dir
}

#[test]
fn missing_file_is_an_empty_ledger() {
    let dir = scratch_dir("missing");
    let ledger = PostedLedger::load(dir.join("posted.json")).expect("load");
    assert!(ledger.is_empty());
    assert!(!dir.join("posted.json").exists());
}

#[test]
fn record_persists_and_reloads() {
    let dir = scratch_dir("roundtrip");
    let path = dir.join("state").join("posted.json");

    let mut ledger = PostedLedger::load(&path).expect("load");
    assert!(ledger.record("4506263").expect("record"));
    assert!(!ledger.record(" 4506263 ").expect("record again"));
    assert!(ledger.record("4506270").expect("record"));
    assert!(!path.with_extension("json.tmp").exists());

    let reloaded = PostedLedger::load(&path).expect("reload");
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.contains("4506263"));
    assert!(reloaded.contains("4506270"));
    assert!(!reloaded.contains("1"));
}

#[test]
fn numeric_ids_from_older_ledgers_are_read() {
    let dir = scratch_dir("numeric");
    let path = dir.join("posted.json");
    std::fs::write(&path, r#"[4506263, "4506270", null]"#).expect("seed");

    let ledger = PostedLedger::load(&path).expect("load");
    assert_eq!(ledger.len(), 2);
    assert!(ledger.contains("4506263"));
}

#[test]
fn damaged_ledger_is_an_error() {
    let dir = scratch_dir("damaged");
    let path = dir.join("posted.json");
    std::fs::write(&path, r#"{"posted":[1]}"#).expect("seed");

    let err = PostedLedger::load(&path).unwrap_err();
    assert!(matches!(err, PitchcardError::Publish(_)), "{err}");
}
