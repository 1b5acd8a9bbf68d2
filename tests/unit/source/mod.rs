use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_source")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("mkdir");
    dir
}

#[test]
fn dir_source_reads_match_file() {
    let dir = scratch_dir("dir");
    std::fs::write(dir.join("4193741.json"), r#"{"general":{"matchId":4193741}}"#).expect("seed");

    let raw = FileSource::in_dir(&dir).fetch("4193741").expect("fetch");
    assert_eq!(raw["general"]["matchId"], 4193741);
}

#[test]
fn single_file_source_ignores_the_id() {
    let dir = scratch_dir("single");
    let path = dir.join("payload.json");
    std::fs::write(&path, r#"{"ok":true}"#).expect("seed");

    let raw = FileSource::single(&path).fetch("anything").expect("fetch");
    assert_eq!(raw["ok"], true);
}

#[test]
fn missing_or_broken_files_are_source_errors() {
    let dir = scratch_dir("broken");
    std::fs::write(dir.join("1.json"), "{not json").expect("seed");
    let src = FileSource::in_dir(&dir);

    for id in ["1", "2"] {
        let err = src.fetch(id).unwrap_err();
        assert!(matches!(err, PitchcardError::Source(_)), "{err}");
        assert!(err.to_string().starts_with("source error:"));
    }
}

#[test]
fn match_ids_cannot_escape_the_directory() {
    for bad in ["", "  ", "../secret", "a/b", "12 34"] {
        assert!(validate_match_id(bad).is_err(), "{bad:?}");
    }
    assert_eq!(validate_match_id(" 4193741 ").unwrap(), "4193741");
    assert!(FileSource::in_dir("payloads").path_for("../x").is_err());
}

#[cfg(feature = "http")]
#[test]
fn fotmob_url_uses_configured_base() {
    let src = FotmobSource::new("http://localhost:9/api/", std::time::Duration::from_secs(1))
        .expect("client");
    assert_eq!(
        src.match_url("4193741").unwrap(),
        "http://localhost:9/api/matchDetails?matchId=4193741"
    );
    assert!(src.match_url("a b").is_err());
}

#[test]
fn dir_source_lists_finished_league_fixtures() {
    let dir = scratch_dir("league");
    std::fs::write(
        dir.join("league_292.json"),
        r#"{"matches":[
            {"id":11,"status":{"finished":true}},
            {"id":12,"status":{"finished":false}}
        ]}"#,
    )
    .expect("seed");

    let src = FileSource::in_dir(&dir);
    assert_eq!(src.league_matches(292).expect("listing").len(), 2);
    let done = src.completed_matches(292).expect("completed");
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, "11");

    let err = src.league_matches(1).unwrap_err();
    assert!(matches!(err, PitchcardError::Source(_)), "{err}");
}

#[test]
fn single_file_source_has_no_league_listing() {
    let err = FileSource::single("payload.json").league_matches(292).unwrap_err();
    assert!(matches!(err, PitchcardError::Source(_)), "{err}");
}

#[cfg(feature = "http")]
#[test]
fn fotmob_league_url_asks_for_the_matches_tab() {
    let src = FotmobSource::new("http://localhost:9/api", std::time::Duration::from_secs(1))
        .expect("client");
    assert_eq!(src.league_url(292), "http://localhost:9/api/leagues?id=292&tab=matches");
}
