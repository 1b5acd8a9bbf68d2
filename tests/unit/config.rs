use super::*;
use std::collections::HashMap;

fn settings(pairs: &[(&str, &str)]) -> Settings {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|k| env.get(k).cloned())
}

#[test]
fn empty_environment_gives_defaults() {
    assert_eq!(settings(&[]), Settings::default());
    assert_eq!(Settings::default().http_timeout, Duration::from_secs(10));
    assert_eq!(
        Settings::default().source_base_url,
        "https://www.fotmob.com/api"
    );
}

#[test]
fn values_are_read_and_trimmed() {
    let s = settings(&[
        (ENV_SOURCE_BASE_URL, " http://localhost:8080/api/ "),
        (ENV_HTTP_TIMEOUT_SECS, "3"),
        (ENV_WEBHOOK_URL, "https://hooks.example.test/post"),
        (ENV_WEBHOOK_TOKEN, "secret"),
    ]);
    assert_eq!(s.source_base_url, "http://localhost:8080/api");
    assert_eq!(s.http_timeout, Duration::from_secs(3));
    assert_eq!(s.webhook_url.as_deref(), Some("https://hooks.example.test/post"));
    assert_eq!(s.webhook_token.as_deref(), Some("secret"));
}

#[test]
fn invalid_timeout_and_blank_values_fall_back() {
    for bad in ["0", "-1", "soon", ""] {
        let s = settings(&[(ENV_HTTP_TIMEOUT_SECS, bad), (ENV_WEBHOOK_URL, "  ")]);
        assert_eq!(s.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS), "{bad}");
        assert!(s.webhook_url.is_none());
    }
}

#[test]
fn league_and_ledger_settings_are_read() {
    let s = settings(&[(ENV_LEAGUE_ID, " 292 "), (ENV_LEDGER_PATH, "state/posted.json")]);
    assert_eq!(s.league_id, Some(292));
    assert_eq!(s.ledger_path, PathBuf::from("state/posted.json"));

    let s = settings(&[(ENV_LEAGUE_ID, "psl"), (ENV_LEDGER_PATH, " ")]);
    assert_eq!(s.league_id, None);
    assert_eq!(s.ledger_path, PathBuf::from(DEFAULT_LEDGER_PATH));
}

#[test]
fn output_path_follows_match_id() {
    assert_eq!(
        default_output_path(" 4193741 ").unwrap(),
        PathBuf::from("match_4193741.png")
    );
}

#[test]
fn output_path_rejects_ids_that_leave_the_directory() {
    for bad in ["x/../../y", "../match", "a\\b", ""] {
        let err = default_output_path(bad).unwrap_err();
        assert!(matches!(err, crate::PitchcardError::Source(_)), "{bad:?}: {err}");
    }
}
