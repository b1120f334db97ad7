use slurpers::{ConfigSlurper, IllegalCharsAction, SlurpOptions, Slurper};
use std::io::Write;

fn testdata(name: &str) -> String {
    format!("{}/tests/testdata/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn test_google_config() {
    let doc = ConfigSlurper::from_path(testdata("google.config"), &SlurpOptions::default())
        .unwrap();
    let sections: Vec<&str> = doc.view().keys().unwrap().collect();
    assert_eq!(sections, ["search_engine", "mail_server"]);

    let search = doc.get("search_engine").unwrap();
    assert_eq!(search.get("host").unwrap(), "www.google.com");
    assert_eq!(search.get("path").unwrap(), "/search?q=");
    assert_eq!(search.get("timeout").unwrap(), "30");

    let mail = doc.get("mail_server").unwrap();
    assert_eq!(mail.get("port").unwrap(), "587");
    assert_eq!(mail.get("use_tls").unwrap(), "yes");
    assert_eq!(mail.get("timeout").unwrap(), "60");
}

#[test]
fn test_values_are_text() {
    let doc = ConfigSlurper::from_str("[s]\nport = 443\nflag = true\n", &SlurpOptions::default())
        .unwrap();
    let s = doc.get("s").unwrap();
    assert_eq!(s.get("port").unwrap().as_i64(), None);
    assert_eq!(s.get("port").unwrap().as_str(), Some("443"));
    assert_eq!(s.get("flag").unwrap().as_bool(), None);
}

#[test]
fn test_strip_capitalize_on_section_names() {
    let options = SlurpOptions::new().with_illegal_chars_action(IllegalCharsAction::StripCapitalize);
    let doc = ConfigSlurper::from_path(testdata("google.config"), &options).unwrap();
    assert_eq!(doc.get("searchEngine").unwrap().get("port").unwrap(), "443");
    assert_eq!(doc.get("mailServer").unwrap().get("useTls").unwrap(), "yes");
}

#[test]
fn test_ignore_names_drops_sections_and_options() {
    let options = SlurpOptions::new().with_illegal_chars_action(IllegalCharsAction::IgnoreNames);
    let doc = ConfigSlurper::from_path(testdata("google.config"), &options).unwrap();
    assert_eq!(doc.len().unwrap(), 0);

    let doc = ConfigSlurper::from_str("[s]\nkeep = 1\ndrop-me = 2\n", &options).unwrap();
    let s = doc.get("s").unwrap();
    assert_eq!(s.len().unwrap(), 1);
    assert!(s.get("drop_me").unwrap_err().is_missing_key());
}

#[test]
fn test_duplicate_section_is_parse_error() {
    let err = ConfigSlurper::from_str("[a]\nx = 1\n[a]\ny = 2\n", &SlurpOptions::default())
        .unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_duplicate_option_is_parse_error() {
    let err = ConfigSlurper::from_str("[a]\nx = 1\nx = 2\n", &SlurpOptions::default())
        .unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_empty_config() {
    let doc = ConfigSlurper::from_str("", &SlurpOptions::default()).unwrap();
    assert!(doc.is_empty().unwrap());
    assert_eq!(doc.to_string(), "{}");
}

#[test]
fn test_from_temporary_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[database]").unwrap();
    writeln!(file, "user = admin").unwrap();
    writeln!(file, "pool.size = 8").unwrap();
    file.flush().unwrap();

    let doc = ConfigSlurper::from_path(file.path(), &SlurpOptions::default()).unwrap();
    let db = doc.get("database").unwrap();
    assert_eq!(db.get("user").unwrap(), "admin");
    assert_eq!(db.get("pool_size").unwrap(), "8");
}

#[test]
fn test_configparser_style_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[DEFAULT]\nBase = /opt/app\n\n[Paths]\nLogs = %(base)s/logs\nmotd = Welcome\n    to the server\n"
    )
    .unwrap();
    file.flush().unwrap();

    let doc = ConfigSlurper::from_path(file.path(), &SlurpOptions::default()).unwrap();
    let paths = doc.get("Paths").unwrap();
    assert_eq!(paths.get("logs").unwrap(), "/opt/app/logs");
    assert_eq!(paths.get("motd").unwrap(), "Welcome\nto the server");
    assert_eq!(paths.get("base").unwrap(), "/opt/app");
}
