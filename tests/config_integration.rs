use std::path::PathBuf;

use mailform::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens};
use mailform::form::FontSize;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mailformrc");
    let content = r#"
# comment
--dry-run

--theme light

--log-file=mailform.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.dry_run);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.log_file, Some(PathBuf::from("mailform.log")));
}

#[test]
fn test_missing_config_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mailformrc");
    let content = "--dry-run\n--font-size 16\n--smtp-host file.example.com\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "mailform".to_string(),
        "--font-size".to_string(),
        "24".to_string(),
        "--perf".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.dry_run, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(effective.font_size, FontSize::new(24), "cli should override font size");
    assert_eq!(
        effective.smtp_host.as_deref(),
        Some("file.example.com"),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "mailform".to_string(),
        "--theme=dark".to_string(),
        "--smtp-port=2525".to_string(),
        "--render-debug-log=render.log".to_string(),
        "--relay-url=http://relay.example:4000".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.theme, Some(ThemeMode::Dark));
    assert_eq!(flags.smtp_port, Some(2525));
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
    assert_eq!(flags.relay_url.as_deref(), Some("http://relay.example:4000"));
}
