use std::io::Write;

use ooni_report_lib::config::{load_from_path, OutputFormat};
use ooni_report_lib::ReportError;
use tempfile::Builder;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn write_config(suffix: &str, content: &str) -> Result<tempfile::NamedTempFile, std::io::Error> {
    let mut file = Builder::new().prefix("ooni-report-").suffix(suffix).tempfile()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn loads_empty_config_with_defaults() -> TestResult {
    let file = write_config(".toml", "")?;

    let cfg = load_from_path(file.path())?;
    assert_eq!(cfg.logging.level, "info");
    assert!(!cfg.logging.show_target);
    assert_eq!(cfg.output.format, OutputFormat::Text);
    assert!(cfg.output.include_bodies);
    assert_eq!(cfg.output.max_body_bytes, 4096);
    assert!(cfg.output.pretty);
    Ok(())
}

#[test]
fn loads_toml_sections() -> TestResult {
    let file = write_config(
        ".toml",
        r#"
[logging]
level = "debug"
show_target = true

[output]
format = "json"
include_bodies = false
max_body_bytes = 512
pretty = false
"#,
    )?;

    let cfg = load_from_path(file.path())?;
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.show_target);
    assert_eq!(cfg.output.format, OutputFormat::Json);
    assert!(!cfg.output.include_bodies);
    assert_eq!(cfg.output.max_body_bytes, 512);
    assert!(!cfg.output.pretty);
    Ok(())
}

#[test]
fn loads_yaml_by_extension() -> TestResult {
    let file = write_config(
        ".yaml",
        r#"
logging:
  level: warn
output:
  format: json
"#,
    )?;

    let cfg = load_from_path(file.path())?;
    assert_eq!(cfg.logging.level, "warn");
    assert_eq!(cfg.output.format, OutputFormat::Json);
    assert_eq!(cfg.output.max_body_bytes, 4096);
    Ok(())
}

#[test]
fn rejects_unknown_log_level() -> TestResult {
    let file = write_config(".toml", "[logging]\nlevel = \"verbose\"\n")?;

    let err = load_from_path(file.path()).err();
    assert!(matches!(err, Some(ReportError::Config(msg)) if msg.contains("verbose")));
    Ok(())
}

#[test]
fn rejects_zero_body_limit() -> TestResult {
    let file = write_config(".toml", "[output]\nmax_body_bytes = 0\n")?;

    let err = load_from_path(file.path()).err();
    assert!(matches!(err, Some(ReportError::Config(_))));
    Ok(())
}

#[test]
fn rejects_unknown_format() -> TestResult {
    let file = write_config(".toml", "[output]\nformat = \"html\"\n")?;

    assert!(load_from_path(file.path()).is_err());
    Ok(())
}

#[test]
fn missing_file_is_config_error() {
    let err = load_from_path("/nonexistent/ooni-report.toml").err();
    assert!(matches!(err, Some(ReportError::Config(_))));
}

#[test]
fn output_format_parses_case_insensitively() {
    assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
    assert!("html".parse::<OutputFormat>().is_err());
}

#[test]
fn format_is_case_insensitive_in_files() -> TestResult {
    let file = write_config(".toml", "[output]\nformat = \"JSON\"\n")?;
    assert_eq!(load_from_path(file.path())?.output.format, OutputFormat::Json);

    let file = write_config(".yml", "output:\n  format: Text\n")?;
    assert_eq!(load_from_path(file.path())?.output.format, OutputFormat::Text);
    Ok(())
}

#[test]
fn command_line_flags_override_file_values() -> TestResult {
    let file = write_config(
        ".toml",
        "[output]\nformat = \"text\"\ninclude_bodies = true\n",
    )?;
    let mut cfg = load_from_path(file.path())?;

    cfg.apply_overrides(Some(OutputFormat::Json), true);
    assert_eq!(cfg.output.format, OutputFormat::Json);
    assert!(!cfg.output.include_bodies);
    Ok(())
}

#[test]
fn absent_flags_keep_file_values() -> TestResult {
    let file = write_config(".toml", "[output]\nformat = \"json\"\ninclude_bodies = true\n")?;
    let mut cfg = load_from_path(file.path())?;

    cfg.apply_overrides(None, false);
    assert_eq!(cfg.output.format, OutputFormat::Json);
    assert!(cfg.output.include_bodies);
    Ok(())
}
