// ==========================================
// 配置加载集成测试
// ==========================================
// 测试目标: TOML 配置文件 → DashboardApi 行为
// ==========================================


use status_dashboard::api::{DashboardApi, PanelBody};
use status_dashboard::config::{ConfigError, DashboardConfig, HexColor};
use status_dashboard::domain::BreakdownKind;
use test_helpers::{temp_dir, write_csv};

#[test]
fn test_load_config_file_and_apply_columns() {
    let dir = temp_dir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r##"
[columns]
status = "Status"
module = "Module"
owner = "Owner"
parent_status = "Parent"

[progress]
categories = ["DONE"]
label = "Progress"

[palette.colors]
DONE = "#00FF00"
"##,
    )
    .unwrap();

    let config = DashboardConfig::resolve(Some(config_path.as_path())).unwrap();
    assert_eq!(config.columns.status, "Status");
    assert_eq!(config.palette.color_for("DONE"), HexColor::new(0, 0xFF, 0));

    let data = write_csv(
        dir.path(),
        "data.csv",
        &["Status", "Parent", "Module", "Owner"],
        &[
            vec!["DONE", "OPEN", "core", "kim"],
            vec!["TODO", "OPEN", "core", "kim"],
            vec!["TODO", "CLOSED", "ui", "lee"],
            vec!["DONE", "OPEN", "ui", "kim"],
        ],
    )
    .unwrap();

    let api = DashboardApi::new(config).unwrap();
    let page = api.render_pass(Some(data.as_path()));
    let report = page.report().expect("rendered");

    assert_eq!(report.warnings().count(), 0);
    let status = report.panel(BreakdownKind::Status).unwrap();
    assert_eq!(status.progress_line().as_deref(), Some("Progress: 50.0%"));
    match &status.body {
        PanelBody::StatusDistribution { chart, .. } => {
            let done = chart.series.iter().find(|s| s.name == "DONE").unwrap();
            assert_eq!(done.color, HexColor::new(0, 0xFF, 0));
        }
        other => panic!("unexpected body: {:?}", other),
    }
}

#[test]
fn test_bucket_policy_from_config() {
    let dir = temp_dir().unwrap();
    let config = DashboardConfig::from_toml_str(
        r#"
[aggregation]
missing_values = "bucket"
bucket_label = "N/A"
"#,
    )
    .unwrap();

    let data = write_csv(
        dir.path(),
        "data.csv",
        &["ESTADO GX16", "ESTADO", "MODULO", "Responsable"],
        &[
            vec!["COMPILADO", "ACTIVO", "VENTAS", ""],
            vec!["PENDIENTE", "ACTIVO", "VENTAS", "ana"],
        ],
    )
    .unwrap();

    let page = DashboardApi::new(config).unwrap().render_pass(Some(data.as_path()));
    let report = page.report().unwrap();
    match &report.panel(BreakdownKind::StatusByOwner).unwrap().body {
        PanelBody::Ranking { breakdown, .. } => {
            assert!(breakdown.primary_keys.contains(&"N/A".to_string()));
            assert_eq!(breakdown.excluded_rows, 0);
        }
        other => panic!("unexpected body: {:?}", other),
    }
}

#[test]
fn test_missing_explicit_config_file_is_error() {
    let dir = temp_dir().unwrap();
    let result = DashboardConfig::resolve(Some(dir.path().join("nope.toml").as_path()));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn test_malformed_config_reports_path() {
    let dir = temp_dir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[columns\nstatus = ").unwrap();

    match DashboardConfig::load(&path) {
        Err(ConfigError::ParseError { path: reported, .. }) => {
            assert!(reported.ends_with("bad.toml"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_template_round_trips() {
    let template = DashboardConfig::default().to_toml().unwrap();
    assert!(template.contains("[columns]"));
    assert_eq!(
        DashboardConfig::from_toml_str(&template).unwrap(),
        DashboardConfig::default()
    );
}

#[test]
fn test_invalid_missing_value_policy_rejected() {
    let result = DashboardConfig::from_toml_str(
        r#"
[aggregation]
missing_values = "zero"
"#,
    );
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}
