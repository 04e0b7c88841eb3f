// ==========================================
// DashboardApi 集成测试
// ==========================================
// 测试目标: 文件 → 页面 的完整渲染流程
// ==========================================


use status_dashboard::api::{DashboardApi, DashboardPage, PanelBody, HTML_FILE_NAME, JSON_FILE_NAME};
use status_dashboard::config::DashboardConfig;
use status_dashboard::domain::BreakdownKind;
use status_dashboard::{i18n, logging};
use test_helpers::{sample_rows, temp_dir, write_csv, write_garbage, write_xlsx, HEADERS};

fn api() -> DashboardApi {
    DashboardApi::new(DashboardConfig::default()).expect("default config is valid")
}

#[test]
fn test_render_xlsx_full_report() {
    logging::init_test();
    let dir = temp_dir().unwrap();
    let path = write_xlsx(dir.path(), "inventario.xlsx", &HEADERS, &sample_rows()).unwrap();

    let page = api().render_pass(Some(path.as_path()));
    let report = page.report().expect("page should be rendered");

    assert_eq!(report.row_count, 6);
    assert_eq!(report.panels.len(), 4);
    assert_eq!(report.warnings().count(), 0);

    // 状态分布: 计数升序
    let status = report.panel(BreakdownKind::Status).unwrap();
    match &status.body {
        PanelBody::StatusDistribution { breakdown, progress, .. } => {
            let order: Vec<_> = breakdown.categories().collect();
            assert_eq!(order, vec!["EN PROCESO", "COMPILADO", "PENDIENTE"]);
            assert_eq!(breakdown.total, 6);
            assert_eq!(progress.percent, 33.3);
        }
        other => panic!("unexpected body: {:?}", other),
    }
    assert!(status.progress_line().unwrap().ends_with(": 33.3%"));

    // 模块排名: 按合计降序
    let module = report.panel(BreakdownKind::StatusByModule).unwrap();
    match &module.body {
        PanelBody::Ranking { breakdown, chart } => {
            assert_eq!(breakdown.primary_keys, vec!["VENTAS", "STOCK", "COMPRAS"]);
            assert_eq!(breakdown.count("STOCK", "PENDIENTE"), 2);
            assert_eq!(breakdown.count("COMPRAS", "COMPILADO"), 0);
            assert_eq!(chart.categories, breakdown.primary_keys);
        }
        other => panic!("unexpected body: {:?}", other),
    }
}

#[test]
fn test_missing_module_column_only_skips_that_chart() {
    let dir = temp_dir().unwrap();
    let rows: Vec<Vec<&str>> = sample_rows()
        .into_iter()
        .map(|r| vec![r[0], r[1], r[3]])
        .collect();
    let path = write_csv(
        dir.path(),
        "sin_modulo.csv",
        &["ESTADO GX16", "ESTADO", "Responsable"],
        &rows,
    )
    .unwrap();

    let page = api().render_pass(Some(path.as_path()));
    let report = page.report().expect("page should be rendered");

    let warnings: Vec<_> = report.warnings().map(|p| p.kind).collect();
    assert_eq!(warnings, vec![BreakdownKind::StatusByModule]);

    match &report.panel(BreakdownKind::StatusByModule).unwrap().body {
        PanelBody::Warning { missing, message } => {
            assert_eq!(missing, &vec!["MODULO".to_string()]);
            assert!(message.contains("MODULO"));
        }
        other => panic!("unexpected body: {:?}", other),
    }
    assert!(report.panel(BreakdownKind::StatusByOwner).unwrap().chart().is_some());
    assert!(report.panel(BreakdownKind::StatusByParentStatus).unwrap().chart().is_some());
}

#[test]
fn test_corrupt_file_renders_only_error() {
    let dir = temp_dir().unwrap();
    let path = write_garbage(dir.path(), "roto.xlsx").unwrap();

    let page = api().render_pass(Some(path.as_path()));

    assert!(page.is_failed());
    assert!(page.report().is_none());
    assert!(!page.message().unwrap_or_default().is_empty());

    let html = api().render_html(&page);
    assert!(html.contains("class=\"error\""));
    assert!(!html.contains("<svg"));
}

#[test]
fn test_empty_sheet_renders_every_panel_as_warning() {
    let dir = temp_dir().unwrap();
    let path = write_xlsx(dir.path(), "vacio.xlsx", &[], &[]).unwrap();

    let page = api().render_pass(Some(path.as_path()));
    let report = page.report().expect("empty sheet should still render");

    assert_eq!(report.row_count, 0);
    assert!(report.columns.is_empty());
    let warnings: Vec<_> = report.warnings().map(|p| p.kind).collect();
    assert_eq!(warnings, BreakdownKind::ALL.to_vec());

    let html = api().render_html(&page);
    assert!(!html.contains("class=\"error\""));
    assert!(!html.contains("<svg"));
}

#[test]
fn test_failed_page_message_uses_locale() {
    let dir = temp_dir().unwrap();
    let path = dir.path().join("vacio.csv");
    std::fs::write(&path, "").unwrap();

    i18n::set_locale("es");
    let page = api().render_pass(Some(path.as_path()));
    i18n::set_locale("zh-CN");

    assert!(page.is_failed());
    assert_eq!(
        page.message(),
        Some("Ocurrió un error al procesar el archivo Excel: El archivo no tiene fila de encabezados")
    );
}

#[test]
fn test_unsupported_extension_fails() {
    let dir = temp_dir().unwrap();
    let path = dir.path().join("notas.txt");
    std::fs::write(&path, "ESTADO GX16\nCOMPILADO\n").unwrap();

    let page = api().render_pass(Some(path.as_path()));
    assert!(page.is_failed());
    assert!(page.message().unwrap_or_default().contains("txt"));
}

#[test]
fn test_write_outputs_html_json_and_svg() {
    let dir = temp_dir().unwrap();
    let path = write_csv(dir.path(), "datos.csv", &HEADERS, &sample_rows()).unwrap();
    let out = dir.path().join("out");

    let api = api();
    let page = api.render_pass(Some(path.as_path()));
    let written = api.write_outputs(&page, &out, false).unwrap();

    assert!(out.join(HTML_FILE_NAME).exists());
    assert!(out.join(JSON_FILE_NAME).exists());
    for kind in BreakdownKind::ALL {
        assert!(out.join(format!("{}.svg", kind.slug())).exists(), "{} svg", kind);
    }
    assert_eq!(written.len(), 6);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join(JSON_FILE_NAME)).unwrap()).unwrap();
    assert_eq!(json["state"], "rendered");
    assert_eq!(json["panels"].as_array().map(|p| p.len()), Some(4));

    let html = std::fs::read_to_string(out.join(HTML_FILE_NAME)).unwrap();
    assert!(html.contains("<svg"));
    assert!(html.contains("33.3%"));
}

#[test]
fn test_write_outputs_json_only_and_no_svg() {
    let dir = temp_dir().unwrap();
    let path = write_csv(dir.path(), "datos.csv", &HEADERS, &sample_rows()).unwrap();

    let mut config = DashboardConfig::default();
    config.render.write_svg = false;
    let api = DashboardApi::new(config).unwrap();
    let page = api.render_pass(Some(path.as_path()));

    let json_dir = dir.path().join("json");
    let written = api.write_outputs(&page, &json_dir, true).unwrap();
    assert_eq!(written, vec![json_dir.join(JSON_FILE_NAME)]);

    let html_dir = dir.path().join("html");
    let written = api.write_outputs(&page, &html_dir, false).unwrap();
    assert_eq!(written.len(), 2);
    assert!(!html_dir.join("status.svg").exists());
}

#[test]
fn test_awaiting_upload_page() {
    let dir = temp_dir().unwrap();
    let api = api();
    let page = api.render_pass(None);

    assert!(matches!(page, DashboardPage::AwaitingUpload { .. }));
    let written = api.write_outputs(&page, dir.path(), false).unwrap();
    assert_eq!(written.len(), 2);
    let html = std::fs::read_to_string(dir.path().join(HTML_FILE_NAME)).unwrap();
    assert!(html.contains("class=\"info\""));
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let dir = temp_dir().unwrap();
    let good = write_xlsx(dir.path(), "bueno.xlsx", &HEADERS, &sample_rows()).unwrap();
    let bad = write_garbage(dir.path(), "malo.xlsx").unwrap();
    let missing = dir.path().join("no_existe.csv");
    let also_good = write_csv(dir.path(), "bueno.csv", &HEADERS, &sample_rows()).unwrap();

    let results = api()
        .render_batch(vec![good.clone(), bad.clone(), missing.clone(), also_good.clone()])
        .await;

    let paths: Vec<_> = results.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(paths, vec![good, bad, missing, also_good]);

    let rendered: Vec<bool> = results.iter().map(|(_, page)| page.is_rendered()).collect();
    assert_eq!(rendered, vec![true, false, false, true]);

    // 两个成功的页面统计结果一致
    let a = results[0].1.report().unwrap();
    let b = results[3].1.report().unwrap();
    assert_eq!(a.panels[0].body, b.panels[0].body);
}
