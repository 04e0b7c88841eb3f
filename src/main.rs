// ==========================================
// 状态分布驾驶舱 - 命令行主入口
// ==========================================
// 流程: 参数 → 日志 → 配置 → 语言 → 渲染 → 写出
// 退出码: 0 成功；1 有文件处理失败或运行错误；2 参数错误
// ==========================================

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use status_dashboard::api::{DashboardApi, DashboardPage};
use status_dashboard::cli::Args;
use status_dashboard::config::DashboardConfig;
use status_dashboard::i18n::{self, t_with_args};
use status_dashboard::{logging, perf};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 命令行语言先生效，配置错误也按该语言提示
    if let Some(locale) = &args.locale {
        i18n::set_locale(locale);
    }

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    logging::init(args.verbose, args.log_format);
    perf::configure_from_env();

    let mut config = DashboardConfig::resolve(args.config.as_deref())
        .map_err(|e| anyhow!(e.localized()))?;
    args.apply_to(&mut config);

    let locale = i18n::set_locale(&config.general.locale);
    config.validate().map_err(|e| anyhow!(e.localized()))?;

    if args.init_config {
        let template = config.to_toml().map_err(|e| anyhow!(e.localized()))?;
        print!("{}", template);
        return Ok(());
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", status_dashboard::APP_NAME, status_dashboard::VERSION);
    tracing::info!(locale, files = args.files.len(), "启动渲染");
    tracing::info!("==================================================");

    let api = DashboardApi::new(config).map_err(|e| anyhow!(e.localized()))?;

    let pages: Vec<(PathBuf, DashboardPage)> = match args.files.as_slice() {
        [] => vec![(args.out.clone(), api.render_pass(None))],
        [file] => vec![(args.out.clone(), api.render_pass(Some(file.as_path())))],
        files => api
            .render_batch(files.to_vec())
            .await
            .into_iter()
            .zip(args.output_dirs())
            .map(|((_, page), out_dir)| (out_dir, page))
            .collect(),
    };

    let mut failed = 0usize;
    for (out_dir, page) in &pages {
        if let Some(message) = page.message() {
            if page.is_failed() {
                failed += 1;
                eprintln!("{}", message);
            } else {
                println!("{}", message);
            }
        }

        let written = api
            .write_outputs(page, out_dir, args.json_only)
            .map_err(|e| anyhow!(e.localized()))?;
        for path in written {
            let shown = path.display().to_string();
            println!("{}", t_with_args("cli.written", &[("path", shown.as_str())]));
        }
    }

    if pages.len() > 1 {
        let total = pages.len().to_string();
        let failed_count = failed.to_string();
        println!(
            "{}",
            t_with_args(
                "cli.batch_summary",
                &[("total", total.as_str()), ("failed", failed_count.as_str())]
            )
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
