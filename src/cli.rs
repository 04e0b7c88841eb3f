//! 命令行参数解析
//!
//! 使用 clap derive；环境变量与配置文件的优先级见 `Args::apply_to`。

use clap::Parser;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::dashboard_config::DashboardConfig;
use crate::i18n::t;
use crate::logging::LogFormat;

/// 状态分布驾驶舱 - 从电子表格生成状态统计图表
///
/// 读取 Excel (.xlsx / .xls) 或 CSV 文件，按状态、模块、负责人、上级状态
/// 统计分布，输出 HTML 页面、JSON 报告和 SVG 图表。
///
/// Examples:
///   status-dashboard inventario.xlsx
///   status-dashboard a.xlsx b.xlsx --out reportes/
///   status-dashboard inventario.csv --locale es --json-only
///   status-dashboard --init-config > config.toml
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 输入文件；不提供时输出"等待上传"页面
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// 输出目录（多个文件时每个文件一个子目录）
    #[arg(short, long, default_value = "dashboard_out", value_name = "DIR")]
    pub out: PathBuf,

    /// 配置文件路径
    ///
    /// 未指定时依次查找 STATUS_DASHBOARD_CONFIG 和用户配置目录
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 界面语言（zh-CN / en / es）
    #[arg(long, env = "STATUS_DASHBOARD_LOCALE", value_name = "LOCALE")]
    pub locale: Option<String>,

    /// 数据预览行数（0 表示不显示预览）
    #[arg(long, value_name = "N")]
    pub preview_rows: Option<usize>,

    /// 不输出独立 SVG 文件
    #[arg(long)]
    pub no_svg: bool,

    /// 只输出 dashboard.json
    #[arg(long)]
    pub json_only: bool,

    /// 日志格式
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub log_format: LogFormat,

    /// 打印当前生效配置（TOML）后退出
    #[arg(long)]
    pub init_config: bool,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 参数校验
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config && !self.files.is_empty() {
            return Err(t("cli.error.init_config_with_files"));
        }

        if self.out.as_os_str().is_empty() {
            return Err(t("cli.error.empty_out"));
        }

        if let Some(locale) = &self.locale {
            if locale.trim().is_empty() {
                return Err(t("cli.error.empty_locale"));
            }
        }

        Ok(())
    }

    /// 命令行参数覆盖配置文件
    pub fn apply_to(&self, config: &mut DashboardConfig) {
        if let Some(locale) = &self.locale {
            config.general.locale = locale.trim().to_string();
        }
        if let Some(rows) = self.preview_rows {
            config.general.preview_rows = rows;
        }
        if self.no_svg {
            config.render.write_svg = false;
        }
    }

    /// 每个输入文件的输出目录（与 files 一一对应）
    ///
    /// 单文件直接写入 --out；多文件按文件名分子目录，
    /// 文件名重复时追加扩展名，仍重复时追加序号
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        if self.files.len() <= 1 {
            return self.files.iter().map(|_| self.out.clone()).collect();
        }

        let stems: Vec<String> = self.files.iter().map(|f| dir_name(f, false)).collect();
        let mut used = HashSet::new();

        self.files
            .iter()
            .zip(&stems)
            .map(|(file, stem)| {
                let base = if stems.iter().filter(|s| *s == stem).count() > 1 {
                    dir_name(file, true)
                } else {
                    stem.clone()
                };

                let mut name = base.clone();
                let mut n = 2;
                while !used.insert(name.clone()) {
                    name = format!("{}_{}", base, n);
                    n += 1;
                }
                self.out.join(name)
            })
            .collect()
    }
}

fn dir_name(file: &Path, with_extension: bool) -> String {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dashboard".to_string());
    match file.extension() {
        Some(ext) if with_extension => format!("{}_{}", stem, ext.to_string_lossy()),
        _ => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("status-dashboard").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert!(args.files.is_empty());
        assert_eq!(args.out, PathBuf::from("dashboard_out"));
        assert_eq!(args.log_format, LogFormat::Text);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = parse(&["a.xlsx", "--preview-rows", "5", "--no-svg", "--locale", "es"]);
        let mut config = DashboardConfig::default();
        args.apply_to(&mut config);

        assert_eq!(config.general.preview_rows, 5);
        assert_eq!(config.general.locale, "es");
        assert!(!config.render.write_svg);
    }

    #[test]
    fn test_output_dir_per_file_in_batch() {
        let single = parse(&["datos/a.xlsx", "--out", "out"]);
        assert_eq!(single.output_dirs(), vec![PathBuf::from("out")]);

        let batch = parse(&["datos/a.xlsx", "datos/b.csv", "--out", "out"]);
        assert_eq!(
            batch.output_dirs(),
            vec![PathBuf::from("out").join("a"), PathBuf::from("out").join("b")]
        );
    }

    #[test]
    fn test_output_dirs_unique_for_same_stem() {
        let args = parse(&[
            "a/datos.xlsx",
            "b/datos.xlsx",
            "datos.csv",
            "otro.xlsx",
            "--out",
            "out",
        ]);
        let out = PathBuf::from("out");
        assert_eq!(
            args.output_dirs(),
            vec![
                out.join("datos_xlsx"),
                out.join("datos_xlsx_2"),
                out.join("datos_csv"),
                out.join("otro"),
            ]
        );
    }

    #[test]
    fn test_init_config_conflicts_with_files() {
        let args = parse(&["a.xlsx", "--init-config"]);
        assert!(args.validate().is_err());
    }
}
