//! 命令行参数定义

use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::viewer::display_utils::parse_page_list;
use crate::core::viewer::session::MAX_PREFETCH;

/// 文档页面拖动定位条 - 在终端中拖动或点击轨道预览并跳转页面
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// 文档总页数
    #[arg(short = 'p', long = "pages", default_value = "40")]
    pub total_pages: usize,

    /// 初始页码 (默认: 1)
    #[arg(long = "current", default_value = "1")]
    pub current_page: usize,

    /// 已缓存页，如 "2,5,9-12"
    #[arg(
        long = "cached",
        value_name = "PAGES",
        value_parser = parse_cached_pages,
        default_value = ""
    )]
    pub cached_pages: BTreeSet<usize>,

    /// 跳转后预取的前后页数 (0-64)
    #[arg(
        long = "prefetch",
        default_value = "1",
        value_parser = parse_prefetch
    )]
    pub prefetch: usize,

    /// 紧凑模式（覆盖配置文件）
    #[arg(long = "compact")]
    pub compact: bool,

    /// 配置文件路径 (默认: 用户配置目录下的 page-scrubber/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 日志文件路径
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// 禁用颜色输出
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// 详细模式 - 显示缓存页列表
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_cached_pages(
    input: &str,
) -> Result<BTreeSet<usize>, String> {
    parse_page_list(input).map_err(|e| e.to_string())
}

fn parse_prefetch(input: &str) -> Result<usize, String> {
    let prefetch: usize = input.parse().map_err(|e| format!("{e}"))?;
    if prefetch > MAX_PREFETCH {
        return Err(format!("prefetch must be at most {MAX_PREFETCH}"));
    }
    Ok(prefetch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command_line() {
        let args = CliArgs::try_parse_from([
            "page-scrubber",
            "--pages",
            "10",
            "--current",
            "3",
            "--cached",
            "2,5,9",
            "--compact",
        ])
        .unwrap();
        assert_eq!(args.total_pages, 10);
        assert_eq!(args.current_page, 3);
        assert_eq!(
            args.cached_pages.into_iter().collect::<Vec<_>>(),
            vec![2, 5, 9]
        );
        assert!(args.compact);
    }

    #[test]
    fn defaults() {
        let args = CliArgs::try_parse_from(["page-scrubber"]).unwrap();
        assert_eq!(args.total_pages, 40);
        assert!(args.cached_pages.is_empty());
        assert!(args.config.is_none());
    }

    #[test]
    fn rejects_bad_cached_list() {
        assert!(CliArgs::try_parse_from([
            "page-scrubber",
            "--cached",
            "x"
        ])
        .is_err());
    }

    #[test]
    fn rejects_oversized_prefetch() {
        assert!(CliArgs::try_parse_from([
            "page-scrubber",
            "--prefetch",
            "18446744073709551615"
        ])
        .is_err());
        let args =
            CliArgs::try_parse_from(["page-scrubber", "--prefetch", "64"])
                .unwrap();
        assert_eq!(args.prefetch, 64);
    }
}
