//! 命令行界面模块

pub mod args;
pub mod scrubber_viewer;

use clap::Parser;
use colored::*;

use crate::app::config::settings::Settings;
use crate::app::error::types::Result;
use crate::app::logging::setup::init_logging;

use self::args::CliArgs;
use self::scrubber_viewer::ScrubberViewer;

/// 运行命令行界面
pub fn run_cli() -> Result<()> {
    let args = CliArgs::parse();

    // 初始化日志系统
    init_logging(args.log_file.as_deref())?;

    // 加载配置
    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {:#}", "错误".red().bold(), e);
            std::process::exit(1);
        }
    };

    // 创建查看器
    let mut viewer = ScrubberViewer::new(args, settings)?;

    // 运行查看器
    viewer.run()
}
