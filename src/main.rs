//! 页面拖动定位条主程序

use page_scrubber::app::error::types::Result;

fn main() -> Result<()> {
    // 运行命令行界面
    page_scrubber::cli::run_cli()
}
