//! 配置文件

pub mod settings;
