//! 页面拖动定位条核心：位置换算、布局、绘制与交互状态机

pub mod canvas;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod position;
pub mod renderer;
