//! 指针偏移、归一化进度与页码之间的换算
//!
//! 页码从 1 开始。所有换算都先夹紧输入，越界指针映射到最近的端点页。

/// 指针水平偏移 → 进度（0.0-1.0）
///
/// `track_width` 非正或非有限时无法换算，返回 `None`。
pub fn progress_from_offset(dx: f64, track_width: f64) -> Option<f64> {
    if !track_width.is_finite() || track_width <= 0.0 || dx.is_nan() {
        return None;
    }
    Some(dx.clamp(0.0, track_width) / track_width)
}

/// 进度 → 页码
///
/// 没有页面时返回 `None`（不做任何操作）；单页文档恒为第 1 页。
/// 取整采用远离零的四舍五入（`f64::round`）。
pub fn page_from_progress(progress: f64, total_pages: usize) -> Option<usize> {
    match total_pages {
        0 => None,
        1 => Some(1),
        _ => {
            let progress =
                if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
            let index = (progress * (total_pages - 1) as f64).round() as usize;
            Some((index + 1).clamp(1, total_pages))
        }
    }
}

/// 页码 → 进度，`page_from_progress` 的逆映射
pub fn progress_from_page(page: usize, total_pages: usize) -> f64 {
    if total_pages <= 1 {
        return 0.0;
    }
    let page = page.clamp(1, total_pages);
    ((page - 1) as f64 / (total_pages - 1) as f64).clamp(0.0, 1.0)
}

/// 指针偏移直接换算为页码
pub fn page_from_offset(
    dx: f64,
    track_width: f64,
    total_pages: usize,
) -> Option<usize> {
    if total_pages == 0 {
        return None;
    }
    let progress = progress_from_offset(dx, track_width)?;
    page_from_progress(progress, total_pages)
}
