//! 显示工具函数

use std::collections::BTreeSet;

use crate::app::error::types::Result;

/// 单个区间最多展开的页数
pub const MAX_RANGE_PAGES: usize = 100_000;

/// 解析页码列表，如 `2,5,9-12`
pub fn parse_page_list(input: &str) -> Result<BTreeSet<usize>> {
    let mut pages = BTreeSet::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start: usize = start.trim().parse()?;
                let end: usize = end.trim().parse()?;
                if start > end {
                    anyhow::bail!("invalid page range: {part}");
                }
                if end - start >= MAX_RANGE_PAGES {
                    anyhow::bail!(
                        "page range too large: {part} (max {MAX_RANGE_PAGES} pages)"
                    );
                }
                pages.extend(start..=end);
            }
            None => {
                pages.insert(part.parse()?);
            }
        }
    }
    Ok(pages)
}

/// 将页码集合压缩为区间文本，如 `1-3, 7`
pub fn format_page_ranges(pages: &BTreeSet<usize>) -> String {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &page in pages {
        match ranges.last_mut() {
            Some((_, end)) if *end + 1 == page => *end = page,
            _ => ranges.push((page, page)),
        }
    }

    ranges
        .iter()
        .map(|&(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{start}-{end}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// 状态行：当前页、总页数与拖动预览
pub fn format_status(
    current_page: usize,
    total_pages: usize,
    preview: Option<usize>,
) -> String {
    if total_pages == 0 {
        return "空文档".to_string();
    }
    match preview {
        Some(page) if page != current_page => format!(
            "第 {} 页 / 共 {} 页 → 预览第 {} 页",
            current_page, total_pages, page
        ),
        _ => format!("第 {} 页 / 共 {} 页", current_page, total_pages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lists_and_ranges() {
        let pages = parse_page_list("2, 5,9-12,").unwrap();
        assert_eq!(
            pages.into_iter().collect::<Vec<_>>(),
            vec![2, 5, 9, 10, 11, 12]
        );
        assert!(parse_page_list("").unwrap().is_empty());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_page_list("a").is_err());
        assert!(parse_page_list("5-2").is_err());
        assert!(parse_page_list("-3").is_err());
    }

    #[test]
    fn rejects_oversized_ranges() {
        assert!(parse_page_list("1-18446744073709551615").is_err());
        assert!(parse_page_list("1-100001").is_err());
        assert_eq!(parse_page_list("1-100000").unwrap().len(), MAX_RANGE_PAGES);
    }

    #[test]
    fn formats_ranges() {
        let pages: BTreeSet<usize> = [1, 2, 3, 7, 9, 10].into_iter().collect();
        assert_eq!(format_page_ranges(&pages), "1-3, 7, 9-10");
        assert_eq!(format_page_ranges(&BTreeSet::new()), "");
    }

    #[test]
    fn status_mentions_preview_only_when_different() {
        assert_eq!(format_status(3, 10, Some(3)), "第 3 页 / 共 10 页");
        assert_eq!(
            format_status(3, 10, Some(8)),
            "第 3 页 / 共 10 页 → 预览第 8 页"
        );
        assert_eq!(format_status(0, 0, None), "空文档");
    }
}
