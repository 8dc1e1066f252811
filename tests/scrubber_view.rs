use std::collections::BTreeSet;

use page_scrubber::core::input::pointer::column_offset;
use page_scrubber::core::scrubber::canvas::Color;
use page_scrubber::core::scrubber::interaction::PointerEvent;
use page_scrubber::core::scrubber::layout::{LayoutCalculator, LayoutMetrics};
use page_scrubber::core::scrubber::model::PageSnapshot;
use page_scrubber::core::scrubber::renderer::{TrackRenderer, TrackStyle};
use page_scrubber::core::viewer::navigation::NavAction;
use page_scrubber::core::viewer::scrubber_view::ScrubberView;
use page_scrubber::core::viewer::session::DocumentSession;
use page_scrubber::core::viewer::terminal_canvas::CellSize;

const COLUMNS: usize = 40;

fn view() -> ScrubberView {
    ScrubberView::new(
        TrackRenderer::new(
            LayoutCalculator::new(LayoutMetrics::default(), false),
            TrackStyle::default(),
        ),
        CellSize::default(),
        Color::rgb(0, 0, 0),
    )
}

#[test]
fn layout_rows_cover_preview_and_track() {
    let mut view = view();
    assert_eq!(view.rows_above_track(), 3);
    assert_eq!(view.track_rows(), 1);
    view.set_compact(true);
    assert_eq!(view.rows_above_track(), 2);
}

#[test]
fn track_layer_is_reused_until_significant_change() {
    let mut view = view();
    let mut session = DocumentSession::new(20, 1, BTreeSet::new(), 0);

    view.frame(&session.snapshot(), COLUMNS);
    view.frame(&session.snapshot(), COLUMNS);
    assert_eq!(view.track_repaints(), 1);

    // 拖动只改变滑块层
    let snapshot = session.snapshot();
    view.handle_pointer(
        PointerEvent::Down {
            dx: column_offset(30, COLUMNS, CellSize::default().width),
        },
        COLUMNS,
        &snapshot,
        &mut session,
    );
    view.frame(&session.snapshot(), COLUMNS);
    assert_eq!(view.track_repaints(), 1);

    view.handle_pointer(PointerEvent::Up, COLUMNS, &snapshot, &mut session);
    view.frame(&session.snapshot(), COLUMNS);
    assert_eq!(view.track_repaints(), 2);

    view.frame(&session.snapshot(), COLUMNS + 1);
    assert_eq!(view.track_repaints(), 3);

    view.set_compact(true);
    view.frame(&session.snapshot(), COLUMNS + 1);
    assert_eq!(view.track_repaints(), 4);
}

#[test]
fn drag_and_release_moves_session() {
    let mut view = view();
    let mut session = DocumentSession::new(10, 3, BTreeSet::new(), 1);
    let snapshot = session.snapshot();

    view.handle_pointer(
        PointerEvent::Down { dx: 0.0 },
        COLUMNS,
        &snapshot,
        &mut session,
    );
    assert_eq!(session.live_preview(), Some(1));
    view.handle_pointer(
        PointerEvent::Move { dx: view.track_width(COLUMNS) + 50.0 },
        COLUMNS,
        &snapshot,
        &mut session,
    );
    assert_eq!(session.live_preview(), Some(10));
    view.handle_pointer(PointerEvent::Up, COLUMNS, &snapshot, &mut session);

    assert_eq!(session.current_page(), 10);
    assert!(session.cached_pages().contains(&9));
    assert!(!view.controller().is_dragging());
}

#[test]
fn preview_label_is_drawn_above_track_while_dragging() {
    let mut view = view();
    let mut session = DocumentSession::new(10, 1, BTreeSet::new(), 0);
    let snapshot = session.snapshot();

    view.handle_pointer(
        PointerEvent::Down { dx: 0.0 },
        COLUMNS,
        &snapshot,
        &mut session,
    );
    let canvas = view.frame(&snapshot, COLUMNS);

    // 预览框 y 为 -40..-8，文字位于中线 -24 所在的第 1 行
    let text: String = (0..canvas.columns())
        .filter_map(|column| canvas.cell_at(column, 1))
        .map(|cell| cell.ch)
        .collect();
    assert!(text.contains("1 / 10"), "{text:?}");
}

#[test]
fn single_page_thumb_stays_at_left_edge() {
    let mut view = view();
    let mut session = DocumentSession::new(1, 1, BTreeSet::new(), 0);
    let snapshot = session.snapshot();

    view.handle_pointer(
        PointerEvent::Down { dx: 200.0 },
        COLUMNS,
        &snapshot,
        &mut session,
    );
    let canvas = view.frame(&snapshot, COLUMNS);
    let thumb = TrackStyle::default().thumb_color;
    let track_row = view.rows_above_track();

    assert_eq!(canvas.cell_at(0, track_row).unwrap().bg, Some(thumb));
    assert_ne!(canvas.cell_at(COLUMNS - 1, track_row).unwrap().bg, Some(thumb));

    view.handle_pointer(PointerEvent::Up, COLUMNS, &snapshot, &mut session);
    assert_eq!(session.current_page(), 1);
}

#[test]
fn navigation_respects_bounds() {
    let view = view();
    let mut session = DocumentSession::new(5, 5, BTreeSet::new(), 0);

    let navigation = view.navigation(&session.snapshot());
    assert!(!navigation.trigger(NavAction::Next, &mut session).unwrap());
    assert!(navigation.trigger(NavAction::First, &mut session).unwrap());
    assert_eq!(session.current_page(), 1);
}

#[test]
fn dispose_clears_gesture() {
    let mut view = view();
    let mut session = DocumentSession::new(10, 1, BTreeSet::new(), 0);
    let snapshot = session.snapshot();

    view.handle_pointer(
        PointerEvent::Down { dx: 100.0 },
        COLUMNS,
        &snapshot,
        &mut session,
    );
    assert!(view.controller().is_dragging());
    view.dispose();
    assert!(!view.controller().is_dragging());
    view.handle_pointer(PointerEvent::Up, COLUMNS, &snapshot, &mut session);
    assert_eq!(session.current_page(), 1);
}

#[test]
fn out_of_range_current_page_is_clamped() {
    let mut clamped_view = view();
    let mut reference_view = view();
    let cases = [
        (PageSnapshot::new(0, 10, []), PageSnapshot::new(1, 10, [])),
        (PageSnapshot::new(99, 10, []), PageSnapshot::new(10, 10, [])),
    ];

    for (raw, expected) in cases {
        let canvas = clamped_view.frame(&raw, COLUMNS);
        let reference = reference_view.frame(&expected, COLUMNS);
        for row in 0..reference.rows() {
            for column in 0..reference.columns() {
                assert_eq!(
                    canvas.cell_at(column, row),
                    reference.cell_at(column, row),
                    "cell ({column}, {row}) for page {}",
                    raw.current_page
                );
            }
        }
    }
}

#[test]
fn release_on_clamped_page_does_not_commit() {
    struct Selections(Vec<usize>);

    impl page_scrubber::core::scrubber::model::PageListener for Selections {
        fn on_page_changed(&mut self, _page: usize) -> anyhow::Result<()> {
            Ok(())
        }

        fn on_page_selected(&mut self, page: usize) -> anyhow::Result<()> {
            self.0.push(page);
            Ok(())
        }
    }

    let mut view = view();
    let mut listener = Selections(Vec::new());
    let snapshot = PageSnapshot::new(0, 10, []);

    view.handle_pointer(
        PointerEvent::Down { dx: 0.0 },
        COLUMNS,
        &snapshot,
        &mut listener,
    );
    view.handle_pointer(PointerEvent::Up, COLUMNS, &snapshot, &mut listener);
    assert!(listener.0.is_empty());
}
