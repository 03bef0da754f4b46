#![allow(clippy::unwrap_used)]

use teleframe_bot::dialogs::widgets::{page_window, PaginationMode, PaginationPager};

#[test]
fn test_normal_mode_example() {
    assert_eq!(page_window(10, 5, 3, PaginationMode::Normal), 3..6);
}

#[test]
fn test_centered_mode_example() {
    assert_eq!(page_window(10, 5, 3, PaginationMode::Centered), 4..7);
}

#[test]
fn test_normal_windows_align_to_width_multiples() {
    for pages in 1..=30usize {
        for width in 1..=pages {
            for current in 0..pages {
                let window = page_window(pages, current, width, PaginationMode::Normal);
                assert_eq!(window.start % width, 0, "pages={pages} width={width} current={current}");
                assert!(window.end - window.start <= width);
                assert!(window.contains(&current));
                assert!(window.end <= pages);
            }
        }
    }
}

#[test]
fn test_centered_window_length_is_min_width_pages() {
    for pages in 1..=30usize {
        for width in 1..=35usize {
            for current in 0..pages {
                let window = page_window(pages, current, width, PaginationMode::Centered);
                assert!(window.end <= pages);
                assert_eq!(
                    window.end - window.start,
                    width.min(pages),
                    "pages={pages} width={width} current={current}"
                );
                assert!(window.contains(&current));
            }
        }
    }
}

#[test]
fn test_degenerate_inputs_give_empty_window() {
    assert_eq!(page_window(0, 0, 3, PaginationMode::Normal), 0..0);
    assert_eq!(page_window(10, 2, 0, PaginationMode::Centered), 0..0);
}

#[test]
fn test_mode_parsing_rejects_unknown_values() {
    assert_eq!("NORMAL".parse::<PaginationMode>().unwrap(), PaginationMode::Normal);
    assert_eq!("CENTERED".parse::<PaginationMode>().unwrap(), PaginationMode::Centered);

    let error = "DIAGONAL".parse::<PaginationMode>().unwrap_err();
    assert!(error.to_string().contains("unknown pagination mode"));
}

#[test]
fn test_pager_renders_window_with_current_bracketed() {
    let pager = PaginationPager::new("pager", PaginationMode::Centered, 3);
    let row = pager.render(10, 5);

    assert_eq!(row.len(), 3);
    // Window is [4, 7); labels are 1-based.
    assert_eq!(row[0].text, "5");
    assert_eq!(row[1].text, "[ 6 ]");
    assert_eq!(row[2].text, "7");
}

#[test]
fn test_pager_callback_round_trip() {
    let pager = PaginationPager::new("pager", PaginationMode::Normal, 5);
    assert_eq!(pager.parse_callback("pg:pager:7"), Some(7));
    assert_eq!(pager.parse_callback("pg:other:7"), None);
    assert_eq!(pager.parse_callback("pg:pager:x"), None);
    assert_eq!(pager.parse_callback("tab:pager"), None);
}
