//! Paged keyboard renderer: shows a sub-window of page buttons instead
//! of one button per page.

use anyhow::anyhow;
use std::ops::Range;
use std::str::FromStr;
use teloxide::types::InlineKeyboardButton;

/// How the visible window tracks the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// Fixed-size windows aligned to multiples of the width.
    Normal,
    /// Window slides to keep the current page near its middle.
    Centered,
}

impl FromStr for PaginationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(PaginationMode::Normal),
            "CENTERED" => Ok(PaginationMode::Centered),
            other => Err(anyhow!("unknown pagination mode: {}", other)),
        }
    }
}

/// Computes the half-open range of page indices to display.
///
/// Normal mode aligns windows to multiples of `width`; centered mode
/// clamps so the window never runs past either boundary. With fewer
/// pages than `width` the whole range is returned.
pub fn page_window(pages: usize, current: usize, width: usize, mode: PaginationMode) -> Range<usize> {
    if pages == 0 || width == 0 {
        return 0..0;
    }
    match mode {
        PaginationMode::Normal => {
            let start = width * (current / width);
            let end = (start + width).min(pages);
            start..end
        }
        PaginationMode::Centered => {
            let half = width / 2;
            let upper = pages.saturating_sub(width) as i64;
            let start = (current as i64 - half as i64).min(upper).max(0) as usize;
            let end = (start + width).min(pages);
            start..end
        }
    }
}

/// Inline-keyboard pager widget. Stateless: the host supplies the page
/// count and current page on every render.
#[derive(Debug, Clone)]
pub struct PaginationPager {
    id: String,
    mode: PaginationMode,
    width: usize,
}

impl PaginationPager {
    pub fn new(id: impl Into<String>, mode: PaginationMode, width: usize) -> Self {
        Self {
            id: id.into(),
            mode,
            width,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// One keyboard row: a button per visible page, current page
    /// bracketed, labels 1-based.
    pub fn render(&self, pages: usize, current: usize) -> Vec<InlineKeyboardButton> {
        page_window(pages, current, self.width, self.mode)
            .map(|target| {
                let label = if target == current {
                    format!("[ {} ]", target + 1)
                } else {
                    (target + 1).to_string()
                };
                InlineKeyboardButton::callback(label, format!("pg:{}:{}", self.id, target))
            })
            .collect()
    }

    /// Extracts the target page from a `pg:{id}:{page}` payload
    /// addressed to this widget.
    pub fn parse_callback(&self, data: &str) -> Option<usize> {
        let rest = data.strip_prefix("pg:")?;
        let (id, page) = rest.rsplit_once(':')?;
        if id != self.id {
            return None;
        }
        page.parse().ok()
    }
}
