//! Result renderer: pure projections from a result page to what the table and
//! pager footer display.

use std::ops::RangeInclusive;

use crate::entity::{Entity, Status};
use crate::listing::page::{PageRequest, ResultPage};

/// Most page buttons shown in the pager.
pub const PAGE_WINDOW: usize = 5;

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// 1-based position across all pages.
    pub serial: usize,
    pub id: String,
    pub status: Option<Status>,
    pub cells: Vec<String>,
}

/// Row views for the items of `result`, in order.
pub fn row_views<E: Entity>(result: &ResultPage<E>, page: PageRequest) -> Vec<RowView> {
    result
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| RowView {
            serial: page.offset() + index + 1,
            id: item.id().to_string(),
            status: item.status(),
            cells: item.cells(),
        })
        .collect()
}

/// "Showing {start} to {end} of {total}".
pub fn summary(total_count: usize, page: PageRequest) -> String {
    let (start, end) = if total_count == 0 {
        (0, 0)
    } else {
        let start = page.offset() + 1;
        let end = (page.number * page.size.get()).min(total_count);
        (start.min(end), end)
    };
    format!("Showing {start} to {end} of {total_count}")
}

/// Page numbers to offer as buttons: at most [`PAGE_WINDOW`], centred on
/// `current` and shifted to stay within `1..=total_pages`.
pub fn page_window(current: usize, total_pages: usize) -> RangeInclusive<usize> {
    let total_pages = total_pages.max(1);
    let current = current.clamp(1, total_pages);
    let width = PAGE_WINDOW.min(total_pages);

    let start = current.saturating_sub(PAGE_WINDOW / 2).max(1);
    let start = start.min(total_pages + 1 - width);
    start..=start + width - 1
}
