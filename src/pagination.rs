use serde::Serialize;

/// One slot in a row of page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageLink {
    Page(usize),
    /// Skipped pages, rendered as an ellipsis.
    Gap,
}

/// How many pages to show at each edge and around the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub left_edge: usize,
    pub left_current: usize,
    pub right_current: usize,
    pub right_edge: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            left_edge: 1,
            left_current: 1,
            right_current: 1,
            right_edge: 1,
        }
    }
}

impl PageWindow {
    /// Links for `current_page` out of `total_pages`, with a [`PageLink::Gap`]
    /// wherever at least one page is skipped. `current_page` is clamped.
    pub fn pages(&self, current_page: usize, total_pages: usize) -> Vec<PageLink> {
        if total_pages == 0 {
            return Vec::new();
        }

        let current = current_page.clamp(1, total_pages);
        let spans = [
            (1, self.left_edge.min(total_pages)),
            (
                current.saturating_sub(self.left_current).max(1),
                current.saturating_add(self.right_current).min(total_pages),
            ),
            (total_pages.saturating_sub(self.right_edge) + 1, total_pages),
        ];

        let mut links = Vec::new();
        let mut shown = 0;
        for (start, end) in spans {
            if shown == total_pages {
                break;
            }
            let start = start.max(shown + 1);
            if start > end {
                continue;
            }
            if start > shown + 1 {
                links.push(PageLink::Gap);
            }
            links.extend((start..=end).map(PageLink::Page));
            shown = end;
        }

        if shown < total_pages {
            links.push(PageLink::Gap);
        }
        links
    }
}

/// Page controls for a results page: first and last page, one neighbour on
/// each side of `current_page`, and a gap wherever pages are skipped.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageLink> {
    PageWindow::default().pages(current_page, total_pages)
}

/// `ceil(total_count / page_size)`; zero when there is nothing to page through.
pub fn total_pages(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size))
}
