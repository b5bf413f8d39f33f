//! Page links for paginated tables.

use maud::{Markup, html};

/// The maximum number of numbered page links to show at once.
pub const MAX_PAGE_LINKS: u64 = 5;

/// One item in the row of page links below a table.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    /// A link to another page.
    Page(u64),
    /// The page being shown.
    CurrPage(u64),
    /// A gap between non-adjacent pages.
    Ellipsis,
    /// A link to the next page.
    NextButton(u64),
    /// A link to the previous page.
    BackButton(u64),
}

/// Create the page links for `curr_page` out of `page_count` pages, showing
/// at most `max_pages` numbered links around the current page.
///
/// The first and last page are always reachable.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

/// Render `indicators` as a row of links, using `page_url` to build the link
/// for each page.
///
/// Renders nothing when there is only one page.
pub fn pagination_view(
    indicators: &[PaginationIndicator],
    page_url: impl Fn(u64) -> String,
) -> Markup {
    let link_style = "block px-3 py-2 rounded-sm text-blue-600 hover:underline";

    if indicators.len() <= 1 {
        return html! {};
    }

    html! {
        nav class="pagination flex justify-center" aria-label="Pagination"
        {
            ul class="flex items-center gap-x-1 p-0 m-0"
            {
                @for indicator in indicators {
                    li {
                        @match indicator {
                            PaginationIndicator::BackButton(page) => {
                                a href=(page_url(*page)) role="button" class=(link_style) { "Back" }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a href=(page_url(*page)) role="button" class=(link_style) { "Next" }
                            }
                            PaginationIndicator::Page(page) => {
                                a href=(page_url(*page)) class=(link_style) { (page) }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                span
                                    aria-current="page"
                                    class="block px-3 py-2 rounded-sm font-bold text-black dark:text-white"
                                { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="px-2 text-gray-500" { "..." }
                            }
                        }
                    }
                }
            }
        }
    }
}
