use state::{PageRequest, PageSummary};
use yew::prelude::*;

/// `None` entries stand for an ellipsis. Page numbers are 0-based.
pub fn visible_pages(current: u32, total_pages: u32) -> Vec<Option<u32>> {
    const MAX_VISIBLE: u32 = 5;

    if total_pages <= MAX_VISIBLE {
        return (0..total_pages).map(Some).collect();
    }

    let last = total_pages - 1;
    let mut pages = vec![Some(0)];

    let start = current.saturating_sub(1).max(1);
    let end = (current + 1).min(last - 1);

    if start > 1 {
        pages.push(None);
    }
    pages.extend((start..=end).map(Some));
    if end < last - 1 {
        pages.push(None);
    }
    pages.push(Some(last));
    pages
}

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub page: PageRequest,
    pub total_pages: Option<u32>,
    pub summary: Option<PageSummary>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_page_change: Callback<u32>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let current = props.page.index;
    let total_pages = props.total_pages.unwrap_or(0);

    let summary = props
        .summary
        .map(|summary| summary.to_string())
        .unwrap_or_default();

    let on_previous = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if current > 0 {
                on_page_change.emit(current - 1);
            }
        })
    };

    let on_next = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if current + 1 < total_pages {
                on_page_change.emit(current + 1);
            }
        })
    };

    html! {
        <div class="flex flex-col md:flex-row justify-between items-center gap-2 my-4">
            <div class="text-sm text-base-content/70" id="page-summary">{ summary }</div>

            if total_pages > 1 {
                <div class="flex items-center gap-2">
                    <button
                        class="btn btn-sm"
                        disabled={props.disabled || current == 0}
                        onclick={on_previous}
                    >
                        <i class="fas fa-chevron-left"></i>
                    </button>

                    {for visible_pages(current, total_pages).into_iter().map(|page| match page {
                        None => html! { <span class="px-2">{"..."}</span> },
                        Some(page) => {
                            let on_click = {
                                let on_page_change = props.on_page_change.clone();
                                Callback::from(move |e: MouseEvent| {
                                    e.prevent_default();
                                    on_page_change.emit(page);
                                })
                            };
                            html! {
                                <button
                                    class={classes!("btn", "btn-sm", (page == current).then_some("btn-primary"))}
                                    disabled={props.disabled}
                                    onclick={on_click}
                                >
                                    {page + 1}
                                </button>
                            }
                        }
                    })}

                    <button
                        class="btn btn-sm"
                        disabled={props.disabled || current + 1 >= total_pages}
                        onclick={on_next}
                    >
                        <i class="fas fa-chevron-right"></i>
                    </button>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_few_pages_are_all_visible() {
        assert_eq!(visible_pages(0, 3), vec![Some(0), Some(1), Some(2)]);
        assert!(visible_pages(0, 0).is_empty());
    }

    #[test]
    fn test_many_pages_collapse_around_current() {
        assert_eq!(
            visible_pages(5, 10),
            vec![Some(0), None, Some(4), Some(5), Some(6), None, Some(9)]
        );
        assert_eq!(
            visible_pages(0, 10),
            vec![Some(0), Some(1), None, Some(9)]
        );
        assert_eq!(
            visible_pages(9, 10),
            vec![Some(0), None, Some(8), Some(9)]
        );
    }
}
