//! Page computation over the filtered roster.
//!
//! [`paginate`] is the single entry point: given the roster, the active
//! filters and a requested page it decides, for every item, which of the three
//! hide states applies, and derives the state of every page control.  It is a
//! pure function so the whole visibility rule can be tested without a
//! terminal.

use crate::filter::FilterState;
use crate::roster::Roster;
use serde::Serialize;

/// Items per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Hide state of one roster item.
///
/// The three flags are independent.  An item hidden by a content filter is
/// never also marked page-hidden: only items that survive both filters take
/// part in page slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemVisibility {
    /// Rank of the item this entry describes.
    pub rank: u32,
    /// The gimmick search did not match.
    pub gimmick_hidden: bool,
    /// The selected promotion did not match.
    pub promotion_hidden: bool,
    /// The item passed both filters but lies outside the current page.
    pub page_hidden: bool,
}

impl ItemVisibility {
    /// Passes both content filters, regardless of page.
    pub fn in_visible_set(&self) -> bool {
        !self.gimmick_hidden && !self.promotion_hidden
    }

    /// Actually displayed on the current page.
    pub fn shown(&self) -> bool {
        self.in_visible_set() && !self.page_hidden
    }
}

/// State of one numbered page control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageControl {
    /// 1-based page number this control jumps to.
    pub page: usize,
    /// This is the current page.
    pub active: bool,
    /// No visible item falls on this page.  Never set on the active control.
    pub disabled: bool,
}

/// The outcome of rendering one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// The rendered page (1-based).
    pub page: usize,
    /// Items per page used for slicing.
    pub page_size: usize,
    /// Number of items passing both content filters.
    pub visible_count: usize,
    /// One entry per roster item, in rank order.
    pub items: Vec<ItemVisibility>,
    /// One entry per page control.
    pub controls: Vec<PageControl>,
}

impl PageView {
    /// Ranks of the items displayed on this page, in order.
    pub fn shown_ranks(&self) -> Vec<u32> {
        self.items
            .iter()
            .filter(|v| v.shown())
            .map(|v| v.rank)
            .collect()
    }

    /// Number of items displayed on this page.
    pub fn shown_count(&self) -> usize {
        self.items.iter().filter(|v| v.shown()).count()
    }

    /// Last page that holds at least one visible item (1 when the visible set
    /// is empty).
    pub fn last_page(&self) -> usize {
        page_count(self.visible_count, self.page_size)
    }

    /// The control for `page`, if one exists.
    pub fn control(&self, page: usize) -> Option<&PageControl> {
        self.controls.iter().find(|c| c.page == page)
    }
}

/// Number of pages needed for `items` items; always at least one.
pub fn page_count(items: usize, page_size: usize) -> usize {
    items.div_ceil(page_size.max(1)).max(1)
}

/// Render `page` of the roster under `filter`.
///
/// Page `0` is treated as the default page `1`.  Pages past the end are not
/// clamped: they simply show nothing.  Page controls cover the unfiltered
/// roster, so filtering disables controls rather than removing them.
pub fn paginate(roster: &Roster, filter: &FilterState, page: usize, page_size: usize) -> PageView {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let start = (page - 1).saturating_mul(page_size);
    let end = page.saturating_mul(page_size);

    let gimmick = filter.gimmick_matcher();
    let mut visible_count = 0usize;
    let items: Vec<ItemVisibility> = roster
        .items
        .iter()
        .map(|item| {
            let gimmick_hidden = !gimmick.matches(item);
            let promotion_hidden = !filter.matches_promotion(item);
            let mut page_hidden = false;
            if !gimmick_hidden && !promotion_hidden {
                page_hidden = visible_count < start || visible_count >= end;
                visible_count += 1;
            }
            ItemVisibility {
                rank: item.rank,
                gimmick_hidden,
                promotion_hidden,
                page_hidden,
            }
        })
        .collect();

    let controls = (1..=page_count(roster.len(), page_size))
        .map(|p| {
            let active = p == page;
            PageControl {
                page: p,
                active,
                disabled: !active && (p - 1) * page_size >= visible_count,
            }
        })
        .collect();

    PageView {
        page,
        page_size,
        visible_count,
        items,
        controls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Promotion, RankItem};

    /// `n` items ranked 1..=n; even ranks belong to promotion 2, odd ranks to
    /// promotion 1, and every fifth wrestler is a "Luchador".
    fn roster(n: u32) -> Roster {
        let promotions = vec![
            Promotion {
                id: 1,
                name: "Odd".into(),
                abbreviation: None,
            },
            Promotion {
                id: 2,
                name: "Even".into(),
                abbreviation: None,
            },
        ];
        let items = (1..=n)
            .map(|rank| {
                let gimmick = if rank % 5 == 0 { "Luchador" } else { "Brawler" };
                RankItem::new(rank, format!("W{rank}"), gimmick)
                    .with_promotion(if rank % 2 == 0 { 2 } else { 1 })
            })
            .collect();
        Roster::new(promotions, items).unwrap()
    }

    #[test]
    fn first_page_by_default() {
        let view = paginate(&roster(25), &FilterState::new(), 0, 10);
        assert_eq!(view.page, 1);
        assert_eq!(view.shown_ranks(), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn last_partial_page_and_disabled_control() {
        let view = paginate(&roster(25), &FilterState::new(), 3, 10);
        assert_eq!(view.shown_ranks(), (21..=25).collect::<Vec<_>>());
        assert_eq!(view.visible_count, 25);
        assert_eq!(view.last_page(), 3);

        let c3 = view.control(3).unwrap();
        assert!(c3.active);
        assert!(!c3.disabled);
        assert!(!view.control(1).unwrap().active);
        assert!(!view.control(1).unwrap().disabled);
    }

    #[test]
    fn control_past_visible_items_is_disabled() {
        // 35 roster items give four controls; the search leaves 25 visible.
        let mut r = roster(35);
        r.items
            .iter_mut()
            .skip(25)
            .for_each(|i| i.gimmicks = "Jobbo".into());

        let view = paginate(&r, &FilterState::new().with_gimmick("a"), 1, 10);
        assert_eq!(view.visible_count, 25);
        assert_eq!(view.controls.len(), 4);
        let c4 = view.control(4).unwrap();
        assert!(c4.disabled);
        assert!(!c4.active);
        assert!(!view.control(3).unwrap().disabled);
    }

    #[test]
    fn disabled_controls_track_visible_count() {
        let view = paginate(&roster(30), &FilterState::new().with_promotion(Some(1)), 1, 10);
        assert_eq!(view.visible_count, 15);
        assert!(!view.control(2).unwrap().disabled);
        assert!(view.control(3).unwrap().disabled);

        let view = paginate(&roster(20), &FilterState::new(), 1, 10);
        assert!(!view.control(2).unwrap().disabled);
    }

    #[test]
    fn filters_apply_before_slicing() {
        let filter = FilterState::new().with_promotion(Some(2));
        let view = paginate(&roster(25), &filter, 1, 5);
        assert_eq!(view.visible_count, 12);
        assert_eq!(view.shown_ranks(), vec![2, 4, 6, 8, 10]);

        let view = paginate(&roster(25), &filter, 3, 5);
        assert_eq!(view.shown_ranks(), vec![22, 24]);
    }

    #[test]
    fn visibility_rule_holds_for_every_item() {
        let r = roster(47);
        let filter = FilterState::new().with_gimmick("BRAWL").with_promotion(Some(1));
        for page in 1..=5 {
            let view = paginate(&r, &filter, page, 7);
            let mut filtered_index = 0usize;
            for (item, vis) in r.items.iter().zip(&view.items) {
                let passes = filter.matches(item);
                let in_range = passes
                    && filtered_index >= (page - 1) * 7
                    && filtered_index < page * 7;
                assert_eq!(vis.shown(), in_range, "rank {} page {page}", item.rank);
                if passes {
                    filtered_index += 1;
                }
            }
        }
    }

    #[test]
    fn filter_hidden_items_are_not_page_hidden() {
        let view = paginate(&roster(25), &FilterState::new().with_gimmick("luchador"), 1, 2);
        let rank_1 = view.items[0];
        assert!(rank_1.gimmick_hidden);
        assert!(!rank_1.page_hidden);
        assert_eq!(view.shown_ranks(), vec![5, 10]);
        let rank_15 = view.items[14];
        assert!(rank_15.page_hidden);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let view = paginate(&roster(25), &FilterState::new(), 4, 10);
        assert_eq!(view.shown_count(), 0);
        assert_eq!(view.visible_count, 25);
        assert!(view.controls.iter().all(|c| !c.active));
        assert!(view.control(3).is_some_and(|c| !c.disabled));
    }

    #[test]
    fn empty_roster_has_one_control() {
        let view = paginate(&Roster::default(), &FilterState::new(), 1, 10);
        assert_eq!(view.controls.len(), 1);
        assert!(view.controls[0].active);
        assert_eq!(view.shown_count(), 0);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(5, 0), 5);
    }
}
