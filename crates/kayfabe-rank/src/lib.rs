//! Filtering and pagination engine for ranked rosters.
//!
//! `kayfabe-rank` holds everything about the rank list that does not need a
//! terminal: the roster data model, the gimmick and promotion filters, page
//! slicing with page-control states, locale-based language selection and the
//! bookkeeping for debounced search.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Roster`] | Promotions plus ranked items, loaded from JSON |
//! | [`FilterState`] | Gimmick search text and selected promotion |
//! | [`paginate`] | Pure visibility computation for one page |
//! | [`Language`] | Startup language from a locale tag |
//! | [`Debouncer`] | Last-write-wins holder for delayed input |
//!
//! # Example
//!
//! ```
//! use kayfabe_rank::{paginate, FilterState, RankItem, Roster};
//!
//! let items = (1..=25).map(|r| RankItem::new(r, format!("W{r}"), "Ace")).collect();
//! let roster = Roster::new(vec![], items).unwrap();
//!
//! let view = paginate(&roster, &FilterState::new(), 3, 10);
//! assert_eq!(view.shown_ranks(), (21..=25).collect::<Vec<_>>());
//! ```

pub mod debounce;
pub mod filter;
pub mod locale;
pub mod page;
pub mod roster;

pub use debounce::{Debouncer, Ticket, DEFAULT_DEBOUNCE};
pub use filter::{FilterState, GimmickMatcher};
pub use locale::Language;
pub use page::{page_count, paginate, ItemVisibility, PageControl, PageView, DEFAULT_PAGE_SIZE};
pub use roster::{Promotion, PromotionId, RankItem, Roster, RosterError};
