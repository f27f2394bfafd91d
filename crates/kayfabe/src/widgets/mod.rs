//! Components the rank list screen is assembled from.

pub mod pager;
pub mod promotions;
pub mod rank_table;
pub mod search;

pub use pager::{PageNav, Pager};
pub use promotions::PromotionTabs;
pub use rank_table::RankTable;
pub use search::SearchBar;
