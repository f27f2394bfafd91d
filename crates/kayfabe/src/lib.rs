//! Terminal browser for ranked wrestler rosters.
//!
//! The [`RankList`] model runs on the `kayfabe-core` event loop and drives
//! the pure engine in `kayfabe-rank`: typing filters by gimmick after a short
//! debounce, Tab cycles promotions, arrows and function keys page through the
//! results.  `kayfabe show` prints a single page without a terminal UI.

pub mod app;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod widgets;

pub use app::{RankList, RankListFlags};
pub use config::{ConfigError, RankListConfig};
