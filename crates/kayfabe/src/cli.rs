use std::error::Error;
use std::fmt::Write as _;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use kayfabe_core::{OutputTarget, ProgramOptions};
use kayfabe_rank::{
    paginate, FilterState, Language, PageView, PromotionId, Roster, RosterError,
    DEFAULT_PAGE_SIZE,
};
use serde_json::json;
use unicode_width::UnicodeWidthStr;

use crate::app::{RankList, RankListFlags};
use crate::config::{locale_from_env, RankListConfig};
use crate::i18n::labels;
use crate::logging;

/// Roster used when `--roster` is not given.
pub const SAMPLE_ROSTER: &str = include_str!("../data/sample_roster.json");

#[derive(Parser, Debug)]
#[command(name = "kayfabe", about = "Browse a ranked wrestler roster", version)]
pub struct Cli {
    /// Roster JSON file.  The bundled sample roster is used when omitted.
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// Wrestlers per page.
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Locale tag deciding the language, e.g. `ja-JP` or `en_US.UTF-8`.
    /// Falls back to LC_ALL, LC_MESSAGES and LANG.
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Interactive rank list (the default).
    Browse {
        #[command(flatten)]
        filter: FilterArgs,

        /// Milliseconds of quiet typing before a search runs.
        #[arg(long, default_value_t = 250)]
        debounce_ms: u64,

        /// Append logs to this file.  Nothing is logged without it.
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
    /// Print one page of the rank list and exit.
    Show {
        #[command(flatten)]
        filter: FilterArgs,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
struct FilterArgs {
    /// Gimmick search text.
    #[arg(long, default_value = "")]
    gimmick: String,

    /// Promotion id to filter by.
    #[arg(long)]
    promotion: Option<PromotionId>,

    /// Page to show.
    #[arg(long, default_value_t = 1)]
    page: usize,
}

impl Cli {
    fn config(&self, filter: &FilterArgs, debounce: Duration) -> RankListConfig {
        RankListConfig {
            page_size: self.page_size,
            debounce,
            locale: locale_from_env(self.lang.as_deref()),
            promotion: filter.promotion,
            gimmick: filter.gimmick.clone(),
            page: filter.page,
        }
    }
}

/// Load the roster at `path`, or the bundled sample.
pub fn load_roster(path: Option<&Path>) -> Result<Roster, RosterError> {
    match path {
        Some(path) => Roster::load(path),
        None => Roster::from_json(SAMPLE_ROSTER),
    }
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let browse = Command::Browse {
        filter: FilterArgs {
            page: 1,
            ..Default::default()
        },
        debounce_ms: 250,
        log_file: None,
    };
    let command = cli.command.as_ref().unwrap_or(&browse);

    match command {
        Command::Browse {
            filter,
            debounce_ms,
            log_file,
        } => {
            logging::init_file_logging(log_file.as_deref())?;
            let config = cli.config(filter, Duration::from_millis(*debounce_ms));
            handle_browse(cli.roster.as_deref(), config).await
        }
        Command::Show { filter, json } => {
            logging::init_stderr_logging();
            let config = cli.config(filter, Duration::ZERO);
            handle_show(cli.roster.as_deref(), &config, *json)
        }
    }
}

async fn handle_browse(
    roster: Option<&Path>,
    config: RankListConfig,
) -> Result<(), Box<dyn Error>> {
    let roster = load_roster(roster)?;
    config.validate(&roster)?;
    tracing::info!(items = roster.len(), page_size = config.page_size, "starting browser");

    // Keep the UI on the terminal when stdout is redirected.
    let output = if std::io::stdout().is_terminal() {
        OutputTarget::Stdout
    } else {
        OutputTarget::Stderr
    };
    let options = ProgramOptions {
        title: Some("kayfabe".to_string()),
        output,
        ..Default::default()
    };
    kayfabe_core::run_with::<RankList>(RankListFlags { roster, config }, options).await?;
    tracing::info!("browser closed");
    Ok(())
}

fn handle_show(
    roster: Option<&Path>,
    config: &RankListConfig,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let roster = load_roster(roster)?;
    config.validate(&roster)?;
    let language = Language::detect(&config.locale).unwrap_or_default();
    let filter = FilterState::new()
        .with_gimmick(config.gimmick.as_str())
        .with_promotion(config.promotion);
    let view = paginate(&roster, &filter, config.page, config.page_size);
    tracing::debug!(page = view.page, visible = view.visible_count, "show");

    if as_json {
        println!("{}", serde_json::to_string_pretty(&page_json(&roster, &view, language))?);
    } else {
        print!("{}", page_table(&roster, &view, language));
    }
    Ok(())
}

fn promotion_label(roster: &Roster, id: Option<PromotionId>) -> &str {
    id.and_then(|id| roster.promotion(id))
        .map(|p| p.label())
        .unwrap_or("")
}

fn page_json(roster: &Roster, view: &PageView, language: Language) -> serde_json::Value {
    let items: Vec<_> = roster
        .items
        .iter()
        .zip(&view.items)
        .filter(|(_, vis)| vis.shown())
        .map(|(item, _)| {
            json!({
                "rank": item.rank,
                "name": item.name,
                "gimmicks": item.gimmicks,
                "promotion": item.promotion.map(|_| promotion_label(roster, item.promotion)),
                "score": item.score,
            })
        })
        .collect();
    json!({
        "language": language,
        "page": view.page,
        "page_size": view.page_size,
        "last_page": view.last_page(),
        "visible_count": view.visible_count,
        "items": items,
        "controls": view.controls,
    })
}

fn page_table(roster: &Roster, view: &PageView, language: Language) -> String {
    let text = labels(language);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} {} ({} {})",
        text.page,
        view.page,
        text.of,
        view.last_page(),
        view.visible_count,
        text.matches
    );

    let rows: Vec<_> = roster
        .items
        .iter()
        .zip(&view.items)
        .filter(|(_, vis)| vis.shown())
        .map(|(item, _)| item)
        .collect();
    if rows.is_empty() {
        let _ = writeln!(out, "{}", text.no_results);
        return out;
    }

    let name_width = rows
        .iter()
        .map(|item| item.name.width())
        .max()
        .unwrap_or(0);
    for item in rows {
        let label = promotion_label(roster, item.promotion);
        let score = item.score.map(|s| s.to_string()).unwrap_or_default();
        let pad = name_width - item.name.width();
        let _ = writeln!(
            out,
            "{:>4}  {}{}  {:<8}  {:>5}  {}",
            item.rank,
            item.name,
            " ".repeat(pad),
            label,
            score,
            item.gimmicks
        );
    }
    out
}
