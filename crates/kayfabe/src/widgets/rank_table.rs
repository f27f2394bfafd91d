//! Rows of the current page.

use crate::i18n::Labels;
use kayfabe_rank::{PageView, Roster};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget};
use unicode_width::UnicodeWidthStr;

/// Renders the items a [`PageView`] marks as shown.
pub struct RankTable<'a> {
    roster: &'a Roster,
    view: &'a PageView,
    labels: &'a Labels,
}

impl<'a> RankTable<'a> {
    pub fn new(roster: &'a Roster, view: &'a PageView, labels: &'a Labels) -> Self {
        Self {
            roster,
            view,
            labels,
        }
    }

    fn promotion_label(&self, id: Option<u32>) -> &'a str {
        id.and_then(|id| self.roster.promotion(id))
            .map(|p| p.label())
            .unwrap_or("")
    }
}

impl Widget for RankTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray));

        let shown: Vec<_> = self
            .roster
            .items
            .iter()
            .zip(&self.view.items)
            .filter(|(_, vis)| vis.shown())
            .map(|(item, _)| item)
            .collect();

        if shown.is_empty() {
            Paragraph::new(Line::styled(
                self.labels.no_results,
                Style::default().fg(Color::DarkGray),
            ))
            .block(block)
            .render(area, buf);
            return;
        }

        let name_width = shown
            .iter()
            .map(|item| item.name.width())
            .max()
            .unwrap_or(0)
            .max(self.labels.name.width()) as u16;

        let header = Row::new([
            Cell::from(self.labels.rank),
            Cell::from(self.labels.name),
            Cell::from(self.labels.promotion),
            Cell::from(self.labels.score),
            Cell::from(self.labels.gimmicks),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = shown.iter().map(|item| {
            Row::new([
                Cell::from(format!("{:>3}", item.rank)),
                Cell::from(item.name.as_str()),
                Cell::from(self.promotion_label(item.promotion)),
                Cell::from(item.score.map(|s| s.to_string()).unwrap_or_default()),
                Cell::from(item.gimmicks.as_str())
                    .style(Style::default().fg(Color::DarkGray)),
            ])
        });

        Table::new(
            rows,
            [
                Constraint::Length(self.labels.rank.width().max(3) as u16),
                Constraint::Length(name_width),
                Constraint::Length(10),
                Constraint::Length(6),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .column_spacing(2)
        .block(block)
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::labels;
    use kayfabe_rank::{paginate, FilterState, Language, Promotion, RankItem};

    fn render(roster: &Roster, view: &PageView) -> String {
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        RankTable::new(roster, view, labels(Language::English)).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn roster() -> Roster {
        Roster::new(
            vec![Promotion {
                id: 1,
                name: "New Japan Pro-Wrestling".into(),
                abbreviation: Some("NJPW".into()),
            }],
            vec![
                RankItem::new(1, "Kazuchika Okada", "Rainmaker")
                    .with_promotion(1)
                    .with_score(4021),
                RankItem::new(2, "Minoru Suzuki", "King of Pro-Wrestling"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn shows_only_page_rows() {
        let r = roster();
        let view = paginate(&r, &FilterState::new().with_gimmick("rain"), 1, 10);
        let out = render(&r, &view);
        assert!(out.contains("Kazuchika Okada"));
        assert!(out.contains("NJPW"));
        assert!(out.contains("4021"));
        assert!(!out.contains("Minoru Suzuki"));
    }

    #[test]
    fn empty_page_shows_notice() {
        let r = roster();
        let view = paginate(&r, &FilterState::new(), 2, 10);
        assert!(render(&r, &view).contains("No wrestlers match"));
    }
}
