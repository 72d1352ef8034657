use tui::layout::{Constraint, Layout, Rect, Size};

pub const STAT_CARDS_HEIGHT: u16 = 3;
pub const SEARCH_BAR_HEIGHT: u16 = 3;
pub const LEGEND_HEIGHT: u16 = 1;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub stat_cards: [Rect; 4],
    pub search_bar: Rect,
    pub main: Rect,
    pub legend: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        Self::from_rect(Rect::new(0, 0, size.width, size.height))
    }

    pub fn update(&mut self, area: Rect) {
        *self = Self::from_rect(area);
    }

    fn from_rect(area: Rect) -> Self {
        let [cards, search, main, legend] = Layout::vertical([
            Constraint::Length(STAT_CARDS_HEIGHT),
            Constraint::Length(SEARCH_BAR_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(LEGEND_HEIGHT),
        ])
        .areas(area);

        LayoutAreas {
            stat_cards: Self::split_stat_cards(cards),
            search_bar: search,
            main,
            legend,
        }
    }

    fn split_stat_cards(area: Rect) -> [Rect; 4] {
        Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .areas(area)
    }

    /// Split the main area between the table and the expanded detail
    /// panel: side by side on wide terminals, stacked otherwise.
    pub fn split_for_detail(main: Rect) -> (Rect, Rect) {
        if main.width >= 100 {
            let [table, detail] =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .areas(main);
            (table, detail)
        } else {
            let [table, detail] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(12)]).areas(main);
            (table, detail)
        }
    }
}
