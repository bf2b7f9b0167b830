//! Budget usage bar for the stats line

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Eighth-block characters for the partially filled cell
const PARTIAL: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];
const FULL: char = '█';

/// A horizontal bar showing planned cost against the budget
pub struct BudgetBar {
    /// Planned spend
    spent: f64,
    /// Trip budget; zero means no budget set
    budget: f64,
    /// Style while within budget
    style: Style,
    /// Style once spend exceeds the budget
    over_style: Style,
}

impl BudgetBar {
    pub fn new(spent: f64, budget: f64) -> Self {
        Self {
            spent,
            budget,
            style: Style::default().fg(Color::Green),
            over_style: Style::default().fg(Color::Red),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn is_over(&self) -> bool {
        self.budget > 0.0 && self.spent > self.budget
    }

    /// Share of the budget used, clamped to 0..=1
    fn ratio(&self) -> f64 {
        if self.budget <= 0.0 {
            return 0.0;
        }
        (self.spent / self.budget).clamp(0.0, 1.0)
    }

    /// The bar as characters for the given width
    fn cells(&self, width: usize) -> Vec<char> {
        let eighths = (self.ratio() * width as f64 * 8.0).round() as usize;
        let full = eighths / 8;
        let mut cells = vec![FULL; full.min(width)];
        if full < width {
            cells.push(PARTIAL[eighths % 8]);
        }
        cells.resize(width, ' ');
        cells
    }
}

impl Widget for BudgetBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let style = if self.is_over() {
            self.over_style
        } else {
            self.style
        };

        for (i, c) in self.cells(area.width as usize).into_iter().enumerate() {
            let x = area.x + i as u16;
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(c).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_when_no_budget() {
        let bar = BudgetBar::new(100.0, 0.0);
        assert_eq!(bar.ratio(), 0.0);
        assert!(bar.cells(4).iter().all(|c| *c == ' '));
        assert!(!bar.is_over());
    }

    #[test]
    fn test_half_budget_fills_half() {
        let bar = BudgetBar::new(50.0, 100.0);
        assert_eq!(bar.cells(4), vec![FULL, FULL, ' ', ' ']);
    }

    #[test]
    fn test_partial_cell_uses_eighths() {
        let bar = BudgetBar::new(25.0, 100.0);
        assert_eq!(bar.cells(2), vec!['▌', ' ']);
    }

    #[test]
    fn test_over_budget_clamps_and_flags() {
        let bar = BudgetBar::new(150.0, 100.0).style(Style::default().fg(Color::Blue));
        assert!(bar.is_over());
        assert_eq!(bar.cells(3), vec![FULL, FULL, FULL]);
    }

    #[test]
    fn test_render_writes_into_buffer() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        BudgetBar::new(100.0, 100.0).render(area, &mut buf);
        assert_eq!(buf.cell((3, 0)).unwrap().symbol(), "█");
    }
}
