pub mod budget_bar;

pub use budget_bar::BudgetBar;
