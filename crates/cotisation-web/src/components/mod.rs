mod history_table;
mod info_row;
mod layout;
mod stat_card;

pub use history_table::ContributionsTable;
pub use info_row::{EditableRow, InfoRow};
pub use layout::{DashboardLayout, NavItem, initials};
pub use stat_card::StatCard;
