pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod session;
pub mod users;
