pub mod budget;
pub mod expense;
pub mod user;

pub use budget::{Budget, BudgetCheckResult};
pub use expense::{Expense, ExpenseUpdate, NewExpense};
pub use user::User;
