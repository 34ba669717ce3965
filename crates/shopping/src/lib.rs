pub mod list;

pub use list::{ShoppingItem, ShoppingListService};
