//! UI Components
//!
//! Leptos components for the list card and the item dialog.

mod error_banner;
mod item_dialog;
mod purchase_row;
mod shopping_list;

pub use error_banner::ErrorBanner;
pub use item_dialog::ItemDialog;
pub use purchase_row::PurchaseRow;
pub use shopping_list::ShoppingList;
