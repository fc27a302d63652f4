pub mod history;
pub mod inventory;
pub mod modal;
pub mod overview;
