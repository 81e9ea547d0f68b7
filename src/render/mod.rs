pub mod dialog;
pub mod table;
