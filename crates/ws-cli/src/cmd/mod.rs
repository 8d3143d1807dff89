pub mod activate;
pub mod create;
pub mod list;
pub mod print;
