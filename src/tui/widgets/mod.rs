//! Reusable widgets shared by the screens

pub mod logo;
pub mod shortcuts;
pub mod table;
