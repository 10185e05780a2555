//! SeaORM entity declarations. Each `Column` enum is the ordered column set
//! of its table and doubles as the SELECT / RETURNING projection.

pub mod book;
pub mod book_copy;
pub mod borrowed_book;
pub mod user;
