//! Reading journal domain model.
//!
//! # Responsibility
//! - Define the Book and Quote records shared by repositories, queries and
//!   persistence.
//! - Own the parsing of raw user text into typed, validated fields.
//!
//! # Invariants
//! - A Book is identified by its case-insensitive `(title, author)` key.
//! - A Quote references a Book by that key; the reference may dangle after
//!   the Book is deleted.

pub mod book;
pub mod quote;
