//! # Manuscript Core
//!
//! Parser and chapter model for long-form manuscripts written with groff
//! `mom` macros.
//!
//! A manuscript is lexed into a flat sequence of [`Token`]s, one per
//! non-empty line. [`Manuscript`] answers metadata queries over that sequence
//! and carves it into [`Chapter`] views without copying.
//!
//! ## Quick Start
//!
//! ```rust
//! use manuscript_core::Manuscript;
//!
//! let input = ".DOCTITLE \"Dracula\"\n.CHAPTER_TITLE \"One\"\n.PP\nIt was night.\n.COLLATE\n";
//! let ms = Manuscript::parse(input);
//!
//! assert_eq!(ms.doc_title(), "Dracula");
//!
//! let chapters = ms.chapters::<&str>(&[]).unwrap();
//! assert_eq!(chapters[0].title(), "One");
//! assert_eq!(chapters[0].word_count(), 3);
//! ```
//!
//! ## Selecting chapters
//!
//! Selectors match a chapter's ordinal first, then its title. Chapters keep
//! their original ordinal:
//!
//! ```rust
//! use manuscript_core::Manuscript;
//!
//! let ms = Manuscript::parse(".CHAPTER_TITLE One\na\n.COLLATE\n.CHAPTER_TITLE Two\nb\n");
//! let chapters = ms.chapters(&["Two"]).unwrap();
//!
//! assert_eq!(chapters.len(), 1);
//! assert_eq!(chapters[0].count(), 2);
//! ```

pub mod chapter;
pub mod cursor;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod manuscript;
pub mod render;
pub mod scanner;
pub mod token;

pub use chapter::Chapter;
pub use error::{Error, Result};
pub use manuscript::Manuscript;
pub use scanner::Scanner;
pub use token::{Macro, Token};
