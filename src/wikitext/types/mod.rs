//! Document model types.

pub mod document;
pub mod fields;
pub mod image;
pub mod links;
pub mod list;
pub mod paragraph;
pub mod section;
pub mod sentence;
pub mod table;
pub mod templates;

pub use document::{Document, RedirectTarget, SectionView};
pub use fields::Fields;
pub use image::Image;
pub use links::Link;
pub use list::List;
pub use paragraph::Paragraph;
pub use section::Section;
pub use sentence::{Formatting, Sentence};
pub use table::Table;
pub use templates::{Coordinate, Infobox, Reference, Template, TemplateArgument};
