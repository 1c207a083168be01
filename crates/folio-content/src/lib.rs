//! Content model for the folio portfolio site.
//!
//! Types mirror the records held by the headless content store, the GraphQL
//! queries that select them, and the rich-text renderer used for project
//! descriptions.

pub mod model;
pub mod queries;
pub mod rich_text;

pub use model::{
    Asset, Collection, Experience, GalleryImage, Lookup, PortfolioDetailData, PortfolioItem,
    PortfolioListData, PortfolioSummary, Skill, SkillsData,
};
pub use rich_text::{render_document, RichTextDocument, RichTextError, RichTextNode};
