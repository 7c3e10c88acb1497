// src/sb/mod.rs
//! Scripture Burrito (SB) output format
//!
//! An SB bundle is a directory with a `metadata.json` and an `ingredients/`
//! tree; every ingredient is listed in the metadata with its checksum,
//! size, MIME type and optional book scope.

pub mod ingredient;
pub mod metadata;

pub use ingredient::{
    Checksum, Ingredient, Scope, compute_ingredient, compute_ingredient_with_scope,
    mime_type_for_ext, single_book_scope,
};
pub use metadata::{
    CopyrightStyle, Flavor, IdAuthority, LocalizedName, METADATA_FILE, Metadata,
    build_base_metadata, build_copyright,
};
