//! Admin form controllers
//!
//! An edit page holds a local copy of a record in a form struct. List fields
//! (features, tags, ...) are edited through the pure [`apply_edit`] reducer,
//! and the accumulated state is submitted through [`EditSession`], which owns
//! the load/edit/submit lifecycle:
//!
//! ```text
//!   Loading ──loaded()──▶ Editing ──submit()──▶ Submitting ──ok──▶ Completed
//!                            ▲                      │
//!                            └────────error─────────┘
//! ```

pub mod array_field;
pub mod blog_post;
pub mod listing;
pub mod product;
pub mod session;

pub use array_field::{apply_edit, can_remove, compact, editable_list, ArrayEdit};
pub use blog_post::BlogPostForm;
pub use listing::search_blog_posts;
pub use product::{ProductForm, ProductListField};
pub use session::{EditSession, FormPhase, SubmitOutcome};

/// Admin listing pages forms return to after a successful submit
pub const PRODUCTS_LISTING: &str = "/admin/products";
pub const BLOG_LISTING: &str = "/admin/blog";
