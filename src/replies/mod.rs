//! Suggested reply handling: tone variants and the no-reply suppression rule.

pub mod policy;
pub mod variants;

pub use policy::{LabeledVariant, NO_REPLY_MARKER, is_no_reply, select_variants};
pub use variants::{ReplyVariantSet, generate_variants};
