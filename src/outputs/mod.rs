//! Output generation for the rendered digest.
//!
//! One run produces one Markdown digest:
//!
//! ```text
//! output_dir/
//! └── news_digest_20260805_143005.md
//! ```
//!
//! The same document is echoed to the console, so a digest is useful even
//! when the operator never opens the file.

pub mod markdown;
