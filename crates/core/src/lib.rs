pub mod dom;
pub mod css;
pub mod model;
pub mod compile;
pub mod store;
pub mod config;
pub mod error;

pub use config::CompileConfig;
pub use error::{Error, Result};
use model::BookModel;

/// Compile an HTML document and its stylesheet into a page model with the
/// default page geometry and color table.
/// This is the primary entry point for folio-core.
pub fn compile(html: &str, css: &str) -> Result<BookModel> {
    compile::compile_with_config(html, css, &CompileConfig::default())
}
