pub mod fixtures;

use jsonsel::Document;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Installs the test logger and decodes the bookstore document.
pub fn bookstore() -> Result<Document, Box<dyn std::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();
    Ok(Document::from_slice(fixtures::BOOKSTORE.as_bytes())?)
}
