//! Profile document assembly.
//!
//! [`ProfileDocumentBuilder`] starts from the technology skeleton in
//! [`template`] and grows it one classified element at a time. The result is
//! a [`ProfileDocument`], saved as a single XML file.

pub mod builder;
pub mod document;
pub mod identity;
pub mod template;
pub mod xml;

pub use builder::ProfileDocumentBuilder;
pub use document::ProfileDocument;
pub use identity::ProfileIdentity;
