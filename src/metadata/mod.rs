mod fields;
mod keywords;
mod models;

pub use fields::FieldAccessor;
pub use keywords::KeywordSet;
pub use models::{PhotoMetadata, SHUTTERSTOCK_HEADER};
