pub mod extractor;
pub mod jwt;
pub mod pagination;
pub mod test_utils;
