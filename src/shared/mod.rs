pub mod constants;
pub mod format;
pub mod templates;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
