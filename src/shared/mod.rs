pub mod constants;
pub mod relations;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
