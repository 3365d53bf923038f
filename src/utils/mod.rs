#[cfg(any(test, doctest))]
pub mod test_helpers;
