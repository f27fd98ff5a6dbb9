use rail_result::Outcome;

/// `Ok` maps to `Outcome::Ok`, `Err` to `Outcome::Error`.
pub fn from_external_result<T, E>(result: Result<T, E>) -> Outcome<T, E> {
    match result {
        Ok(value) => Outcome::Ok(value),
        Err(error) => Outcome::Error(error),
    }
}

/// Inverse of [`from_external_result`]. This is also how a caller opts into
/// `?` propagation for an `Outcome`.
pub fn to_external_result<T, E>(outcome: Outcome<T, E>) -> Result<T, E> {
    match outcome {
        Outcome::Ok(value) => Ok(value),
        Outcome::Error(error) => Err(error),
    }
}
