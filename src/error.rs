use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejects non-finite values and values `<= 0`.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    } else if value <= 0.0 {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be greater than zero",
        })
    } else {
        Ok(value)
    }
}

/// Rejects non-finite values and values `< 0`.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    } else if value < 0.0 {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must not be negative",
        })
    } else {
        Ok(value)
    }
}
