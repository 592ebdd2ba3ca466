use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};
use tracing::error;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct PinError {
    msg: String,
}
impl PinError {
    pub fn new(msg: &str) -> PinError {
        PinError {
            msg: msg.to_string(),
        }
    }
    pub fn msg(&self) -> &str {
        &self.msg
    }
}
impl Display for PinError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}
impl Error for PinError {}
impl From<&str> for PinError {
    fn from(value: &str) -> Self {
        PinError::new(value)
    }
}
/// Pinpoint's result type with [`PinError`](PinError) as error type.
pub type PinResult<U> = Result<U, PinError>;

pub fn trace_ok_err<T, E>(x: Result<T, E>) -> Option<T>
where
    E: Debug,
{
    match x {
        Ok(x) => Some(x),
        Err(e) => {
            error!("{e:?}");
            None
        }
    }
}

/// Creates a [`PinError`](PinError) with a formatted message.
/// ```rust
/// # use std::error::Error;
/// use pinlib::{pinerr, {result::PinError}};
/// # fn main() -> Result<(), Box<dyn Error>> {
/// assert_eq!(pinerr!("some error {}", 1), PinError::new(format!("some error {}", 1).as_str()));
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! pinerr {
    ($s:literal) => {
        $crate::result::PinError::new(format!($s).as_str())
    };
    ($s:literal, $( $exps:expr ),*) => {
        $crate::result::PinError::new(format!($s, $($exps,)*).as_str())
    }
}

pub fn to_pin<E: Debug>(e: E) -> PinError {
    pinerr!(
        "original error type is '{:?}', error message is '{:?}'",
        std::any::type_name::<E>(),
        e
    )
}
