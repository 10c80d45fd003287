macro_rules! invalid_input {
    ($e:expr) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidInput, $e))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidInput, format!($fmt, $($arg)+)))
    };
}

macro_rules! invalid_argument {
    ($e:expr) => {
        return Err($crate::error::CabError::InvalidArgument($e.to_string()))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::CabError::InvalidArgument(format!($fmt, $($arg)+)))
    };
}

macro_rules! structural_violation {
    ($e:expr) => {
        return Err($crate::error::CabError::StructuralViolation($e.to_string()))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::CabError::StructuralViolation(format!($fmt, $($arg)+)))
    };
}
