// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError, // will never be produced
    UnknownSpecificTopic,
    DuplicateIndicator,
    DuplicateSpecificTopic,
    MissingColumn,
    MissingPrimaryCategory,
    BadIndicatorValue,
    BadColor,
    Generic,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            UnknownSpecificTopic => "unknown_specific_topic",
            DuplicateIndicator => "duplicate_indicator",
            DuplicateSpecificTopic => "duplicate_specific_topic",
            MissingColumn => "missing_column",
            MissingPrimaryCategory => "missing_primary_category",
            BadIndicatorValue => "bad_indicator_value",
            BadColor => "bad_color",
            Generic => "generic",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The taxonomy or dataset shape doesn't match what was configured;
    /// reported before any aggregation happens.
    Config,
    /// A row in the dataset couldn't be interpreted.
    Input,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Config => "config",
            ErrorKind::Input => "input",
        };
        match &self.details {
            Some(details) => write!(f, "{}: {} -- {}", kind, self.code, details),
            None => write!(f, "{}: {}", kind, self.code),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! config_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Config, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Config, ErrorCode::$code, None))
    }};
}

#[macro_export]
macro_rules! input_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Input, ErrorCode::$code, Some($str)))
    }};
}
