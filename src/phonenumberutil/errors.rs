// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::num::ParseIntError;

use thiserror::Error;

use crate::regexp_cache::InvalidRegexError;

/// Reasons [`PhoneNumberUtil::parse`](crate::PhoneNumberUtil::parse) can
/// reject its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// No calling code could be determined: the default region is unknown and
    /// the number has no leading plus, or the digits after the plus or IDD do
    /// not start with a registered calling code.
    #[error("Invalid country code")]
    InvalidCountryCode,
    #[error("Not a number: {0}")]
    NotANumber(#[from] NotANumberError),
    /// Only an international prefix or a plus sign was present.
    #[error("Too short after idd")]
    TooShortAfterIdd,
    #[error("Too short nsn")]
    TooShortNsn,
    /// The raw input or the resulting national significant number exceeds
    /// the sanity bounds.
    #[error("Too long")]
    TooLong,
    /// A pattern in the injected metadata failed to compile.
    #[error("{0}")]
    InvalidMetadata(#[from] InvalidRegexError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotANumberError {
    #[error("Number not matched a valid number pattern")]
    NotMatchedValidNumberPattern,
    #[error("Invalid phone context")]
    InvalidPhoneContext,
    #[error("{0}")]
    FailedToParseNumberAsInt(#[from] ParseIntError),
}

/// Failure half of a possible-length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// The number has an invalid country calling code.
    #[error("The number has an invalid country calling code")]
    InvalidCountryCode,
    /// The number is shorter than all valid numbers for this region.
    #[error("The number is shorter than all valid numbers for this region")]
    TooShort,
    /// The length lies between the shortest and the longest valid lengths of
    /// the region without being one of them. Also returned when the region has
    /// no numbers of the requested type at all.
    #[error("The number length does not match any valid length for this region")]
    InvalidLength,
    /// The number is longer than all valid numbers for this region.
    #[error("The number is longer than all valid numbers for this region")]
    TooLong,
}

impl From<ParseIntError> for ParseError {
    fn from(value: ParseIntError) -> Self {
        NotANumberError::FailedToParseNumberAsInt(value).into()
    }
}
