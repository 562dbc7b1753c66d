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

//! Parsing, validation, classification and formatting of international
//! phone numbers.
//!
//! All operations live on [`PhoneNumberUtil`], which reads numbering plans
//! from an injected [`MetadataRepository`]. [`AsYouTypeFormatter`] formats a
//! number while it is being typed.

mod asyoutypeformatter;
mod interfaces;
mod metadata;
mod phonenumber;
mod phonenumberutil;
mod regex_based_matcher;
mod regexp_cache;
pub mod i18n;
pub(crate) mod regex_util;

#[cfg(test)]
mod tests;

pub use asyoutypeformatter::{AsYouTypeFormatter, FormatterState};
pub use metadata::{
    InMemoryMetadataRepository, MetadataRepository, NumberFormat, PhoneMetadata, PhoneNumberDesc,
};
pub use phonenumber::{CountryCodeSource, PhoneNumber};
pub use phonenumberutil::{
    ExtractedCountryCode, MatchType, NotANumberError, NumberLengthType, ParseError,
    PhoneNumberFormat, PhoneNumberType, PhoneNumberUtil, PhoneNumberWithCountryCodeSource,
    StrippedNationalPrefix, ValidationError,
};
pub use regexp_cache::{InvalidRegexError, RegexCache};
