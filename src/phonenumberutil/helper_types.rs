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

use crate::CountryCodeSource;

/// A normalized number together with how its international marker, if any,
/// was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumberWithCountryCodeSource {
    pub phone_number: String,
    pub country_code_source: CountryCodeSource,
}

impl PhoneNumberWithCountryCodeSource {
    pub fn new(phone_number: String, country_code_source: CountryCodeSource) -> Self {
        Self {
            phone_number,
            country_code_source,
        }
    }
}

/// Outcome of calling code extraction. A `country_code` of 0 means no
/// calling code was found in the number and `national_number` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCountryCode {
    pub country_code: i32,
    pub national_number: String,
    pub country_code_source: CountryCodeSource,
}

/// A national number after its national prefix was removed, with the carrier
/// code the prefix carried, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedNationalPrefix {
    pub national_number: String,
    pub carrier_code: Option<String>,
}
