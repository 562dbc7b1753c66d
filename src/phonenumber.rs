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

use std::hash::{Hash, Hasher};

/// How the calling code of a parsed number was obtained. Only recorded by
/// [`PhoneNumberUtil::parse_and_keep_raw_input`](crate::PhoneNumberUtil::parse_and_keep_raw_input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountryCodeSource {
    #[default]
    Unspecified,
    /// `+41 44 668 1800`
    FromNumberWithPlusSign,
    /// `011 41 44 668 1800`, dialled from the US
    FromNumberWithIdd,
    /// `41 44 668 1800`, the calling code without plus or IDD
    FromNumberWithoutPlusSign,
    /// `044 668 1800`, the calling code of the default region was assumed
    FromDefaultCountry,
}

/// An immutable phone number value.
///
/// Optional fields are tri-state: unset, set to the default, or set to another
/// value. Comparison treats an unset field like one explicitly set to its
/// default, except for the preferred domestic carrier code, where an
/// explicit empty string is different from "unset". The leading zero count
/// only takes part while the leading zero flag is set.
///
/// New values are derived with the `with_*`/`without_*` methods, which
/// consume `self` and return the modified copy.
#[derive(Debug, Clone, Default)]
pub struct PhoneNumber {
    country_code: Option<i32>,
    national_number: Option<u64>,
    extension: Option<String>,
    italian_leading_zero: Option<bool>,
    number_of_leading_zeros: Option<i32>,
    raw_input: Option<String>,
    country_code_source: Option<CountryCodeSource>,
    preferred_domestic_carrier_code: Option<String>,
}

impl PhoneNumber {
    pub fn new(country_code: i32, national_number: u64) -> Self {
        Self {
            country_code: Some(country_code),
            national_number: Some(national_number),
            ..Default::default()
        }
    }

    pub fn country_code(&self) -> i32 {
        self.country_code.unwrap_or(0)
    }

    pub fn has_country_code(&self) -> bool {
        self.country_code.is_some()
    }

    /// The national significant number without its leading zeros.
    pub fn national_number(&self) -> u64 {
        self.national_number.unwrap_or(0)
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or_default()
    }

    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.unwrap_or(false)
    }

    /// Meaningful only when [`italian_leading_zero`](Self::italian_leading_zero)
    /// is set.
    pub fn number_of_leading_zeros(&self) -> i32 {
        self.number_of_leading_zeros.unwrap_or(1)
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn raw_input(&self) -> &str {
        self.raw_input.as_deref().unwrap_or_default()
    }

    pub fn has_country_code_source(&self) -> bool {
        self.country_code_source.is_some()
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source.unwrap_or_default()
    }

    pub fn has_preferred_domestic_carrier_code(&self) -> bool {
        self.preferred_domestic_carrier_code.is_some()
    }

    pub fn preferred_domestic_carrier_code(&self) -> &str {
        self.preferred_domestic_carrier_code
            .as_deref()
            .unwrap_or_default()
    }

    pub fn with_country_code(mut self, country_code: i32) -> Self {
        self.country_code = Some(country_code);
        self
    }

    pub fn with_national_number(mut self, national_number: u64) -> Self {
        self.national_number = Some(national_number);
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn without_extension(mut self) -> Self {
        self.extension = None;
        self
    }

    pub fn with_italian_leading_zero(mut self, italian_leading_zero: bool) -> Self {
        self.italian_leading_zero = Some(italian_leading_zero);
        self
    }

    pub fn with_number_of_leading_zeros(mut self, number_of_leading_zeros: i32) -> Self {
        self.number_of_leading_zeros = Some(number_of_leading_zeros);
        self
    }

    pub fn with_raw_input(mut self, raw_input: impl Into<String>) -> Self {
        self.raw_input = Some(raw_input.into());
        self
    }

    pub fn with_country_code_source(mut self, country_code_source: CountryCodeSource) -> Self {
        self.country_code_source = Some(country_code_source);
        self
    }

    pub fn without_country_code_source(mut self) -> Self {
        self.country_code_source = None;
        self
    }

    pub fn with_preferred_domestic_carrier_code(mut self, carrier_code: impl Into<String>) -> Self {
        self.preferred_domestic_carrier_code = Some(carrier_code.into());
        self
    }

    pub fn without_preferred_domestic_carrier_code(mut self) -> Self {
        self.preferred_domestic_carrier_code = None;
        self
    }

    /// Keeps only the fields that identify the number itself, dropping the
    /// ones describing how it was entered: raw input, calling code source and
    /// carrier code.
    pub fn core_fields_only(&self) -> Self {
        let mut core = Self {
            country_code: self.country_code,
            national_number: self.national_number,
            extension: self.extension.clone(),
            ..Default::default()
        };
        if self.italian_leading_zero() {
            core.italian_leading_zero = Some(true);
            // only relevant if there are leading zeros at all
            core.number_of_leading_zeros = self.number_of_leading_zeros;
        }
        core
    }
}

impl PhoneNumber {
    /// The zero count only means something while the leading zero flag is set.
    fn significant_leading_zeros(&self) -> Option<i32> {
        self.italian_leading_zero()
            .then(|| self.number_of_leading_zeros())
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.country_code() == other.country_code()
            && self.national_number() == other.national_number()
            && self.extension() == other.extension()
            && self.italian_leading_zero() == other.italian_leading_zero()
            && self.significant_leading_zeros() == other.significant_leading_zeros()
            && self.raw_input() == other.raw_input()
            && self.country_code_source() == other.country_code_source()
            && self.preferred_domestic_carrier_code == other.preferred_domestic_carrier_code
    }
}

impl Eq for PhoneNumber {}

impl Hash for PhoneNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.country_code().hash(state);
        self.national_number().hash(state);
        self.extension().hash(state);
        self.italian_leading_zero().hash(state);
        self.significant_leading_zeros().hash(state);
        self.raw_input().hash(state);
        self.country_code_source().hash(state);
        self.preferred_domestic_carrier_code.hash(state);
    }
}
