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

use std::{collections::HashSet, sync::Arc};

use log::{error, trace, warn};

use super::{
    NumberLengthType, PhoneNumberType, ValidationError,
    helper_constants::{MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN, NANPA_COUNTRY_CODE},
    helper_functions::{get_supported_types_for_metadata, test_number_length},
    phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
};
use crate::{
    asyoutypeformatter::AsYouTypeFormatter,
    i18n::RegionCode,
    interfaces::MatcherApi,
    metadata::{MetadataRepository, PhoneMetadata, PhoneNumberDesc},
    phonenumber::PhoneNumber,
    regex_based_matcher::RegexBasedMatcher,
    regex_util::{CachedMatch, RegexConsume},
    regexp_cache::{InvalidRegexError, RegexCache},
};

pub(super) type RegexResult<T> = std::result::Result<T, InvalidRegexError>;

/// Parses, formats and validates phone numbers against the numbering plans of
/// an injected [`MetadataRepository`].
///
/// The engine holds no process-wide state: every instance owns its
/// repository and shares only the [`RegexCache`] it was given. It is `Send`
/// and `Sync`, so one instance can serve many threads.
pub struct PhoneNumberUtil {
    /// An API for validation checking.
    pub(super) matcher_api: Box<dyn MatcherApi>,

    /// Helper class holding useful regular expressions and character mappings.
    pub(crate) reg_exps: PhoneNumberRegExpsAndMappings,

    /// Numbering plans, keyed by region and by calling code.
    pub(super) repository: Box<dyn MetadataRepository>,
}

impl PhoneNumberUtil {
    /// Creates an engine with its own regex cache of the default capacity.
    pub fn new(repository: impl MetadataRepository + 'static) -> Self {
        Self::with_regex_cache(repository, Arc::new(RegexCache::new()))
    }

    /// Creates an engine compiling metadata patterns through `regex_cache`,
    /// which may be shared with other engines.
    pub fn with_regex_cache(
        repository: impl MetadataRepository + 'static,
        regex_cache: Arc<RegexCache>,
    ) -> Self {
        Self {
            matcher_api: Box::new(RegexBasedMatcher::new(regex_cache.clone())),
            reg_exps: PhoneNumberRegExpsAndMappings::new(regex_cache),
            repository: Box::new(repository),
        }
    }

    /// Starts a new as-you-type session for numbers dialled from `region_code`.
    pub fn get_as_you_type_formatter(&self, region_code: &str) -> AsYouTypeFormatter<'_> {
        AsYouTypeFormatter::new(self, region_code)
    }

    pub fn get_supported_regions(&self) -> Vec<&str> {
        self.repository.get_supported_regions()
    }

    pub fn get_supported_global_network_calling_codes(&self) -> Vec<i32> {
        self.repository.get_supported_global_network_calling_codes()
    }

    pub fn get_supported_calling_codes(&self) -> Vec<i32> {
        self.repository.get_supported_calling_codes()
    }

    /// Types with metadata in `region_code`, `None` for unknown regions.
    pub fn get_supported_types_for_region(
        &self,
        region_code: &str,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self.repository.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code provided: {}", region_code);
            return None;
        };
        Some(get_supported_types_for_metadata(metadata))
    }

    pub fn get_supported_types_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self
            .repository
            .get_metadata_for_non_geographical_region(country_calling_code)
        else {
            warn!(
                "Unknown country calling code for a non-geographical entity provided: {}",
                country_calling_code
            );
            return None;
        };
        Some(get_supported_types_for_metadata(metadata))
    }

    /// Returns the calling code of `region_code`, or 0 for unknown regions.
    pub fn get_country_code_for_region(&self, region_code: &str) -> i32 {
        if !self.is_valid_region_code(region_code) {
            warn!("Invalid or missing region code ({}) provided.", region_code);
            return 0;
        }
        self.repository.get_country_code_for_region(region_code)
    }

    /// Returns the main region of `country_calling_code`, or the unknown
    /// region `"ZZ"` if the code is not registered.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.get_region_codes_for_country_calling_code(country_calling_code)
            .first()
            .map(String::as_str)
            .unwrap_or(RegionCode::get_unknown())
    }

    /// Regions using `country_calling_code`, main region first.
    pub fn get_region_codes_for_country_calling_code(&self, country_calling_code: i32) -> &[String] {
        self.repository
            .get_region_codes_for_country_code(country_calling_code)
    }

    /// Returns the region a number belongs to. Among regions sharing a
    /// calling code, the first one whose leading digits or number patterns
    /// fit the number wins; `"ZZ"` if none does.
    pub fn get_region_code_for_number(&self, phone_number: &PhoneNumber) -> &str {
        let country_calling_code = phone_number.country_code();
        let region_codes = self.get_region_codes_for_country_calling_code(country_calling_code);
        match region_codes {
            [] => {
                trace!("Missing/invalid country calling code ({})", country_calling_code);
                RegionCode::get_unknown()
            }
            [single] => single.as_str(),
            _ => self.get_region_code_for_number_from_region_list(phone_number, region_codes),
        }
    }

    fn get_region_code_for_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &'b [String],
    ) -> &'b str {
        let national_number = Self::get_national_significant_number(phone_number);
        for code in region_codes {
            let Some(metadata) = self.repository.get_metadata_for_region(code) else {
                continue;
            };
            if metadata.has_leading_digits() {
                match self.reg_exps.regexp_cache.prefix_regex(metadata.leading_digits()) {
                    Ok(regex) if regex.matches_start(&national_number) => return code.as_str(),
                    Ok(_) => {}
                    Err(err) => error!("Invalid leading digits of {}: {}", code, err),
                }
            } else if self.get_number_type_helper(&national_number, metadata)
                != PhoneNumberType::Unknown
            {
                return code.as_str();
            }
        }
        RegionCode::get_unknown()
    }

    /// Whether `region_code` is one of the regions of the North American
    /// Numbering Plan.
    pub fn is_nanpa_country(&self, region_code: &str) -> bool {
        self.get_region_codes_for_country_calling_code(NANPA_COUNTRY_CODE)
            .iter()
            .any(|region| region == region_code)
    }

    /// Returns the national dialling prefix of `region_code`, `None` if the
    /// region is unknown or has none. With `strip_non_digits` the `~` marking
    /// a wait for a dial tone is removed.
    pub fn get_ndd_prefix_for_region(
        &self,
        region_code: &str,
        strip_non_digits: bool,
    ) -> Option<String> {
        let Some(metadata) = self.repository.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({}) provided.", region_code);
            return None;
        };
        let national_prefix = metadata.national_prefix();
        if national_prefix.is_empty() {
            return None;
        }
        if strip_non_digits {
            Some(national_prefix.replace('~', ""))
        } else {
            Some(national_prefix.to_owned())
        }
    }

    pub(crate) fn is_valid_region_code(&self, region_code: &str) -> bool {
        self.repository.get_metadata_for_region(region_code).is_some()
    }

    pub(crate) fn has_valid_country_calling_code(&self, country_calling_code: i32) -> bool {
        !self
            .get_region_codes_for_country_calling_code(country_calling_code)
            .is_empty()
    }

    pub(crate) fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.repository.get_metadata_for_region(region_code)
    }

    pub(crate) fn get_metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<&PhoneMetadata> {
        if RegionCode::un001() == region_code {
            self.repository
                .get_metadata_for_non_geographical_region(country_calling_code)
        } else {
            self.repository.get_metadata_for_region(region_code)
        }
    }

    /// Returns the national significant number: the national number with
    /// its Italian leading zeros, without any national prefix.
    pub fn get_national_significant_number(phone_number: &PhoneNumber) -> String {
        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(phone_number.national_number());

        // If leading zero(s) have been set, we prefix this now. Note this is not a
        // national prefix. A negative count is treated as zero so we don't crash
        // on malicious input.
        if phone_number.italian_leading_zero() && phone_number.number_of_leading_zeros() > 0 {
            let zeros = "0".repeat(phone_number.number_of_leading_zeros() as usize);
            fast_cat::concat_str!(&zeros, national_number)
        } else {
            national_number.to_owned()
        }
    }

    /// Classifies a number. Numbers of unknown regions and numbers matching
    /// no pattern are [`PhoneNumberType::Unknown`].
    pub fn get_number_type(&self, phone_number: &PhoneNumber) -> PhoneNumberType {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self
            .get_metadata_for_region_or_calling_code(phone_number.country_code(), region_code)
        else {
            return PhoneNumberType::Unknown;
        };
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata)
    }

    pub(super) fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> PhoneNumberType {
        if !self.is_number_matching_desc(national_number, Some(&metadata.general_desc)) {
            trace!(
                "Number '{national_number}' type unknown - doesn't match general national number pattern"
            );
            return PhoneNumberType::Unknown;
        }
        if self.is_number_matching_desc(national_number, metadata.premium_rate.as_ref()) {
            trace!("Number '{national_number}' is a premium number.");
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, metadata.toll_free.as_ref()) {
            trace!("Number '{national_number}' is a toll-free number.");
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, metadata.shared_cost.as_ref()) {
            trace!("Number '{national_number}' is a shared cost number.");
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, metadata.voip.as_ref()) {
            trace!("Number '{national_number}' is a VOIP (Voice over IP) number.");
            return PhoneNumberType::VoIP;
        }
        if self.is_number_matching_desc(national_number, metadata.personal_number.as_ref()) {
            trace!("Number '{national_number}' is a personal number.");
            return PhoneNumberType::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, metadata.pager.as_ref()) {
            trace!("Number '{national_number}' is a pager number.");
            return PhoneNumberType::Pager;
        }
        if self.is_number_matching_desc(national_number, metadata.uan.as_ref()) {
            trace!("Number '{national_number}' is a UAN.");
            return PhoneNumberType::UAN;
        }
        if self.is_number_matching_desc(national_number, metadata.voicemail.as_ref()) {
            trace!("Number '{national_number}' is a voicemail number.");
            return PhoneNumberType::VoiceMail;
        }

        let is_fixed_line =
            self.is_number_matching_desc(national_number, Some(metadata.fixed_line_desc()));
        if is_fixed_line {
            if metadata.same_mobile_and_fixed_line_pattern() {
                trace!(
                    "Number '{national_number}': fixed-line and mobile patterns equal, \
                     number is fixed-line or mobile"
                );
                return PhoneNumberType::FixedLineOrMobile;
            } else if self.is_number_matching_desc(national_number, Some(metadata.mobile_desc())) {
                trace!(
                    "Number '{national_number}': Fixed-line and mobile patterns differ, but number is \
                     still fixed-line or mobile"
                );
                return PhoneNumberType::FixedLineOrMobile;
            }
            trace!("Number '{national_number}' is a fixed line number.");
            return PhoneNumberType::FixedLine;
        }
        // Otherwise, test to see if the number is mobile. Only do this if certain
        // that the patterns for mobile and fixed line aren't the same.
        if !metadata.same_mobile_and_fixed_line_pattern()
            && self.is_number_matching_desc(national_number, Some(metadata.mobile_desc()))
        {
            trace!("Number '{national_number}' is a mobile number.");
            return PhoneNumberType::Mobile;
        }
        trace!(
            "Number '{national_number}' type unknown - doesn't match any specific number type pattern."
        );
        PhoneNumberType::Unknown
    }

    pub(super) fn is_number_matching_desc(
        &self,
        national_number: &str,
        number_desc: Option<&PhoneNumberDesc>,
    ) -> bool {
        let Some(number_desc) = number_desc else {
            return false;
        };
        // Check if any possible number lengths are present; if so, we use them to
        // avoid checking the validation pattern if they don't match. If they are
        // absent, this means they match the general description, which we have
        // already checked before checking a specific number type.
        let actual_length = national_number.len() as i32;
        if !number_desc.possible_length.is_empty()
            && !number_desc.possible_length.contains(&actual_length)
        {
            return false;
        }
        self.matcher_api
            .match_national_number(national_number, number_desc, false)
    }

    /// Whether the number is a valid number of the region it belongs to. This
    /// checks length and digit patterns, not whether the number is in use.
    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        self.is_valid_number_for_region(phone_number, region_code)
    }

    /// Whether the number is valid for `region_code` specifically. A number
    /// valid in one NANPA region is not valid for another one unless its
    /// patterns allow it there as well.
    pub fn is_valid_number_for_region(&self, phone_number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return false;
        };
        if RegionCode::un001() != region_code && country_code != metadata.country_code() {
            // Either the region code was invalid, or the country calling code for
            // this number does not match that of the region code.
            return false;
        }
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata)
            != PhoneNumberType::Unknown
    }

    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    /// Checks the length of the number against the lengths of its region,
    /// which is much faster than full validation.
    pub fn is_possible_number_with_reason(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<NumberLengthType, ValidationError> {
        self.is_possible_number_for_type_with_reason(phone_number, PhoneNumberType::Unknown)
    }

    /// Like [`is_possible_number_with_reason`](Self::is_possible_number_with_reason)
    /// but against the lengths of one number type.
    pub fn is_possible_number_for_type_with_reason(
        &self,
        phone_number: &PhoneNumber,
        phone_number_type: PhoneNumberType,
    ) -> Result<NumberLengthType, ValidationError> {
        let national_number = Self::get_national_significant_number(phone_number);
        let country_code = phone_number.country_code();
        // Note: For regions that share a country calling code, like NANPA numbers,
        // we just use the rules from the default region (US in this case) since the
        // get_region_code_for_number will not work if the number is possible but
        // not valid. There is in fact one country calling code (290) where the
        // possible number pattern differs between various regions (Saint Helena
        // and Tristan da Cuñha), but this is handled by putting all possible
        // lengths for any country with this country calling code in the metadata
        // for the default region in this case.
        if !self.has_valid_country_calling_code(country_code) {
            return Err(ValidationError::InvalidCountryCode);
        }
        let region_code = self.get_region_code_for_country_code(country_code);
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            // registered calling code without a numbering plan
            return Self::test_number_length_without_metadata(&national_number);
        };
        test_number_length(&national_number, metadata, phone_number_type)
    }

    fn test_number_length_without_metadata(
        national_number: &str,
    ) -> Result<NumberLengthType, ValidationError> {
        let length = national_number.len();
        if length < MIN_LENGTH_FOR_NSN {
            Err(ValidationError::TooShort)
        } else if length > MAX_LENGTH_FOR_NSN {
            Err(ValidationError::TooLong)
        } else {
            Ok(NumberLengthType::IsPossible)
        }
    }

    /// Parses `phone_number` as dialled from `region_dialing_from` and checks
    /// whether the result is possible. Unparseable input is not possible.
    pub fn is_possible_number_for_string(
        &self,
        phone_number: &str,
        region_dialing_from: &str,
    ) -> bool {
        match self.parse(phone_number, region_dialing_from) {
            Ok(number) => self.is_possible_number(&number),
            Err(err) => {
                trace!("Could not parse '{}': {}", phone_number, err);
                false
            }
        }
    }

    /// Whether the number can be dialled from outside its region. Numbers of
    /// unknown regions and of non-geographical entities are assumed to be.
    pub fn can_be_internationally_dialled(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self.repository.get_metadata_for_region(region_code) else {
            // Note numbers belonging to non-geographical entities (e.g. +800 numbers)
            // are always internationally diallable, and will be caught here.
            return true;
        };
        let national_significant_number = Self::get_national_significant_number(phone_number);
        !self.is_number_matching_desc(
            &national_significant_number,
            metadata.no_international_dialling.as_ref(),
        )
    }

    /// Drops trailing digits of an invalid number until it becomes valid.
    ///
    /// Returns the number itself if it is already valid, the truncated copy
    /// if truncation succeeded, and `None` if the number became too short
    /// without ever validating. The input is never modified.
    pub fn truncate_too_long_number(&self, phone_number: &PhoneNumber) -> Option<PhoneNumber> {
        if self.is_valid_number(phone_number) {
            return Some(phone_number.clone());
        }
        let mut number_copy = phone_number.clone();
        let mut national_number = phone_number.national_number();
        loop {
            national_number /= 10;
            number_copy = number_copy.with_national_number(national_number);
            if national_number == 0
                || self.is_possible_number_with_reason(&number_copy)
                    == Err(ValidationError::TooShort)
            {
                return None;
            }
            if self.is_valid_number(&number_copy) {
                trace!(
                    "Truncated {} to {}",
                    phone_number.national_number(),
                    national_number
                );
                return Some(number_copy);
            }
        }
    }
}
