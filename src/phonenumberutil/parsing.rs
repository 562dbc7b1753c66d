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

use log::trace;
use regex::Regex;

use super::{
    NumberLengthType, ValidationError,
    errors::{NotANumberError, ParseError},
    helper_constants::{
        MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN,
        PLUS_SIGN, RFC3966_ISDN_SUBADDRESS, RFC3966_PHONE_CONTEXT, RFC3966_PREFIX,
    },
    helper_functions::{normalize_digits, normalize_helper, test_number_length_with_unknown_type},
    helper_types::{ExtractedCountryCode, PhoneNumberWithCountryCodeSource, StrippedNationalPrefix},
    phonenumberutil::{PhoneNumberUtil, RegexResult},
};
use crate::{
    metadata::PhoneMetadata,
    phonenumber::{CountryCodeSource, PhoneNumber},
    regex_util::{CachedMatch, RegexConsume},
};

impl PhoneNumberUtil {
    /// Normalizes a string of characters representing a phone number.
    ///
    /// Punctuation is stripped. For vanity numbers (at least three letters)
    /// letters are converted to their keypad digits; otherwise they are
    /// stripped too. Digits of any script become ASCII digits.
    pub fn normalize(&self, phone_number: &str) -> String {
        if self.reg_exps.valid_alpha_phone_pattern.is_match(phone_number) {
            let ascii_digits: String = dec_from_char::normalize_decimals(phone_number).into();
            normalize_helper(&self.reg_exps.alpha_phone_mappings, true, &ascii_digits)
        } else {
            normalize_digits(phone_number)
        }
    }

    /// Keeps only the digits of `phone_number`, converted to ASCII.
    pub fn normalize_digits_only(phone_number: &str) -> String {
        normalize_digits(phone_number)
    }

    /// Keeps only the characters that are dialled: ASCII digits, `+`, `*`
    /// and `#`.
    pub fn normalize_diallable_chars_only(&self, phone_number: &str) -> String {
        normalize_helper(&self.reg_exps.diallable_char_mappings, true, phone_number)
    }

    /// Replaces letters with their keypad digits, leaving everything else
    /// as is.
    pub fn convert_alpha_characters_in_number(&self, phone_number: &str) -> String {
        normalize_helper(&self.reg_exps.alpha_phone_mappings, false, phone_number)
    }

    /// Whether `number` is a viable vanity number such as `1800 MICROSOFT`.
    pub fn is_alpha_number(&self, number: &str) -> bool {
        if !self.is_viable_phone_number(number) {
            // Number is too short, or doesn't match the basic phone number pattern.
            return false;
        }
        let stripped_number = self
            .maybe_strip_extension(number)
            .map(|(number, _)| number)
            .unwrap_or(number);
        self.reg_exps
            .valid_alpha_phone_pattern
            .is_match(stripped_number)
    }

    /// Checks to see if the string of characters could possibly be a phone
    /// number at all. At the moment, checks to see that the string begins with
    /// at least 2 digits, ignoring any punctuation commonly found in phone
    /// numbers. This method does not require the number to be normalized in
    /// advance, but does assume that leading non-number symbols have been
    /// removed, such as by [`extract_possible_number`](Self::extract_possible_number).
    pub fn is_viable_phone_number(&self, number: &str) -> bool {
        if number.chars().count() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.is_match(number)
    }

    /// Attempts to extract a possible number from the string passed in. This
    /// currently strips all leading characters that cannot be used to start a
    /// phone number. Characters that can be used to start a phone number are
    /// defined in the valid start char pattern. If none of these characters
    /// are found in the number passed in, an empty string is returned. This
    /// function also attempts to strip off any alternative extensions or
    /// endings if two or more are present, such as in the case of:
    /// (530) 583-6985 x302/x2303. The second extension here makes this
    /// actually two phone numbers, (530) 583-6985 x302 and (530) 583-6985
    /// x2303. We remove the second extension so that the first number is
    /// parsed correctly.
    pub fn extract_possible_number<'a>(&self, phone_number: &'a str) -> &'a str {
        let Some(start) = self.reg_exps.valid_start_char_pattern.find(phone_number) else {
            return "";
        };
        let mut number = &phone_number[start.start()..];
        // Remove trailing non-alpha non-numerical characters.
        if let Some(trailing) = self.reg_exps.unwanted_end_char_pattern.find(number) {
            number = &number[..trailing.start()];
        }
        // Check for extra numbers at the end.
        if let Some(second_number) = self.reg_exps.second_number_start_pattern.find(number) {
            number = &number[..second_number.start()];
        }
        number
    }

    /// Splits a trailing extension off `phone_number`.
    ///
    /// Returns the number without the extension and the extension digits, or
    /// `None` if there is no extension or what precedes it is not viable.
    pub fn maybe_strip_extension<'a>(&self, phone_number: &'a str) -> Option<(&'a str, &'a str)> {
        let captures = self.reg_exps.extn_pattern.captures(phone_number)?;
        let whole_match = captures.get(0)?;
        let number_without_extension = &phone_number[..whole_match.start()];
        // If we find a potential extension, and the number preceding this is a
        // viable number, we assume it is an extension.
        if !self.is_viable_phone_number(number_without_extension) {
            return None;
        }
        // The first non-empty group is the extension.
        let extension = captures.iter().skip(1).flatten().next()?;
        Some((number_without_extension, extension.as_str()))
    }

    /// Parses a string and returns it as a phone number.
    ///
    /// `default_region` is only used if the number is not written in
    /// international format, i.e. starts with neither a plus sign nor an
    /// IDD of the region. Pass the unknown region `"ZZ"` (or any region
    /// without metadata) to require international format.
    ///
    /// Besides digits and punctuation, the input may be an RFC3966 `tel:`
    /// URI, may carry an extension, and may spell digits as letters.
    pub fn parse(&self, number_to_parse: &str, default_region: &str) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, false, true)
    }

    /// Like [`parse`](Self::parse), but also records the raw input, how the
    /// calling code was obtained and the carrier code dialled with the
    /// national prefix, if any.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, true, true)
    }

    /// Parses a string into a phone number. With `check_region` unset a
    /// number may end up without a calling code (0).
    pub(super) fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: &str,
        keep_raw_input: bool,
        check_region: bool,
    ) -> Result<PhoneNumber, ParseError> {
        if number_to_parse.chars().count() > MAX_INPUT_STRING_LENGTH {
            trace!("Input is too long: {} characters", number_to_parse.chars().count());
            return Err(ParseError::TooLong);
        }

        let national_number = self.build_national_number_for_parsing(number_to_parse)?;

        if !self.is_viable_phone_number(&national_number) {
            trace!("The string supplied did not seem to be a phone number '{}'.", national_number);
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }

        // Check the region supplied is valid, or that the extracted number starts
        // with some sort of + sign so the number's region can be determined.
        if check_region && !self.check_region_for_parsing(&national_number, default_region) {
            trace!("Missing or invalid default country.");
            return Err(ParseError::InvalidCountryCode);
        }

        let mut phone_number = PhoneNumber::default();
        if keep_raw_input {
            phone_number = phone_number.with_raw_input(number_to_parse);
        }
        // Attempt to parse extension first, since it doesn't require
        // region-specific data and we want to have the non-normalised number here.
        let national_number = match self.maybe_strip_extension(&national_number) {
            Some((number, extension)) => {
                phone_number = phone_number.with_extension(extension);
                number
            }
            None => national_number.as_str(),
        };

        let mut region_metadata = self.get_metadata_for_region(default_region);
        // Check to see if the number is given in international format so we know
        // whether this number is from the default region or not.
        let extracted = match self.maybe_extract_country_code(national_number, region_metadata) {
            Ok(extracted) => extracted,
            Err(ParseError::InvalidCountryCode) => {
                // Strip the plus-char, and try again.
                let Some(after_plus) = self.reg_exps.plus_chars_pattern.consume_start(national_number)
                else {
                    return Err(ParseError::InvalidCountryCode);
                };
                let extracted = self.maybe_extract_country_code(after_plus, region_metadata)?;
                if extracted.country_code == 0 {
                    trace!("Could not interpret numbers after plus-sign.");
                    return Err(ParseError::InvalidCountryCode);
                }
                extracted
            }
            Err(err) => return Err(err),
        };
        if keep_raw_input {
            phone_number = phone_number.with_country_code_source(extracted.country_code_source);
        }

        let mut country_code = extracted.country_code;
        let mut normalized_national_number = if country_code != 0 {
            let phone_number_region = self.get_region_code_for_country_code(country_code);
            if phone_number_region != default_region {
                // Metadata cannot be absent because the country calling code is valid.
                region_metadata =
                    self.get_metadata_for_region_or_calling_code(country_code, phone_number_region);
            }
            extracted.national_number
        } else {
            // If no extracted country calling code, use the region supplied instead.
            // The national number is just the normalized version of the number we
            // were given to parse.
            if let Some(metadata) = region_metadata {
                country_code = metadata.country_code();
            } else if keep_raw_input {
                phone_number = phone_number.without_country_code_source();
            }
            self.normalize(national_number)
        };

        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn);
        }

        if let Some(metadata) = region_metadata {
            if let Some(stripped) =
                self.maybe_strip_national_prefix_and_carrier_code(&normalized_national_number, metadata)?
            {
                // We require that the NSN remaining after stripping the national
                // prefix and carrier code be long enough to be a possible length
                // for the region. Otherwise, we don't do the stripping, since the
                // original number could be a valid short number.
                match test_number_length_with_unknown_type(&stripped.national_number, metadata) {
                    Err(ValidationError::TooShort)
                    | Err(ValidationError::InvalidLength)
                    | Ok(NumberLengthType::IsPossibleLocalOnly) => {
                        trace!(
                            "Kept national prefix of '{}', the rest is not a possible number",
                            normalized_national_number
                        );
                    }
                    _ => {
                        normalized_national_number = stripped.national_number;
                        if keep_raw_input {
                            if let Some(carrier_code) =
                                stripped.carrier_code.filter(|code| !code.is_empty())
                            {
                                phone_number =
                                    phone_number.with_preferred_domestic_carrier_code(carrier_code);
                            }
                        }
                    }
                }
            }
        }

        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number.");
            return Err(ParseError::TooShortNsn);
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            trace!("The string supplied is too long to be a phone number.");
            return Err(ParseError::TooLong);
        }
        phone_number = Self::set_italian_leading_zeros(&normalized_national_number, phone_number);
        let national_number: u64 = normalized_national_number.parse()?;
        Ok(phone_number
            .with_country_code(country_code)
            .with_national_number(national_number))
    }

    /// Converts the part of the input that holds the number into a string
    /// ready for parsing, handling RFC3966 `tel:` URIs.
    fn build_national_number_for_parsing(&self, number_to_parse: &str) -> Result<String, ParseError> {
        let mut national_number = match number_to_parse.find(RFC3966_PHONE_CONTEXT) {
            Some(index_of_phone_context) => {
                let phone_context =
                    Self::extract_phone_context(number_to_parse, index_of_phone_context);
                if !self.is_phone_context_valid(phone_context) {
                    trace!("The phone-context value '{}' is invalid.", phone_context);
                    return Err(NotANumberError::InvalidPhoneContext.into());
                }
                let mut national_number = String::with_capacity(number_to_parse.len());
                // If the phone context contains a phone number prefix, we need to
                // capture it, whereas domains will be ignored.
                if phone_context.starts_with(PLUS_SIGN) {
                    // Additional parameters might follow the phone context. If so,
                    // we will remove them here because the parameters after phone
                    // context are not important for parsing the phone number.
                    national_number.push_str(phone_context);
                }
                // Now append everything between the "tel:" prefix and the
                // phone-context. This should include the national number, an
                // optional extension or isdn-subaddress component. Note we also
                // handle the case when "tel:" is missing, as we have seen in some
                // of the phone number inputs. In that case, we append everything
                // from the beginning.
                let index_of_national_number = number_to_parse
                    .find(RFC3966_PREFIX)
                    .map(|index| index + RFC3966_PREFIX.len())
                    .filter(|index| *index <= index_of_phone_context)
                    .unwrap_or(0);
                national_number
                    .push_str(&number_to_parse[index_of_national_number..index_of_phone_context]);
                national_number
            }
            // Extract a possible number from the string passed in (this strips
            // leading characters that could not be the start of a phone number.)
            None => self.extract_possible_number(number_to_parse).to_owned(),
        };

        // Delete the isdn-subaddress and everything after it if it is present.
        // Note extension won't appear at the same time with isdn-subaddress
        // according to paragraph 5.3 of the RFC3966 spec,
        if let Some(index_of_isdn) = national_number.find(RFC3966_ISDN_SUBADDRESS) {
            if index_of_isdn > 0 {
                national_number.truncate(index_of_isdn);
            }
        }
        // If both phone context and isdn-subaddress are absent but other
        // parameters are present, the parameters are left in national_number.
        // This is because we are concerned about deleting content from a
        // potential number string when there is no strong evidence that the
        // number is actually written in RFC3966.
        Ok(national_number)
    }

    /// Returns the value of the phone-context parameter starting at
    /// `index_of_phone_context`, up to the next `;`.
    fn extract_phone_context(number_to_extract_from: &str, index_of_phone_context: usize) -> &str {
        let phone_context_start = index_of_phone_context + RFC3966_PHONE_CONTEXT.len();
        let Some(phone_context) = number_to_extract_from.get(phone_context_start..) else {
            return "";
        };
        match phone_context.find(';') {
            Some(phone_context_end) => &phone_context[..phone_context_end],
            None => phone_context,
        }
    }

    /// An empty context is invalid, a global number context must consist of
    /// digits and visual separators. Domain names are not checked.
    fn is_phone_context_valid(&self, phone_context: &str) -> bool {
        if phone_context.is_empty() {
            return false;
        }
        !phone_context.starts_with(PLUS_SIGN)
            || self
                .reg_exps
                .rfc3966_global_number_digits_pattern
                .is_match(phone_context)
    }

    /// Checks to see that the region code used is valid, or if it is not
    /// valid, that the number to parse starts with a + symbol so that we can
    /// attempt to infer the region from the number.
    fn check_region_for_parsing(&self, number_to_parse: &str, default_region: &str) -> bool {
        self.is_valid_region_code(default_region)
            || (!number_to_parse.is_empty()
                && self.reg_exps.plus_chars_pattern.is_match(number_to_parse))
    }

    /// Records leading zeros of the national number, which the integer
    /// cannot hold. A number is never reduced to zeros only: at least one
    /// digit stays in the integer part.
    fn set_italian_leading_zeros(national_number: &str, phone_number: PhoneNumber) -> PhoneNumber {
        if national_number.len() <= 1 || !national_number.starts_with('0') {
            return phone_number;
        }
        let bytes = national_number.as_bytes();
        let mut number_of_leading_zeros = 1;
        // Note that if the national number is all "0"s, the last "0" is not
        // counted as a leading zero.
        while number_of_leading_zeros < bytes.len() - 1 && bytes[number_of_leading_zeros] == b'0' {
            number_of_leading_zeros += 1;
        }
        let phone_number = phone_number.with_italian_leading_zero(true);
        if number_of_leading_zeros != 1 {
            phone_number.with_number_of_leading_zeros(number_of_leading_zeros as i32)
        } else {
            phone_number
        }
    }

    /// Tries to extract a country calling code from a number.
    ///
    /// The calling code is found after a plus sign, after the IDD of the
    /// default region, or, without either, when the digits start with the
    /// default region's calling code and are only a valid number without it.
    /// A `country_code` of 0 in the result means the number is national.
    ///
    /// Fails with [`ParseError::TooShortAfterIdd`] if nothing useful follows
    /// a plus sign or IDD, and with [`ParseError::InvalidCountryCode`] if the
    /// digits after one do not start with a registered calling code.
    pub fn maybe_extract_country_code(
        &self,
        number: &str,
        default_region_metadata: Option<&PhoneMetadata>,
    ) -> Result<ExtractedCountryCode, ParseError> {
        if number.is_empty() {
            return Ok(ExtractedCountryCode {
                country_code: 0,
                national_number: String::new(),
                country_code_source: CountryCodeSource::FromDefaultCountry,
            });
        }
        // Set the default prefix to be something that will never match if
        // there is no default region.
        let possible_country_idd_prefix = default_region_metadata
            .map(|metadata| metadata.international_prefix())
            .unwrap_or_default();

        let PhoneNumberWithCountryCodeSource {
            phone_number: full_number,
            country_code_source,
        } = self.maybe_strip_international_prefix_and_normalize(number, possible_country_idd_prefix)?;

        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.len() <= MIN_LENGTH_FOR_NSN {
                trace!("Phone number had an IDD, but after this was not long enough to be a viable phone number.");
                return Err(ParseError::TooShortAfterIdd);
            }
            if let Some((country_code, national_number)) = self.extract_country_code(&full_number) {
                return Ok(ExtractedCountryCode {
                    country_code,
                    national_number: national_number.to_owned(),
                    country_code_source,
                });
            }
            // If this fails, they must be using a strange country calling code
            // that we don't recognize, or that doesn't exist.
            return Err(ParseError::InvalidCountryCode);
        }

        if let Some(metadata) = default_region_metadata {
            // Check to see if the number starts with the country calling code
            // for the default region. If so, we remove the country calling code,
            // and do some checks on the validity of the number before and after.
            let default_country_code = metadata.country_code();
            let mut buf = itoa::Buffer::new();
            let default_country_code_str = buf.format(default_country_code);
            if let Some(potential_national_number) = full_number.strip_prefix(default_country_code_str)
            {
                let general_desc = &metadata.general_desc;
                let potential_national_number = self
                    .maybe_strip_national_prefix_and_carrier_code(potential_national_number, metadata)?
                    .map(|stripped| stripped.national_number)
                    .unwrap_or_else(|| potential_national_number.to_owned());
                // If the number was not valid before but is valid now, or if it
                // was too long before, we consider the number with the country
                // calling code stripped to be a better result and keep that
                // instead.
                if (!self
                    .matcher_api
                    .match_national_number(&full_number, general_desc, false)
                    && self.matcher_api.match_national_number(
                        &potential_national_number,
                        general_desc,
                        false,
                    ))
                    || test_number_length_with_unknown_type(&full_number, metadata)
                        == Err(ValidationError::TooLong)
                {
                    return Ok(ExtractedCountryCode {
                        country_code: default_country_code,
                        national_number: potential_national_number,
                        country_code_source: CountryCodeSource::FromNumberWithoutPlusSign,
                    });
                }
            }
        }
        // No country calling code present.
        Ok(ExtractedCountryCode {
            country_code: 0,
            national_number: String::new(),
            country_code_source,
        })
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number provided, normalizes the resulting number, and indicates if an
    /// international prefix was present.
    ///
    /// `possible_idd_prefix` is the regex of the IDD of the region the number
    /// is dialled from; an empty pattern never matches.
    pub fn maybe_strip_international_prefix_and_normalize(
        &self,
        phone_number: &str,
        possible_idd_prefix: &str,
    ) -> RegexResult<PhoneNumberWithCountryCodeSource> {
        if phone_number.is_empty() {
            return Ok(PhoneNumberWithCountryCodeSource::new(
                String::new(),
                CountryCodeSource::FromDefaultCountry,
            ));
        }
        // Check to see if the number begins with one or more plus signs.
        if let Some(rest) = self.reg_exps.plus_chars_pattern.consume_start(phone_number) {
            // Can now normalize the rest of the number since we've consumed the
            // "+" sign at the start.
            return Ok(PhoneNumberWithCountryCodeSource::new(
                self.normalize(rest),
                CountryCodeSource::FromNumberWithPlusSign,
            ));
        }
        // Attempt to parse the first digits as an international prefix.
        let normalized_number = self.normalize(phone_number);
        if !possible_idd_prefix.is_empty() {
            let idd_pattern = self.reg_exps.regexp_cache.prefix_regex(possible_idd_prefix)?;
            if let Some(rest) = self.parse_prefix_as_idd(&idd_pattern, &normalized_number) {
                return Ok(PhoneNumberWithCountryCodeSource::new(
                    rest.to_owned(),
                    CountryCodeSource::FromNumberWithIdd,
                ));
            }
        }
        Ok(PhoneNumberWithCountryCodeSource::new(
            normalized_number,
            CountryCodeSource::FromDefaultCountry,
        ))
    }

    /// Strips the IDD from the start of the number if present. Helper function
    /// used by `maybe_strip_international_prefix_and_normalize`.
    fn parse_prefix_as_idd<'a>(&self, idd_pattern: &Regex, phone_number: &'a str) -> Option<&'a str> {
        let rest = idd_pattern.consume_start(phone_number)?;
        // Only strip this if the first digit after the match is not a 0, since
        // country calling codes cannot begin with 0.
        if let Some(captures) = self.reg_exps.capturing_digit_pattern.captures(rest) {
            if normalize_digits(&captures[1]) == "0" {
                return None;
            }
        }
        Some(rest)
    }

    /// Extracts the calling code from the start of `full_number`, which must
    /// be normalized, returning it with the rest of the digits. Calling codes
    /// never start with 0.
    pub fn extract_country_code<'a>(&self, full_number: &'a str) -> Option<(i32, &'a str)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return None;
        }
        for i in 1..=MAX_LENGTH_COUNTRY_CODE.min(full_number.len()) {
            let potential_country_code = full_number.get(..i)?.parse::<i32>().ok()?;
            if self.has_valid_country_calling_code(potential_country_code) {
                return Some((potential_country_code, &full_number[i..]));
            }
        }
        None
    }

    /// Strips the national prefix of `metadata`'s region from a normalized
    /// national number, applying the region's transform rule if the prefix
    /// pattern asks for it.
    ///
    /// Nothing is stripped (`None`) if the prefix does not match, or if what
    /// remains after stripping or transforming does not match the region's
    /// general pattern. A second call on stripped output is therefore a no-op
    /// for well-formed metadata.
    pub fn maybe_strip_national_prefix_and_carrier_code(
        &self,
        number: &str,
        metadata: &PhoneMetadata,
    ) -> RegexResult<Option<StrippedNationalPrefix>> {
        let possible_national_prefix = metadata.national_prefix_for_parsing();
        if number.is_empty() || possible_national_prefix.is_empty() {
            // Early return for numbers of zero length.
            return Ok(None);
        }
        // Attempt to parse the first digits as a national prefix.
        let prefix_pattern = self
            .reg_exps
            .regexp_cache
            .prefix_regex(possible_national_prefix)?;
        let Some(prefix_captures) = prefix_pattern.captures(number) else {
            return Ok(None);
        };
        let Some(prefix_match) = prefix_captures.get(0) else {
            return Ok(None);
        };
        let general_desc = &metadata.general_desc;
        // prefix_captures.get(num_of_groups) is Some if and only if the last
        // group participated; with no groups it is the whole match.
        let num_of_groups = prefix_captures.len() - 1;
        let last_group_matched = prefix_captures.get(num_of_groups).is_some();
        let first_group = || prefix_captures.get(1).map(|group| group.as_str().to_owned());
        let transform_rule = metadata.national_prefix_transform_rule();

        if transform_rule.is_empty() || !last_group_matched {
            let rest = &number[prefix_match.end()..];
            if !self
                .matcher_api
                .match_national_number(rest, general_desc, false)
            {
                trace!("Kept national prefix of '{}', the rest is not viable", number);
                return Ok(None);
            }
            let carrier_code = if num_of_groups > 0 && last_group_matched {
                first_group()
            } else {
                None
            };
            Ok(Some(StrippedNationalPrefix {
                national_number: rest.to_owned(),
                carrier_code,
            }))
        } else {
            // Check that the resultant number is viable. If not, return.
            let transformed_number = prefix_pattern.replace(number, transform_rule).into_owned();
            if !self
                .matcher_api
                .match_national_number(&transformed_number, general_desc, false)
            {
                trace!("Kept national prefix of '{}', the transformed number is not viable", number);
                return Ok(None);
            }
            let carrier_code = if num_of_groups > 1 { first_group() } else { None };
            Ok(Some(StrippedNationalPrefix {
                national_number: transformed_number,
                carrier_code,
            }))
        }
    }
}
