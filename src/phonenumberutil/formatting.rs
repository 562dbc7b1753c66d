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

use std::borrow::Cow;

use log::{error, trace};
use regex::NoExpand;

use super::{
    PhoneNumberFormat, PhoneNumberType, ValidationError,
    helper_constants::{DEFAULT_EXTN_PREFIX, NANPA_COUNTRY_CODE, RFC3966_EXTN_PREFIX},
    helper_functions::{prefix_number_with_country_calling_code, test_number_length_with_unknown_type},
    phonenumberutil::{PhoneNumberUtil, RegexResult},
};
use crate::{
    i18n::RegionCode,
    metadata::{NumberFormat, PhoneMetadata},
    phonenumber::{CountryCodeSource, PhoneNumber},
    regex_util::{CachedMatch, RegexConsume, full_match_pattern},
};

/// Formatting never fails: a broken metadata pattern is logged and the
/// caller's fallback is returned instead.
fn unwrap_or_log<T>(result: RegexResult<T>, fallback: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|err| {
        error!("Invalid formatting pattern in metadata: {}", err);
        fallback()
    })
}

impl PhoneNumberUtil {
    /// Formats a phone number in the specified format using default rules.
    ///
    /// Numbers with a calling code that is not registered are rendered as
    /// their bare national significant number, except for E164 which never
    /// needs metadata. A number whose national number is 0 but that kept its
    /// raw input is rendered as that raw input.
    pub fn format(&self, phone_number: &PhoneNumber, number_format: PhoneNumberFormat) -> String {
        unwrap_or_log(self.format_helper(phone_number, number_format), || {
            Self::get_national_significant_number(phone_number)
        })
    }

    fn format_helper(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
    ) -> RegexResult<String> {
        if phone_number.national_number() == 0 {
            let raw_input = phone_number.raw_input();
            if !raw_input.is_empty() {
                // Unparseable numbers that kept their raw input just use that.
                // This is the only case where a number can be formatted as E164 without a
                // leading '+' symbol (but the original number wasn't parseable anyway).
                return Ok(raw_input.to_owned());
            }
        }
        let country_calling_code = phone_number.country_code();
        let mut formatted_number = Self::get_national_significant_number(phone_number);

        if number_format == PhoneNumberFormat::E164 {
            // Early exit for E164 case (even if the country calling code is invalid)
            // since no formatting of the national number needs to be applied.
            // Extensions are not formatted.
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::E164,
                &mut formatted_number,
            );
            return Ok(formatted_number);
        }
        // Note here that all NANPA formatting rules are contained by US, so we use
        // that to format NANPA numbers. The same applies to Russian Fed regions -
        // rules are contained by Russia. French Indian Ocean country rules are
        // contained by Réunion.
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            trace!("Unknown calling code {}, formatting bare digits", country_calling_code);
            return Ok(formatted_number);
        };

        let mut formatted_number = self
            .format_nsn(&formatted_number, metadata, number_format)?
            .into_owned();
        if let Some(formatted_extension) =
            Self::get_formatted_extension(phone_number, metadata, number_format)
        {
            formatted_number.push_str(&formatted_extension);
        }
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        Ok(formatted_number)
    }

    pub(crate) fn format_nsn<'b>(
        &self,
        phone_number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> RegexResult<Cow<'b, str>> {
        self.format_nsn_with_carrier(phone_number, metadata, number_format, "")
    }

    fn format_nsn_with_carrier<'b>(
        &self,
        number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> RegexResult<Cow<'b, str>> {
        // When the intl_number_formats exists, we use that to format national number
        // for the INTERNATIONAL format instead of using the number_formats.
        let available_formats = if metadata.intl_number_format.is_empty()
            || number_format == PhoneNumberFormat::National
        {
            &metadata.number_format
        } else {
            &metadata.intl_number_format
        };
        let formatting_pattern =
            self.choose_formatting_pattern_for_number(available_formats, number)?;
        if let Some(formatting_pattern) = formatting_pattern {
            let formatting_pattern = metadata.resolve_number_format(formatting_pattern);
            self.format_nsn_using_pattern_with_carrier(
                number,
                &formatting_pattern,
                number_format,
                carrier_code,
            )
        } else {
            Ok(Cow::Borrowed(number))
        }
    }

    /// Returns the first format whose last leading digits pattern matches the
    /// start of `national_number` and whose pattern matches all of it.
    pub(crate) fn choose_formatting_pattern_for_number<'b>(
        &self,
        available_formats: &'b [NumberFormat],
        national_number: &str,
    ) -> RegexResult<Option<&'b NumberFormat>> {
        for format in available_formats {
            // We always use the last leading_digits_pattern, as it is the most
            // detailed.
            if let Some(last_leading_digits) = format.leading_digits_pattern.last() {
                let leading_digits = self.reg_exps.regexp_cache.prefix_regex(last_leading_digits)?;
                if !leading_digits.matches_start(national_number) {
                    continue;
                }
            }
            if self
                .reg_exps
                .regexp_cache
                .full_match(format.pattern(), national_number)?
            {
                return Ok(Some(format));
            }
        }
        Ok(None)
    }

    // Note that carrier_code is optional - if an empty string, no carrier code
    // replacement will take place.
    fn format_nsn_using_pattern_with_carrier<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> RegexResult<Cow<'b, str>> {
        let mut number_format_rule = Cow::Borrowed(formatting_pattern.format());
        if number_format == PhoneNumberFormat::National
            && !carrier_code.is_empty()
            && formatting_pattern.has_domestic_carrier_code_formatting_rule()
        {
            // Replace the $CC in the formatting rule with the desired carrier code.
            let carrier_code_formatting_rule = self.reg_exps.carrier_code_pattern.replace(
                formatting_pattern.domestic_carrier_code_formatting_rule(),
                NoExpand(carrier_code),
            );
            // Now replace the $FG in the formatting rule with the first group and
            // the carrier code combined in the appropriate way.
            number_format_rule = Cow::Owned(
                self.reg_exps
                    .first_group_capturing_pattern
                    .replace(&number_format_rule, carrier_code_formatting_rule.as_ref())
                    .into_owned(),
            );
        } else {
            // Use the national prefix formatting rule instead.
            let national_prefix_formatting_rule =
                formatting_pattern.national_prefix_formatting_rule();
            if number_format == PhoneNumberFormat::National
                && !national_prefix_formatting_rule.is_empty()
            {
                // Apply the national_prefix_formatting_rule as the formatting_pattern
                // contains only information on how the national significant number
                // should be formatted at this point.
                number_format_rule = Cow::Owned(
                    self.reg_exps
                        .first_group_capturing_pattern
                        .replace(&number_format_rule, national_prefix_formatting_rule)
                        .into_owned(),
                );
            }
        }

        let pattern_to_match = self
            .reg_exps
            .regexp_cache
            .get_regex(&full_match_pattern(formatting_pattern.pattern()))?;
        let mut formatted_number =
            pattern_to_match.replace(national_number, number_format_rule.as_ref());

        if number_format == PhoneNumberFormat::RFC3966 {
            // First consume any leading punctuation, if any was present.
            let without_leading_punctuation = self
                .reg_exps
                .separator_pattern
                .consume_start(&formatted_number)
                .map(str::to_owned);
            if let Some(rest) = without_leading_punctuation {
                formatted_number = Cow::Owned(rest);
            }
            // Then replace all separators with a "-".
            let dashed = self
                .reg_exps
                .separator_pattern
                .replace_all(&formatted_number, "-")
                .into_owned();
            formatted_number = Cow::Owned(dashed);
        }
        Ok(formatted_number)
    }

    /// Simple wrapper of `format_nsn_using_pattern_with_carrier` for the
    /// common case of no carrier code.
    pub(crate) fn format_nsn_using_pattern<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
    ) -> RegexResult<Cow<'b, str>> {
        self.format_nsn_using_pattern_with_carrier(
            national_number,
            formatting_pattern,
            number_format,
            "",
        )
    }

    // Returns the formatted extension of a phone number, if the phone number had an
    // extension specified else None.
    fn get_formatted_extension(
        phone_number: &PhoneNumber,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Option<String> {
        if phone_number.extension().is_empty() {
            return None;
        }
        let prefix = if number_format == PhoneNumberFormat::RFC3966 {
            RFC3966_EXTN_PREFIX
        } else if metadata.has_preferred_extn_prefix() {
            metadata.preferred_extn_prefix()
        } else {
            DEFAULT_EXTN_PREFIX
        };
        Some(fast_cat::concat_str!(prefix, phone_number.extension()))
    }

    /// Formats a phone number using caller-supplied formats instead of the
    /// region's own. `$NP` and `$FG` in a format's national prefix formatting
    /// rule are expanded to the region's national prefix and the first group.
    pub fn format_by_pattern(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> String {
        unwrap_or_log(
            self.format_by_pattern_helper(phone_number, number_format, user_defined_formats),
            || Self::get_national_significant_number(phone_number),
        )
    }

    fn format_by_pattern_helper(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> RegexResult<String> {
        let country_calling_code = phone_number.country_code();
        // Note get_region_code_for_country_code() is used because formatting
        // information for regions which share a country calling code is contained
        // by only one region for performance reasons. For example, for NANPA
        // regions it will be contained in the metadata for US.
        let national_significant_number = Self::get_national_significant_number(phone_number);
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Ok(national_significant_number);
        };

        let formatting_pattern = self.choose_formatting_pattern_for_number(
            user_defined_formats,
            &national_significant_number,
        )?;

        let mut formatted_number = if let Some(formatting_pattern) = formatting_pattern {
            // Before we do a replacement of the national prefix pattern $NP with the
            // national prefix, we need to copy the rule so that subsequent replacements
            // for different numbers have the appropriate national prefix.
            let mut num_format_copy = formatting_pattern.clone();
            let national_prefix_formatting_rule =
                formatting_pattern.national_prefix_formatting_rule();
            if !national_prefix_formatting_rule.is_empty() {
                let national_prefix = metadata.national_prefix();
                num_format_copy.national_prefix_formatting_rule = if !national_prefix.is_empty() {
                    // Replace $NP with national prefix and $FG with the first group ($1).
                    national_prefix_formatting_rule
                        .replace("$NP", national_prefix)
                        .replace("$FG", "$1")
                } else {
                    // We don't want to have a rule for how to format the national prefix if
                    // there isn't one.
                    String::new()
                };
            }
            self.format_nsn_using_pattern(
                &national_significant_number,
                &num_format_copy,
                number_format,
            )?
            .into_owned()
        } else {
            national_significant_number
        };
        if let Some(extension) = Self::get_formatted_extension(phone_number, metadata, number_format) {
            formatted_number.push_str(&extension);
        }
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        Ok(formatted_number)
    }

    /// Formats a number in national format for dialing using the carrier as
    /// specified in `carrier_code`. The carrier code will always be used
    /// regardless of whether the phone number already has a preferred domestic
    /// carrier code stored. If `carrier_code` contains an empty string, returns
    /// the number in national format without any carrier code.
    pub fn format_national_number_with_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        carrier_code: &str,
    ) -> String {
        unwrap_or_log(
            self.format_national_number_with_carrier_code_helper(phone_number, carrier_code),
            || Self::get_national_significant_number(phone_number),
        )
    }

    fn format_national_number_with_carrier_code_helper(
        &self,
        phone_number: &PhoneNumber,
        carrier_code: &str,
    ) -> RegexResult<String> {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Ok(national_significant_number);
        };

        let mut formatted_number = self
            .format_nsn_with_carrier(
                &national_significant_number,
                metadata,
                PhoneNumberFormat::National,
                carrier_code,
            )?
            .into_owned();
        if let Some(formatted_extension) =
            Self::get_formatted_extension(phone_number, metadata, PhoneNumberFormat::National)
        {
            formatted_number.push_str(&formatted_extension);
        }
        Ok(formatted_number)
    }

    /// Formats a number in national format for dialing using the carrier as
    /// specified in the preferred domestic carrier code of the number, or
    /// `fallback_carrier_code` if none is stored or it is empty.
    pub fn format_national_number_with_preferred_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        fallback_carrier_code: &str,
    ) -> String {
        // Historically, we set this to an empty string when parsing with raw input
        // if none was found in the input string. However, this doesn't result in a
        // number we can dial. For this reason, we treat the empty string the same
        // as if it isn't set at all.
        let carrier_code = if !phone_number.preferred_domestic_carrier_code().is_empty() {
            phone_number.preferred_domestic_carrier_code()
        } else {
            fallback_carrier_code
        };
        self.format_national_number_with_carrier_code(phone_number, carrier_code)
    }

    /// Returns a number formatted in such a way that it can be dialed from a
    /// mobile phone in a specific region. If the number cannot be reached from
    /// the region (e.g. some countries block toll-free numbers from being
    /// called outside of the country), the method returns an empty string.
    pub fn format_number_for_mobile_dialing(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
        with_formatting: bool,
    ) -> String {
        let country_calling_code = phone_number.country_code();
        if !self.has_valid_country_calling_code(country_calling_code) {
            return phone_number.raw_input().to_owned();
        }

        // Clear the extension, as that part cannot normally be dialed together with
        // the main number.
        let number_no_extension = phone_number.clone().without_extension();
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let number_type = self.get_number_type(&number_no_extension);
        let is_valid_number = number_type != PhoneNumberType::Unknown;

        let formatted_number = if region_calling_from == region_code {
            let is_fixed_line_or_mobile = matches!(
                number_type,
                PhoneNumberType::FixedLine
                    | PhoneNumberType::FixedLineOrMobile
                    | PhoneNumberType::Mobile
            );
            // Carrier codes may be needed in some countries. We handle this here.
            if region_code == "BR" && is_fixed_line_or_mobile {
                if !number_no_extension.preferred_domestic_carrier_code().is_empty() {
                    self.format_national_number_with_preferred_carrier_code(&number_no_extension, "")
                } else {
                    // Brazilian fixed line and mobile numbers need to be dialed with a
                    // carrier code when called within Brazil. Without that, most of the
                    // carriers won't connect the call. Because of that, we return an
                    // empty string here.
                    String::new()
                }
            } else if country_calling_code == NANPA_COUNTRY_CODE {
                // For NANPA countries, we output international format for numbers that
                // can be dialed internationally, since that always works, except for
                // numbers which might potentially be short numbers, which are always
                // dialled in national format.
                let national_number = Self::get_national_significant_number(&number_no_extension);
                let might_be_short_number = self
                    .get_metadata_for_region(region_calling_from)
                    .is_some_and(|region_metadata| {
                        test_number_length_with_unknown_type(&national_number, region_metadata)
                            == Err(ValidationError::TooShort)
                    });
                let format = if self.can_be_internationally_dialled(&number_no_extension)
                    && !might_be_short_number
                {
                    PhoneNumberFormat::International
                } else {
                    PhoneNumberFormat::National
                };
                self.format(&number_no_extension, format)
            } else {
                // For non-geographical countries, and Mexican, Chilean and Uzbek fixed
                // line and mobile numbers, we output international format for numbers
                // that can be dialed internationally as that always works.
                //
                // MX fixed line and mobile numbers should always be formatted in
                // international format, even when dialed within MX. For national
                // format to work, a carrier code needs to be used, and the correct
                // carrier code depends on if the caller and callee are from the same
                // local area. CL fixed line numbers need the national prefix when
                // dialing in the national format, but don't have it when used for
                // display; the reverse is true for mobile numbers. UZ mobile and
                // fixed-line numbers need special dialling codes in national format.
                let format = if (region_code == RegionCode::un001()
                    || (matches!(region_code, "MX" | "CL" | "UZ") && is_fixed_line_or_mobile))
                    && self.can_be_internationally_dialled(&number_no_extension)
                {
                    PhoneNumberFormat::International
                } else {
                    PhoneNumberFormat::National
                };
                self.format(&number_no_extension, format)
            }
        } else if is_valid_number && self.can_be_internationally_dialled(&number_no_extension) {
            // We assume that short numbers are not diallable from outside their
            // region, so if a number is not a valid regular length phone number, we
            // treat it as if it cannot be internationally dialled.
            let format = if with_formatting {
                PhoneNumberFormat::International
            } else {
                PhoneNumberFormat::E164
            };
            return self.format(&number_no_extension, format);
        } else {
            String::new()
        };

        if with_formatting {
            formatted_number
        } else {
            self.normalize_diallable_chars_only(&formatted_number)
        }
    }

    /// Formats a phone number for out-of-country dialing purposes.
    ///
    /// The international dialling prefix of `region_calling_from` is used
    /// when it is unambiguous, `+` otherwise. Numbers of the same calling
    /// code are formatted nationally, and NANPA numbers called from another
    /// NANPA region are written `1 ` plus their national format.
    pub fn format_out_of_country_calling_number(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
    ) -> String {
        unwrap_or_log(
            self.format_out_of_country_calling_number_helper(phone_number, region_calling_from),
            || Self::get_national_significant_number(phone_number),
        )
    }

    fn format_out_of_country_calling_number_helper(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
    ) -> RegexResult<String> {
        let Some(metadata_for_region_calling_from) = self.get_metadata_for_region(region_calling_from)
        else {
            trace!(
                "Trying to format number from invalid region {}. International formatting applied.",
                region_calling_from
            );
            return Ok(self.format(phone_number, PhoneNumberFormat::International));
        };
        let country_calling_code = phone_number.country_code();
        let national_significant_number = Self::get_national_significant_number(phone_number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return Ok(national_significant_number);
        }
        if country_calling_code == NANPA_COUNTRY_CODE {
            if self.is_nanpa_country(region_calling_from) {
                // For NANPA regions, return the national format for these regions but
                // prefix it with the country calling code.
                let national_format = self.format(phone_number, PhoneNumberFormat::National);
                let mut buf = itoa::Buffer::new();
                return Ok(fast_cat::concat_str!(
                    buf.format(country_calling_code),
                    " ",
                    &national_format
                ));
            }
        } else if country_calling_code == metadata_for_region_calling_from.country_code() {
            // If regions share a country calling code, the country calling code need
            // not be dialled. This also applies when dialling within a region, so this
            // if clause covers both these cases. Technically this is the case for
            // dialling from La Reunion to other overseas departments of France (French
            // Guiana, Martinique, Guadeloupe), but not vice versa - so we don't cover
            // this edge case for now and for those cases return the version including
            // country calling code.
            return Ok(self.format(phone_number, PhoneNumberFormat::National));
        }

        // Metadata cannot be absent because we checked 'is_valid_region_code()' above.
        let international_prefix = metadata_for_region_calling_from.international_prefix();
        // In general, if there is a preferred international prefix, use that.
        // Otherwise, for regions that have multiple international prefixes, the
        // international format of the number is returned since we would not know
        // which one to use.
        let international_prefix_for_formatting =
            if metadata_for_region_calling_from.has_preferred_international_prefix() {
                metadata_for_region_calling_from.preferred_international_prefix()
            } else if self
                .reg_exps
                .single_international_prefix
                .is_match(international_prefix)
            {
                international_prefix
            } else {
                ""
            };

        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata_for_region) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Ok(national_significant_number);
        };
        let mut formatted_number = self
            .format_nsn(
                &national_significant_number,
                metadata_for_region,
                PhoneNumberFormat::International,
            )?
            .into_owned();
        if let Some(formatted_extension) = Self::get_formatted_extension(
            phone_number,
            metadata_for_region,
            PhoneNumberFormat::International,
        ) {
            formatted_number.push_str(&formatted_extension);
        }
        if !international_prefix_for_formatting.is_empty() {
            let mut buf = itoa::Buffer::new();
            Ok(fast_cat::concat_str!(
                international_prefix_for_formatting,
                " ",
                buf.format(country_calling_code),
                " ",
                &formatted_number
            ))
        } else {
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::International,
                &mut formatted_number,
            );
            Ok(formatted_number)
        }
    }

    /// Formats a phone number using the original phone number format that the
    /// number is parsed from. The original format is embedded in the country
    /// code source field of the phone number passed in. If such information is
    /// missing, the number will be formatted into the NATIONAL format by
    /// default. When the number is an invalid number or the formatted result
    /// does not dial the same digits as the raw input, the raw input is
    /// returned instead.
    pub fn format_in_original_format(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
    ) -> String {
        unwrap_or_log(
            self.format_in_original_format_helper(phone_number, region_calling_from),
            || {
                if phone_number.has_raw_input() {
                    phone_number.raw_input().to_owned()
                } else {
                    Self::get_national_significant_number(phone_number)
                }
            },
        )
    }

    fn format_in_original_format_helper(
        &self,
        phone_number: &PhoneNumber,
        region_calling_from: &str,
    ) -> RegexResult<String> {
        if phone_number.has_raw_input() && !self.has_formatting_pattern_for_number(phone_number)? {
            // We check if we have the formatting pattern because without that, we
            // might format the number as a group without national prefix.
            return Ok(phone_number.raw_input().to_owned());
        }
        if !phone_number.has_country_code_source() {
            return Ok(self.format(phone_number, PhoneNumberFormat::National));
        }
        let formatted_number = match phone_number.country_code_source() {
            CountryCodeSource::FromNumberWithPlusSign => {
                self.format(phone_number, PhoneNumberFormat::International)
            }
            CountryCodeSource::FromNumberWithIdd => {
                self.format_out_of_country_calling_number(phone_number, region_calling_from)
            }
            CountryCodeSource::FromNumberWithoutPlusSign => {
                let international = self.format(phone_number, PhoneNumberFormat::International);
                match international.strip_prefix('+') {
                    Some(without_plus) => without_plus.to_owned(),
                    None => international,
                }
            }
            CountryCodeSource::FromDefaultCountry | CountryCodeSource::Unspecified => {
                self.format_with_original_national_prefix(phone_number)?
            }
        };
        // If no digit is inserted/removed/modified as a result of our formatting,
        // we return the formatted phone number; otherwise we return the raw input
        // the user entered.
        let raw_input = phone_number.raw_input();
        if !raw_input.is_empty() {
            let normalized_formatted_number = self.normalize_diallable_chars_only(&formatted_number);
            let normalized_raw_input = self.normalize_diallable_chars_only(raw_input);
            if normalized_formatted_number != normalized_raw_input {
                return Ok(raw_input.to_owned());
            }
        }
        Ok(formatted_number)
    }

    /// National format of a number entered without calling code, keeping the
    /// national prefix out when the user did not type it.
    fn format_with_original_national_prefix(&self, phone_number: &PhoneNumber) -> RegexResult<String> {
        let region_code = self.get_region_code_for_country_code(phone_number.country_code());
        // We strip non-digits from the NDD here, and from the raw input later, so
        // that we can compare them easily.
        let national_format = self.format(phone_number, PhoneNumberFormat::National);
        let Some(national_prefix) = self.get_ndd_prefix_for_region(region_code, true) else {
            // If the region doesn't have a national prefix at all, we can safely
            // return the national format.
            return Ok(national_format);
        };
        // Otherwise, we check if the original number was entered with a national
        // prefix.
        if self.raw_input_contains_national_prefix(
            phone_number.raw_input(),
            &national_prefix,
            region_code,
        ) {
            // If so, we can safely return the national format.
            return Ok(national_format);
        }
        // Metadata cannot be absent here, because we checked that the region has a
        // national prefix.
        let Some(metadata) = self.get_metadata_for_region(region_code) else {
            return Ok(national_format);
        };
        let national_number = Self::get_national_significant_number(phone_number);
        let Some(format_rule) =
            self.choose_formatting_pattern_for_number(&metadata.number_format, &national_number)?
        else {
            // If no pattern above is matched, we format the original input.
            return Ok(national_format);
        };
        let format_rule = metadata.resolve_number_format(format_rule);
        // The format rule could still be empty if the national prefix was
        // optional, or the rule could start with the first group rather than
        // the national prefix.
        let candidate_national_prefix_rule = format_rule.national_prefix_formatting_rule();
        let index_of_first_group = candidate_national_prefix_rule.find("$1").unwrap_or(0);
        if index_of_first_group == 0 {
            return Ok(national_format);
        }
        let candidate_national_prefix_rule =
            Self::normalize_digits_only(&candidate_national_prefix_rule[..index_of_first_group]);
        if candidate_national_prefix_rule.is_empty() {
            // National prefix not used when formatting this number.
            return Ok(national_format);
        }
        // Otherwise, remove the national prefix from the formatted version.
        let mut num_format_copy = format_rule.into_owned();
        num_format_copy.national_prefix_formatting_rule.clear();
        Ok(self.format_by_pattern(
            phone_number,
            PhoneNumberFormat::National,
            std::slice::from_ref(&num_format_copy),
        ))
    }

    /// Check if raw_input, which is assumed to be in the national format, has a
    /// national prefix. The national prefix is assumed to be in digits-only
    /// form.
    fn raw_input_contains_national_prefix(
        &self,
        raw_input: &str,
        national_prefix: &str,
        region_code: &str,
    ) -> bool {
        let normalized_national_number = Self::normalize_digits_only(raw_input);
        let Some(without_national_prefix) = normalized_national_number.strip_prefix(national_prefix)
        else {
            return false;
        };
        // Some Japanese numbers (e.g. 00777123) might be mistaken to contain the
        // national prefix when written without it (e.g. 0777123) if we just do
        // prefix matching. To tackle that, we check the validity of the number if
        // the assumed national prefix is removed (777123 won't be valid in
        // Japan).
        match self.parse(without_national_prefix, region_code) {
            Ok(number) => self.is_valid_number(&number),
            Err(err) => {
                trace!("Raw input without national prefix is not a number: {}", err);
                false
            }
        }
    }

    fn has_formatting_pattern_for_number(&self, phone_number: &PhoneNumber) -> RegexResult<bool> {
        let country_calling_code = phone_number.country_code();
        let phone_number_region = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, phone_number_region)
        else {
            return Ok(false);
        };
        let national_number = Self::get_national_significant_number(phone_number);
        Ok(self
            .choose_formatting_pattern_for_number(&metadata.number_format, &national_number)?
            .is_some())
    }
}
