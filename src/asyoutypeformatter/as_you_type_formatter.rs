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

use std::{borrow::Cow, sync::Arc};

use log::{error, trace};
use regex::Regex;

use crate::{
    i18n::RegionCode,
    metadata::{NumberFormat, PhoneMetadata},
    phonenumberutil::{
        PhoneNumberUtil,
        helper_constants::{
            DIGIT_PLACEHOLDER, MIN_LEADING_DIGITS_LENGTH, NANPA_COUNTRY_CODE, PLUS_SIGN,
            SEPARATOR_BEFORE_NATIONAL_NUMBER,
        },
        normalize_digits,
    },
    regex_util::{CachedMatch, RegexConsume, full_match_pattern},
};

/// Matched by every format pattern; formatting it yields the template.
const LONGEST_PHONE_NUMBER: &str = "999999999999999";

/// Where a typing session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterState {
    /// Nothing typed since creation or the last [`AsYouTypeFormatter::clear`].
    Cleared,
    /// Fewer than three digits so far, or an international prefix whose
    /// calling code is not complete yet.
    AccumulatingPrefix,
    /// A region is known and its formats are being narrowed down.
    NationalFormatting,
    /// A character that is neither a digit, a letter nor a leading plus was
    /// typed, or the digits outgrew every candidate format. The input is
    /// echoed as typed. Typed punctuation keeps the session here until it is
    /// cleared; an overflow can still recover once a longer national prefix
    /// or an international prefix is extracted.
    FreeForm,
}

/// Formats a phone number one character at a time, the way a dialler shows
/// it while it is being typed.
///
/// A formatter borrows the [`PhoneNumberUtil`] that created it and keeps the
/// state of a single typing session; call [`clear`](Self::clear) before
/// typing another number.
///
/// ```ignore
/// let mut formatter = util.get_as_you_type_formatter("US");
/// for digit in "650253".chars() {
///     formatter.input_digit(digit);
/// }
/// assert_eq!("650 253", formatter.input_digit('2'));
/// ```
pub struct AsYouTypeFormatter<'a> {
    util: &'a PhoneNumberUtil,

    default_country: String,
    default_metadata: Option<&'a PhoneMetadata>,
    current_metadata: Option<&'a PhoneMetadata>,

    current_output: String,
    formatting_template: String,
    /// Pattern of the format `formatting_template` was built from.
    current_formatting_pattern: String,
    accrued_input: String,
    /// Typed digits (letters as their keypad digits) and a leading plus.
    accrued_input_without_formatting: String,
    /// The plus sign or IDD, calling code and national prefix, with the
    /// separators that go after them.
    prefix_before_national_number: String,
    extracted_national_prefix: String,
    national_number: String,

    able_to_format: bool,
    /// Set when a character other than a digit or leading plus was typed.
    input_has_formatting: bool,
    /// Whether the number was entered with a calling code or national
    /// prefix, in which case formats that need neither are ruled out.
    is_complete_number: bool,
    is_expecting_country_calling_code: bool,
    should_add_space_after_national_prefix: bool,

    /// Indices into the format list of `current_metadata` that still fit the
    /// digits typed so far.
    possible_formats: Vec<usize>,
    uses_intl_formats: bool,

    /// Byte offset of the last filled placeholder in `formatting_template`.
    last_match_position: usize,
    /// Character position in `accrued_input` to report while formatting is
    /// off.
    original_position: usize,
    /// Number of characters of `accrued_input_without_formatting` up to the
    /// remembered one.
    position_to_remember: usize,
}

impl<'a> AsYouTypeFormatter<'a> {
    /// Starts a session for numbers dialled from `region_code`. An unknown
    /// region only gets formatting once a `+` and calling code are typed.
    pub(crate) fn new(util: &'a PhoneNumberUtil, region_code: &str) -> Self {
        let default_metadata = Self::get_metadata_for_region(util, region_code);
        Self {
            util,
            default_country: region_code.to_owned(),
            default_metadata,
            current_metadata: default_metadata,
            current_output: String::new(),
            formatting_template: String::new(),
            current_formatting_pattern: String::new(),
            accrued_input: String::new(),
            accrued_input_without_formatting: String::new(),
            prefix_before_national_number: String::new(),
            extracted_national_prefix: String::new(),
            national_number: String::new(),
            able_to_format: true,
            input_has_formatting: false,
            is_complete_number: false,
            is_expecting_country_calling_code: false,
            should_add_space_after_national_prefix: false,
            possible_formats: Vec::new(),
            uses_intl_formats: false,
            last_match_position: 0,
            original_position: 0,
            position_to_remember: 0,
        }
    }

    /// The metadata with the formats of `region_code`, which for regions
    /// sharing a calling code is the metadata of the main region.
    fn get_metadata_for_region(
        util: &'a PhoneNumberUtil,
        region_code: &str,
    ) -> Option<&'a PhoneMetadata> {
        let country_calling_code = util.get_metadata_for_region(region_code)?.country_code();
        let main_country = util.get_region_code_for_country_code(country_calling_code);
        util.get_metadata_for_region(main_country)
    }

    /// Clears the internal state of the formatter, so it can be reused.
    pub fn clear(&mut self) {
        self.current_output.clear();
        self.accrued_input.clear();
        self.accrued_input_without_formatting.clear();
        self.formatting_template.clear();
        self.last_match_position = 0;
        self.current_formatting_pattern.clear();
        self.prefix_before_national_number.clear();
        self.extracted_national_prefix.clear();
        self.national_number.clear();
        self.able_to_format = true;
        self.input_has_formatting = false;
        self.position_to_remember = 0;
        self.original_position = 0;
        self.is_complete_number = false;
        self.is_expecting_country_calling_code = false;
        self.possible_formats.clear();
        self.uses_intl_formats = false;
        self.should_add_space_after_national_prefix = false;
        self.current_metadata = self.default_metadata;
    }

    /// Formats a phone number on-the-fly as each digit is entered and returns
    /// the partially formatted number.
    ///
    /// Letters are taken as their keypad digits and shown as typed. A `+` is
    /// only accepted as the first character; any other character switches
    /// the session to [`FormatterState::FreeForm`].
    pub fn input_digit(&mut self, next_char: char) -> &str {
        let output = self.input_digit_with_option_to_remember_position(next_char, false);
        self.current_output = self.echo_typed_letters(output);
        &self.current_output
    }

    /// Same as [`input_digit`](Self::input_digit), but remembers the position
    /// where `next_char` is inserted, so that it can be retrieved later by
    /// using [`get_remembered_position`](Self::get_remembered_position). The
    /// remembered position will be automatically adjusted if additional
    /// formatting characters are later inserted/removed in front of
    /// `next_char`.
    pub fn input_digit_and_remember_position(&mut self, next_char: char) -> &str {
        let output = self.input_digit_with_option_to_remember_position(next_char, true);
        self.current_output = self.echo_typed_letters(output);
        &self.current_output
    }

    /// Returns the current position in the partially formatted phone number
    /// of the character which was previously passed in as the parameter of
    /// [`input_digit_and_remember_position`](Self::input_digit_and_remember_position).
    /// Positions count characters.
    pub fn get_remembered_position(&self) -> usize {
        if !self.able_to_format {
            return self.original_position;
        }
        let accrued_input_without_formatting = self.accrued_input_without_formatting.as_bytes();
        let mut accrued_input_index = 0;
        let mut current_output_index = 0;
        for output_char in self.current_output.chars() {
            if accrued_input_index >= self.position_to_remember {
                break;
            }
            let output_digit = self.keypad_digit(output_char).unwrap_or(output_char);
            if accrued_input_without_formatting
                .get(accrued_input_index)
                .is_some_and(|expected| char::from(*expected) == output_digit)
            {
                accrued_input_index += 1;
            }
            current_output_index += 1;
        }
        current_output_index
    }

    pub fn state(&self) -> FormatterState {
        if self.accrued_input.is_empty() {
            FormatterState::Cleared
        } else if self.input_has_formatting || !self.able_to_format {
            FormatterState::FreeForm
        } else if self.is_expecting_country_calling_code
            || self.accrued_input_without_formatting.len() < MIN_LEADING_DIGITS_LENGTH
        {
            FormatterState::AccumulatingPrefix
        } else {
            FormatterState::NationalFormatting
        }
    }

    fn input_digit_with_option_to_remember_position(
        &mut self,
        next_char: char,
        remember_position: bool,
    ) -> String {
        self.accrued_input.push(next_char);
        if remember_position {
            self.original_position = self.accrued_input.chars().count();
        }
        // We do formatting on-the-fly only when each character entered is
        // either a digit, a letter, or a plus sign (accepted at the start of
        // the number only).
        let next_char = match self.digit_or_leading_plus_sign(next_char) {
            Some(normalized_char) => {
                self.accrue_digit_or_plus_sign(normalized_char, remember_position);
                normalized_char
            }
            None => {
                trace!("'{}' typed, formatting switched off", next_char);
                self.able_to_format = false;
                self.input_has_formatting = true;
                next_char
            }
        };

        if !self.able_to_format {
            // When we are unable to format because of reasons other than that
            // formatting chars have been entered, it can be due to really long
            // IDDs or NDDs. If that is the case, we might be able to do
            // formatting again after extracting them.
            if self.input_has_formatting {
                return self.accrued_input.clone();
            } else if self.attempt_to_extract_idd() {
                if self.attempt_to_extract_country_calling_code() {
                    return self.attempt_to_choose_pattern_with_prefix_extracted();
                }
            } else if self.able_to_extract_longer_ndd() {
                // Add an additional space to separate long NDD and national
                // significant number for readability. We don't set
                // should_add_space_after_national_prefix to true, since we don't
                // want this to change later when we choose formatting templates.
                self.prefix_before_national_number
                    .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
                return self.attempt_to_choose_pattern_with_prefix_extracted();
            }
            return self.accrued_input.clone();
        }

        // We start to attempt to format only when at least
        // MIN_LEADING_DIGITS_LENGTH digits (the plus sign is counted as a digit
        // as well for this purpose) have been entered.
        match self.accrued_input_without_formatting.len() {
            0..=2 => return self.accrued_input.clone(),
            3 => {
                if self.attempt_to_extract_idd() {
                    self.is_expecting_country_calling_code = true;
                } else {
                    // No IDD or plus sign is found, might be entering in national
                    // format.
                    self.extracted_national_prefix = self.remove_national_prefix_from_national_number();
                    return self.attempt_to_choose_formatting_pattern();
                }
            }
            _ => {}
        }

        if self.is_expecting_country_calling_code {
            if self.attempt_to_extract_country_calling_code() {
                self.is_expecting_country_calling_code = false;
            }
            return fast_cat::concat_str!(
                self.prefix_before_national_number.as_str(),
                self.national_number.as_str()
            );
        }
        if self.possible_formats.is_empty() {
            return self.attempt_to_choose_formatting_pattern();
        }
        // The formatting patterns are already chosen.
        let temp_national_number = self.input_digit_helper(next_char);
        // See if the accrued digits can be formatted properly already. If not,
        // use the results from input_digit_helper, which does formatting based
        // on the formatting pattern chosen.
        let formatted_number = self.attempt_to_format_accrued_digits();
        if !formatted_number.is_empty() {
            return formatted_number;
        }
        let national_number = self.national_number.clone();
        self.narrow_down_possible_formats(&national_number);
        if self.maybe_create_new_template() {
            return self.input_accrued_national_number();
        }
        if self.able_to_format {
            self.append_national_number(&temp_national_number)
        } else {
            self.accrued_input.clone()
        }
    }

    /// The keypad digit of a digit of any script or of a Latin letter.
    fn keypad_digit(&self, c: char) -> Option<char> {
        if c.is_ascii_digit() {
            return Some(c);
        }
        if c.is_ascii_alphabetic() {
            return self
                .util
                .reg_exps
                .alpha_mappings
                .get(&c.to_ascii_uppercase())
                .copied();
        }
        normalize_digits(c.encode_utf8(&mut [0; 4])).chars().next()
    }

    fn digit_or_leading_plus_sign(&self, next_char: char) -> Option<char> {
        if let Some(digit) = self.keypad_digit(next_char) {
            return Some(digit);
        }
        // next_char is already part of accrued_input
        let is_first_char = self.accrued_input.chars().count() == 1;
        (is_first_char
            && self
                .util
                .reg_exps
                .plus_chars_pattern
                .is_match(next_char.encode_utf8(&mut [0; 4])))
        .then_some(PLUS_SIGN)
    }

    fn accrue_digit_or_plus_sign(&mut self, normalized_char: char, remember_position: bool) {
        self.accrued_input_without_formatting.push(normalized_char);
        if normalized_char != PLUS_SIGN {
            self.national_number.push(normalized_char);
        }
        if remember_position {
            self.position_to_remember = self.accrued_input_without_formatting.len();
        }
    }

    /// Puts typed letters back in place of their keypad digits. Output that
    /// does not hold exactly one digit per typed digit or letter is left
    /// alone.
    fn echo_typed_letters(&self, output: String) -> String {
        if !self.accrued_input.chars().any(|c| c.is_ascii_alphabetic()) {
            return output;
        }
        let typed: Vec<char> = self
            .accrued_input
            .chars()
            .filter(|c| self.keypad_digit(*c).is_some())
            .collect();
        if output.chars().filter(char::is_ascii_digit).count() != typed.len() {
            return output;
        }
        let mut typed = typed.into_iter();
        output
            .chars()
            .map(|output_char| {
                if !output_char.is_ascii_digit() {
                    return output_char;
                }
                match typed.next() {
                    Some(typed_char) if typed_char.is_ascii_alphabetic() => typed_char,
                    _ => output_char,
                }
            })
            .collect()
    }

    /// Formats of the current metadata `possible_formats` points into.
    fn format_list(&self) -> &'a [NumberFormat] {
        match self.current_metadata {
            Some(metadata) if self.uses_intl_formats => &metadata.intl_number_format,
            Some(metadata) => &metadata.number_format,
            None => &[],
        }
    }

    fn national_prefix_formatting_rule(&self, format: &'a NumberFormat) -> Cow<'a, str> {
        match self.current_metadata {
            Some(metadata) => metadata.national_prefix_formatting_rule_for(format),
            None => Cow::Borrowed(format.national_prefix_formatting_rule()),
        }
    }

    fn regex(&self, pattern: &str) -> Option<Arc<Regex>> {
        self.util
            .reg_exps
            .regexp_cache
            .get_regex(pattern)
            .inspect_err(|err| error!("Invalid pattern in metadata: {}", err))
            .ok()
    }

    fn prefix_regex(&self, pattern: &str) -> Option<Arc<Regex>> {
        self.util
            .reg_exps
            .regexp_cache
            .prefix_regex(pattern)
            .inspect_err(|err| error!("Invalid pattern in metadata: {}", err))
            .ok()
    }

    fn formatting_rule_has_first_group_only(&self, national_prefix_formatting_rule: &str) -> bool {
        national_prefix_formatting_rule.is_empty()
            || self
                .util
                .reg_exps
                .first_group_only_prefix_pattern
                .is_match(national_prefix_formatting_rule)
    }

    /// Some national prefixes are a substring of others. If extracting the
    /// shorter NDD doesn't result in a number we can format, we try to see if
    /// we can extract a longer version here.
    fn able_to_extract_longer_ndd(&mut self) -> bool {
        if !self.extracted_national_prefix.is_empty() {
            // Put the extracted NDD back to the national number before attempting
            // to extract a new NDD.
            self.national_number
                .insert_str(0, &self.extracted_national_prefix);
            // Remove the previously extracted NDD from prefix_before_national_number.
            // We cannot simply set it to empty string because people sometimes
            // incorrectly enter national prefix after the country code, e.g.
            // +44 (0)20-1234-5678.
            if let Some(index_of_previous_ndd) = self
                .prefix_before_national_number
                .rfind(self.extracted_national_prefix.as_str())
            {
                self.prefix_before_national_number
                    .truncate(index_of_previous_ndd);
            }
        }
        let new_national_prefix = self.remove_national_prefix_from_national_number();
        new_national_prefix != self.extracted_national_prefix
    }

    fn attempt_to_choose_pattern_with_prefix_extracted(&mut self) -> String {
        self.able_to_format = true;
        self.is_expecting_country_calling_code = false;
        self.possible_formats.clear();
        self.last_match_position = 0;
        self.formatting_template.clear();
        self.current_formatting_pattern.clear();
        self.attempt_to_choose_formatting_pattern()
    }

    /// Attempts to set the formatting template and returns a string which
    /// contains the formatted version of the digits entered so far.
    fn attempt_to_choose_formatting_pattern(&mut self) -> String {
        // We start to attempt to format only when at least
        // MIN_LEADING_DIGITS_LENGTH digits of national number (excluding national
        // prefix) have been entered.
        if self.national_number.len() < MIN_LEADING_DIGITS_LENGTH {
            return self.append_national_number(&self.national_number);
        }
        let national_number = self.national_number.clone();
        self.get_available_formats(&national_number);
        // See if the accrued digits can be formatted properly already.
        let formatted_number = self.attempt_to_format_accrued_digits();
        if !formatted_number.is_empty() {
            return formatted_number;
        }
        if self.maybe_create_new_template() {
            self.input_accrued_national_number()
        } else {
            self.accrued_input.clone()
        }
    }

    fn get_available_formats(&mut self, leading_digits: &str) {
        let is_international_number =
            self.is_complete_number && self.extracted_national_prefix.is_empty();
        self.uses_intl_formats = is_international_number
            && self
                .current_metadata
                .is_some_and(|metadata| !metadata.intl_number_format.is_empty());
        self.possible_formats = self
            .format_list()
            .iter()
            .enumerate()
            .filter(|(_, format)| self.is_format_applicable(*format))
            .map(|(index, _)| index)
            .collect();
        self.narrow_down_possible_formats(leading_digits);
    }

    fn is_format_applicable(&self, format: &'a NumberFormat) -> bool {
        let has_first_group_only =
            self.formatting_rule_has_first_group_only(&self.national_prefix_formatting_rule(format));
        if !self.extracted_national_prefix.is_empty()
            && has_first_group_only
            && !format.national_prefix_optional_when_formatting
            && !format.has_domestic_carrier_code_formatting_rule()
        {
            // If a national prefix was extracted and this format shows no
            // national prefix, it is not a match unless the prefix is optional
            // or a carrier code rule may put it back.
            return false;
        }
        if self.extracted_national_prefix.is_empty()
            && !self.is_complete_number
            && !has_first_group_only
            && !format.national_prefix_optional_when_formatting
        {
            // This number was entered without a national prefix, and this
            // formatting rule requires one.
            return false;
        }
        self.util
            .reg_exps
            .eligible_format_pattern
            .is_match(format.format())
    }

    fn narrow_down_possible_formats(&mut self, leading_digits: &str) {
        let index_of_leading_digits_pattern =
            leading_digits.len().saturating_sub(MIN_LEADING_DIGITS_LENGTH);
        let formats = self.format_list();
        self.possible_formats = self
            .possible_formats
            .iter()
            .copied()
            .filter(|&index| {
                let Some(format) = formats.get(index) else {
                    return false;
                };
                let Some(last_pattern_index) = format.leading_digits_pattern.len().checked_sub(1)
                else {
                    // Keep everything that isn't restricted by leading digits.
                    return true;
                };
                let leading_digits_pattern = &format.leading_digits_pattern
                    [index_of_leading_digits_pattern.min(last_pattern_index)];
                self.prefix_regex(leading_digits_pattern)
                    .is_some_and(|pattern| pattern.matches_start(leading_digits))
            })
            .collect();
    }

    /// Checks to see if there is an exact pattern match for these digits. If
    /// so, we should use this instead of any other formatting template whose
    /// leading digits pattern also matches the input.
    fn attempt_to_format_accrued_digits(&mut self) -> String {
        let formats = self.format_list();
        for position in 0..self.possible_formats.len() {
            let Some(number_format) = formats.get(self.possible_formats[position]) else {
                continue;
            };
            let Some(pattern) = self.regex(&full_match_pattern(number_format.pattern())) else {
                continue;
            };
            if !pattern.is_match(&self.national_number) {
                continue;
            }
            self.should_add_space_after_national_prefix = self
                .util
                .reg_exps
                .national_prefix_separators_pattern
                .is_match(&self.national_prefix_formatting_rule(number_format));
            let formatted_number = pattern.replace(&self.national_number, number_format.format());
            // Check that we did not remove nor add any extra digits when we
            // matched this formatting pattern. This usually happens after we
            // entered the last digit during AYTF. Eg: In case of MX, we swallow
            // mobile prefix (1) when formatted but AYTF should retain all the
            // number entered and not change in order to match a format (of same
            // leading digits and length) display in that way.
            let full_output = self.append_national_number(&formatted_number);
            let formatted_number_digits_only = self.util.normalize_diallable_chars_only(&full_output);
            if formatted_number_digits_only == self.accrued_input_without_formatting {
                // If it's the same (i.e entered number and format is same), then
                // it's safe to return this in formatted number as nothing is lost
                // / added.
                return full_output;
            }
        }
        String::new()
    }

    /// Combines the national number with any prefix (IDD/+ and country code or
    /// national prefix) that was collected. A space will be inserted between
    /// them if the current formatting template indicates this to be suitable.
    fn append_national_number(&self, national_number: &str) -> String {
        let prefix = self.prefix_before_national_number.as_str();
        if self.should_add_space_after_national_prefix
            && !prefix.is_empty()
            && !prefix.ends_with(SEPARATOR_BEFORE_NATIONAL_NUMBER)
        {
            // We want to add a space after the national prefix if the national
            // prefix formatting rule indicates that this would normally be done,
            // with the exception of the case where we already appended a space
            // because the NDD was surprisingly long.
            fast_cat::concat_str!(prefix, " ", national_number)
        } else {
            fast_cat::concat_str!(prefix, national_number)
        }
    }

    /// Invokes input_digit_helper on each digit of the national number
    /// accrued, and returns a formatted string in the end.
    fn input_accrued_national_number(&mut self) -> String {
        if self.national_number.is_empty() {
            return self.prefix_before_national_number.clone();
        }
        let national_number = self.national_number.clone();
        let mut temp_national_number = String::new();
        for digit in national_number.chars() {
            temp_national_number = self.input_digit_helper(digit);
        }
        if self.able_to_format {
            self.append_national_number(&temp_national_number)
        } else {
            self.accrued_input.clone()
        }
    }

    /// Returns true if the current country is a NANPA country and the national
    /// number begins with the national prefix.
    fn is_nanpa_number_with_national_prefix(&self) -> bool {
        // For NANPA numbers beginning with 1[2-9], treat the 1 as the national
        // prefix. The reason is that national significant numbers in NANPA always
        // start with [2-9] after the national prefix. Numbers beginning with 1[01]
        // can only be short/emergency numbers, which don't need the national
        // prefix.
        let digits = self.national_number.as_bytes();
        self.current_metadata
            .is_some_and(|metadata| metadata.country_code() == NANPA_COUNTRY_CODE)
            && digits.len() >= 2
            && digits[0] == b'1'
            && digits[1] != b'0'
            && digits[1] != b'1'
    }

    /// Returns the national prefix extracted, or an empty string if it is not
    /// present.
    fn remove_national_prefix_from_national_number(&mut self) -> String {
        let mut start_of_national_number = 0;
        if self.is_nanpa_number_with_national_prefix() {
            start_of_national_number = 1;
            self.prefix_before_national_number.push('1');
            self.prefix_before_national_number
                .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
            self.is_complete_number = true;
        } else if let Some(metadata) = self
            .current_metadata
            .filter(|metadata| metadata.has_national_prefix_for_parsing())
        {
            let national_prefix_end = self
                .prefix_regex(metadata.national_prefix_for_parsing())
                .and_then(|pattern| {
                    pattern
                        .find_start(&self.national_number)
                        .map(|found| found.end())
                });
            // Since some national prefix patterns are entirely optional, check
            // that a national prefix could actually be extracted.
            if let Some(end) = national_prefix_end.filter(|end| *end > 0) {
                // When the national prefix is detected, we use international
                // formatting rules instead of national ones, because national
                // formatting rules could contain local formatting rules for numbers
                // entered without area code.
                self.is_complete_number = true;
                start_of_national_number = end;
                self.prefix_before_national_number
                    .push_str(&self.national_number[..end]);
            }
        }
        let national_prefix = self.national_number[..start_of_national_number].to_owned();
        self.national_number.drain(..start_of_national_number);
        national_prefix
    }

    /// Extracts IDD and plus sign to prefix_before_national_number when they
    /// are available, and places the remaining input into national_number.
    fn attempt_to_extract_idd(&mut self) -> bool {
        let international_prefix = self
            .current_metadata
            .map(|metadata| metadata.international_prefix())
            .unwrap_or_default();
        let idd_pattern = if international_prefix.is_empty() {
            "\\+".to_owned()
        } else {
            fast_cat::concat_str!("\\+|", international_prefix)
        };
        let Some(start_of_country_calling_code) = self
            .prefix_regex(&idd_pattern)
            .and_then(|pattern| {
                pattern
                    .find_start(&self.accrued_input_without_formatting)
                    .map(|found| found.end())
            })
        else {
            return false;
        };
        self.is_complete_number = true;
        self.national_number = self.accrued_input_without_formatting
            [start_of_country_calling_code..]
            .to_owned();
        self.prefix_before_national_number = self.accrued_input_without_formatting
            [..start_of_country_calling_code]
            .to_owned();
        if !self.accrued_input_without_formatting.starts_with(PLUS_SIGN) {
            self.prefix_before_national_number
                .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
        }
        true
    }

    /// Extracts the country calling code from the beginning of
    /// national_number to prefix_before_national_number when they are
    /// available, and places the remaining input into national_number.
    fn attempt_to_extract_country_calling_code(&mut self) -> bool {
        if self.national_number.is_empty() {
            return false;
        }
        let util = self.util;
        let Some((country_code, number_without_country_calling_code)) =
            util.extract_country_code(&self.national_number)
        else {
            return false;
        };
        self.national_number = number_without_country_calling_code.to_owned();
        let new_region_code = util.get_region_code_for_country_code(country_code);
        if new_region_code == RegionCode::un001() {
            self.current_metadata =
                util.get_metadata_for_region_or_calling_code(country_code, new_region_code);
        } else if new_region_code != self.default_country {
            self.current_metadata = Self::get_metadata_for_region(util, new_region_code);
        }
        trace!("Calling code {} typed, formatting for {}", country_code, new_region_code);
        let mut buf = itoa::Buffer::new();
        self.prefix_before_national_number
            .push_str(buf.format(country_code));
        self.prefix_before_national_number
            .push(SEPARATOR_BEFORE_NATIONAL_NUMBER);
        // When we have successfully extracted the IDD, the previously extracted
        // NDD should be cleared because it is no longer valid.
        self.extracted_national_prefix.clear();
        true
    }

    fn maybe_create_new_template(&mut self) -> bool {
        // When there are multiple available formats, the formatter uses the
        // first format where a formatting template could be created.
        let formats = self.format_list();
        while let Some(&format_index) = self.possible_formats.first() {
            let Some(number_format) = formats.get(format_index) else {
                self.possible_formats.remove(0);
                continue;
            };
            let pattern = number_format.pattern();
            if self.current_formatting_pattern == pattern {
                return false;
            }
            if self.create_formatting_template(number_format) {
                self.current_formatting_pattern = pattern.to_owned();
                self.should_add_space_after_national_prefix = self
                    .util
                    .reg_exps
                    .national_prefix_separators_pattern
                    .is_match(&self.national_prefix_formatting_rule(number_format));
                // With a new formatting template, the matched position using the
                // old template needs to be reset.
                self.last_match_position = 0;
                return true;
            }
            self.possible_formats.remove(0);
        }
        self.able_to_format = false;
        false
    }

    fn create_formatting_template(&mut self, format: &NumberFormat) -> bool {
        self.formatting_template = self.get_formatting_template(format.pattern(), format.format());
        !self.formatting_template.is_empty()
    }

    /// Gets a formatting template which can be used to efficiently format a
    /// partial number where digits are added one by one.
    fn get_formatting_template(&self, number_pattern: &str, number_format: &str) -> String {
        let Some(pattern) = self.regex(number_pattern) else {
            return String::new();
        };
        // Creates a phone number consisting only of the digit 9 that matches the
        // number_pattern by applying the pattern to the longest phone number.
        let Some(a_phone_number) = pattern.find(LONGEST_PHONE_NUMBER).map(|found| found.as_str())
        else {
            return String::new();
        };
        // No formatting template can be created if the number of digits entered
        // so far is longer than the maximum the current formatting rule can
        // accommodate.
        if a_phone_number.len() < self.national_number.len() {
            return String::new();
        }
        // Formats the number according to number_format, then replaces each
        // digit with the placeholder.
        let template = pattern.replace(a_phone_number, number_format);
        template.replace('9', DIGIT_PLACEHOLDER.encode_utf8(&mut [0; 4]))
    }

    fn input_digit_helper(&mut self, next_char: char) -> String {
        // Note that formatting_template is not guaranteed to have a value, it
        // could be empty, e.g. when the next digit is entered after extracting an
        // IDD or NDD.
        let placeholder_position = self
            .formatting_template
            .get(self.last_match_position..)
            .and_then(|rest| rest.find(DIGIT_PLACEHOLDER))
            .map(|offset| self.last_match_position + offset);
        match placeholder_position {
            Some(position) => {
                self.formatting_template.replace_range(
                    position..position + DIGIT_PLACEHOLDER.len_utf8(),
                    next_char.encode_utf8(&mut [0; 4]),
                );
                self.last_match_position = position;
                self.formatting_template[..position + next_char.len_utf8()].to_owned()
            }
            None => {
                if self.possible_formats.len() == 1 {
                    // More digits are entered than we could handle, and there are
                    // no other valid patterns to try.
                    self.able_to_format = false;
                }
                // else, we just reset the formatting pattern.
                self.current_formatting_pattern.clear();
                self.accrued_input.clone()
            }
        }
    }
}
