// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 The Kashin Vladislav (Rust adaptation author)
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

use std::{collections::HashMap, sync::Arc};

use regex::Regex;

use crate::{
    phonenumberutil::{
        helper_constants::{
            DIGITS, MIN_LENGTH_FOR_NSN, PLUS_CHARS, PLUS_SIGN, RFC3966_VISUAL_SEPARATOR,
            SECOND_NUMBER_START, STAR_SIGN, VALID_ALPHA, VALID_PUNCTUATION,
        },
        helper_functions::create_extn_pattern,
    },
    regexp_cache::RegexCache,
};

/// Keypad letters, the same for every region.
const ALPHA_MAPPINGS: [(char, char); 26] = [
    ('A', '2'), ('B', '2'), ('C', '2'),
    ('D', '3'), ('E', '3'), ('F', '3'),
    ('G', '4'), ('H', '4'), ('I', '4'),
    ('J', '5'), ('K', '5'), ('L', '5'),
    ('M', '6'), ('N', '6'), ('O', '6'),
    ('P', '7'), ('Q', '7'), ('R', '7'), ('S', '7'),
    ('T', '8'), ('U', '8'), ('V', '8'),
    ('W', '9'), ('X', '9'), ('Y', '9'), ('Z', '9'),
];

/// Characters that must survive when a number is reduced to what is dialled.
const DIALLABLE_SYMBOLS: [char; 3] = ['+', '*', '#'];

fn compile(pattern: &str) -> Regex {
    // only ever called with the constant patterns below
    Regex::new(pattern).unwrap_or_else(|err| panic!("Invalid constant pattern {pattern}: {err}"))
}

pub(crate) struct PhoneNumberRegExpsAndMappings {
    /// Cache for patterns that come from metadata, shared with the matcher.
    pub regexp_cache: Arc<RegexCache>,

    /// Uppercase letters to keypad digits. Lookups uppercase the key first.
    pub alpha_mappings: HashMap<char, char>,
    /// `alpha_mappings` plus ASCII digits mapping to themselves.
    pub alpha_phone_mappings: HashMap<char, char>,
    /// ASCII digits and the symbols in [`DIALLABLE_SYMBOLS`].
    pub diallable_char_mappings: HashMap<char, char>,

    /// Single international prefix, e.g. "011" in the US: ASCII digits with
    /// possibly one tilde that signals waiting for the tone. Regions with
    /// several prefixes have a regex that will not fully match this.
    pub single_international_prefix: Regex,

    pub capturing_digit_pattern: Regex,

    /// Characters a phone number may start with for the purposes of parsing:
    /// digits and the plus sign. Alpha characters and punctuation before the
    /// first of these are stripped.
    pub valid_start_char_pattern: Regex,

    /// Trailing characters we want to remove: everything that is neither a
    /// letter nor a number, except '#' which may end an extension.
    pub unwanted_end_char_pattern: Regex,

    pub second_number_start_pattern: Regex,

    /// Groups of valid punctuation characters.
    pub separator_pattern: Regex,

    /// All known extension prefixes followed by up to the allowed number of
    /// digits, anchored at the end of the input. Case-insensitive.
    pub extn_pattern: Regex,

    /// Whole-input check of viable phone numbers, location independent.
    ///
    /// Either exactly [`MIN_LENGTH_FOR_NSN`] digits with no punctuation, so that
    /// short numbers such as "15" parse, or at least three digits in
    /// international form with punctuation, star signs and letters between
    /// them. The symbol 'x' counts as punctuation since it is often a
    /// placeholder for carrier codes. An extension may follow.
    pub valid_phone_number_pattern: Regex,

    /// Numbers with at least three letters are treated as vanity numbers
    /// whose letters stand for digits.
    pub valid_alpha_phone_pattern: Regex,

    /// Finds the first `$N` group reference in a format. It is not simply
    /// `$1` because some formats never use the first group (Argentina).
    pub first_group_capturing_pattern: Regex,

    pub carrier_code_pattern: Regex,

    pub plus_chars_pattern: Regex,

    /// Valid global-number-digits for the RFC3966 phone-context parameter.
    pub rfc3966_global_number_digits_pattern: Regex,

    /// A format is eligible for as-you-type formatting when it consists of
    /// `$N` groups, starting with `$1`, separated only by punctuation. This
    /// keeps things like the star sign of Israeli star numbers out of the
    /// output.
    pub eligible_format_pattern: Regex,

    /// Whether a national prefix formatting rule is just the first group,
    /// i.e. does not add the national prefix. Unbalanced parentheses are
    /// allowed on purpose.
    pub first_group_only_prefix_pattern: Regex,

    /// Separators after the national prefix in a formatting rule.
    pub national_prefix_separators_pattern: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    pub fn new(regexp_cache: Arc<RegexCache>) -> Self {
        let extn_patterns_for_parsing = create_extn_pattern(true);
        let valid_phone_number = format!(
            "{digits}{{{min}}}|[{plus}]*(?:[{punct}{star}]*{digits}){{3,}}[{punct}{star}{alpha}{digits}]*",
            digits = DIGITS,
            min = MIN_LENGTH_FOR_NSN,
            plus = PLUS_CHARS,
            punct = VALID_PUNCTUATION,
            star = STAR_SIGN,
            alpha = VALID_ALPHA,
        );
        let rfc3966_phone_digit = format!("(?:{}|{})", DIGITS, RFC3966_VISUAL_SEPARATOR);

        let alpha_mappings: HashMap<char, char> = ALPHA_MAPPINGS.into_iter().collect();
        let ascii_digit_mappings = ('0'..='9').map(|digit| (digit, digit));

        let mut alpha_phone_mappings = alpha_mappings.clone();
        alpha_phone_mappings.extend(ascii_digit_mappings.clone());

        let mut diallable_char_mappings: HashMap<char, char> = ascii_digit_mappings.collect();
        diallable_char_mappings.extend(DIALLABLE_SYMBOLS.map(|symbol| (symbol, symbol)));

        Self {
            regexp_cache,
            alpha_mappings,
            alpha_phone_mappings,
            diallable_char_mappings,
            single_international_prefix: compile(
                "^[\\d]+(?:[~\u{2053}\u{223C}\u{FF5E}][\\d]+)?$",
            ),
            capturing_digit_pattern: compile(&format!("({})", DIGITS)),
            valid_start_char_pattern: compile(&format!("[{}{}]", PLUS_CHARS, DIGITS)),
            unwanted_end_char_pattern: compile("[^\\p{N}\\p{L}#]+$"),
            second_number_start_pattern: compile(SECOND_NUMBER_START),
            separator_pattern: compile(&format!("[{}]+", VALID_PUNCTUATION)),
            extn_pattern: compile(&format!("(?i)(?:{})$", extn_patterns_for_parsing)),
            valid_phone_number_pattern: compile(&format!(
                "(?i)^(?:{})(?:{})?$",
                valid_phone_number, extn_patterns_for_parsing
            )),
            valid_alpha_phone_pattern: compile("^(?:.*?[A-Za-z]){3}"),
            first_group_capturing_pattern: compile("(\\$\\d)"),
            carrier_code_pattern: compile("\\$CC"),
            plus_chars_pattern: compile(&format!("^[{}]+", PLUS_CHARS)),
            rfc3966_global_number_digits_pattern: compile(&format!(
                "^\\{}{}*{}{}*$",
                PLUS_SIGN, rfc3966_phone_digit, DIGITS, rfc3966_phone_digit
            )),
            eligible_format_pattern: compile(&format!(
                "^[{p}]*\\$1[{p}]*(?:\\$\\d[{p}]*)*$",
                p = VALID_PUNCTUATION
            )),
            first_group_only_prefix_pattern: compile("^\\(?\\$1\\)?$"),
            national_prefix_separators_pattern: compile("[- ]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::PhoneNumberRegExpsAndMappings;
    use crate::regexp_cache::RegexCache;

    fn reg_exps() -> PhoneNumberRegExpsAndMappings {
        PhoneNumberRegExpsAndMappings::new(Arc::new(RegexCache::new()))
    }

    #[test]
    fn check_regexps_are_compiling() {
        reg_exps();
    }

    #[test]
    fn viable_phone_number_shapes() {
        let reg_exps = reg_exps();
        let viable = &reg_exps.valid_phone_number_pattern;
        assert!(viable.is_match("15"));
        assert!(viable.is_match("+1 (650) 253-0000"));
        assert!(viable.is_match("1-800-FLOWERS"));
        assert!(viable.is_match("650 253 0000 ext. 123"));
        assert!(!viable.is_match("1"));
        assert!(!viable.is_match("1+1+1"));
    }

    #[test]
    fn eligible_formats() {
        let reg_exps = reg_exps();
        let eligible = &reg_exps.eligible_format_pattern;
        assert!(eligible.is_match("$1 $2 $3"));
        assert!(eligible.is_match("($1) $2-$3"));
        assert!(!eligible.is_match("$2 $1"));
        assert!(!eligible.is_match("*$1"));
    }
}
