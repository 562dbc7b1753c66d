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

// The minimum and maximum length of the national significant number.
pub const MIN_LENGTH_FOR_NSN: usize = 2;
// The ITU says the maximum length should be 15, but we have found longer
// numbers in Germany.
pub const MAX_LENGTH_FOR_NSN: usize = 17;
/// The maximum length of the country calling code.
pub const MAX_LENGTH_COUNTRY_CODE: usize = 3;
/// Longer raw input is rejected before any regex runs on it.
pub const MAX_INPUT_STRING_LENGTH: usize = 250;

pub const PLUS_CHARS: &str = "+\u{FF0B}";
// Acceptable punctuation found in phone numbers, as the body of a regex
// character class. Dashes, white space, full stops, slashes, square
// brackets, parentheses and tildes, plus the letter 'x' which is used as a
// placeholder for carrier information in some phone numbers. Full-width
// variants are also present. Brackets and the leading dash are escaped
// since the regex crate supports nested classes.
pub const VALID_PUNCTUATION: &str = "\\-x\
\u{2010}-\u{2015}\u{2212}\u{30FC}\u{FF0D}-\u{FF0F} \u{00A0}\
\u{00AD}\u{200B}\u{2060}\u{3000}()\u{FF08}\u{FF09}\u{FF3B}\
\u{FF3D}.\\[\\]/~\u{2053}\u{223C}\u{FF5E}";

// Characters typically used to start a second phone number for the
// purposes of parsing, as in "(530) 583-6985 x302/x2303". Everything from
// the marker on is dropped.
pub const SECOND_NUMBER_START: &str = r"[\\/] *x";

pub const PLUS_SIGN: char = '+';
pub const STAR_SIGN: &str = "*";
pub const RFC3966_EXTN_PREFIX: &str = ";ext=";
pub const RFC3966_PREFIX: &str = "tel:";
pub const RFC3966_PHONE_CONTEXT: &str = ";phone-context=";
pub const RFC3966_ISDN_SUBADDRESS: &str = ";isub=";
pub const RFC3966_VISUAL_SEPARATOR: &str = r"[\-\.\(\)]?";

pub const DIGITS: &str = r"\p{Nd}";

pub const VALID_ALPHA: &str = "a-zA-Z";

// Default extension prefix to use when formatting. This will be put in front of
// any extension component of the number, after the main national number is
// formatted. Regions may override it with a preferred extension prefix.
pub const DEFAULT_EXTN_PREFIX: &str = " ext. ";

// Separators allowed between the number and an extension label.
pub const POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL: &str = "[ \u{00A0}\\t,]*";
// Optional full stop (.) or colon, followed by zero or more
// spaces/tabs/commas.
pub const POSSIBLE_CHARS_AFTER_EXT_LABEL: &str = "[:\\.\u{FF0E}]?[ \u{00A0}\\t,-]*";
pub const OPTIONAL_EXT_SUFFIX: &str = "#?";

pub const NANPA_COUNTRY_CODE: i32 = 1;

/// Stands for a digit in an as-you-type formatting template; a punctuation
/// space, which never occurs in metadata formats.
pub const DIGIT_PLACEHOLDER: char = '\u{2008}';
/// Separator between the prefix (IDD, calling code, national prefix) and the
/// national number in as-you-type output.
pub const SEPARATOR_BEFORE_NATIONAL_NUMBER: char = ' ';
/// As-you-type formatting kicks in once this many digits are known.
pub const MIN_LEADING_DIGITS_LENGTH: usize = 3;
