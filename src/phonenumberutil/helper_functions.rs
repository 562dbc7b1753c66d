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

use std::collections::{HashMap, HashSet};

use strum::IntoEnumIterator;

use crate::{
    metadata::{PhoneMetadata, PhoneNumberDesc},
    phonenumber::PhoneNumber,
};

use super::{
    NumberLengthType, PhoneNumberFormat, PhoneNumberType, ValidationError,
    helper_constants::{
        DIGITS, OPTIONAL_EXT_SUFFIX, POSSIBLE_CHARS_AFTER_EXT_LABEL,
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL, RFC3966_EXTN_PREFIX, RFC3966_PREFIX,
    },
};

/// Returns the description inside the metadata of the appropriate type, or
/// `None` if the region has no numbers of that type. Fixed-line and mobile
/// descs that were elided resolve to the general desc.
pub(super) fn get_number_desc_by_type(
    metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> Option<&PhoneNumberDesc> {
    match phone_number_type {
        PhoneNumberType::PremiumRate => metadata.premium_rate.as_ref(),
        PhoneNumberType::TollFree => metadata.toll_free.as_ref(),
        PhoneNumberType::Mobile => Some(metadata.mobile_desc()),
        PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile => {
            Some(metadata.fixed_line_desc())
        }
        PhoneNumberType::SharedCost => metadata.shared_cost.as_ref(),
        PhoneNumberType::VoIP => metadata.voip.as_ref(),
        PhoneNumberType::PersonalNumber => metadata.personal_number.as_ref(),
        PhoneNumberType::Pager => metadata.pager.as_ref(),
        PhoneNumberType::UAN => metadata.uan.as_ref(),
        PhoneNumberType::VoiceMail => metadata.voicemail.as_ref(),
        // Instead of the default case, we only match `Unknown`
        PhoneNumberType::Unknown => Some(&metadata.general_desc),
    }
}

/// A helper function that is used by Format and FormatByPattern.
pub(super) fn prefix_number_with_country_calling_code(
    country_calling_code: i32,
    number_format: PhoneNumberFormat,
    formatted_number: &mut String,
) {
    let mut buf = itoa::Buffer::new();
    let country_calling_code_str = buf.format(country_calling_code);

    // we anyway allocate a new string in concatenation, so we'l do it once
    // with capacity of resulting string
    let prefixed = match number_format {
        PhoneNumberFormat::National => return,
        PhoneNumberFormat::E164 => {
            fast_cat::concat_str!("+", country_calling_code_str, formatted_number.as_str())
        }
        PhoneNumberFormat::International => {
            fast_cat::concat_str!("+", country_calling_code_str, " ", formatted_number.as_str())
        }
        PhoneNumberFormat::RFC3966 => fast_cat::concat_str!(
            RFC3966_PREFIX,
            "+",
            country_calling_code_str,
            "-",
            formatted_number.as_str()
        ),
    };
    *formatted_number = prefixed;
}

/// Returns true when one national number is the suffix of the other or both are
/// the same.
pub(super) fn is_national_number_suffix_of_the_other(
    first_number: &PhoneNumber,
    second_number: &PhoneNumber,
) -> bool {
    let mut first_buf = itoa::Buffer::new();
    let first_number_national_number = first_buf.format(first_number.national_number());
    let mut second_buf = itoa::Buffer::new();
    let second_number_national_number = second_buf.format(second_number.national_number());
    // ends_with is also true if the numbers are equal.
    first_number_national_number.ends_with(second_number_national_number)
        || second_number_national_number.ends_with(first_number_national_number)
}

/// Helper method for constructing regular expressions for parsing. Creates an
/// expression that captures up to max_length digits.
pub(super) fn extn_digits(max_length: u32) -> String {
    let mut buf = itoa::Buffer::new();
    let max_length_str = buf.format(max_length);
    fast_cat::concat_str!("(", DIGITS, "{1,", max_length_str, "})")
}

/// Creates the regular-expression pattern to match extensions. Note that:
/// - There are four capturing groups for the extension itself, six when
///   parsing. If this number is changed, `maybe_strip_extension` needs to be
///   updated.
/// - The only capturing groups should be around the digits that you want to
///   capture as part of the extension, or else parsing will fail!
pub(super) fn create_extn_pattern(for_parsing: bool) -> String {
    // We cap the maximum length of an extension based on the ambiguity of the
    // way the extension is prefixed. As per ITU, the officially allowed
    // length for extensions is actually 40, but we don't support this since we
    // haven't seen real examples and this introduces many false interpretations
    // as the extension labels are not standardized.
    let ext_limit_after_explicit_label = 20;
    let ext_limit_after_likely_label = 15;
    let ext_limit_after_ambiguous_char = 9;
    let ext_limit_when_not_sure = 6;

    // Two options for representing any non-ASCII character like ó: the
    // character itself, and the decomposed form with the combining acute accent.

    // Here the extension is called out in a more explicit way, i.e mentioning it
    // obvious patterns like "ext.".
    let explicit_ext_labels = "(?:e?xt(?:ensi(?:o\u{0301}?|\u{00F3}))?n?|(?:\u{FF45})?\u{FF58}\u{FF54}(?:\u{FF4E})?|\u{0434}\u{043E}\u{0431}|anexo)";
    // One-character symbols that can be used to indicate an extension, and less
    // commonly used or more ambiguous extension labels.
    let ambiguous_ext_labels = "(?:[x\u{FF58}#\u{FF03}~\u{FF5E}]|int|\u{FF49}\u{FF4E}\u{FF54})";
    // When extension is not separated clearly.
    let ambiguous_separator = "[- ]+";

    let rfc_extn = fast_cat::concat_str!(
        RFC3966_EXTN_PREFIX,
        &extn_digits(ext_limit_after_explicit_label)
    );
    let explicit_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        explicit_ext_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_explicit_label),
        OPTIONAL_EXT_SUFFIX
    );
    let ambiguous_extn = fast_cat::concat_str!(
        POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL,
        ambiguous_ext_labels,
        POSSIBLE_CHARS_AFTER_EXT_LABEL,
        &extn_digits(ext_limit_after_ambiguous_char),
        OPTIONAL_EXT_SUFFIX
    );

    let american_style_extn_with_suffix = fast_cat::concat_str!(
        ambiguous_separator,
        &extn_digits(ext_limit_when_not_sure),
        "#"
    );

    // The first alternative covers RFC 3966 format, where the extension is
    // added using ";ext=". The second more generic where extension is mentioned
    // with explicit labels like "ext:". In both the above cases we allow more
    // numbers in extension than any other extension labels. The third one
    // captures when single character extension labels or less commonly used
    // labels are present. In such cases we capture fewer extension digits in
    // order to reduce the chance of falsely interpreting two numbers beside each
    // other as a number + extension. The fourth one covers the special case of
    // American numbers where the extension is written with a hash at the end,
    // such as "- 503#".
    let extension_pattern = fast_cat::concat_str!(
        &rfc_extn,
        "|",
        &explicit_extn,
        "|",
        &ambiguous_extn,
        "|",
        &american_style_extn_with_suffix
    );
    // Additional pattern that is supported when parsing extensions, not when
    // matching.
    if for_parsing {
        // ",," is commonly used for auto dialling the extension when connected.
        // Semi-colon works in Iphone and also in Android to pop up a button with
        // the extension number following.
        let auto_dialling_and_ext_labels_found = "(?:,{2}|;)";
        // Same as POSSIBLE_SEPARATORS_BETWEEN_NUMBER_AND_EXT_LABEL, but not
        // matching comma as extension label may have it.
        let possible_separators_number_ext_label_no_comma = "[ \u{00A0}\\t]*";

        let auto_dialling_extn = fast_cat::concat_str!(
            possible_separators_number_ext_label_no_comma,
            auto_dialling_and_ext_labels_found,
            POSSIBLE_CHARS_AFTER_EXT_LABEL,
            &extn_digits(ext_limit_after_likely_label),
            OPTIONAL_EXT_SUFFIX
        );
        let only_commas_extn = fast_cat::concat_str!(
            possible_separators_number_ext_label_no_comma,
            "(?:,)+",
            POSSIBLE_CHARS_AFTER_EXT_LABEL,
            &extn_digits(ext_limit_after_ambiguous_char),
            OPTIONAL_EXT_SUFFIX
        );
        // Here the first pattern is exclusive for extension autodialling formats
        // which are used when dialling and in this case we accept longer
        // extensions. However, the second pattern is more liberal on number of
        // commas that acts as extension labels, so we have strict cap on number of
        // digits in such extensions.
        return fast_cat::concat_str!(
            &extension_pattern,
            "|",
            &auto_dialling_extn,
            "|",
            &only_commas_extn
        );
    }
    extension_pattern
}

/// Normalizes a string of characters representing a phone number by replacing
/// all characters found in the accompanying map with the values therein, and
/// stripping all other characters if remove_non_matches is true.
///
/// Parameters:
/// * `normalization_replacements` - a mapping of characters to what they should be
///   replaced by in the normalized version of the phone number
/// * `remove_non_matches` - indicates whether characters that are not able to be
///   replaced should be stripped from the number. If this is false, they will be
///   left unchanged in the number.
/// * `phone_number` - the characters to normalize
pub(super) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    phone_number: &str,
) -> String {
    let mut normalized_number = String::with_capacity(phone_number.len());
    for phone_char in phone_number.chars() {
        if let Some(replacement) = normalization_replacements.get(&phone_char.to_ascii_uppercase())
        {
            normalized_number.push(*replacement);
        } else if !remove_non_matches {
            normalized_number.push(phone_char);
        }
        // If neither of the above are true, we remove this character.
    }
    normalized_number
}

/// Maps every Unicode decimal digit to its ASCII counterpart and drops all
/// other characters.
pub(crate) fn normalize_digits(phone_number: &str) -> String {
    let ascii_digits: String = dec_from_char::normalize_decimals(phone_number).into();
    ascii_digits.chars().filter(char::is_ascii_digit).collect()
}

/// Returns `true` if there is any possible number data set for a particular
/// PhoneNumberDesc.
pub(super) fn desc_has_possible_number_data(desc: Option<&PhoneNumberDesc>) -> bool {
    // An empty list means numbers of this type inherit from the general desc,
    // a single -1 that no numbers exist for this type.
    desc.is_some_and(|desc| desc.possible_length.as_slice() != [-1])
}

/// Returns `true` if there is any data set for a particular PhoneNumberDesc.
pub(super) fn desc_has_data(desc: Option<&PhoneNumberDesc>) -> bool {
    // Checking most properties since we don't know what's present, since a loader
    // may have stripped just one of them (e.g. the example number). We don't
    // bother checking the local-only lengths, since if this is the only thing
    // that's present we don't really support the type at all.
    desc.is_some_and(|d| {
        d.has_example_number() || desc_has_possible_number_data(desc) || d.has_national_number_pattern()
    })
}

/// Returns the types we have metadata for based on the PhoneMetadata object
/// passed in.
pub(super) fn get_supported_types_for_metadata(metadata: &PhoneMetadata) -> HashSet<PhoneNumberType> {
    PhoneNumberType::iter()
        // Never return FIXED_LINE_OR_MOBILE (it is a convenience type, and
        // represents that a particular number type can't be
        // determined) or UNKNOWN (the non-type).
        .filter(|number_type| {
            !matches!(
                number_type,
                PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown
            )
        })
        .filter(|number_type| desc_has_data(get_number_desc_by_type(metadata, *number_type)))
        .collect()
}

/// Lengths declared by a desc, falling back to the general desc when the desc
/// inherits them. A missing desc yields `[-1]`, which matches nothing.
fn possible_lengths_or_general<'a>(
    desc: Option<&'a PhoneNumberDesc>,
    phone_metadata: &'a PhoneMetadata,
) -> &'a [i32] {
    const NO_LENGTHS: &[i32] = &[-1];
    match desc {
        None => NO_LENGTHS,
        Some(desc) if desc.possible_length.is_empty() => {
            phone_metadata.general_desc.possible_length.as_slice()
        }
        Some(desc) => desc.possible_length.as_slice(),
    }
}

/// Helper method to check a number against possible lengths for this number
/// type, and determine whether it matches, or is too short or too long.
pub(super) fn test_number_length(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> Result<NumberLengthType, ValidationError> {
    let desc_for_type = get_number_desc_by_type(phone_metadata, phone_number_type);
    // Where a sub-description (e.g. fixed-line) has the same possible lengths
    // as the parent, they are missing and we fall back to the general desc.
    let mut possible_lengths = possible_lengths_or_general(desc_for_type, phone_metadata).to_vec();
    let mut local_lengths = desc_for_type
        .map(|desc| desc.possible_length_local_only.clone())
        .unwrap_or_default();

    if phone_number_type == PhoneNumberType::FixedLineOrMobile {
        if !desc_has_possible_number_data(desc_for_type) {
            // The rare case has been encountered where no fixedLine data is available
            // (true for some non-geographical entities), so we just check mobile.
            return test_number_length(phone_number, phone_metadata, PhoneNumberType::Mobile);
        }
        let mobile_desc = get_number_desc_by_type(phone_metadata, PhoneNumberType::Mobile);
        if desc_has_possible_number_data(mobile_desc) {
            // Merge the mobile data in if there was any, again resolving
            // inherited lengths from the general desc.
            possible_lengths
                .extend_from_slice(possible_lengths_or_general(mobile_desc, phone_metadata));
            possible_lengths.sort_unstable();
            possible_lengths.dedup();

            if let Some(mobile_desc) = mobile_desc {
                local_lengths.extend_from_slice(&mobile_desc.possible_length_local_only);
                local_lengths.sort_unstable();
            }
        }
    }

    // If the type is not supported at all (indicated by the possible lengths
    // containing -1 at this point) we return invalid length.
    let (Some(&minimum_length), Some(&maximum_length)) =
        (possible_lengths.first(), possible_lengths.last())
    else {
        return Err(ValidationError::InvalidLength);
    };
    if minimum_length == -1 {
        return Err(ValidationError::InvalidLength);
    }

    let actual_length = phone_number.len() as i32;
    // There is never an overlap between the possible lengths and the
    // local-only lengths.
    if local_lengths.contains(&actual_length) {
        return Ok(NumberLengthType::IsPossibleLocalOnly);
    }

    if minimum_length == actual_length {
        Ok(NumberLengthType::IsPossible)
    } else if minimum_length > actual_length {
        Err(ValidationError::TooShort)
    } else if maximum_length < actual_length {
        Err(ValidationError::TooLong)
    } else if possible_lengths[1..].contains(&actual_length) {
        // We skip the first element; we've already checked it.
        Ok(NumberLengthType::IsPossible)
    } else {
        Err(ValidationError::InvalidLength)
    }
}

/// Helper method to check a number against possible lengths for this region,
/// based on the metadata being passed in, and determine whether it matches, or
/// is too short or too long.
pub(super) fn test_number_length_with_unknown_type(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
) -> Result<NumberLengthType, ValidationError> {
    test_number_length(phone_number, phone_metadata, PhoneNumberType::Unknown)
}

#[cfg(test)]
mod tests {
    use super::{
        create_extn_pattern, normalize_digits, test_number_length,
        test_number_length_with_unknown_type,
    };
    use crate::{
        metadata::{PhoneMetadata, PhoneNumberDesc},
        phonenumberutil::{NumberLengthType, PhoneNumberType, ValidationError},
    };

    fn metadata() -> PhoneMetadata {
        PhoneMetadata {
            id: "XX".to_owned(),
            country_code: 999,
            general_desc: PhoneNumberDesc::new("\\d{6,9}", &[6, 8, 9]).with_local_only_lengths(&[5]),
            fixed_line: Some(PhoneNumberDesc::new("[2-5]\\d{5,8}", &[])),
            mobile: Some(PhoneNumberDesc::new("7\\d{8}", &[9])),
            ..Default::default()
        }
    }

    #[test]
    fn length_against_general_desc() {
        let metadata = metadata();
        assert_eq!(
            Ok(NumberLengthType::IsPossible),
            test_number_length_with_unknown_type("123456", &metadata)
        );
        assert_eq!(
            Ok(NumberLengthType::IsPossibleLocalOnly),
            test_number_length_with_unknown_type("12345", &metadata)
        );
        assert_eq!(
            Err(ValidationError::TooShort),
            test_number_length_with_unknown_type("1234", &metadata)
        );
        assert_eq!(
            Err(ValidationError::InvalidLength),
            test_number_length_with_unknown_type("1234567", &metadata)
        );
        assert_eq!(
            Err(ValidationError::TooLong),
            test_number_length_with_unknown_type("1234567890", &metadata)
        );
    }

    #[test]
    fn length_for_types() {
        let metadata = metadata();
        // mobile declares only 9
        assert_eq!(
            Err(ValidationError::TooShort),
            test_number_length("71234567", &metadata, PhoneNumberType::Mobile)
        );
        // fixed line inherits 6, 8 and 9
        assert_eq!(
            Ok(NumberLengthType::IsPossible),
            test_number_length("21234567", &metadata, PhoneNumberType::FixedLine)
        );
        assert_eq!(
            Ok(NumberLengthType::IsPossible),
            test_number_length("21234567", &metadata, PhoneNumberType::FixedLineOrMobile)
        );
        assert_eq!(
            Err(ValidationError::InvalidLength),
            test_number_length("212345", &metadata, PhoneNumberType::TollFree)
        );
    }

    #[test]
    fn extension_pattern_capture_groups() {
        let pattern = regex::Regex::new(&create_extn_pattern(false)).unwrap();
        // group 0 is the whole match
        assert_eq!(5, pattern.captures_len());
        let pattern = regex::Regex::new(&create_extn_pattern(true)).unwrap();
        assert_eq!(7, pattern.captures_len());
    }

    #[test]
    fn digits_of_other_scripts_are_normalized() {
        assert_eq!("0123", normalize_digits("\u{FF10}1-\u{0662}3"));
        assert_eq!("", normalize_digits("abc"));
    }
}
