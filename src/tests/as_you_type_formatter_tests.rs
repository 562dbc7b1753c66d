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

use crate::{AsYouTypeFormatter, FormatterState};

use super::{region_code::RegionCode, test_metadata::get_phone_util};

/// Types `input` one character at a time and checks every intermediate
/// output.
fn assert_typed(formatter: &mut AsYouTypeFormatter<'_>, input: &str, expected: &[&str]) {
    assert_eq!(input.chars().count(), expected.len());
    for (next_char, expected) in input.chars().zip(expected) {
        assert_eq!(*expected, formatter.input_digit(next_char), "after '{}'", next_char);
    }
}

#[test]
fn aytf_us() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_typed(
        &mut formatter,
        "6502532222",
        &[
            "6",
            "65",
            "650",
            "650 2",
            "650 25",
            "650 253",
            "650 2532",
            "650 253 22",
            "650 253 222",
            "650 253 2222",
        ],
    );
}

#[test]
fn aytf_us_full_width_characters() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!("\u{FF16}", formatter.input_digit('\u{FF16}'));
    assert_eq!("\u{FF16}\u{FF15}", formatter.input_digit('\u{FF15}'));
    assert_eq!("650", formatter.input_digit('\u{FF10}'));
    assert_eq!("650 2", formatter.input_digit('\u{FF12}'));
}

#[test]
fn aytf_gb_fixed_line() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::gb());
    assert_typed(
        &mut formatter,
        "02070313000",
        &[
            "0",
            "02",
            "020",
            "020 7",
            "020 70",
            "020 703",
            "020 7031",
            "020 7031 3",
            "020 7031 30",
            "020 7031 300",
            "020 7031 3000",
        ],
    );
}

#[test]
fn aytf_international_number_from_us() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_typed(
        &mut formatter,
        "+442070313000",
        &[
            "+",
            "+4",
            "+44 ",
            "+44 2",
            "+44 20",
            "+44 20 7",
            "+44 20 70",
            "+44 20 703",
            "+44 20 7031",
            "+44 20 7031 3",
            "+44 20 7031 30",
            "+44 20 7031 300",
            "+44 20 7031 3000",
        ],
    );
}

#[test]
fn aytf_unknown_region() {
    let phone_util = get_phone_util();
    // The calling code decides the formats.
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::zz());
    assert_typed(
        &mut formatter,
        "+16502530000",
        &[
            "+",
            "+1",
            "+1 6",
            "+1 65",
            "+1 650",
            "+1 650 2",
            "+1 650 25",
            "+1 650 253",
            "+1 650 253 0",
            "+1 650 253 00",
            "+1 650 253 000",
            "+1 650 253 0000",
        ],
    );
}

#[test]
fn aytf_non_geographical_number() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_typed(
        &mut formatter,
        "+80012345678",
        &[
            "+",
            "+8",
            "+80",
            "+800 ",
            "+800 1",
            "+800 12",
            "+800 123",
            "+800 1234",
            "+800 1234 5",
            "+800 1234 56",
            "+800 1234 567",
            "+800 1234 5678",
        ],
    );
}

#[test]
fn aytf_alpha_numbers() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_typed(
        &mut formatter,
        "800MYAPPLE",
        &[
            "8",
            "80",
            "800",
            "800 M",
            "800 MY",
            "800 MYA",
            "800 MYAP",
            "800 MYA PP",
            "800 MYA PPL",
            "800 MYA PPLE",
        ],
    );
    assert_eq!(FormatterState::NationalFormatting, formatter.state());
}

#[test]
fn aytf_stops_formatting_on_punctuation() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    // Input with its own formatting is echoed as typed.
    assert_typed(
        &mut formatter,
        "800 MY APPLE",
        &[
            "8",
            "80",
            "800",
            "800 ",
            "800 M",
            "800 MY",
            "800 MY ",
            "800 MY A",
            "800 MY AP",
            "800 MY APP",
            "800 MY APPL",
            "800 MY APPLE",
        ],
    );
    assert_eq!(FormatterState::FreeForm, formatter.state());

    formatter.clear();
    assert_eq!("*", formatter.input_digit('*'));
    assert_eq!(FormatterState::FreeForm, formatter.state());
    assert_eq!("*1", formatter.input_digit('1'));
    assert_eq!("*12", formatter.input_digit('2'));
    assert_eq!("*121", formatter.input_digit('1'));
    assert_eq!("*121#", formatter.input_digit('#'));
}

#[test]
fn aytf_plus_is_only_accepted_first() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!("6", formatter.input_digit('6'));
    assert_eq!("6+", formatter.input_digit('+'));
    assert_eq!("6+5", formatter.input_digit('5'));
    assert_eq!(FormatterState::FreeForm, formatter.state());
}

#[test]
fn aytf_state_transitions() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!(FormatterState::Cleared, formatter.state());
    formatter.input_digit('+');
    assert_eq!(FormatterState::AccumulatingPrefix, formatter.state());
    formatter.input_digit('8');
    formatter.input_digit('0');
    // "+80" is not a complete calling code yet.
    assert_eq!(FormatterState::AccumulatingPrefix, formatter.state());
    formatter.input_digit('0');
    assert_eq!(FormatterState::NationalFormatting, formatter.state());

    formatter.clear();
    assert_eq!(FormatterState::Cleared, formatter.state());
    assert_eq!("6", formatter.input_digit('6'));
    assert_eq!("65", formatter.input_digit('5'));
    assert_eq!(FormatterState::AccumulatingPrefix, formatter.state());
    assert_eq!("650", formatter.input_digit('0'));
    assert_eq!(FormatterState::NationalFormatting, formatter.state());
}

#[test]
fn aytf_remember_position() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    assert_eq!("6", formatter.input_digit('6'));
    assert_eq!("65", formatter.input_digit('5'));
    assert_eq!("650", formatter.input_digit('0'));
    assert_eq!("650 2", formatter.input_digit_and_remember_position('2'));
    assert_eq!(5, formatter.get_remembered_position());
    assert_eq!("650 25", formatter.input_digit('5'));
    assert_eq!("650 253", formatter.input_digit('3'));
    assert_eq!("650 2532", formatter.input_digit('2'));
    assert_eq!(5, formatter.get_remembered_position());
    // Switching templates keeps the digit in place.
    assert_eq!("650 253 22", formatter.input_digit('2'));
    assert_eq!(5, formatter.get_remembered_position());

    formatter.clear();
    assert_eq!("6", formatter.input_digit_and_remember_position('6'));
    assert_eq!(1, formatter.get_remembered_position());
    assert_eq!("65", formatter.input_digit('5'));
    assert_eq!("650", formatter.input_digit('0'));
    assert_eq!("650 2", formatter.input_digit('2'));
    assert_eq!(1, formatter.get_remembered_position());

    // Once formatting is off, positions count typed characters.
    formatter.clear();
    assert_eq!("6", formatter.input_digit('6'));
    assert_eq!("65", formatter.input_digit('5'));
    assert_eq!("650", formatter.input_digit('0'));
    assert_eq!("650-", formatter.input_digit_and_remember_position('-'));
    assert_eq!(4, formatter.get_remembered_position());
    assert_eq!("650-2", formatter.input_digit('2'));
    assert_eq!(4, formatter.get_remembered_position());
}

#[test]
fn aytf_too_many_digits_switch_to_free_form() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    for next_char in "650253000".chars() {
        formatter.input_digit(next_char);
    }
    assert_eq!("650 253 0000", formatter.input_digit('0'));
    assert_eq!(FormatterState::NationalFormatting, formatter.state());
    // No US format holds eleven digits.
    assert_eq!("65025300001", formatter.input_digit('1'));
    assert_eq!(FormatterState::FreeForm, formatter.state());
    assert_eq!("650253000012", formatter.input_digit('2'));
    assert_eq!(FormatterState::FreeForm, formatter.state());

    formatter.clear();
    assert_eq!(FormatterState::Cleared, formatter.state());
    assert_eq!("6", formatter.input_digit('6'));
}

/// Types `input` and checks that every output only extends the previous one.
fn assert_output_only_grows(region_code: &str, input: &str) {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(region_code);
    let mut previous = String::new();
    for next_char in input.chars() {
        let output = formatter.input_digit(next_char).to_owned();
        assert!(
            output.starts_with(&previous),
            "'{}' rewrote '{}' after '{}'",
            output,
            previous,
            next_char
        );
        previous = output;
    }
}

#[test]
fn aytf_output_grows_monotonically() {
    assert_output_only_grows(RegionCode::gb(), "02070313000");
    assert_output_only_grows(RegionCode::us(), "+442070313000");
    assert_output_only_grows(RegionCode::us(), "+80012345678");
    assert_output_only_grows(RegionCode::zz(), "+16502530000");
}

#[test]
fn aytf_reflow_keeps_every_digit() {
    let phone_util = get_phone_util();
    let mut formatter = phone_util.get_as_you_type_formatter(RegionCode::us());
    let mut typed = String::new();
    let mut output = String::new();
    for next_char in "6502532222".chars() {
        typed.push(next_char);
        output = formatter.input_digit(next_char).to_owned();
        let digits: String = output.chars().filter(char::is_ascii_digit).collect();
        assert_eq!(typed, digits);
    }
    // The seven digit template gave way to the ten digit one.
    assert_eq!("650 253 2222", output);
}
