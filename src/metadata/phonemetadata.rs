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

//! In-memory numbering plan metadata. Loading it from resources is left to
//! the caller; these types are the shape every loader has to produce.

use std::borrow::Cow;

/// Describes one category of numbers in a region.
///
/// An empty `national_number_pattern` means there is no data, such a desc
/// never matches anything. An empty `possible_length` means the lengths are
/// the same as the region's general desc, and `[-1]` that no number of this
/// type exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumberDesc {
    pub national_number_pattern: String,
    pub possible_length: Vec<i32>,
    pub possible_length_local_only: Vec<i32>,
    pub example_number: String,
}

impl PhoneNumberDesc {
    pub fn new(national_number_pattern: impl Into<String>, possible_length: &[i32]) -> Self {
        Self {
            national_number_pattern: national_number_pattern.into(),
            possible_length: possible_length.to_vec(),
            ..Default::default()
        }
    }

    /// Desc for a type the region has no numbers of.
    pub fn no_data() -> Self {
        Self {
            possible_length: vec![-1],
            ..Default::default()
        }
    }

    pub fn with_local_only_lengths(mut self, possible_length_local_only: &[i32]) -> Self {
        self.possible_length_local_only = possible_length_local_only.to_vec();
        self
    }

    pub fn with_example_number(mut self, example_number: impl Into<String>) -> Self {
        self.example_number = example_number.into();
        self
    }

    pub fn national_number_pattern(&self) -> &str {
        &self.national_number_pattern
    }

    pub fn has_national_number_pattern(&self) -> bool {
        !self.national_number_pattern.is_empty()
    }

    pub fn has_example_number(&self) -> bool {
        !self.example_number.is_empty()
    }
}

/// A formatting rule: which national numbers it applies to and how their
/// digits are grouped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberFormat {
    /// Capturing regex matched against the whole national significant number.
    pub pattern: String,
    /// Template over the capture groups, e.g. `$1 $2-$3`.
    pub format: String,
    /// Each entry narrows the previous one; the last is the most specific.
    pub leading_digits_pattern: Vec<String>,
    /// Template for the first group when formatting nationally, e.g.
    /// `($NP$FG)` or the expanded `(0$1)`. Empty means the region's rule
    /// applies, see [`PhoneMetadata::resolve_number_format`].
    pub national_prefix_formatting_rule: String,
    pub national_prefix_optional_when_formatting: bool,
    /// Template for the first group when a carrier code is dialled, with the
    /// code itself as `$CC`, e.g. `$NP$CC $FG`.
    pub domestic_carrier_code_formatting_rule: String,
}

impl NumberFormat {
    pub fn new(pattern: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            format: format.into(),
            ..Default::default()
        }
    }

    pub fn with_leading_digits(mut self, leading_digits_pattern: &[&str]) -> Self {
        self.leading_digits_pattern = leading_digits_pattern
            .iter()
            .map(|pattern| pattern.to_string())
            .collect();
        self
    }

    pub fn with_national_prefix_formatting_rule(mut self, rule: impl Into<String>) -> Self {
        self.national_prefix_formatting_rule = rule.into();
        self
    }

    pub fn with_national_prefix_optional_when_formatting(mut self, optional: bool) -> Self {
        self.national_prefix_optional_when_formatting = optional;
        self
    }

    pub fn with_domestic_carrier_code_formatting_rule(mut self, rule: impl Into<String>) -> Self {
        self.domestic_carrier_code_formatting_rule = rule.into();
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn national_prefix_formatting_rule(&self) -> &str {
        &self.national_prefix_formatting_rule
    }

    pub fn domestic_carrier_code_formatting_rule(&self) -> &str {
        &self.domestic_carrier_code_formatting_rule
    }

    pub fn has_domestic_carrier_code_formatting_rule(&self) -> bool {
        !self.domestic_carrier_code_formatting_rule.is_empty()
    }
}

/// Numbering plan of a region, or of a non-geographical calling code when
/// `id` is `"001"`.
///
/// Category descs that are `None` were elided because they equal
/// `general_desc`; [`PhoneMetadata::fixed_line_desc`] and
/// [`PhoneMetadata::mobile_desc`] resolve that fallback. A present desc with an
/// empty pattern means the region has no numbers of that type. Optional
/// string attributes are `None` when absent from the source data; this matters
/// for `national_prefix_for_parsing` (which then falls back to
/// `national_prefix`) and `preferred_extn_prefix`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneMetadata {
    pub id: String,
    pub country_code: i32,

    pub general_desc: PhoneNumberDesc,
    pub fixed_line: Option<PhoneNumberDesc>,
    pub mobile: Option<PhoneNumberDesc>,
    pub toll_free: Option<PhoneNumberDesc>,
    pub premium_rate: Option<PhoneNumberDesc>,
    pub shared_cost: Option<PhoneNumberDesc>,
    pub personal_number: Option<PhoneNumberDesc>,
    pub voip: Option<PhoneNumberDesc>,
    pub pager: Option<PhoneNumberDesc>,
    pub uan: Option<PhoneNumberDesc>,
    pub emergency: Option<PhoneNumberDesc>,
    pub voicemail: Option<PhoneNumberDesc>,
    pub short_code: Option<PhoneNumberDesc>,
    pub standard_rate: Option<PhoneNumberDesc>,
    pub carrier_specific: Option<PhoneNumberDesc>,
    pub sms_services: Option<PhoneNumberDesc>,
    pub no_international_dialling: Option<PhoneNumberDesc>,

    pub international_prefix: String,
    pub preferred_international_prefix: Option<String>,
    pub national_prefix: Option<String>,
    pub national_prefix_for_parsing: Option<String>,
    pub national_prefix_transform_rule: Option<String>,
    pub preferred_extn_prefix: Option<String>,
    pub national_prefix_formatting_rule: Option<String>,
    pub same_mobile_and_fixed_line_pattern: bool,

    pub number_format: Vec<NumberFormat>,
    pub intl_number_format: Vec<NumberFormat>,

    pub main_country_for_code: bool,
    pub leading_digits: Option<String>,
    pub mobile_number_portable_region: bool,
}

impl PhoneMetadata {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn international_prefix(&self) -> &str {
        &self.international_prefix
    }

    pub fn has_preferred_international_prefix(&self) -> bool {
        self.preferred_international_prefix.is_some()
    }

    pub fn preferred_international_prefix(&self) -> &str {
        self.preferred_international_prefix.as_deref().unwrap_or_default()
    }

    pub fn national_prefix(&self) -> &str {
        self.national_prefix.as_deref().unwrap_or_default()
    }

    /// Pattern used to recognise the national prefix when parsing, falling
    /// back to the literal national prefix.
    pub fn national_prefix_for_parsing(&self) -> &str {
        self.national_prefix_for_parsing
            .as_deref()
            .unwrap_or_else(|| self.national_prefix())
    }

    pub fn has_national_prefix_for_parsing(&self) -> bool {
        !self.national_prefix_for_parsing().is_empty()
    }

    pub fn national_prefix_transform_rule(&self) -> &str {
        self.national_prefix_transform_rule.as_deref().unwrap_or_default()
    }

    pub fn has_preferred_extn_prefix(&self) -> bool {
        self.preferred_extn_prefix.is_some()
    }

    pub fn preferred_extn_prefix(&self) -> &str {
        self.preferred_extn_prefix.as_deref().unwrap_or_default()
    }

    pub fn leading_digits(&self) -> &str {
        self.leading_digits.as_deref().unwrap_or_default()
    }

    pub fn has_leading_digits(&self) -> bool {
        self.leading_digits.is_some()
    }

    pub fn same_mobile_and_fixed_line_pattern(&self) -> bool {
        self.same_mobile_and_fixed_line_pattern
    }

    pub fn main_country_for_code(&self) -> bool {
        self.main_country_for_code
    }

    pub fn fixed_line_desc(&self) -> &PhoneNumberDesc {
        self.fixed_line.as_ref().unwrap_or(&self.general_desc)
    }

    pub fn mobile_desc(&self) -> &PhoneNumberDesc {
        self.mobile.as_ref().unwrap_or(&self.general_desc)
    }

    /// National prefix formatting rule that applies to `number_format`: its
    /// own rule, else the region's, with `$NP` replaced by the national prefix
    /// and `$FG` by the first group. A rule that needs a national prefix the
    /// region lacks resolves to empty.
    pub fn national_prefix_formatting_rule_for<'f>(
        &'f self,
        number_format: &'f NumberFormat,
    ) -> Cow<'f, str> {
        let rule = if number_format.national_prefix_formatting_rule.is_empty() {
            self.national_prefix_formatting_rule.as_deref().unwrap_or_default()
        } else {
            number_format.national_prefix_formatting_rule.as_str()
        };
        if rule.contains("$NP") && self.national_prefix().is_empty() {
            return Cow::Borrowed("");
        }
        self.expand_formatting_tokens(rule)
    }

    /// Copy of `number_format` with both national rules resolved through
    /// [`Self::national_prefix_formatting_rule_for`]. Borrows when nothing
    /// needs rewriting.
    pub fn resolve_number_format<'f>(&'f self, number_format: &'f NumberFormat) -> Cow<'f, NumberFormat> {
        let national_prefix_rule = self.national_prefix_formatting_rule_for(number_format);
        let carrier_rule =
            self.expand_formatting_tokens(&number_format.domestic_carrier_code_formatting_rule);
        if national_prefix_rule == number_format.national_prefix_formatting_rule
            && matches!(carrier_rule, Cow::Borrowed(_))
        {
            return Cow::Borrowed(number_format);
        }
        let mut resolved = number_format.clone();
        resolved.national_prefix_formatting_rule = national_prefix_rule.into_owned();
        resolved.domestic_carrier_code_formatting_rule = carrier_rule.into_owned();
        Cow::Owned(resolved)
    }

    fn expand_formatting_tokens<'r>(&self, rule: &'r str) -> Cow<'r, str> {
        if !rule.contains("$NP") && !rule.contains("$FG") {
            return Cow::Borrowed(rule);
        }
        Cow::Owned(rule.replace("$NP", self.national_prefix()).replace("$FG", "$1"))
    }
}
