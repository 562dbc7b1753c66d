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

use strum::EnumIter;

/// Output styles understood by [`PhoneNumberUtil::format`].
///
/// Taking the London number `+44 20 7031 3000` as an example:
/// - **E164**: `+442070313000`
/// - **International**: `+44 20 7031 3000`
/// - **National**: `(020) 7031 3000`
/// - **RFC3966**: `tel:+44-20-7031-3000`
///
/// [`PhoneNumberUtil::format`]: crate::PhoneNumberUtil::format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    /// A leading `+`, the calling code and the national significant number
    /// with no separators. Extensions are never rendered.
    E164,
    /// Calling code followed by the grouped national significant number, as
    /// dialled from abroad.
    International,
    /// The grouping used inside the region, including the national prefix
    /// when the region's formatting rule asks for it.
    National,
    /// A `tel:` URI with groups joined by `-` and the extension as `;ext=`.
    RFC3966,
}

/// Number categories, checked in a fixed priority order during
/// classification.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    FixedLine,
    Mobile,
    /// Reported where the fixed-line and mobile descriptions both match the
    /// number, as in most of the NANPA regions.
    FixedLineOrMobile,
    TollFree,
    PremiumRate,
    /// The cost of the call is shared between caller and recipient.
    SharedCost,
    VoIP,
    /// A number tied to a person and routed to wherever they configure.
    PersonalNumber,
    Pager,
    /// Universal access number, routing one company number to several offices.
    UAN,
    VoiceMail,
    /// Nothing in the metadata matched, not even the general description.
    Unknown,
}

/// Result of comparing two phone numbers, from the weakest to the strongest
/// relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// At least one side could not be interpreted as a phone number at all.
    NotANumber,
    NoMatch,
    /// One national significant number is a suffix of the other, or the two
    /// differ only by an Italian leading zero or a one-sided extension.
    /// `6502530000` and `16502530000` are a short match.
    ShortNsnMatch,
    /// Same national significant number and extension, but the calling code
    /// is unknown on at least one side.
    NsnMatch,
    /// Same calling code, national significant number and extension.
    ExactMatch,
}

/// Successful outcomes of a possible-length check. Failures are reported as
/// [`ValidationError`](super::errors::ValidationError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberLengthType {
    /// The length matches a full national number of the region.
    IsPossible,
    /// The length only fits a number dialled locally, without an area code.
    IsPossibleLocalOnly,
}
