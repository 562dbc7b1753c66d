pub(crate) mod helper_constants;
mod helper_functions;
pub mod errors;
pub mod enums;
pub mod phonenumberutil;
mod phone_number_regexps_and_mappings;
pub(self) mod helper_types;
mod parsing;
mod formatting;
mod matching;

pub use enums::{MatchType, PhoneNumberFormat, PhoneNumberType, NumberLengthType};
pub use errors::{NotANumberError, ParseError, ValidationError};
pub use helper_types::{
    ExtractedCountryCode, PhoneNumberWithCountryCodeSource, StrippedNationalPrefix,
};
pub use phonenumberutil::PhoneNumberUtil;
pub(crate) use helper_functions::normalize_digits;
