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

pub struct RegionCode {}

#[allow(unused)]
impl RegionCode {
    pub fn aq() -> &'static str {
        "AQ"
    }

    pub fn ar() -> &'static str {
        "AR"
    }

    pub fn au() -> &'static str {
        "AU"
    }

    pub fn bs() -> &'static str {
        "BS"
    }

    pub fn de() -> &'static str {
        "DE"
    }

    pub fn gb() -> &'static str {
        "GB"
    }

    pub fn it() -> &'static str {
        "IT"
    }

    pub fn jp() -> &'static str {
        "JP"
    }

    pub fn kr() -> &'static str {
        "KR"
    }

    pub fn mx() -> &'static str {
        "MX"
    }

    pub fn nz() -> &'static str {
        "NZ"
    }

    pub fn us() -> &'static str {
        "US"
    }

    /// Region of the non-geographical entities, such as +800.
    pub fn un001() -> &'static str {
        "001"
    }

    /// Used for unknown or invalid regions.
    pub fn zz() -> &'static str {
        "ZZ"
    }
}
