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

use std::collections::{HashMap, VecDeque};

use log::{trace, warn};

use crate::{
    i18n::RegionCode,
    metadata::PhoneMetadata,
};

/// Read-only source of numbering plan metadata.
///
/// Implementations must be safe to share between threads; every operation of
/// [`PhoneNumberUtil`](crate::PhoneNumberUtil) reads from the repository
/// without synchronisation.
pub trait MetadataRepository: Send + Sync {
    fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata>;

    fn get_metadata_for_non_geographical_region(
        &self,
        country_calling_code: i32,
    ) -> Option<&PhoneMetadata>;

    /// Regions sharing `country_calling_code`, main region first. Empty when
    /// the code is not registered.
    fn get_region_codes_for_country_code(&self, country_calling_code: i32) -> &[String];

    /// Returns 0 for unknown regions.
    fn get_country_code_for_region(&self, region_code: &str) -> i32 {
        self.get_metadata_for_region(region_code)
            .map(|metadata| metadata.country_code())
            .unwrap_or(0)
    }

    fn get_supported_regions(&self) -> Vec<&str>;

    /// All registered calling codes, ascending.
    fn get_supported_calling_codes(&self) -> Vec<i32>;

    fn get_supported_global_network_calling_codes(&self) -> Vec<i32>;
}

/// [`MetadataRepository`] over metadata already held in memory.
#[derive(Debug, Default)]
pub struct InMemoryMetadataRepository {
    /// A mapping from a region code to the metadata of that region.
    region_to_metadata_map: HashMap<String, PhoneMetadata>,

    /// Metadata of non-geographical entities, keyed by calling code, such as
    /// 800 (International Toll Free Service).
    country_code_to_non_geographical_metadata_map: HashMap<i32, PhoneMetadata>,

    /// Calling code to the regions using it, sorted by calling code for
    /// binary search. NANPA regions share 1, with "US" listed first since it
    /// is the main country for that code.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,
}

impl InMemoryMetadataRepository {
    pub fn new(metadata_collection: impl IntoIterator<Item = PhoneMetadata>) -> Self {
        let mut instance = Self::default();
        // Temporary map, makes it easy to find other regions that share a
        // calling code while inserting.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();

        for metadata in metadata_collection {
            let region_code = metadata.id().to_owned();
            if RegionCode::get_unknown() == region_code {
                continue;
            }
            let country_calling_code = metadata.country_code();
            let main_country_for_code = metadata.main_country_for_code();

            let regions = country_calling_code_to_region_map
                .entry(country_calling_code)
                .or_default();
            if main_country_for_code {
                regions.push_front(region_code.clone());
            } else {
                regions.push_back(region_code.clone());
            }

            if RegionCode::un001() == region_code {
                trace!("Registered non-geographical calling code {}", country_calling_code);
                instance
                    .country_code_to_non_geographical_metadata_map
                    .insert(country_calling_code, metadata);
            } else if instance
                .region_to_metadata_map
                .insert(region_code.clone(), metadata)
                .is_some()
            {
                warn!("Metadata for region {} given twice, keeping the last one", region_code);
            }
        }

        instance.country_calling_code_to_region_code_map.extend(
            country_calling_code_to_region_map
                .into_iter()
                .map(|(code, regions)| (code, Vec::from(regions))),
        );
        instance
            .country_calling_code_to_region_code_map
            .sort_by_key(|(code, _)| *code);
        instance
    }
}

impl MetadataRepository for InMemoryMetadataRepository {
    fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.region_to_metadata_map.get(region_code)
    }

    fn get_metadata_for_non_geographical_region(
        &self,
        country_calling_code: i32,
    ) -> Option<&PhoneMetadata> {
        self.country_code_to_non_geographical_metadata_map
            .get(&country_calling_code)
    }

    fn get_region_codes_for_country_code(&self, country_calling_code: i32) -> &[String] {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .map(|index| self.country_calling_code_to_region_code_map[index].1.as_slice())
            .unwrap_or(&[])
    }

    fn get_supported_regions(&self) -> Vec<&str> {
        self.region_to_metadata_map
            .keys()
            .map(|region| region.as_str())
            .collect()
    }

    fn get_supported_calling_codes(&self) -> Vec<i32> {
        self.country_calling_code_to_region_code_map
            .iter()
            .map(|(code, _)| *code)
            .collect()
    }

    fn get_supported_global_network_calling_codes(&self) -> Vec<i32> {
        let mut codes: Vec<i32> = self
            .country_code_to_non_geographical_metadata_map
            .keys()
            .copied()
            .collect();
        codes.sort_unstable();
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryMetadataRepository, MetadataRepository};
    use crate::metadata::PhoneMetadata;

    fn region(id: &str, country_code: i32, main: bool) -> PhoneMetadata {
        PhoneMetadata {
            id: id.to_owned(),
            country_code,
            main_country_for_code: main,
            ..Default::default()
        }
    }

    #[test]
    fn main_country_is_listed_first() {
        let repository = InMemoryMetadataRepository::new(vec![
            region("BS", 1, false),
            region("US", 1, true),
            region("GB", 44, false),
        ]);
        assert_eq!(&["US", "BS"], repository.get_region_codes_for_country_code(1));
        assert_eq!(&["GB"], repository.get_region_codes_for_country_code(44));
        assert!(repository.get_region_codes_for_country_code(999).is_empty());
        assert_eq!(vec![1, 44], repository.get_supported_calling_codes());
    }

    #[test]
    fn non_geographical_entities_are_separate() {
        let repository = InMemoryMetadataRepository::new(vec![
            region("001", 800, false),
            region("DE", 49, false),
        ]);
        assert!(repository.get_metadata_for_non_geographical_region(800).is_some());
        assert!(repository.get_metadata_for_region("001").is_none());
        assert_eq!(&["001"], repository.get_region_codes_for_country_code(800));
        assert_eq!(vec![800], repository.get_supported_global_network_calling_codes());
        assert_eq!(49, repository.get_country_code_for_region("DE"));
        assert_eq!(0, repository.get_country_code_for_region("FR"));
    }
}
