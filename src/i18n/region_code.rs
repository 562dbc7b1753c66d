pub struct RegionCode {
}

impl RegionCode {
    /// Returns a region code string representing the "unknown" region.
    pub fn get_unknown() -> &'static str {
        return Self::zz();
    }

    pub fn zz() -> &'static str {
        return "ZZ";
    }

    /// Region code under which non-geographical entities, such as the
    /// international toll-free code 800, are registered.
    pub fn un001() -> &'static str {
        return "001";
    }
}
