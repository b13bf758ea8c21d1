//! Library registry - single source of truth for what gets built.

use super::{
    capstone::Capstone, hidapi::Hidapi, jimtcl::JimTcl, libftdi::Libftdi,
    libjaylink::Libjaylink, libusb::Libusb, Buildable,
};

/// All registered libraries.
///
/// Declaration order is build order: libftdi and hidapi pick up the staged
/// libusb-1.0 through the exported search paths.
pub static COMPONENTS: &[&dyn Buildable] = &[
    &Libusb,
    &Hidapi,
    &Libftdi,
    &Capstone,
    &Libjaylink,
    &JimTcl,
];

/// Get a library by name.
#[must_use]
pub fn get(name: &str) -> Option<&'static dyn Buildable> {
    COMPONENTS.iter().find(|c| c.name() == name).copied()
}

/// List all library names.
pub fn names() -> impl Iterator<Item = &'static str> {
    COMPONENTS.iter().map(|c| c.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_all_six_libraries() {
        let names: Vec<_> = names().collect();
        assert_eq!(
            names,
            ["libusb1", "hidapi", "libftdi", "capstone", "libjaylink", "jimtcl"]
        );
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(get("capstone").map(|c| c.name()), Some("capstone"));
        assert!(get("openssl").is_none());
    }

    #[test]
    fn every_library_names_distinct_variables() {
        let mut vars: Vec<_> = COMPONENTS
            .iter()
            .flat_map(|c| [c.source_var(), c.config_var()])
            .collect();
        vars.sort_unstable();
        vars.dedup();
        assert_eq!(vars.len(), COMPONENTS.len() * 2);
    }
}
