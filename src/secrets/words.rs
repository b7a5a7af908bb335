//! secrets::words
//!
//! Built-in passphrase vocabulary. Lowercase ASCII only, so any
//! punctuation separator splits a passphrase back into its words.

/// Word list for [`crate::secrets::passphrase`].
pub const WORDS: &[&str] = &[
    "acorn", "amber", "anchor", "apple", "arrow", "aspen", "badger", "bamboo",
    "beacon", "birch", "bison", "bridge", "canyon", "castle", "cedar", "cherry",
    "cobalt", "comet", "copper", "coral", "crane", "delta", "desert", "dragon",
    "eagle", "ember", "falcon", "fern", "forest", "galaxy", "garden", "glacier",
    "granite", "harbor", "hazel", "heron", "island", "jasper", "jungle", "kettle",
    "lantern", "lemon", "lotus", "maple", "meadow", "meteor", "mountain", "nectar",
    "ocean", "orchid", "otter", "palace", "pepper", "pine", "quartz", "raven",
    "river", "saffron", "sunset", "thunder", "tiger", "valley", "willow", "zephyr",
];
