//! Embedded word banks
//!
//! Word banks compiled into the binary at build time.

/// `(word, definition, synonyms)` as stored in the generated tables
pub type RawEntry = (&'static str, &'static str, &'static [&'static str]);

// Include generated word banks from build script
include!(concat!(env!("OUT_DIR"), "/wordbanks.rs"));
