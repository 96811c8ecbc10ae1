// Identifier types shared across the composition tree.
//
// Every container entity (Instrument, Melody, Layer, Section, Song) carries a
// strongly-typed id assigned exactly once, inside its constructor, from an
// `IdGenerator` the caller passes in. There is no global id service: the
// caller decides whether ids come from a seeded `CantusRng` (UUID v4 layout)
// or from `SequentialIds` (a plain counter, convenient in tests).
//
// Ids are opaque to the composer. Nothing in the compose pass reads them.

use cantus_prng::CantusRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// CantusUuid
// ---------------------------------------------------------------------------

/// A 128-bit identifier in RFC 4122 layout.
///
/// Ids drawn from a `CantusRng` have the version nibble (bits 48–51) set to
/// `0100` and the variant bits (bits 64–65) set to `10`. Ids from
/// `SequentialIds` carry the counter in their low bytes and are not v4.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CantusUuid([u8; 16]);

impl CantusUuid {
    /// Build a v4 UUID from 16 random bytes.
    pub fn v4_from_bytes(mut bytes: [u8; 16]) -> Self {
        bytes[6] = (bytes[6] & 0x0F) | 0x40;
        bytes[8] = (bytes[8] & 0x3F) | 0x80;
        Self(bytes)
    }

    /// Build an id whose low eight bytes hold `index` (big-endian).
    pub fn from_index(index: u64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[8..].copy_from_slice(&index.to_be_bytes());
        Self(bytes)
    }

    /// Parse a UUID from its 8-4-4-4-12 hex string representation.
    pub fn parse(s: &str) -> Option<Self> {
        let raw = s.as_bytes();
        if raw.len() != 36 {
            return None;
        }
        for (i, &c) in raw.iter().enumerate() {
            let well_formed = match i {
                8 | 13 | 18 | 23 => c == b'-',
                _ => c.is_ascii_hexdigit(),
            };
            if !well_formed {
                return None;
            }
        }
        let hex: String = s.chars().filter(|c| *c != '-').collect();
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

// Serialized as the hex string so ids stay readable in JSON exports.
impl Serialize for CantusUuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CantusUuid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CantusUuid::parse(&s).ok_or_else(|| serde::de::Error::custom("invalid UUID format"))
    }
}

impl fmt::Debug for CantusUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CantusUuid({})", self)
    }
}

impl fmt::Display for CantusUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            b[0], b[1], b[2], b[3],
            b[4], b[5],
            b[6], b[7],
            b[8], b[9],
            b[10], b[11], b[12], b[13], b[14], b[15],
        )
    }
}

// ---------------------------------------------------------------------------
// Id generation
// ---------------------------------------------------------------------------

/// Supplies fresh identifiers to entity constructors.
pub trait IdGenerator {
    fn next_uuid(&mut self) -> CantusUuid;
}

impl IdGenerator for CantusRng {
    fn next_uuid(&mut self) -> CantusUuid {
        CantusUuid::v4_from_bytes(self.next_128_bits())
    }
}

/// Counter-backed generator: the n-th id handed out is `from_index(n)`.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting at `first` instead of zero.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// How many ids have been issued so far (relative to zero).
    pub fn issued(&self) -> u64 {
        self.next
    }
}

impl IdGenerator for SequentialIds {
    fn next_uuid(&mut self) -> CantusUuid {
        let id = CantusUuid::from_index(self.next);
        self.next += 1;
        id
    }
}

// ---------------------------------------------------------------------------
// Strongly-typed entity ID wrappers
// ---------------------------------------------------------------------------

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub CantusUuid);

        impl $name {
            pub fn new<G: IdGenerator + ?Sized>(ids: &mut G) -> Self {
                Self(ids.next_uuid())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

entity_id!(/// Unique identifier for an instrument record.
InstrumentId);
entity_id!(/// Unique identifier for a melody.
MelodyId);
entity_id!(/// Unique identifier for a layer.
LayerId);
entity_id!(/// Unique identifier for a section.
SectionId);
entity_id!(/// Unique identifier for a song.
SongId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_ids_have_v4_layout() {
        let mut rng = CantusRng::new(42);
        for _ in 0..100 {
            let id = rng.next_uuid();
            let b = id.as_bytes();
            assert_eq!(b[6] >> 4, 4, "version nibble");
            assert_eq!(b[8] >> 6, 0b10, "variant bits");
        }
    }

    #[test]
    fn rng_ids_are_deterministic() {
        let mut a = CantusRng::new(7);
        let mut b = CantusRng::new(7);
        assert_eq!(SongId::new(&mut a), SongId::new(&mut b));
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new();
        let first = MelodyId::new(&mut ids);
        let second = MelodyId::new(&mut ids);
        assert_eq!(first.0, CantusUuid::from_index(0));
        assert_eq!(second.0, CantusUuid::from_index(1));
        assert_eq!(ids.issued(), 2);

        let mut offset = SequentialIds::starting_at(10);
        assert_eq!(offset.next_uuid(), CantusUuid::from_index(10));
    }

    #[test]
    fn display_and_parse_roundtrip() {
        let id = CantusUuid::from_index(0xABCD);
        let text = id.to_string();
        assert_eq!(text, "00000000-0000-0000-0000-00000000abcd");
        assert_eq!(CantusUuid::parse(&text), Some(id));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(CantusUuid::parse("not-a-uuid"), None);
        assert_eq!(CantusUuid::parse("zz000000-0000-0000-0000-000000000000"), None);
        assert_eq!(CantusUuid::parse("+f+f+f+f-0000-0000-0000-000000000000"), None);
        assert_eq!(CantusUuid::parse("0000000000000000000000000000000000000"), None);
        assert_eq!(CantusUuid::parse("00000000-00000-000-0000-000000000000"), None);
        assert_eq!(CantusUuid::parse("00000000000000000000000000000000"), None);
        assert!(CantusUuid::parse("0F0F0F0F-0000-4000-8000-00000000ABCD").is_some());
    }

    #[test]
    fn typed_id_display_names_the_kind() {
        let mut ids = SequentialIds::new();
        let id = LayerId::new(&mut ids);
        assert!(id.to_string().starts_with("LayerId("));
    }

    #[test]
    fn serde_as_string() {
        let id = SectionId(CantusUuid::from_index(3));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000003\"");
        let back: SectionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
