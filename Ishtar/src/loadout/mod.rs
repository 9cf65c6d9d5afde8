//! Share-link loadout decoding
//!
//! [`codec`] turns a link into the JSON document it carries;
//! [`LoadoutDecoder`] resolves that document's item hashes through a
//! [`Catalog`](crate::manifest::Catalog) into a typed [`LoadoutRecord`].
//!
//! Game rules (one exotic weapon, one exotic armor piece) are not enforced
//! here. The synergy evaluator reports violations.

pub mod codec;
mod decoder;
mod types;

pub use codec::{
    DecodeError, PayloadStage, SHARE_HOSTS, decode_link, decode_payload, encode_payload,
    is_share_host, share_link,
};
pub use decoder::{EquippedItem, LoadoutDecoder, PlugKind};
pub use types::{
    ArmorInfo, ArmorSlot, CharacterClass, LoadoutRecord, SubclassInfo, WeaponInfo, WeaponSlot,
};
