//! Message schema for the TL wire decoder.
//!
//! Types here play the part that generated schema code plays in a full
//! client: each constructor knows its identifier and field layout, and
//! [`registry`] returns the process-wide table the decoder dispatches on.
//!
//! # Components
//!
//! - [`mod@message`]: messages and message pages
//! - [`peer`]: users, groups, and channels a message belongs to
//! - [`entity`]: formatting spans over message text

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod entity;
pub mod message;
pub mod peer;

use std::sync::LazyLock;

pub use entity::{
    MessageEntity, MessageEntityBlockquote, MessageEntityBold, MessageEntityCode,
    MessageEntityEmail, MessageEntityItalic, MessageEntityMentionName, MessageEntityPre,
    MessageEntityStrike, MessageEntityTextUrl, MessageEntityUnderline, MessageEntityUrl,
};
pub use message::{AnyMessage, Message, MessageEmpty, Messages};
pub use peer::{Peer, PeerChannel, PeerChat, PeerUser};
use tlwire_proto::{ObjectReader, ReaderConfig, Result, Serializable, TypeRegistry, Writer};

/// Every value the schema can decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// A peer
    Peer(Peer),
    /// A formatting span
    MessageEntity(MessageEntity),
    /// A message
    Message(AnyMessage),
    /// A page of messages
    Messages(Messages),
}

impl Serializable for Object {
    fn serialize(&self, writer: &mut Writer) -> Result<()> {
        match self {
            Self::Peer(peer) => peer.serialize(writer),
            Self::MessageEntity(entity) => entity.serialize(writer),
            Self::Message(message) => message.serialize(writer),
            Self::Messages(messages) => messages.serialize(writer),
        }
    }
}

static REGISTRY: LazyLock<Result<TypeRegistry<Object>>> = LazyLock::new(build_registry);

/// The schema's constructor table.
///
/// Built on first use and shared afterwards. Only fails if two constructors
/// were given the same identifier.
pub fn registry() -> Result<&'static TypeRegistry<Object>> {
    REGISTRY.as_ref().map_err(Clone::clone)
}

/// Build a fresh constructor table.
pub fn build_registry() -> Result<TypeRegistry<Object>> {
    let mut registry = TypeRegistry::new();

    registry.register::<PeerUser>()?;
    registry.register::<PeerChat>()?;
    registry.register::<PeerChannel>()?;

    registry.register::<MessageEntityBold>()?;
    registry.register::<MessageEntityItalic>()?;
    registry.register::<MessageEntityCode>()?;
    registry.register::<MessageEntityUnderline>()?;
    registry.register::<MessageEntityStrike>()?;
    registry.register::<MessageEntityBlockquote>()?;
    registry.register::<MessageEntityEmail>()?;
    registry.register::<MessageEntityUrl>()?;
    registry.register::<MessageEntityPre>()?;
    registry.register::<MessageEntityTextUrl>()?;
    registry.register::<MessageEntityMentionName>()?;

    registry.register::<Message>()?;
    registry.register::<MessageEmpty>()?;
    registry.register::<Messages>()?;

    tracing::debug!(constructors = registry.len(), "schema registry built");
    Ok(registry)
}

/// Decode one object with default limits.
pub fn decode(buffer: impl Into<bytes::Bytes>) -> Result<Object> {
    decode_with_config(buffer, ReaderConfig::default())
}

/// Decode one object with explicit limits.
pub fn decode_with_config(
    buffer: impl Into<bytes::Bytes>,
    config: ReaderConfig,
) -> Result<Object> {
    let registry = registry()?;
    ObjectReader::with_config(registry, config).decode(buffer)
}

/// Encode an object.
pub fn encode<T: Serializable + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    writer.write_object(value)?;
    Ok(writer.into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use tlwire_proto::Constructor;

    use super::*;

    #[test]
    fn registry_has_every_constructor() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 17);
        assert_eq!(registry.lookup(Message::ID).unwrap().name, "message");
        assert_eq!(registry.lookup(PeerUser::ID).unwrap().name, "peerUser");
    }

    #[test]
    fn peer_round_trip() {
        let peer = Peer::Channel(PeerChannel { channel_id: -100 });
        let bytes = encode(&peer).unwrap();
        assert_eq!(bytes.len(), 12);
        assert_eq!(decode(bytes).unwrap(), Object::Peer(peer));
    }
}
