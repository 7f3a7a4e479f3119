//! Chat peers.

use tlwire_proto::{Constructor, Cursor, ObjectReader, Result, Serializable, Writer};

use crate::Object;

/// A private chat with a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerUser {
    /// User identifier
    pub user_id: i64,
}

/// A basic group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerChat {
    /// Group identifier
    pub chat_id: i64,
}

/// A channel or supergroup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerChannel {
    /// Channel identifier
    pub channel_id: i64,
}

/// Any peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Peer {
    /// User
    User(PeerUser),
    /// Basic group
    Chat(PeerChat),
    /// Channel
    Channel(PeerChannel),
}

impl Constructor<Object> for PeerUser {
    const ID: u32 = 0x5951_1722;
    const NAME: &'static str = "peerUser";

    fn populate(cursor: &mut Cursor, _: &mut ObjectReader<'_, Object>) -> Result<Self> {
        Ok(Self { user_id: cursor.read_i64()? })
    }
}

impl Constructor<Object> for PeerChat {
    const ID: u32 = 0x36c6_019a;
    const NAME: &'static str = "peerChat";

    fn populate(cursor: &mut Cursor, _: &mut ObjectReader<'_, Object>) -> Result<Self> {
        Ok(Self { chat_id: cursor.read_i64()? })
    }
}

impl Constructor<Object> for PeerChannel {
    const ID: u32 = 0xa2a5_371e;
    const NAME: &'static str = "peerChannel";

    fn populate(cursor: &mut Cursor, _: &mut ObjectReader<'_, Object>) -> Result<Self> {
        Ok(Self { channel_id: cursor.read_i64()? })
    }
}

impl Serializable for Peer {
    fn serialize(&self, writer: &mut Writer) -> Result<()> {
        let (id, value) = match self {
            Self::User(p) => (PeerUser::ID, p.user_id),
            Self::Chat(p) => (PeerChat::ID, p.chat_id),
            Self::Channel(p) => (PeerChannel::ID, p.channel_id),
        };
        writer.write_u32(id);
        writer.write_i64(value);
        Ok(())
    }
}

impl From<PeerUser> for Object {
    fn from(peer: PeerUser) -> Self {
        Self::Peer(Peer::User(peer))
    }
}

impl From<PeerChat> for Object {
    fn from(peer: PeerChat) -> Self {
        Self::Peer(Peer::Chat(peer))
    }
}

impl From<PeerChannel> for Object {
    fn from(peer: PeerChannel) -> Self {
        Self::Peer(Peer::Channel(peer))
    }
}

impl TryFrom<Object> for Peer {
    type Error = Object;

    fn try_from(object: Object) -> std::result::Result<Self, Object> {
        match object {
            Object::Peer(peer) => Ok(peer),
            other => Err(other),
        }
    }
}
