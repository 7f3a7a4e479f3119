//! Messages and message lists.
//!
//! `message` uses a flags word: each optional field is present on the wire
//! only when its bit is set, and boolean flags have no body at all.

use tlwire_proto::{Constructor, Cursor, ObjectReader, Result, Serializable, Writer};

use crate::{MessageEntity, Object, Peer};

const FLAG_OUT: u32 = 1 << 1;
const FLAG_ENTITIES: u32 = 1 << 7;
const FLAG_FROM_ID: u32 = 1 << 8;
const FLAG_VIEWS: u32 = 1 << 10;
const FLAG_SILENT: u32 = 1 << 13;

const FLAG_EMPTY_PEER_ID: u32 = 1 << 0;

/// A text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sent by the current user
    pub out: bool,
    /// Sent without notification
    pub silent: bool,
    /// Message identifier within the chat
    pub id: i32,
    /// Sender, absent for channel posts
    pub from_id: Option<Peer>,
    /// Chat the message belongs to
    pub peer_id: Peer,
    /// Unix timestamp
    pub date: i32,
    /// Text
    pub message: String,
    /// Formatting of `message`
    pub entities: Option<Vec<MessageEntity>>,
    /// View counter, channels only
    pub views: Option<i32>,
}

impl Message {
    fn flags(&self) -> u32 {
        let mut flags = 0;
        if self.out {
            flags |= FLAG_OUT;
        }
        if self.silent {
            flags |= FLAG_SILENT;
        }
        if self.from_id.is_some() {
            flags |= FLAG_FROM_ID;
        }
        if self.entities.is_some() {
            flags |= FLAG_ENTITIES;
        }
        if self.views.is_some() {
            flags |= FLAG_VIEWS;
        }
        flags
    }
}

impl Constructor<Object> for Message {
    const ID: u32 = 0x9434_5242;
    const NAME: &'static str = "message";

    fn populate(cursor: &mut Cursor, objects: &mut ObjectReader<'_, Object>) -> Result<Self> {
        let flags = cursor.read_u32()?;
        let id = cursor.read_i32()?;
        let from_id =
            if flags & FLAG_FROM_ID != 0 { Some(objects.read_typed(cursor)?) } else { None };
        let peer_id = objects.read_typed(cursor)?;
        let date = cursor.read_i32()?;
        let message = cursor.read_string()?;
        let entities = if flags & FLAG_ENTITIES != 0 {
            Some(objects.read_typed_vector(cursor)?)
        } else {
            None
        };
        let views = if flags & FLAG_VIEWS != 0 { Some(cursor.read_i32()?) } else { None };

        Ok(Self {
            out: flags & FLAG_OUT != 0,
            silent: flags & FLAG_SILENT != 0,
            id,
            from_id,
            peer_id,
            date,
            message,
            entities,
            views,
        })
    }
}

impl Serializable for Message {
    fn serialize(&self, writer: &mut Writer) -> Result<()> {
        writer.write_u32(Self::ID);
        writer.write_u32(self.flags());
        writer.write_i32(self.id);
        if let Some(from_id) = &self.from_id {
            from_id.serialize(writer)?;
        }
        self.peer_id.serialize(writer)?;
        writer.write_i32(self.date);
        writer.write_string(&self.message)?;
        if let Some(entities) = &self.entities {
            writer.write_vector(entities, |w, e| e.serialize(w))?;
        }
        if let Some(views) = self.views {
            writer.write_i32(views);
        }
        Ok(())
    }
}

/// Placeholder for a deleted or inaccessible message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageEmpty {
    /// Message identifier
    pub id: i32,
    /// Chat, if known
    pub peer_id: Option<Peer>,
}

impl Constructor<Object> for MessageEmpty {
    const ID: u32 = 0x90a6_ca84;
    const NAME: &'static str = "messageEmpty";

    fn populate(cursor: &mut Cursor, objects: &mut ObjectReader<'_, Object>) -> Result<Self> {
        let flags = cursor.read_u32()?;
        let id = cursor.read_i32()?;
        let peer_id =
            if flags & FLAG_EMPTY_PEER_ID != 0 { Some(objects.read_typed(cursor)?) } else { None };
        Ok(Self { id, peer_id })
    }
}

impl Serializable for MessageEmpty {
    fn serialize(&self, writer: &mut Writer) -> Result<()> {
        writer.write_u32(Self::ID);
        writer.write_u32(if self.peer_id.is_some() { FLAG_EMPTY_PEER_ID } else { 0 });
        writer.write_i32(self.id);
        if let Some(peer_id) = &self.peer_id {
            peer_id.serialize(writer)?;
        }
        Ok(())
    }
}

/// Any message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyMessage {
    /// Regular message
    Message(Box<Message>),
    /// Deleted or inaccessible
    Empty(MessageEmpty),
}

impl AnyMessage {
    /// Message identifier.
    pub fn id(&self) -> i32 {
        match self {
            Self::Message(m) => m.id,
            Self::Empty(m) => m.id,
        }
    }
}

impl Serializable for AnyMessage {
    fn serialize(&self, writer: &mut Writer) -> Result<()> {
        match self {
            Self::Message(m) => m.serialize(writer),
            Self::Empty(m) => m.serialize(writer),
        }
    }
}

impl From<Message> for Object {
    fn from(message: Message) -> Self {
        Self::Message(AnyMessage::Message(Box::new(message)))
    }
}

impl From<MessageEmpty> for Object {
    fn from(message: MessageEmpty) -> Self {
        Self::Message(AnyMessage::Empty(message))
    }
}

impl TryFrom<Object> for AnyMessage {
    type Error = Object;

    fn try_from(object: Object) -> std::result::Result<Self, Object> {
        match object {
            Object::Message(message) => Ok(message),
            other => Err(other),
        }
    }
}

/// A page of messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Messages in the page, newest first
    pub messages: Vec<AnyMessage>,
}

impl Constructor<Object> for Messages {
    const ID: u32 = 0x8c71_8e87;
    const NAME: &'static str = "messages.messages";

    fn populate(cursor: &mut Cursor, objects: &mut ObjectReader<'_, Object>) -> Result<Self> {
        Ok(Self { messages: objects.read_typed_vector(cursor)? })
    }
}

impl Serializable for Messages {
    fn serialize(&self, writer: &mut Writer) -> Result<()> {
        writer.write_u32(Self::ID);
        writer.write_vector(&self.messages, |w, m| m.serialize(w))
    }
}

impl From<Messages> for Object {
    fn from(messages: Messages) -> Self {
        Self::Messages(messages)
    }
}
