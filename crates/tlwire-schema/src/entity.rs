//! Message entities: formatting spans over a message's text.
//!
//! Offsets and lengths count UTF-16 code units, as the text layer that
//! produces them does.

use tlwire_proto::{Constructor, Cursor, ObjectReader, Result, Serializable, Writer};

use crate::Object;

macro_rules! span_entities {
    ($( $(#[$meta:meta])* $variant:ident($name:ident) = $id:literal, $tl:literal; )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name {
                /// Start of the span
                pub offset: i32,
                /// Length of the span
                pub length: i32,
            }

            impl Constructor<Object> for $name {
                const ID: u32 = $id;
                const NAME: &'static str = $tl;

                fn populate(cursor: &mut Cursor, _: &mut ObjectReader<'_, Object>) -> Result<Self> {
                    let offset = cursor.read_i32()?;
                    let length = cursor.read_i32()?;
                    Ok(Self { offset, length })
                }
            }

            impl Serializable for $name {
                fn serialize(&self, writer: &mut Writer) -> Result<()> {
                    writer.write_u32(Self::ID);
                    writer.write_i32(self.offset);
                    writer.write_i32(self.length);
                    Ok(())
                }
            }

            impl From<$name> for MessageEntity {
                fn from(entity: $name) -> Self {
                    Self::$variant(entity)
                }
            }

            impl From<$name> for Object {
                fn from(entity: $name) -> Self {
                    Self::MessageEntity(entity.into())
                }
            }
        )*
    };
}

span_entities! {
    /// Bold text
    Bold(MessageEntityBold) = 0xbd61_0bc9, "messageEntityBold";
    /// Italic text
    Italic(MessageEntityItalic) = 0x826f_8b60, "messageEntityItalic";
    /// Inline monospace
    Code(MessageEntityCode) = 0x28a2_0571, "messageEntityCode";
    /// Underlined text
    Underline(MessageEntityUnderline) = 0x9c4e_7e8b, "messageEntityUnderline";
    /// Struck-through text
    Strike(MessageEntityStrike) = 0xbf06_93d4, "messageEntityStrike";
    /// Quoted block
    Blockquote(MessageEntityBlockquote) = 0x020d_f5d0, "messageEntityBlockquote";
    /// Email address detected in the text
    Email(MessageEntityEmail) = 0x64e4_75c2, "messageEntityEmail";
    /// URL detected in the text
    Url(MessageEntityUrl) = 0x6ed0_2538, "messageEntityUrl";
}

/// Preformatted block with an optional language hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntityPre {
    /// Start of the span
    pub offset: i32,
    /// Length of the span
    pub length: i32,
    /// Syntax highlighting language, empty if none
    pub language: String,
}

impl Constructor<Object> for MessageEntityPre {
    const ID: u32 = 0x7392_4be0;
    const NAME: &'static str = "messageEntityPre";

    fn populate(cursor: &mut Cursor, _: &mut ObjectReader<'_, Object>) -> Result<Self> {
        let offset = cursor.read_i32()?;
        let length = cursor.read_i32()?;
        let language = cursor.read_string()?;
        Ok(Self { offset, length, language })
    }
}

impl Serializable for MessageEntityPre {
    fn serialize(&self, writer: &mut Writer) -> Result<()> {
        writer.write_u32(Self::ID);
        writer.write_i32(self.offset);
        writer.write_i32(self.length);
        writer.write_string(&self.language)
    }
}

/// Text linking to a URL that differs from the text itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntityTextUrl {
    /// Start of the span
    pub offset: i32,
    /// Length of the span
    pub length: i32,
    /// Link target
    pub url: String,
}

impl Constructor<Object> for MessageEntityTextUrl {
    const ID: u32 = 0x76a6_d327;
    const NAME: &'static str = "messageEntityTextUrl";

    fn populate(cursor: &mut Cursor, _: &mut ObjectReader<'_, Object>) -> Result<Self> {
        let offset = cursor.read_i32()?;
        let length = cursor.read_i32()?;
        let url = cursor.read_string()?;
        Ok(Self { offset, length, url })
    }
}

impl Serializable for MessageEntityTextUrl {
    fn serialize(&self, writer: &mut Writer) -> Result<()> {
        writer.write_u32(Self::ID);
        writer.write_i32(self.offset);
        writer.write_i32(self.length);
        writer.write_string(&self.url)
    }
}

/// Mention of a user who may not have a username
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageEntityMentionName {
    /// Start of the span
    pub offset: i32,
    /// Length of the span
    pub length: i32,
    /// Mentioned user
    pub user_id: i64,
}

impl Constructor<Object> for MessageEntityMentionName {
    const ID: u32 = 0xdc7b_1140;
    const NAME: &'static str = "messageEntityMentionName";

    fn populate(cursor: &mut Cursor, _: &mut ObjectReader<'_, Object>) -> Result<Self> {
        let offset = cursor.read_i32()?;
        let length = cursor.read_i32()?;
        let user_id = cursor.read_i64()?;
        Ok(Self { offset, length, user_id })
    }
}

impl Serializable for MessageEntityMentionName {
    fn serialize(&self, writer: &mut Writer) -> Result<()> {
        writer.write_u32(Self::ID);
        writer.write_i32(self.offset);
        writer.write_i32(self.length);
        writer.write_i64(self.user_id);
        Ok(())
    }
}

impl From<MessageEntityPre> for MessageEntity {
    fn from(entity: MessageEntityPre) -> Self {
        Self::Pre(entity)
    }
}

impl From<MessageEntityPre> for Object {
    fn from(entity: MessageEntityPre) -> Self {
        Self::MessageEntity(entity.into())
    }
}

impl From<MessageEntityTextUrl> for MessageEntity {
    fn from(entity: MessageEntityTextUrl) -> Self {
        Self::TextUrl(entity)
    }
}

impl From<MessageEntityTextUrl> for Object {
    fn from(entity: MessageEntityTextUrl) -> Self {
        Self::MessageEntity(entity.into())
    }
}

impl From<MessageEntityMentionName> for MessageEntity {
    fn from(entity: MessageEntityMentionName) -> Self {
        Self::MentionName(entity)
    }
}

impl From<MessageEntityMentionName> for Object {
    fn from(entity: MessageEntityMentionName) -> Self {
        Self::MessageEntity(entity.into())
    }
}

/// Any message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageEntity {
    /// Bold text
    Bold(MessageEntityBold),
    /// Italic text
    Italic(MessageEntityItalic),
    /// Inline monospace
    Code(MessageEntityCode),
    /// Underlined text
    Underline(MessageEntityUnderline),
    /// Struck-through text
    Strike(MessageEntityStrike),
    /// Quoted block
    Blockquote(MessageEntityBlockquote),
    /// Email address
    Email(MessageEntityEmail),
    /// URL
    Url(MessageEntityUrl),
    /// Preformatted block
    Pre(MessageEntityPre),
    /// Link with custom text
    TextUrl(MessageEntityTextUrl),
    /// User mention by id
    MentionName(MessageEntityMentionName),
}

impl MessageEntity {
    /// Start of the span.
    pub fn offset(&self) -> i32 {
        self.span().0
    }

    /// Length of the span.
    pub fn length(&self) -> i32 {
        self.span().1
    }

    fn span(&self) -> (i32, i32) {
        match self {
            Self::Bold(e) => (e.offset, e.length),
            Self::Italic(e) => (e.offset, e.length),
            Self::Code(e) => (e.offset, e.length),
            Self::Underline(e) => (e.offset, e.length),
            Self::Strike(e) => (e.offset, e.length),
            Self::Blockquote(e) => (e.offset, e.length),
            Self::Email(e) => (e.offset, e.length),
            Self::Url(e) => (e.offset, e.length),
            Self::Pre(e) => (e.offset, e.length),
            Self::TextUrl(e) => (e.offset, e.length),
            Self::MentionName(e) => (e.offset, e.length),
        }
    }
}

impl Serializable for MessageEntity {
    fn serialize(&self, writer: &mut Writer) -> Result<()> {
        match self {
            Self::Bold(e) => e.serialize(writer),
            Self::Italic(e) => e.serialize(writer),
            Self::Code(e) => e.serialize(writer),
            Self::Underline(e) => e.serialize(writer),
            Self::Strike(e) => e.serialize(writer),
            Self::Blockquote(e) => e.serialize(writer),
            Self::Email(e) => e.serialize(writer),
            Self::Url(e) => e.serialize(writer),
            Self::Pre(e) => e.serialize(writer),
            Self::TextUrl(e) => e.serialize(writer),
            Self::MentionName(e) => e.serialize(writer),
        }
    }
}

impl TryFrom<Object> for MessageEntity {
    type Error = Object;

    fn try_from(object: Object) -> std::result::Result<Self, Object> {
        match object {
            Object::MessageEntity(entity) => Ok(entity),
            other => Err(other),
        }
    }
}
