//! Yunhu platform binding for the unimsg transcoding core.
//!
//! [`YunhuMessageBuilder`] turns native Yunhu elements into canonical
//! segments; [`YunhuMessageExporter`] turns canonical segments back into
//! native form and drives send/recall/edit through the [`YunhuBot`]
//! connection trait, which the host transport implements.

pub mod adapter;
pub mod bot;
pub mod builder;
pub mod event;
pub mod exporter;
pub mod message;
pub mod model;

pub use {
    adapter::YunhuAdapter,
    bot::YunhuBot,
    builder::YunhuMessageBuilder,
    event::{ChatType, EventHeader, MessageBody, MessageEvent, NoticeEvent, YunhuEvent},
    exporter::YunhuMessageExporter,
    message::{MediaContent, Message, MessageSegment},
    model::{ButtonBody, Chat, MessageInfo, ReplyInfo, SendMsgData, SendMsgResponse, Sender},
};
