use crate::{Error, ErrorContext};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static USERNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@[a-zA-Z0-9_]{5,32}$").expect("static username pattern")
});

/// Target chat: a numeric identifier or a public `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl ChatId {
    /// Parse a numeric id (`-1001234`) or an `@username`.
    pub fn parse(value: &str) -> Result<Self, Error> {
        if let Ok(id) = value.parse::<i64>() {
            return Ok(ChatId::Id(id));
        }
        if USERNAME.is_match(value) {
            return Ok(ChatId::Username(value.to_string()));
        }
        Err(Error::InvalidArgument {
            message: "Chat id must be an integer or a username starting with @".into(),
            context: ErrorContext::new().with_source("chat_id"),
        })
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            ChatId::Id(id) => Some(*id),
            ChatId::Username(_) => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            ChatId::Id(_) => None,
            ChatId::Username(name) => Some(name),
        }
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{}", id),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl FromStr for ChatId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChatId::parse(s)
    }
}

impl TryFrom<&str> for ChatId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ChatId::parse(value)
    }
}

impl TryFrom<String> for ChatId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ChatId::parse(&value)
    }
}

impl Serialize for ChatId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChatId::Id(id) => serializer.serialize_i64(*id),
            ChatId::Username(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for ChatId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Id(id) => Ok(ChatId::Id(id)),
            Raw::Text(text) => ChatId::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}
