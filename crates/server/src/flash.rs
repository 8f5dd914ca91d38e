// Copyright 2025 Alexandre D. Díaz
use actix_session::Session;
use serde::{Deserialize, Serialize};

static FLASH_KEY: &str = "_flashes";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FlashMessage {
    pub level: Level,
    pub message: String,
}

/// Queues a message for the next page rendered with this session, be it the
/// current response or the one after a redirect.
pub fn flash(session: &Session, level: Level, message: &str) {
    let mut flashes = session
        .get::<Vec<FlashMessage>>(FLASH_KEY)
        .unwrap_or_else(|err| {
            log::warn!("discarding unreadable flash messages: {err}");
            None
        })
        .unwrap_or_default();
    flashes.push(FlashMessage {
        level,
        message: message.to_string(),
    });
    if let Err(err) = session.insert(FLASH_KEY, flashes) {
        log::warn!("can't store flash message '{message}': {err}");
    }
}

pub fn take_flashes(session: &Session) -> Vec<FlashMessage> {
    match session.remove_as::<Vec<FlashMessage>>(FLASH_KEY) {
        Some(Ok(flashes)) => flashes,
        Some(Err(raw)) => {
            log::warn!("discarding unreadable flash messages: {raw}");
            Vec::new()
        }
        None => Vec::new(),
    }
}
