use std::fmt;

use async_trait::async_trait;

pub mod input;
pub mod packet_listener;

#[derive(Debug)]
pub enum ListenerError {
    Io(std::io::Error),
}

impl std::error::Error for ListenerError {}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<std::io::Error> for ListenerError {
    fn from(e: std::io::Error) -> Self {
        ListenerError::Io(e)
    }
}

#[async_trait]
pub trait Listener {
    type Config;

    fn new(config: Self::Config) -> Result<Self, ListenerError> where Self: std::marker::Sized;
    async fn listen(&mut self) -> Result<(), ListenerError>;
}
